mod author;
mod backend;
mod confirm;
mod course;
mod error;
mod event;
mod exchange;
mod major;
mod message;
mod notification;
mod program;
mod recommendation;
mod session;
mod user;

pub use author::*;
pub use backend::*;
pub use confirm::*;
pub use course::*;
pub use error::*;
pub use event::*;
pub use exchange::*;
pub use major::*;
pub use message::*;
pub use notification::*;
pub use program::*;
pub use recommendation::*;
pub use session::*;
pub use user::*;
