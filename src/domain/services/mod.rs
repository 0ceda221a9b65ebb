mod app_state;
mod auth_services;
mod courses;
mod exchange;
mod majors;
mod notifications;
mod programs;
pub mod rendering;
mod sessions;

pub use app_state::*;
pub use auth_services::*;
pub use courses::*;
pub use exchange::*;
pub use majors::*;
pub use notifications::*;
pub use programs::*;
pub use sessions::*;
