pub mod api;
pub mod prompts;
