use std::time::Duration;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub is_success: bool,
    shown_at: Instant,
}

impl Notification {
    pub fn new(message: &str, is_success: bool) -> Notification {
        return Notification {
            message: message.to_string(),
            is_success,
            shown_at: Instant::now(),
        };
    }

    pub fn is_expired(&self, duration: Duration) -> bool {
        return self.shown_at.elapsed() >= duration;
    }
}
