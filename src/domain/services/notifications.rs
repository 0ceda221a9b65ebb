#[cfg(test)]
#[path = "notifications_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Notification;

/// The single transient notice shown to the user. Cloning shares the same slot,
/// so managers and the chat view can all post to it. A newer notice replaces
/// the older one, and a notice disappears once it is older than `duration`.
#[derive(Clone, Debug)]
pub struct Notifications {
    current: Arc<Mutex<Option<Notification>>>,
    duration: Duration,
}

impl Default for Notifications {
    fn default() -> Notifications {
        return Notifications::new(Config::get_duration(ConfigKey::NotificationDuration));
    }
}

impl Notifications {
    pub fn new(duration: Duration) -> Notifications {
        return Notifications {
            current: Arc::new(Mutex::new(None)),
            duration,
        };
    }

    fn slot(&self) -> MutexGuard<'_, Option<Notification>> {
        match self.current.lock() {
            Ok(guard) => return guard,
            Err(poisoned) => return poisoned.into_inner(),
        }
    }

    pub fn show(&self, message: &str, is_success: bool) {
        if is_success {
            tracing::info!(notice = message, "Notification");
        } else {
            tracing::warn!(notice = message, "Notification");
        }

        *self.slot() = Some(Notification::new(message, is_success));
    }

    pub fn success(&self, message: &str) {
        self.show(message, true);
    }

    pub fn error(&self, message: &str) {
        self.show(message, false);
    }

    fn drop_expired(&self, slot: &mut Option<Notification>) {
        if let Some(notification) = slot.as_ref() {
            if notification.is_expired(self.duration) {
                *slot = None;
            }
        }
    }

    /// Returns the visible notice, dropping it first if it has expired.
    pub fn current(&self) -> Option<Notification> {
        let mut slot = self.slot();
        self.drop_expired(&mut slot);

        return slot.clone();
    }

    /// Returns the visible notice and clears it, so it is only printed once.
    pub fn take(&self) -> Option<Notification> {
        let mut slot = self.slot();
        self.drop_expired(&mut slot);

        return slot.take();
    }

    pub fn dismiss(&self) {
        *self.slot() = None;
    }
}
