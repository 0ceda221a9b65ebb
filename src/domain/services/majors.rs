#[cfg(test)]
#[path = "majors_test.rs"]
mod tests;

use super::Notifications;
use crate::domain::models::Confirm;
use crate::domain::models::GradPathError;
use crate::domain::models::Major;
use crate::domain::models::MajorBackendBox;

pub struct MajorManager {
    /// Names offered by the server, sorted. Empty until `load_available`.
    pub available: Vec<String>,
    pub majors: Vec<Major>,
    backend: MajorBackendBox,
    notifications: Notifications,
}

impl MajorManager {
    pub fn new(backend: MajorBackendBox, notifications: Notifications) -> MajorManager {
        return MajorManager {
            available: vec![],
            majors: vec![],
            backend,
            notifications,
        };
    }

    fn reject(&self, message: &str) -> GradPathError {
        self.notifications.error(message);
        return GradPathError::validation(message);
    }

    pub async fn load_available(&mut self) -> Result<&[String], GradPathError> {
        match self.backend.available_majors().await {
            Ok(available) => {
                self.available = available;
                return Ok(&self.available);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load available majors");
                self.notifications.error("Failed to load available majors");
                return Err(err);
            }
        }
    }

    pub async fn load(&mut self) -> Result<&[Major], GradPathError> {
        match self.backend.list_majors().await {
            Ok(majors) => {
                self.majors = majors;
                return Ok(&self.majors);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load majors");
                self.notifications.error("Failed to load majors");
                return Err(err);
            }
        }
    }

    pub async fn add(&mut self, name: &str) -> Result<Major, GradPathError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject("Please select a major"));
        }
        if self.majors.iter().any(|major| return major.name == name) {
            return Err(self.reject("This major is already added"));
        }
        if !self.available.is_empty() && !self.available.iter().any(|e| return e == name) {
            return Err(self.reject(&format!("{name} is not an available major")));
        }

        match self.backend.add_major(name).await {
            Ok(major) => {
                self.majors.push(major.clone());
                self.notifications.success("Major added successfully");
                return Ok(major);
            }
            Err(err) => {
                tracing::error!(error = ?err, name, "Failed to add major");
                self.notifications.error("Failed to add major");
                return Err(err);
            }
        }
    }

    pub async fn remove(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool, GradPathError> {
        let major = match self.majors.iter().find(|major| return major.id == id) {
            Some(major) => major,
            None => return Err(self.reject(&format!("No major with id {id}"))),
        };
        let prompt = format!("Are you sure you want to remove {}?", major.name);
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }

        match self.backend.remove_major(id).await {
            Ok(()) => {
                self.majors.retain(|major| return major.id != id);
                self.notifications.success("Major removed successfully");
                return Ok(true);
            }
            Err(err) => {
                tracing::error!(error = ?err, id, "Failed to remove major");
                self.notifications.error("Failed to remove major");
                return Err(err);
            }
        }
    }
}
