#[cfg(test)]
#[path = "courses_test.rs"]
mod tests;

use super::Notifications;
use crate::domain::models::Confirm;
use crate::domain::models::Course;
use crate::domain::models::CourseBackendBox;
use crate::domain::models::CourseInput;
use crate::domain::models::GradPathError;
use crate::domain::models::MessageContent;

/// The user's completed courses. The local list only changes after the server
/// has accepted a change, and every outcome is posted as a notification.
pub struct CourseManager {
    pub courses: Vec<Course>,
    backend: CourseBackendBox,
    notifications: Notifications,
}

impl CourseManager {
    pub fn new(backend: CourseBackendBox, notifications: Notifications) -> CourseManager {
        return CourseManager {
            courses: vec![],
            backend,
            notifications,
        };
    }

    fn position(&self, id: i64) -> Result<usize, GradPathError> {
        let idx = self.courses.iter().position(|course| return course.id == id);
        if let Some(idx) = idx {
            return Ok(idx);
        }

        let err = GradPathError::validation(format!("No course with id {id}"));
        self.notifications.error(&err.to_string());
        return Err(err);
    }

    pub async fn load(&mut self) -> Result<&[Course], GradPathError> {
        match self.backend.list_courses().await {
            Ok(courses) => {
                self.courses = courses;
                return Ok(&self.courses);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load courses");
                self.notifications.error("Failed to load courses");
                return Err(err);
            }
        }
    }

    pub async fn add(&mut self, input: &CourseInput) -> Result<Course, GradPathError> {
        let input = input.normalize();
        if let Err(err) = input.validate() {
            self.notifications.error(&err.to_string());
            return Err(err);
        }

        match self.backend.add_course(&input).await {
            Ok(course) => {
                self.courses.push(course.clone());
                self.notifications.success("Course added successfully");
                return Ok(course);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to add course");
                self.notifications.error("Failed to add course");
                return Err(err);
            }
        }
    }

    /// Replaces the whole record. The server's copy takes the old record's
    /// place in the list.
    pub async fn update(&mut self, id: i64, input: &CourseInput) -> Result<Course, GradPathError> {
        let idx = self.position(id)?;
        let input = input.normalize();
        if let Err(err) = input.validate() {
            self.notifications.error(&err.to_string());
            return Err(err);
        }

        match self.backend.update_course(id, &input).await {
            Ok(course) => {
                self.courses[idx] = course.clone();
                self.notifications.success("Course updated successfully");
                return Ok(course);
            }
            Err(err) => {
                tracing::error!(error = ?err, id, "Failed to update course");
                self.notifications.error("Failed to update course");
                return Err(err);
            }
        }
    }

    /// Returns `Ok(false)` when the user declines, in which case nothing is
    /// sent.
    pub async fn remove(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool, GradPathError> {
        let idx = self.position(id)?;
        let course = &self.courses[idx];
        let prompt = format!(
            "Are you sure you want to remove {} {}?",
            course.code(),
            course.name
        );
        if !confirm.confirm(prompt.trim()) {
            return Ok(false);
        }

        match self.backend.remove_course(id).await {
            Ok(()) => {
                self.courses.retain(|course| return course.id != id);
                self.notifications.success("Course removed successfully");
                return Ok(true);
            }
            Err(err) => {
                tracing::error!(error = ?err, id, "Failed to remove course");
                self.notifications.error("Failed to remove course");
                return Err(err);
            }
        }
    }

    /// Asks the advisor for recommendations from the completed courses.
    pub async fn recommendations(&self) -> Result<MessageContent, GradPathError> {
        match self.backend.recommendations().await {
            Ok(content) => return Ok(content),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to get recommendations");
                self.notifications.error("Failed to get recommendations");
                return Err(err);
            }
        }
    }
}
