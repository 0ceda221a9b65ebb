use std::sync::Arc;

use async_trait::async_trait;

use super::AdvisingReply;
use super::Course;
use super::CourseInput;
use super::GradPathError;
use super::Major;
use super::MessageContent;
use super::PendingStatus;
use super::Program;
use super::ProgramProgress;
use super::ProgramRequest;
use super::ProgramTemplate;

pub type AdvisingBackendBox = Arc<dyn AdvisingBackend + Send + Sync>;
pub type CourseBackendBox = Arc<dyn CourseBackend + Send + Sync>;
pub type MajorBackendBox = Arc<dyn MajorBackend + Send + Sync>;
pub type ProgramBackendBox = Arc<dyn ProgramBackend + Send + Sync>;

#[async_trait]
pub trait AdvisingBackend {
    /// Submits a question to the advisor. The reply is either the final answer,
    /// or an acknowledgment flagged with `processing` when the answer is still
    /// being computed.
    async fn send_message(&self, message: &str) -> Result<AdvisingReply, GradPathError>;

    /// Checks whether the answer to the last acknowledged question is ready.
    async fn check_pending(&self) -> Result<PendingStatus, GradPathError>;
}

#[async_trait]
pub trait CourseBackend {
    async fn list_courses(&self) -> Result<Vec<Course>, GradPathError>;

    /// Returns the stored record, including its server assigned id.
    async fn add_course(&self, input: &CourseInput) -> Result<Course, GradPathError>;

    async fn update_course(&self, id: i64, input: &CourseInput) -> Result<Course, GradPathError>;

    async fn remove_course(&self, id: i64) -> Result<(), GradPathError>;

    /// One-shot recommendations from the completed courses, outside of a chat.
    async fn recommendations(&self) -> Result<MessageContent, GradPathError>;
}

#[async_trait]
pub trait MajorBackend {
    /// Names of every major a user can pick from.
    async fn available_majors(&self) -> Result<Vec<String>, GradPathError>;

    async fn list_majors(&self) -> Result<Vec<Major>, GradPathError>;

    async fn add_major(&self, name: &str) -> Result<Major, GradPathError>;

    async fn remove_major(&self, id: i64) -> Result<(), GradPathError>;
}

#[async_trait]
pub trait ProgramBackend {
    async fn program_templates(&self) -> Result<Vec<ProgramTemplate>, GradPathError>;

    async fn list_programs(&self) -> Result<Vec<Program>, GradPathError>;

    /// Instantiates a program from a template id.
    async fn assign_program(&self, template_id: &str) -> Result<Program, GradPathError>;

    async fn create_program(&self, request: &ProgramRequest) -> Result<Program, GradPathError>;

    async fn update_program(
        &self,
        program_name: &str,
        request: &ProgramRequest,
    ) -> Result<Program, GradPathError>;

    /// Programs are removed by name, not by id.
    async fn remove_program(&self, program_name: &str) -> Result<(), GradPathError>;

    async fn program_progress(&self) -> Result<ProgramProgress, GradPathError>;
}
