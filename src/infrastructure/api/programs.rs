#[cfg(test)]
#[path = "programs_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use crate::domain::models::GradPathError;
use crate::domain::models::Program;
use crate::domain::models::ProgramBackend;
use crate::domain::models::ProgramProgress;
use crate::domain::models::ProgramRequest;
use crate::domain::models::ProgramTemplate;

fn encode_segment(segment: &str) -> String {
    let mut url = match reqwest::Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return segment.to_string(),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(segment);
    }

    return url.path().trim_start_matches('/').to_string();
}

#[async_trait]
impl ProgramBackend for ApiClient {
    #[allow(clippy::implicit_return)]
    async fn program_templates(&self) -> Result<Vec<ProgramTemplate>, GradPathError> {
        return self
            .send_json(self.request(Method::GET, "/programs/templates"))
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn list_programs(&self) -> Result<Vec<Program>, GradPathError> {
        return self.send_json(self.request(Method::GET, "/programs/")).await;
    }

    #[allow(clippy::implicit_return)]
    async fn assign_program(&self, template_id: &str) -> Result<Program, GradPathError> {
        let path = format!("/programs/templates/{}/assign", encode_segment(template_id));
        return self.send_json(self.request(Method::POST, &path)).await;
    }

    #[allow(clippy::implicit_return)]
    async fn create_program(&self, request: &ProgramRequest) -> Result<Program, GradPathError> {
        return self
            .send_json(self.request(Method::POST, "/programs/").json(request))
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn update_program(
        &self,
        program_name: &str,
        request: &ProgramRequest,
    ) -> Result<Program, GradPathError> {
        let path = format!("/programs/{}", encode_segment(program_name));
        return self
            .send_json(self.request(Method::PUT, &path).json(request))
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn remove_program(&self, program_name: &str) -> Result<(), GradPathError> {
        let path = format!("/programs/{}", encode_segment(program_name));
        return self.send_empty(self.request(Method::DELETE, &path)).await;
    }

    #[allow(clippy::implicit_return)]
    async fn program_progress(&self) -> Result<ProgramProgress, GradPathError> {
        return self
            .send_json(self.request(Method::GET, "/programs/progress"))
            .await;
    }
}
