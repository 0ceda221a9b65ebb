#[cfg(test)]
#[path = "majors_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use crate::domain::models::GradPathError;
use crate::domain::models::Major;
use crate::domain::models::MajorBackend;
use crate::domain::models::MajorRequest;

#[async_trait]
impl MajorBackend for ApiClient {
    #[allow(clippy::implicit_return)]
    async fn available_majors(&self) -> Result<Vec<String>, GradPathError> {
        let mut majors: Vec<String> = self
            .send_json(self.request(Method::GET, "/majors/available"))
            .await?;

        majors.sort();
        return Ok(majors);
    }

    #[allow(clippy::implicit_return)]
    async fn list_majors(&self) -> Result<Vec<Major>, GradPathError> {
        return self.send_json(self.request(Method::GET, "/majors/me")).await;
    }

    #[allow(clippy::implicit_return)]
    async fn add_major(&self, name: &str) -> Result<Major, GradPathError> {
        let req = MajorRequest {
            name: name.to_string(),
        };

        return self
            .send_json(self.request(Method::POST, "/majors").json(&req))
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn remove_major(&self, id: i64) -> Result<(), GradPathError> {
        return self
            .send_empty(self.request(Method::DELETE, &format!("/majors/{id}")))
            .await;
    }
}
