#[cfg(test)]
#[path = "advising_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use crate::domain::models::AdvisingBackend;
use crate::domain::models::AdvisingReply;
use crate::domain::models::AdvisingRequest;
use crate::domain::models::GradPathError;
use crate::domain::models::PendingStatus;

#[async_trait]
impl AdvisingBackend for ApiClient {
    #[allow(clippy::implicit_return)]
    async fn send_message(&self, message: &str) -> Result<AdvisingReply, GradPathError> {
        let req = AdvisingRequest {
            message: message.to_string(),
        };

        let res: AdvisingReply = self
            .send_json(self.request(Method::POST, "/advising").json(&req))
            .await?;

        tracing::debug!(processing = res.is_processing(), "Advising reply");
        return Ok(res);
    }

    #[allow(clippy::implicit_return)]
    async fn check_pending(&self) -> Result<PendingStatus, GradPathError> {
        return self
            .send_json(self.request(Method::GET, "/advising/pending"))
            .await;
    }
}
