#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use reqwest::Method;
use reqwest::RequestBuilder;

use super::client::error_detail;
use super::ApiClient;
use crate::domain::models::AuthFailure;
use crate::domain::models::GradPathError;
use crate::domain::models::Registration;
use crate::domain::models::Token;
use crate::domain::models::User;

impl ApiClient {
    async fn exchange_token(&self, req: RequestBuilder) -> Result<Token, GradPathError> {
        let (status, body) = self.send_raw(req).await?;
        if !status.is_success() {
            let detail = error_detail(&body);
            tracing::warn!(status = status.as_u16(), detail = %detail, "Authentication rejected");

            if status.is_server_error() {
                return Err(GradPathError::Transport(format!(
                    "status {}: {detail}",
                    status.as_u16()
                )));
            }
            return Err(GradPathError::Auth(AuthFailure::from_response(
                status.as_u16(),
                &detail,
            )));
        }

        let token: Token = serde_json::from_str(&body)?;
        return Ok(token);
    }

    /// Exchanges a username and password for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, GradPathError> {
        let form = [("username", username), ("password", password)];
        return self
            .exchange_token(self.request(Method::POST, "/token").form(&form))
            .await;
    }

    pub async fn register(&self, registration: &Registration) -> Result<Token, GradPathError> {
        let form = [
            ("username", registration.username.as_str()),
            ("email", registration.email.as_str()),
            ("password", registration.password.as_str()),
            ("major", registration.major.as_str()),
        ];

        return self
            .exchange_token(self.request(Method::POST, "/register").form(&form))
            .await;
    }

    pub async fn current_user(&self) -> Result<User, GradPathError> {
        return self.send_json(self.request(Method::GET, "/users/me")).await;
    }
}
