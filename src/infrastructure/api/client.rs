#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::time::Duration;

use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthFailure;
use crate::domain::models::GradPathError;

#[derive(Default, Debug, Clone, Deserialize)]
struct ErrorResponse {
    detail: Option<Value>,
}

/// Pulls the human readable `detail` out of an error body, falling back to the
/// raw body.
pub fn error_detail(body: &str) -> String {
    if let Ok(res) = serde_json::from_str::<ErrorResponse>(body) {
        match res.detail {
            Some(Value::String(detail)) => return detail,
            Some(detail) => return detail.to_string(),
            None => (),
        }
    }

    return body.trim().to_string();
}

fn status_error(status: StatusCode, body: &str) -> GradPathError {
    let detail = error_detail(body);
    if status == StatusCode::UNAUTHORIZED {
        return GradPathError::Auth(AuthFailure::from_response(status.as_u16(), &detail));
    }

    if detail.is_empty() {
        return GradPathError::Transport(format!("status {}", status.as_u16()));
    }

    return GradPathError::Transport(format!("status {}: {detail}", status.as_u16()));
}

/// HTTP client for the GradPath API. Attaches the bearer token to every
/// request once one is known.
#[derive(Clone, Debug)]
pub struct ApiClient {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> ApiClient {
        return ApiClient::new(
            &Config::get(ConfigKey::ApiURL),
            None,
            Config::get_duration(ConfigKey::RequestTimeout),
        );
    }
}

impl ApiClient {
    pub fn new(url: &str, token: Option<String>, timeout: Duration) -> ApiClient {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        return ApiClient {
            url: url.trim_end_matches('/').to_string(),
            token,
            client,
        };
    }

    pub fn with_token(&self, token: &str) -> ApiClient {
        let mut api = self.clone();
        api.token = Some(token.to_string());
        return api;
    }

    pub fn token(&self) -> Option<&str> {
        return self.token.as_deref();
    }

    pub fn endpoint(&self, path: &str) -> String {
        return format!("{url}/api{path}", url = self.url);
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.endpoint(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        return req;
    }

    /// Sends the request and returns the status and body without judging the
    /// status. Only transport failures are errors here.
    pub(super) async fn send_raw(
        &self,
        req: RequestBuilder,
    ) -> Result<(StatusCode, String), GradPathError> {
        let res = req.send().await.map_err(|err| {
            tracing::error!(error = ?err, "Failed to reach the GradPath API");
            return GradPathError::from(err);
        })?;

        let status = res.status();
        let body = res.text().await?;

        return Ok((status, body));
    }

    pub(super) async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, GradPathError> {
        let (status, body) = self.send_raw(req).await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "API request failed");
            return Err(status_error(status, &body));
        }

        tracing::debug!(body = %body, "API response");
        let res = serde_json::from_str::<T>(&body).map_err(|err| {
            tracing::error!(error = ?err, body = %body, "Unexpected API response shape");
            return GradPathError::from(err);
        })?;

        return Ok(res);
    }

    pub(super) async fn send_empty(&self, req: RequestBuilder) -> Result<(), GradPathError> {
        let (status, body) = self.send_raw(req).await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "API request failed");
            return Err(status_error(status, &body));
        }

        return Ok(());
    }
}
