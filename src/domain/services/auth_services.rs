#[cfg(test)]
#[path = "auth_services_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::SessionStore;
use crate::domain::models::AuthFailure;
use crate::domain::models::GradPathError;
use crate::domain::models::Registration;
use crate::domain::models::Token;
use crate::domain::models::User;
use crate::infrastructure::api::ApiClient;

/// Token based login against the GradPath API. The bearer token and the
/// current user are kept in the session file between runs.
pub struct AuthService {
    api: ApiClient,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(api: ApiClient, sessions: SessionStore) -> AuthService {
        return AuthService { api, sessions };
    }

    /// Keeps the token only once the user it belongs to has been fetched.
    async fn store_token(&self, token: Token) -> Result<User> {
        let user = self
            .api
            .with_token(&token.access_token)
            .current_user()
            .await?;
        self.sessions.set_login(&token.access_token, &user).await?;
        tracing::info!(username = %user.username, "Logged in");

        return Ok(user);
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(GradPathError::validation("Username and password are required").into());
        }

        let token = self.api.login(username, password).await?;
        return self.store_token(token).await;
    }

    pub async fn register(&self, registration: &Registration) -> Result<User> {
        if registration.username.trim().is_empty() {
            return Err(GradPathError::validation("Username is required").into());
        }
        if registration.email.trim().is_empty() {
            return Err(GradPathError::validation("Email is required").into());
        }
        if registration.password.is_empty() {
            return Err(GradPathError::validation("Password is required").into());
        }

        let token = self.api.register(registration).await?;
        return self.store_token(token).await;
    }

    pub async fn logout(&self) -> Result<()> {
        self.sessions.clear().await?;
        tracing::info!("Logged out");

        return Ok(());
    }

    /// Client carrying the stored bearer token.
    pub async fn client(&self) -> Result<ApiClient> {
        let session = self.sessions.load().await?;
        if !session.is_authenticated() {
            bail!("You are not logged in. Run `gradpath login` first.");
        }

        let token = session.token.unwrap_or_default();
        return Ok(self.api.with_token(&token));
    }

    /// Fetches the current user and refreshes the cached copy. An expired
    /// token is forgotten so the next command asks for a login.
    pub async fn refresh_user(&self) -> Result<User> {
        let api = self.client().await?;
        match api.current_user().await {
            Ok(user) => {
                self.sessions.set_user(&user).await?;
                return Ok(user);
            }
            Err(GradPathError::Auth(failure)) => {
                tracing::warn!(failure = ?failure, "Stored token was rejected");
                self.sessions.clear().await?;
                return Err(GradPathError::Auth(AuthFailure::SessionExpired).into());
            }
            Err(err) => return Err(err.into()),
        }
    }
}
