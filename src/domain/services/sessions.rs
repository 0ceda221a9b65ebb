#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use chrono::Local;
use chrono::SecondsFormat;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Session;
use crate::domain::models::User;

/// Reads and writes the session YAML file. A missing file is an anonymous
/// session with default preferences.
pub struct SessionStore {
    pub file_path: path::PathBuf,
}

impl Default for SessionStore {
    fn default() -> SessionStore {
        return SessionStore::new(path::PathBuf::from(Config::get(ConfigKey::SessionFile)));
    }
}

impl SessionStore {
    pub fn new(file_path: path::PathBuf) -> SessionStore {
        return SessionStore { file_path };
    }

    pub async fn load(&self) -> Result<Session> {
        if !self.file_path.exists() {
            return Ok(Session::default());
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        let session: Session = serde_yaml::from_str(&payload)?;

        return Ok(session);
    }

    pub async fn save(&self, session: &Session) -> Result<()> {
        let mut session = session.clone();
        session.version = env!("CARGO_PKG_VERSION").to_string();
        session.timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);

        let payload = serde_yaml::to_string(&session)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        tracing::debug!(path = ?self.file_path, "Saved session");

        return Ok(());
    }

    /// Stores the bearer token together with the user it belongs to.
    pub async fn set_login(&self, token: &str, user: &User) -> Result<Session> {
        let mut session = self.load().await?;
        session.token = Some(token.to_string());
        session.user = Some(user.clone());
        self.save(&session).await?;

        return Ok(session);
    }

    pub async fn set_user(&self, user: &User) -> Result<Session> {
        let mut session = self.load().await?;
        session.user = Some(user.clone());
        self.save(&session).await?;

        return Ok(session);
    }

    pub async fn set_dark_mode(&self, dark_mode: bool) -> Result<Session> {
        let mut session = self.load().await?;
        session.dark_mode = dark_mode;
        self.save(&session).await?;

        return Ok(session);
    }

    /// Forgets the token and cached user. Preferences survive a logout.
    pub async fn clear(&self) -> Result<Session> {
        let mut session = self.load().await?;
        session.token = None;
        session.user = None;
        self.save(&session).await?;

        return Ok(session);
    }
}
