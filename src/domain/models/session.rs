use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::User;

/// Client state persisted between runs: the bearer token, the last known user
/// and the dark mode preference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub version: String,
    pub timestamp: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        return self.token.is_some();
    }
}
