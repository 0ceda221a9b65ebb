#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use thiserror::Error;

/// Known authentication failures reported by the GradPath API, each with the
/// message shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    InvalidCredentials,
    UsernameTaken,
    InactiveUser,
    SessionExpired,
    Unknown,
}

impl AuthFailure {
    /// Maps a failed auth response to a known failure using the status code and
    /// the `detail` string the API sends back.
    pub fn from_response(status: u16, detail: &str) -> AuthFailure {
        let detail = detail.to_lowercase();

        if detail.contains("incorrect username or password") {
            return AuthFailure::InvalidCredentials;
        }
        if detail.contains("already registered") {
            return AuthFailure::UsernameTaken;
        }
        if detail.contains("inactive user") {
            return AuthFailure::InactiveUser;
        }
        if detail.contains("could not validate credentials") {
            return AuthFailure::SessionExpired;
        }
        if status == 401 {
            return AuthFailure::InvalidCredentials;
        }

        return AuthFailure::Unknown;
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => return "Invalid username or password.",
            AuthFailure::UsernameTaken => return "That username is already taken.",
            AuthFailure::InactiveUser => return "This account has been deactivated.",
            AuthFailure::SessionExpired => {
                return "Your session has expired. Please log in again.";
            }
            AuthFailure::Unknown => return "Authentication failed. Please try again.",
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GradPathError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.user_message())]
    Auth(AuthFailure),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Timed out waiting for the advisor after {attempts} checks")]
    Timeout { attempts: u32 },

    #[error("Unexpected response from the server: {0}")]
    UnexpectedShape(String),
}

impl GradPathError {
    pub fn validation(message: impl Into<String>) -> GradPathError {
        return GradPathError::Validation(message.into());
    }

    pub fn is_validation(&self) -> bool {
        return matches!(self, GradPathError::Validation(_));
    }
}

impl From<reqwest::Error> for GradPathError {
    fn from(err: reqwest::Error) -> GradPathError {
        if err.is_decode() {
            return GradPathError::UnexpectedShape(err.to_string());
        }

        return GradPathError::Transport(err.to_string());
    }
}

impl From<serde_json::Error> for GradPathError {
    fn from(err: serde_json::Error) -> GradPathError {
        return GradPathError::UnexpectedShape(err.to_string());
    }
}
