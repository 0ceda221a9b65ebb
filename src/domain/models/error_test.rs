use super::AuthFailure;
use super::GradPathError;

#[test]
fn it_maps_incorrect_credentials() {
    let failure = AuthFailure::from_response(401, "Incorrect username or password");
    assert_eq!(failure, AuthFailure::InvalidCredentials);
    assert_eq!(failure.user_message(), "Invalid username or password.");
}

#[test]
fn it_maps_taken_usernames() {
    let failure = AuthFailure::from_response(400, "Username already registered");
    assert_eq!(failure, AuthFailure::UsernameTaken);
    assert_eq!(failure.user_message(), "That username is already taken.");
}

#[test]
fn it_maps_inactive_users() {
    let failure = AuthFailure::from_response(400, "Inactive user");
    assert_eq!(failure, AuthFailure::InactiveUser);
}

#[test]
fn it_maps_expired_sessions() {
    let failure = AuthFailure::from_response(401, "Could not validate credentials");
    assert_eq!(failure, AuthFailure::SessionExpired);
    assert_eq!(
        failure.user_message(),
        "Your session has expired. Please log in again."
    );
}

#[test]
fn it_falls_back_on_unauthorized_status() {
    let failure = AuthFailure::from_response(401, "");
    assert_eq!(failure, AuthFailure::InvalidCredentials);
}

#[test]
fn it_maps_unknown_failures() {
    let failure = AuthFailure::from_response(500, "An error occurred: boom");
    assert_eq!(failure, AuthFailure::Unknown);
    assert_eq!(
        failure.user_message(),
        "Authentication failed. Please try again."
    );
}

#[test]
fn it_displays_auth_errors_as_user_messages() {
    let err = GradPathError::Auth(AuthFailure::UsernameTaken);
    assert_eq!(err.to_string(), "That username is already taken.");
}

#[test]
fn it_displays_timeouts() {
    let err = GradPathError::Timeout { attempts: 30 };
    assert_eq!(
        err.to_string(),
        "Timed out waiting for the advisor after 30 checks"
    );
}

#[test]
fn it_converts_json_errors_to_unexpected_shape() {
    let err: GradPathError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
    assert!(matches!(err, GradPathError::UnexpectedShape(_)));
    assert!(!err.is_validation());
}
