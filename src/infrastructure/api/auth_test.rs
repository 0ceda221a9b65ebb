use anyhow::Result;
use mockito::Matcher;

use super::ApiClient;
use crate::domain::models::AuthFailure;
use crate::domain::models::GradPathError;
use crate::domain::models::Registration;

#[tokio::test]
async fn it_logs_in_with_form_data() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/token")
        .match_header("Content-Type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".to_string(), "alice".to_string()),
            Matcher::UrlEncoded("password".to_string(), "hunter2".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"token123","token_type":"bearer"}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api.login("alice", "hunter2").await?;

    assert_eq!(res.access_token, "token123");
    assert_eq!(res.token_type, "bearer");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_maps_rejected_logins() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/token")
        .with_status(401)
        .with_body(r#"{"detail":"Incorrect username or password"}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api.login("alice", "wrong").await;

    assert_eq!(
        res.unwrap_err(),
        GradPathError::Auth(AuthFailure::InvalidCredentials)
    );
    mock.assert();
}

#[tokio::test]
async fn it_registers_with_form_data() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/register")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".to_string(), "alice".to_string()),
            Matcher::UrlEncoded("email".to_string(), "alice@example.edu".to_string()),
            Matcher::UrlEncoded("password".to_string(), "hunter2".to_string()),
            Matcher::UrlEncoded("major".to_string(), "Computer Science".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"token456","token_type":"bearer"}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api
        .register(&Registration {
            username: "alice".to_string(),
            email: "alice@example.edu".to_string(),
            password: "hunter2".to_string(),
            major: "Computer Science".to_string(),
        })
        .await?;

    assert_eq!(res.access_token, "token456");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_maps_taken_usernames() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/register")
        .with_status(400)
        .with_body(r#"{"detail":"Username already registered"}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api
        .register(&Registration {
            username: "alice".to_string(),
            email: "alice@example.edu".to_string(),
            password: "hunter2".to_string(),
            major: "Computer Science".to_string(),
        })
        .await;

    assert_eq!(res.unwrap_err(), GradPathError::Auth(AuthFailure::UsernameTaken));
    mock.assert();
}

#[tokio::test]
async fn it_keeps_server_failures_as_transport_errors() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/api/token").with_status(502).create();

    let api = ApiClient::with_url(server.url());
    let res = api.login("alice", "hunter2").await;

    assert!(matches!(res, Err(GradPathError::Transport(_))));
    mock.assert();
}

#[tokio::test]
async fn it_fetches_the_current_user() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/users/me")
        .match_header("Authorization", "Bearer token123")
        .with_status(200)
        .with_body(r#"{"id":1,"username":"alice","email":"alice@example.edu","is_active":true,"created_at":"2024-01-01T00:00:00","courses":[],"programs":[]}"#)
        .create();

    let api = ApiClient::with_url(server.url()).with_token("token123");
    let res = api.current_user().await?;

    assert_eq!(res.username, "alice");
    assert_eq!(res.major, None);
    assert!(res.is_active);
    mock.assert();

    return Ok(());
}
