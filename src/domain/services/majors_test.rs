use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use mockito::Matcher;
use serde_json::json;

use super::MajorManager;
use crate::domain::models::StaticConfirm;
use crate::domain::services::Notifications;
use crate::infrastructure::api::ApiClient;

async fn loaded(server: &mut mockito::Server) -> Result<MajorManager> {
    server
        .mock("GET", "/api/majors/available")
        .with_status(200)
        .with_body(r#"["Mathematics","Computer Science","Biology"]"#)
        .create();
    server
        .mock("GET", "/api/majors/me")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"Computer Science"}]"#)
        .create();

    let mut majors = MajorManager::new(
        Arc::new(ApiClient::with_url(server.url())),
        Notifications::new(Duration::from_secs(60)),
    );
    majors.load_available().await?;
    majors.load().await?;

    return Ok(majors);
}

#[tokio::test]
async fn it_loads_available_and_current_majors() -> Result<()> {
    let mut server = mockito::Server::new();
    let majors = loaded(&mut server).await?;

    assert_eq!(
        majors.available,
        vec!["Biology", "Computer Science", "Mathematics"]
    );
    assert_eq!(majors.majors.len(), 1);

    return Ok(());
}

#[tokio::test]
async fn it_adds_majors() -> Result<()> {
    let mut server = mockito::Server::new();
    let mut majors = loaded(&mut server).await?;
    let mock = server
        .mock("POST", "/api/majors")
        .match_body(Matcher::Json(json!({ "name": "Mathematics" })))
        .with_status(200)
        .with_body(r#"{"id":2,"name":"Mathematics"}"#)
        .create();

    majors.add(" Mathematics ").await?;

    assert_eq!(majors.majors.len(), 2);
    assert_eq!(
        majors.notifications.current().unwrap().message,
        "Major added successfully"
    );
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_rejects_duplicate_and_empty_majors() -> Result<()> {
    let mut server = mockito::Server::new();
    let mut majors = loaded(&mut server).await?;
    let mock = server.mock("POST", "/api/majors").expect(0).create();

    let res = majors.add("Computer Science").await;
    assert!(res.unwrap_err().is_validation());
    assert_eq!(
        majors.notifications.current().unwrap().message,
        "This major is already added"
    );

    let res = majors.add("  ").await;
    assert!(res.unwrap_err().is_validation());
    assert_eq!(
        majors.notifications.current().unwrap().message,
        "Please select a major"
    );

    let res = majors.add("Alchemy").await;
    assert!(res.unwrap_err().is_validation());

    assert_eq!(majors.majors.len(), 1);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_removes_confirmed_majors() -> Result<()> {
    let mut server = mockito::Server::new();
    let mut majors = loaded(&mut server).await?;
    let mock = server
        .mock("DELETE", "/api/majors/1")
        .with_status(200)
        .with_body(r#"{"status":"success"}"#)
        .expect(1)
        .create();

    assert!(!majors.remove(1, &StaticConfirm(false)).await?);
    assert_eq!(majors.majors.len(), 1);

    assert!(majors.remove(1, &StaticConfirm(true)).await?);
    assert!(majors.majors.is_empty());
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_keeps_majors_when_removal_fails() -> Result<()> {
    let mut server = mockito::Server::new();
    let mut majors = loaded(&mut server).await?;
    let mock = server.mock("DELETE", "/api/majors/1").with_status(500).create();

    assert!(majors.remove(1, &StaticConfirm(true)).await.is_err());
    assert_eq!(majors.majors.len(), 1);
    assert_eq!(
        majors.notifications.current().unwrap().message,
        "Failed to remove major"
    );
    mock.assert();

    return Ok(());
}
