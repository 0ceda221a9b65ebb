use anyhow::Result;
use mockito::Matcher;
use serde_json::json;

use super::encode_segment;
use super::ApiClient;
use crate::domain::models::ProgramBackend;
use crate::domain::models::ProgramKind;
use crate::domain::models::ProgramRequest;

#[test]
fn it_encodes_path_segments() {
    assert_eq!(encode_segment("Computer Science"), "Computer%20Science");
    assert_eq!(encode_segment("cs_bs"), "cs_bs");
    assert_eq!(encode_segment("a/b"), "a%2Fb");
}

#[tokio::test]
async fn it_lists_templates() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/programs/templates")
        .with_status(200)
        .with_body(r#"[{"id":"cs_bs","program_name":"Computer Science, BS","program_type":"major","required_courses":["CS 110"]},{"id":"math_minor","name":"Mathematics","type":"minor"}]"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api.program_templates().await?;

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].id, "cs_bs");
    assert_eq!(res[0].program_name, "Computer Science, BS");
    assert_eq!(res[1].program_name, "Mathematics");
    assert_eq!(res[1].program_type, "minor");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_lists_programs() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/programs/")
        .with_status(200)
        .with_body(r#"[{"id":3,"user_id":1,"program_type":"major","program_name":"Computer Science, BS","required_courses":["CS 110",{"one_of":["MATH 113","MATH 114"]}]}]"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api.list_programs().await?;

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].id, 3);
    assert_eq!(res[0].required_courses.len(), 2);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_assigns_templates_by_id() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/programs/templates/cs_bs/assign")
        .with_status(200)
        .with_body(r#"{"id":3,"program_type":"major","program_name":"Computer Science, BS"}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api.assign_program("cs_bs").await?;

    assert_eq!(res.program_name, "Computer Science, BS");
    assert!(res.required_courses.is_empty());
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_creates_custom_programs() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/programs/")
        .match_body(Matcher::Json(json!({
            "program_type": "certificate",
            "program_name": "Data Analytics",
            "required_courses": []
        })))
        .with_status(200)
        .with_body(r#"{"id":9,"program_type":"certificate","program_name":"Data Analytics","required_courses":[]}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let req = ProgramRequest::new(ProgramKind::Certificate, " Data Analytics ");
    let res = api.create_program(&req).await?;

    assert_eq!(res.id, 9);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_removes_programs_by_name() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/api/programs/Data%20Analytics")
        .with_status(204)
        .create();

    let api = ApiClient::with_url(server.url());
    api.remove_program("Data Analytics").await?;
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_updates_programs_by_name() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PUT", "/api/programs/Data%20Analytics")
        .match_body(Matcher::Json(json!({
            "program_type": "minor",
            "program_name": "Data Science",
            "required_courses": []
        })))
        .with_status(200)
        .with_body(r#"{"id":9,"program_type":"minor","program_name":"Data Science","required_courses":[]}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let req = ProgramRequest::new(ProgramKind::Minor, "Data Science");
    let res = api.update_program("Data Analytics", &req).await?;

    assert_eq!(res.program_name, "Data Science");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fetches_progress() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/programs/progress")
        .with_status(200)
        .with_body(r#"{"completed_courses":[{"course_code":"CS 110"}],"programs":{"Computer Science, BS":{"program_type":"major","required_courses":["CS 110",{"requirement_name":"Calculus","options":["MATH 113","MATH 114"]}]}}}"#)
        .create();

    let api = ApiClient::with_url(server.url());
    let res = api.program_progress().await?;

    assert_eq!(res.completed_courses[0].course_code, "CS 110");
    assert_eq!(res.programs["Computer Science, BS"].required_courses.len(), 2);
    assert_eq!(res.remaining("Computer Science, BS").len(), 1);
    mock.assert();

    return Ok(());
}
