use anyhow::Result;
use serde_json::json;
use serde_json::Value;

use super::content_lines;
use super::message_lines;
use super::paragraphs;
use crate::domain::models::ChatMessage;
use crate::domain::models::MessageContent;

fn recommendations() -> Result<MessageContent> {
    let value: Value = serde_json::from_str(test_utils::recommendation_fixture())?;
    return Ok(MessageContent::from_value(value));
}

#[test]
fn it_drops_blank_lines() {
    assert_eq!(
        paragraphs("First line\n\n   \nSecond line  \n"),
        vec!["First line", "Second line"]
    );
}

#[test]
fn it_renders_expanded_recommendations() -> Result<()> {
    let lines = content_lines(&recommendations()?, true).join("\n");
    insta::assert_snapshot!(lines, @r###"
    Based on your completed courses, here is what I'd take next.
    Both fit your schedule.

    CS 310: Data Structures (3 credits)
      Schedule: MWF at 10:30
      Location: Innovation Hall 204
      Instructor: Dr. Rivera
      Availability: 12/40 seats available
      Description: Abstract data types and their implementations.
      Prerequisites: CS 211
      CRN: 40211

    MATH 203: Linear Algebra (3 credits)
      Schedule: Schedule to be announced
      Location: TBA
      Instructor: TBA
      Availability: Availability unknown
      Description: No description available
      CRN: N/A
    "###);

    return Ok(());
}

#[test]
fn it_renders_collapsed_recommendations() -> Result<()> {
    let lines = content_lines(&recommendations()?, false);

    assert!(lines.contains(&"CS 310: Data Structures (3 credits)".to_string()));
    assert!(!lines.iter().any(|line| return line.contains("Description")));
    assert!(!lines.iter().any(|line| return line.contains("CRN")));

    return Ok(());
}

#[test]
fn it_renders_flat_course_shapes() {
    let content = MessageContent::from_value(json!({
        "type": "course_recommendations",
        "course_data": [{
            "course_code": "CS 330",
            "course_name": "Formal Methods",
            "credits": "3",
            "days": "TR",
            "time": "13:30",
            "classroom": "Horizon Hall 1010",
            "available_seats": 0,
            "total_seats": 30,
            "crn": 41234
        }]
    }));

    assert_eq!(
        content_lines(&content, true),
        vec![
            "CS 330: Formal Methods (3 credits)",
            "  Schedule: TR at 13:30",
            "  Location: Horizon Hall 1010",
            "  Instructor: TBA",
            "  Availability: 0/30 seats available",
            "  Description: No description available",
            "  CRN: 41234",
        ]
    );
}

#[test]
fn it_needs_both_days_and_time_for_a_schedule() {
    let content = MessageContent::from_value(json!({
        "type": "course_recommendations",
        "course_data": [{ "course_code": "CS 101", "schedule": { "days": "MW" } }]
    }));

    let lines = content_lines(&content, false);
    assert_eq!(lines[0], "CS 101");
    assert_eq!(lines[1], "  Schedule: Schedule to be announced");
}

#[test]
fn it_marks_invalid_course_entries() {
    let content = MessageContent::from_value(json!({
        "type": "course_recommendations",
        "message": "Try these.",
        "course_data": ["CS 101", { "course_code": "CS 102" }]
    }));

    let lines = content_lines(&content, false);
    assert_eq!(lines[0], "Try these.");
    assert_eq!(lines[2], "Error: Invalid course data");
    assert_eq!(lines[4], "CS 102");
}

#[test]
fn it_renders_unknown_shapes_as_json() {
    let content = MessageContent::from_value(json!({ "status": "ok" }));
    assert_eq!(content_lines(&content, true), vec![r#"{"status":"ok"}"#]);

    let content = MessageContent::from_value(json!([1, 2]));
    assert_eq!(content_lines(&content, true), vec!["[1,2]"]);
}

#[test]
fn it_renders_message_headers() {
    let message = ChatMessage::acknowledgment(MessageContent::Text(
        "Let me look into that.\nOne moment.".to_string(),
    ));

    assert_eq!(
        message_lines(&message, false),
        vec![
            "Advisor (working on it)",
            "  Let me look into that.",
            "  One moment.",
        ]
    );
}

#[test]
fn it_keeps_courses_with_badly_typed_fields() {
    let content = MessageContent::from_value(json!({
        "type": "course_recommendations",
        "message": "Try these.",
        "course_data": [{
            "course_code": "CS 310",
            "course_name": "Data Structures",
            "credits": 3,
            "instructor": 42,
            "availability": { "available_seats": "12", "total_seats": 40 }
        }, {
            "course_code": "CS 311",
            "availability": { "available_seats": { "open": 3 }, "total_seats": 40 }
        }]
    }));

    assert_eq!(
        content_lines(&content, false),
        vec![
            "Try these.",
            "",
            "CS 310: Data Structures (3 credits)",
            "  Schedule: Schedule to be announced",
            "  Location: TBA",
            "  Instructor: 42",
            "  Availability: 12/40 seats available",
            "",
            "CS 311",
            "  Schedule: Schedule to be announced",
            "  Location: TBA",
            "  Instructor: TBA",
            "  Availability: Availability unknown",
        ]
    );
}
