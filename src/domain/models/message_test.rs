use serde_json::json;
use test_utils::recommendation_fixture;

use super::Author;
use super::ChatMessage;
use super::MessageContent;
use super::MessageType;

#[test]
fn it_executes_text() {
    let msg = ChatMessage::text(Author::Advisor, "Hi there!");
    assert_eq!(msg.author, Author::Advisor);
    assert_eq!(msg.author.to_string(), "Advisor");
    assert_eq!(msg.content, MessageContent::Text("Hi there!".to_string()));
    assert_eq!(msg.message_type(), MessageType::Normal);
    assert!(!msg.is_acknowledgment);
}

#[test]
fn it_executes_text_replacing_tabs() {
    let msg = ChatMessage::text(Author::User, "\t\tHi there!");
    assert_eq!(msg.content.as_text(), "    Hi there!");
    assert!(msg.is_user());
}

#[test]
fn it_executes_new_with_type() {
    let msg = ChatMessage::new_with_type(Author::GradPath, MessageType::Error, "It broke!");
    assert_eq!(msg.author.to_string(), "GradPath");
    assert_eq!(msg.content.as_text(), "It broke!");
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_executes_acknowledgment() {
    let msg = ChatMessage::acknowledgment(MessageContent::Text("Working on it".to_string()));
    assert_eq!(msg.author, Author::Advisor);
    assert!(msg.is_acknowledgment);
    assert_eq!(msg.message_type(), MessageType::Normal);
}

#[test]
fn it_parses_text_values() {
    let content = MessageContent::from_value(json!("Take CS 310 next."));
    assert_eq!(content, MessageContent::Text("Take CS 310 next.".to_string()));
}

#[test]
fn it_parses_course_recommendations() {
    let value: serde_json::Value = serde_json::from_str(recommendation_fixture()).unwrap();
    let content = MessageContent::from_value(value);

    match content {
        MessageContent::CourseRecommendations(recommendations) => {
            assert!(recommendations
                .message_text()
                .starts_with("Based on your completed courses"));
            assert_eq!(recommendations.course_data.len(), 2);
        }
        _ => panic!("Wrong enum"),
    }
}

#[test]
fn it_keeps_unknown_shapes() {
    let value = json!({ "type": "something_else", "items": [1, 2] });
    let content = MessageContent::from_value(value.clone());

    assert_eq!(content, MessageContent::Other(value));
    let text = content.as_text();
    assert!(text.contains("\"items\":[1,2]"));
    assert!(text.contains("\"type\":\"something_else\""));
}

#[test]
fn it_keeps_untagged_objects_as_unknown() {
    let value = json!({ "message": "hi", "course_data": [] });
    let content = MessageContent::from_value(value.clone());
    assert_eq!(content, MessageContent::Other(value));
}
