#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_json::Value;

use super::Author;
use super::CourseRecommendations;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

/// Body of a transcript entry. Advisor replies are polymorphic: plain text,
/// a tagged course recommendation payload, or anything else the service
/// decides to send.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageContent {
    Text(String),
    CourseRecommendations(CourseRecommendations),
    Other(Value),
}

impl MessageContent {
    pub fn from_value(value: Value) -> MessageContent {
        if let Value::String(text) = value {
            return MessageContent::Text(text);
        }

        if let Some(recommendations) = CourseRecommendations::parse(&value) {
            return MessageContent::CourseRecommendations(recommendations);
        }

        return MessageContent::Other(value);
    }

    /// Plain text form of the content, used for logging and for the fallback
    /// rendering of unknown shapes.
    pub fn as_text(&self) -> String {
        match self {
            MessageContent::Text(text) => return text.to_string(),
            MessageContent::CourseRecommendations(recommendations) => {
                return recommendations.message_text().to_string();
            }
            MessageContent::Other(value) => return value.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub author: Author,
    pub content: MessageContent,
    pub is_acknowledgment: bool,
    mtype: MessageType,
}

impl ChatMessage {
    pub fn new(author: Author, content: MessageContent) -> ChatMessage {
        return ChatMessage {
            author,
            content,
            is_acknowledgment: false,
            mtype: MessageType::Normal,
        };
    }

    pub fn text(author: Author, text: &str) -> ChatMessage {
        return ChatMessage::new(author, MessageContent::Text(text.replace('\t', "  ")));
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> ChatMessage {
        return ChatMessage {
            author,
            content: MessageContent::Text(text.replace('\t', "  ")),
            is_acknowledgment: false,
            mtype,
        };
    }

    /// Interim advisor reply sent while the real answer is still being computed.
    pub fn acknowledgment(content: MessageContent) -> ChatMessage {
        return ChatMessage {
            author: Author::Advisor,
            content,
            is_acknowledgment: true,
            mtype: MessageType::Normal,
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn is_user(&self) -> bool {
        return self.author == Author::User;
    }
}
