#[cfg(test)]
#[path = "rendering_test.rs"]
mod tests;

use serde_json::Value;

use crate::domain::models::ChatMessage;
use crate::domain::models::CourseDetail;
use crate::domain::models::CourseRecommendations;
use crate::domain::models::MessageContent;

const INDENT: &str = "  ";

/// Splits text into its non-blank lines.
pub fn paragraphs(text: &str) -> Vec<String> {
    return text
        .split('\n')
        .filter(|line| return !line.trim().is_empty())
        .map(|line| return line.trim_end().to_string())
        .collect();
}

fn credits_text(credits: &Option<Value>) -> Option<String> {
    match credits {
        Some(Value::Number(number)) => return Some(number.to_string()),
        Some(Value::String(text)) if !text.trim().is_empty() => {
            return Some(text.trim().to_string());
        }
        _ => return None,
    }
}

fn crn_text(crn: &Option<Value>) -> String {
    match crn {
        Some(Value::String(text)) if !text.is_empty() => return text.to_string(),
        Some(Value::Number(number)) => return number.to_string(),
        _ => return "N/A".to_string(),
    }
}

fn or_tba(value: &Option<String>) -> String {
    return value
        .as_ref()
        .filter(|value| return !value.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| return "TBA".to_string());
}

pub fn schedule_text(detail: &CourseDetail) -> String {
    let schedule = detail.schedule();
    if let (Some(days), Some(time)) = (schedule.days, schedule.time) {
        if !days.is_empty() && !time.is_empty() {
            return format!("{days} at {time}");
        }
    }

    return "Schedule to be announced".to_string();
}

pub fn availability_text(detail: &CourseDetail) -> String {
    let availability = detail.availability();
    if let (Some(available), Some(total)) = (availability.available_seats, availability.total_seats) {
        return format!("{available}/{total} seats available");
    }

    return "Availability unknown".to_string();
}

/// One course as a title line followed by indented fields. The expanded form
/// adds the description, prerequisites when there are any, and the CRN.
pub fn course_lines(detail: &CourseDetail, expanded: bool) -> Vec<String> {
    let code = detail.course_code.clone().unwrap_or_default();
    let name = detail.course_name.clone().unwrap_or_default();
    let mut title = match (code.is_empty(), name.is_empty()) {
        (false, false) => format!("{code}: {name}"),
        (false, true) => code,
        (true, false) => name,
        (true, true) => "Course".to_string(),
    };
    if let Some(credits) = credits_text(&detail.credits) {
        title = format!("{title} ({credits} credits)");
    }

    let mut lines = vec![
        title,
        format!("{INDENT}Schedule: {}", schedule_text(detail)),
        format!("{INDENT}Location: {}", or_tba(&detail.location)),
        format!("{INDENT}Instructor: {}", or_tba(&detail.instructor)),
        format!("{INDENT}Availability: {}", availability_text(detail)),
    ];

    if !expanded {
        return lines;
    }

    let description = detail
        .description
        .clone()
        .filter(|description| return !description.trim().is_empty())
        .unwrap_or_else(|| return "No description available".to_string());
    lines.push(format!("{INDENT}Description: {description}"));

    if let Some(prerequisites) = &detail.prerequisites {
        if !prerequisites.trim().is_empty() {
            lines.push(format!("{INDENT}Prerequisites: {prerequisites}"));
        }
    }

    lines.push(format!("{INDENT}CRN: {}", crn_text(&detail.crn)));

    return lines;
}

fn recommendation_lines(recommendations: &CourseRecommendations, expanded: bool) -> Vec<String> {
    let mut lines = paragraphs(recommendations.message_text());

    for course in &recommendations.course_data {
        if !lines.is_empty() {
            lines.push("".to_string());
        }

        match CourseDetail::from_value(course) {
            Some(detail) => lines.append(&mut course_lines(&detail, expanded)),
            None => {
                tracing::warn!(course = %course, "Invalid course data in recommendation");
                lines.push("Error: Invalid course data".to_string());
            }
        }
    }

    return lines;
}

/// Renders message content as plain lines. Never fails: shapes it does not
/// know are shown as compact JSON.
pub fn content_lines(content: &MessageContent, expanded: bool) -> Vec<String> {
    match content {
        MessageContent::Text(text) => return paragraphs(text),
        MessageContent::CourseRecommendations(recommendations) => {
            return recommendation_lines(recommendations, expanded);
        }
        MessageContent::Other(value) => return vec![value.to_string()],
    }
}

pub fn message_lines(message: &ChatMessage, expanded: bool) -> Vec<String> {
    let mut header = message.author.to_string();
    if message.is_acknowledgment {
        header = format!("{header} (working on it)");
    }

    let mut lines = vec![header];
    for line in content_lines(&message.content, expanded) {
        if line.is_empty() {
            lines.push(line);
        } else {
            lines.push(format!("{INDENT}{line}"));
        }
    }

    return lines;
}
