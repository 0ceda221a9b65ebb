#[cfg(test)]
#[path = "recommendation_test.rs"]
mod tests;

use serde::de::DeserializeOwned;
use serde::Deserializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

pub const COURSE_RECOMMENDATIONS_TYPE: &str = "course_recommendations";

/// Reads a scalar as display text. Strings are kept, numbers and booleans
/// are printed as sent, anything else counts as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
    match value {
        Value::String(text) => return Ok(Some(text)),
        Value::Number(number) => return Ok(Some(number.to_string())),
        Value::Bool(flag) => return Ok(Some(flag.to_string())),
        _ => return Ok(None),
    }
}

/// Reads a nested object, treating a value of the wrong shape as missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
    return Ok(serde_json::from_value(value).ok());
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, deserialize_with = "lenient_text")]
    pub days: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default, deserialize_with = "lenient_text")]
    pub available_seats: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub total_seats: Option<String>,
}

/// A single course inside a recommendation payload. The advising service has
/// sent both nested (`schedule`, `availability`) and flat (`days`, `time`,
/// `available_seats`) shapes, so every field is optional. A field with an
/// unexpected type is dropped on its own and the rest of the course is kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(default, deserialize_with = "lenient_text")]
    pub course_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub course_name: Option<String>,
    #[serde(default, alias = "credit_hours")]
    pub credits: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub schedule: Option<Schedule>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub days: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(default, alias = "classroom", deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub instructor: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub availability: Option<Availability>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub available_seats: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub total_seats: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub crn: Option<Value>,
}

impl CourseDetail {
    /// Decodes one entry of `course_data`. Only non-objects are rejected.
    pub fn from_value(value: &Value) -> Option<CourseDetail> {
        if !value.is_object() {
            return None;
        }

        return serde_json::from_value(value.clone()).ok();
    }

    pub fn schedule(&self) -> Schedule {
        if let Some(schedule) = &self.schedule {
            return schedule.clone();
        }

        return Schedule {
            days: self.days.clone(),
            time: self.time.clone(),
        };
    }

    pub fn availability(&self) -> Availability {
        if let Some(availability) = &self.availability {
            return availability.clone();
        }

        return Availability {
            available_seats: self.available_seats.clone(),
            total_seats: self.total_seats.clone(),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendations {
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    /// Kept as raw values so one malformed course does not discard the rest.
    #[serde(default)]
    pub course_data: Vec<Value>,
}

impl CourseRecommendations {
    /// Returns the payload when `value` is an object tagged as course
    /// recommendations.
    pub fn parse(value: &Value) -> Option<CourseRecommendations> {
        let tag = value.get("type")?.as_str()?;
        if tag != COURSE_RECOMMENDATIONS_TYPE {
            return None;
        }

        return serde_json::from_value(value.clone()).ok();
    }

    pub fn message_text(&self) -> &str {
        return self.message.as_deref().unwrap_or_default();
    }
}
