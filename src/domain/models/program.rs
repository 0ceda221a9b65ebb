#[cfg(test)]
#[path = "program_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ProgramKind {
    Major,
    Minor,
    Certificate,
    Concentration,
}

impl ProgramKind {
    pub fn parse(text: &str) -> Option<ProgramKind> {
        let text = text.trim().to_lowercase();
        return ProgramKind::iter().find(|e| return e.to_string() == text);
    }
}

/// A major/minor/certificate/concentration attached to the current user.
/// Created from a template id or ad hoc, removed by `program_name`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub program_type: String,
    pub program_name: String,
    #[serde(default)]
    pub required_courses: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgramTemplate {
    pub id: String,
    #[serde(alias = "name", default)]
    pub program_name: String,
    #[serde(alias = "type", default)]
    pub program_type: String,
}

/// Body for creating an ad hoc program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgramRequest {
    pub program_type: String,
    pub program_name: String,
    pub required_courses: Vec<Value>,
}

impl ProgramRequest {
    pub fn new(kind: ProgramKind, name: &str) -> ProgramRequest {
        return ProgramRequest {
            program_type: kind.to_string(),
            program_name: name.trim().to_string(),
            required_courses: vec![],
        };
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedCourse {
    pub course_code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgramRequirements {
    #[serde(default)]
    pub program_type: String,
    #[serde(default)]
    pub required_courses: Vec<Value>,
}

/// Completed course codes against the requirements of each program, keyed by
/// program name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramProgress {
    #[serde(default)]
    pub completed_courses: Vec<CompletedCourse>,
    #[serde(default)]
    pub programs: BTreeMap<String, ProgramRequirements>,
}

fn normalize_code(code: &str) -> String {
    return code.split_whitespace().collect::<Vec<&str>>().join(" ").to_uppercase();
}

fn course_code(requirement: &Value) -> Option<&str> {
    match requirement {
        Value::String(code) => return Some(code),
        Value::Object(map) => return map.get("course_code").and_then(|code| return code.as_str()),
        _ => return None,
    }
}

fn options(requirement: &Value) -> Option<(&Vec<Value>, u64)> {
    let options = requirement.get("options")?.as_array()?;
    let needed = requirement
        .get("courses_needed")
        .and_then(|needed| return needed.as_u64())
        .unwrap_or(1);

    return Some((options, needed));
}

/// Display form of a requirement: a course code, or a named group of options
/// such as `Calculus (need 1 of: MATH 113, MATH 114)`.
pub fn requirement_text(requirement: &Value) -> String {
    if let Some(code) = course_code(requirement) {
        return code.to_string();
    }

    if let Some((options, needed)) = options(requirement) {
        let name = requirement
            .get("requirement_name")
            .and_then(|name| return name.as_str())
            .unwrap_or("Choose");
        let codes = options.iter().map(requirement_text).collect::<Vec<String>>();
        return format!("{name} (need {needed} of: {})", codes.join(", "));
    }

    return requirement.to_string();
}

impl ProgramProgress {
    fn completed_codes(&self) -> HashSet<String> {
        return self
            .completed_courses
            .iter()
            .map(|course| return normalize_code(&course.course_code))
            .collect();
    }

    fn is_met(requirement: &Value, completed: &HashSet<String>) -> bool {
        if let Some(code) = course_code(requirement) {
            return completed.contains(&normalize_code(code));
        }

        if let Some((options, needed)) = options(requirement) {
            let met = options
                .iter()
                .filter(|option| return ProgramProgress::is_met(option, completed))
                .count();
            return met as u64 >= needed;
        }

        return false;
    }

    /// Requirements of `program_name` that no completed course covers. Course
    /// codes compare case and spacing insensitively.
    pub fn remaining(&self, program_name: &str) -> Vec<Value> {
        let completed = self.completed_codes();
        return self
            .programs
            .get(program_name)
            .map(|program| {
                return program
                    .required_courses
                    .iter()
                    .filter(|requirement| return !ProgramProgress::is_met(requirement, &completed))
                    .cloned()
                    .collect();
            })
            .unwrap_or_default();
    }
}
