#[cfg(test)]
#[path = "course_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::GradPathError;

/// Wire form of a course. The API answers with `course_code`/`course_name`
/// while accepting `department`/`course_number`/`name`, so both are read.
#[derive(Clone, Debug, Default, Deserialize)]
struct CourseRecord {
    id: i64,
    course_code: Option<String>,
    course_name: Option<String>,
    department: Option<String>,
    course_number: Option<String>,
    name: Option<String>,
    term: Option<String>,
    credit_hours: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CourseRecord")]
pub struct Course {
    pub id: i64,
    pub department: String,
    pub course_number: String,
    pub name: String,
    pub term: Option<String>,
    pub credit_hours: Option<u32>,
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Course {
        let code = record.course_code.unwrap_or_default();
        let mut code_parts = code.trim().splitn(2, char::is_whitespace);
        let code_department = code_parts.next().unwrap_or_default().to_string();
        let code_number = code_parts.next().unwrap_or_default().trim().to_string();

        return Course {
            id: record.id,
            department: record
                .department
                .unwrap_or(code_department)
                .trim()
                .to_uppercase(),
            course_number: record
                .course_number
                .unwrap_or(code_number)
                .trim()
                .to_string(),
            name: record
                .name
                .or(record.course_name)
                .unwrap_or_default()
                .trim()
                .to_string(),
            term: record.term.filter(|term| return !term.trim().is_empty()),
            credit_hours: record.credit_hours,
        };
    }
}

impl Course {
    pub fn code(&self) -> String {
        return format!("{} {}", self.department, self.course_number)
            .trim()
            .to_string();
    }
}

/// User-entered course fields, sent on add and update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInput {
    pub department: String,
    pub course_number: String,
    pub name: String,
    pub term: Option<String>,
}

impl CourseInput {
    pub fn new(department: &str, course_number: &str, name: &str, term: Option<&str>) -> CourseInput {
        return CourseInput {
            department: department.to_string(),
            course_number: course_number.to_string(),
            name: name.to_string(),
            term: term.map(|term| return term.to_string()),
        };
    }

    pub fn from_course(course: &Course) -> CourseInput {
        return CourseInput {
            department: course.department.to_string(),
            course_number: course.course_number.to_string(),
            name: course.name.to_string(),
            term: course.term.clone(),
        };
    }

    /// Upper-cases the department and trims every field. Applying it twice
    /// gives the same result as applying it once.
    pub fn normalize(&self) -> CourseInput {
        return CourseInput {
            department: self.department.trim().to_uppercase(),
            course_number: self.course_number.trim().to_string(),
            name: self.name.trim().to_string(),
            term: self
                .term
                .as_ref()
                .map(|term| return term.trim().to_string())
                .filter(|term| return !term.is_empty()),
        };
    }

    pub fn validate(&self) -> Result<(), GradPathError> {
        if self.department.trim().is_empty() {
            return Err(GradPathError::validation("Department is required"));
        }
        if self.course_number.trim().is_empty() {
            return Err(GradPathError::validation("Course number is required"));
        }

        return Ok(());
    }
}
