#[cfg(test)]
#[path = "programs_test.rs"]
mod tests;

use super::Notifications;
use crate::domain::models::Confirm;
use crate::domain::models::GradPathError;
use crate::domain::models::Program;
use crate::domain::models::ProgramBackendBox;
use crate::domain::models::ProgramKind;
use crate::domain::models::ProgramProgress;
use crate::domain::models::ProgramRequest;
use crate::domain::models::ProgramTemplate;

/// Programs attached to the user. They are created from a template id or ad
/// hoc, and removed by name.
pub struct ProgramManager {
    pub programs: Vec<Program>,
    pub templates: Vec<ProgramTemplate>,
    backend: ProgramBackendBox,
    notifications: Notifications,
}

impl ProgramManager {
    pub fn new(backend: ProgramBackendBox, notifications: Notifications) -> ProgramManager {
        return ProgramManager {
            programs: vec![],
            templates: vec![],
            backend,
            notifications,
        };
    }

    fn reject(&self, message: &str) -> GradPathError {
        self.notifications.error(message);
        return GradPathError::validation(message);
    }

    fn has_program(&self, name: &str) -> bool {
        return self
            .programs
            .iter()
            .any(|program| return program.program_name == name);
    }

    pub async fn load_templates(&mut self) -> Result<&[ProgramTemplate], GradPathError> {
        match self.backend.program_templates().await {
            Ok(templates) => {
                self.templates = templates;
                return Ok(&self.templates);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load program templates");
                self.notifications.error("Failed to load program templates");
                return Err(err);
            }
        }
    }

    pub async fn load(&mut self) -> Result<&[Program], GradPathError> {
        match self.backend.list_programs().await {
            Ok(programs) => {
                self.programs = programs;
                return Ok(&self.programs);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load programs");
                self.notifications.error("Failed to load programs");
                return Err(err);
            }
        }
    }

    fn added(&mut self, res: Result<Program, GradPathError>) -> Result<Program, GradPathError> {
        match res {
            Ok(program) => {
                self.programs.push(program.clone());
                self.notifications.success("Program added successfully");
                return Ok(program);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to add program");
                self.notifications.error("Failed to add program");
                return Err(err);
            }
        }
    }

    pub async fn assign(&mut self, template_id: &str) -> Result<Program, GradPathError> {
        let template_id = template_id.trim();
        if template_id.is_empty() {
            return Err(self.reject("Please select a program"));
        }

        let template_name = self
            .templates
            .iter()
            .find(|template| return template.id == template_id)
            .map(|template| return template.program_name.to_string());
        if let Some(name) = template_name {
            if self.has_program(&name) {
                return Err(self.reject("This program is already added"));
            }
        }

        let res = self.backend.assign_program(template_id).await;
        return self.added(res);
    }

    pub async fn create(&mut self, kind: ProgramKind, name: &str) -> Result<Program, GradPathError> {
        let request = ProgramRequest::new(kind, name);
        if request.program_name.is_empty() {
            return Err(self.reject("Please enter a program name"));
        }
        if self.has_program(&request.program_name) {
            return Err(self.reject("This program is already added"));
        }

        let res = self.backend.create_program(&request).await;
        return self.added(res);
    }

    /// Renames or retypes the program called `name`. The server's copy takes
    /// the old record's place in the list.
    pub async fn update(
        &mut self,
        name: &str,
        kind: ProgramKind,
        new_name: &str,
    ) -> Result<Program, GradPathError> {
        let name = name.trim();
        let idx = match self
            .programs
            .iter()
            .position(|program| return program.program_name == name)
        {
            Some(idx) => idx,
            None => return Err(self.reject(&format!("No program named {name}"))),
        };

        let mut request = ProgramRequest::new(kind, new_name);
        if request.program_name.is_empty() {
            return Err(self.reject("Please enter a program name"));
        }
        if request.program_name != name && self.has_program(&request.program_name) {
            return Err(self.reject("This program is already added"));
        }
        request.required_courses = self.programs[idx].required_courses.clone();

        match self.backend.update_program(name, &request).await {
            Ok(program) => {
                self.programs[idx] = program.clone();
                self.notifications.success("Program updated successfully");
                return Ok(program);
            }
            Err(err) => {
                tracing::error!(error = ?err, name, "Failed to update program");
                self.notifications.error("Failed to update program");
                return Err(err);
            }
        }
    }

    pub async fn progress(&self) -> Result<ProgramProgress, GradPathError> {
        match self.backend.program_progress().await {
            Ok(progress) => return Ok(progress),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load program progress");
                self.notifications.error("Failed to load program progress");
                return Err(err);
            }
        }
    }

    pub async fn remove(&mut self, name: &str, confirm: &dyn Confirm) -> Result<bool, GradPathError> {
        let name = name.trim();
        if !self.has_program(name) {
            return Err(self.reject(&format!("No program named {name}")));
        }
        if !confirm.confirm(&format!("Are you sure you want to remove {name}?")) {
            return Ok(false);
        }

        match self.backend.remove_program(name).await {
            Ok(()) => {
                self.programs.retain(|program| return program.program_name != name);
                self.notifications.success("Program removed successfully");
                return Ok(true);
            }
            Err(err) => {
                tracing::error!(error = ?err, name, "Failed to remove program");
                self.notifications.error("Failed to remove program");
                return Err(err);
            }
        }
    }
}
