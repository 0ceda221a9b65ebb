#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use thiserror::Error;
use yansi::Paint;

use super::ui::print_notification;
use crate::domain::models::requirement_text;
use crate::domain::models::Confirm;
use crate::domain::models::CourseInput;
use crate::domain::models::GradPathError;
use crate::domain::models::MajorBackend;
use crate::domain::models::ProgramKind;
use crate::domain::models::Registration;
use crate::domain::models::StaticConfirm;
use crate::domain::services::rendering;
use crate::domain::services::AuthService;
use crate::domain::services::CourseManager;
use crate::domain::services::MajorManager;
use crate::domain::services::Notifications;
use crate::domain::services::ProgramManager;
use crate::domain::services::SessionStore;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::prompts;
use crate::infrastructure::prompts::TerminalConfirm;

fn auth() -> AuthService {
    return AuthService::new(ApiClient::default(), SessionStore::default());
}

fn confirmer(matches: &ArgMatches) -> Box<dyn Confirm> {
    if matches.get_flag("yes") {
        return Box::new(StaticConfirm(true));
    }

    return Box::<TerminalConfirm>::default();
}

fn arg_or_ask(matches: &ArgMatches, key: &str, prompt: &str) -> Result<String> {
    if let Some(val) = matches.get_one::<String>(key) {
        return Ok(val.to_string());
    }

    return prompts::ask_text(prompt);
}

/// A failure the user has already seen as a notice.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ReportedError(pub GradPathError);

/// Prints the notice left by a manager, then passes the result on. Failures
/// that came with a notice are marked so they are not printed twice.
fn report<T>(res: Result<T, GradPathError>, notifications: &Notifications) -> Result<T> {
    let shown = print_notification(notifications);
    match res {
        Ok(val) => return Ok(val),
        Err(err) if shown => return Err(ReportedError(err).into()),
        Err(err) => return Err(err.into()),
    }
}

async fn login(matches: &ArgMatches) -> Result<()> {
    let username = arg_or_ask(matches, "username", "Username")?;
    let password = prompts::ask_password("Password")?;

    let user = auth().login(&username, &password).await?;
    println!("{}", Paint::green(format!("Logged in as {}", user.username)));

    return Ok(());
}

async fn pick_major(matches: &ArgMatches) -> Result<String> {
    if let Some(major) = matches.get_one::<String>("major") {
        return Ok(major.to_string());
    }

    let available = match ApiClient::default().available_majors().await {
        Ok(available) => available,
        Err(err) => {
            tracing::warn!(error = ?err, "Failed to load available majors");
            vec![]
        }
    };
    if available.is_empty() {
        return prompts::ask_text("Major");
    }

    match prompts::ask_select("Major", &available)? {
        Some(idx) => return Ok(available[idx].to_string()),
        None => bail!("A major is required to register."),
    }
}

async fn register(matches: &ArgMatches) -> Result<()> {
    let registration = Registration {
        username: arg_or_ask(matches, "username", "Username")?,
        email: arg_or_ask(matches, "email", "Email")?,
        major: pick_major(matches).await?,
        password: prompts::ask_new_password("Password")?,
    };

    let user = auth().register(&registration).await?;
    println!(
        "{}",
        Paint::green(format!("Welcome to GradPath, {}!", user.username))
    );

    return Ok(());
}

async fn whoami() -> Result<()> {
    let user = auth().refresh_user().await?;

    println!("Username: {}", user.username);
    println!("Email: {}", user.email);
    if let Some(level) = user.academic_level {
        println!("Academic level: {level}");
    }
    println!(
        "Major: {}",
        user.major.unwrap_or_else(|| return "Undeclared".to_string())
    );

    return Ok(());
}

fn course_input(matches: &ArgMatches, current: Option<CourseInput>) -> Result<CourseInput> {
    let arg = |key: &str| return matches.get_one::<String>(key).map(|val| return val.to_string());

    if let Some(mut input) = current {
        if let Some(department) = arg("department") {
            input.department = department;
        }
        if let Some(number) = arg("number") {
            input.course_number = number;
        }
        if let Some(name) = arg("name") {
            input.name = name;
        }
        if let Some(term) = arg("term") {
            input.term = Some(term);
        }
        return Ok(input);
    }

    let term = match arg("term") {
        Some(term) => Some(term),
        None => prompts::ask_optional_text("Term (optional)")?,
    };

    return Ok(CourseInput {
        department: arg_or_ask(matches, "department", "Department")?,
        course_number: arg_or_ask(matches, "number", "Course number")?,
        name: arg_or_ask(matches, "name", "Course name")?,
        term,
    });
}

async fn courses(matches: &ArgMatches) -> Result<()> {
    let notifications = Notifications::default();
    let api = auth().client().await?;
    let mut courses = CourseManager::new(Arc::new(api), notifications.clone());

    match matches.subcommand() {
        Some(("list", _)) => {
            let res = courses.load().await.map(|courses| return courses.to_vec());
            let list = report(res, &notifications)?;
            if list.is_empty() {
                println!("You have not added any courses yet.");
            }
            for course in list {
                let term = course.term.clone().unwrap_or_default();
                println!("{:>5}  {:<10} {:<40} {term}", course.id, course.code(), course.name);
            }
        }
        Some(("add", add_matches)) => {
            let input = course_input(add_matches, None)?;
            report(courses.add(&input).await, &notifications)?;
        }
        Some(("update", update_matches)) => {
            let id = update_matches.get_one::<i64>("id").copied().unwrap_or_default();
            report(courses.load().await.map(|_| return ()), &notifications)?;

            let current = courses
                .courses
                .iter()
                .find(|course| return course.id == id)
                .map(CourseInput::from_course);
            if current.is_none() {
                bail!("No course with id {id}");
            }

            let input = course_input(update_matches, current)?;
            report(courses.update(id, &input).await, &notifications)?;
        }
        Some(("remove", remove_matches)) => {
            let id = remove_matches.get_one::<i64>("id").copied().unwrap_or_default();
            report(courses.load().await.map(|_| return ()), &notifications)?;

            let removed = report(
                courses.remove(id, confirmer(remove_matches).as_ref()).await,
                &notifications,
            )?;
            if !removed {
                println!("Kept the course.");
            }
        }
        _ => bail!("Unknown courses command"),
    }

    return Ok(());
}

async fn majors(matches: &ArgMatches) -> Result<()> {
    let notifications = Notifications::default();
    let api = auth().client().await?;
    let mut majors = MajorManager::new(Arc::new(api), notifications.clone());

    match matches.subcommand() {
        Some(("list", _)) => {
            let list = report(
                majors.load().await.map(|majors| return majors.to_vec()),
                &notifications,
            )?;
            if list.is_empty() {
                println!("You have not added any majors yet.");
            }
            for major in list {
                println!("{:>5}  {}", major.id, major.name);
            }
        }
        Some(("available", _)) => {
            let list = report(
                majors.load_available().await.map(|available| return available.to_vec()),
                &notifications,
            )?;
            println!("{}", list.join("\n"));
        }
        Some(("add", add_matches)) => {
            report(majors.load().await.map(|_| return ()), &notifications)?;
            report(majors.load_available().await.map(|_| return ()), &notifications)?;

            let name = match add_matches.get_one::<String>("name") {
                Some(name) => name.to_string(),
                None => match prompts::ask_select("Major", &majors.available)? {
                    Some(idx) => majors.available[idx].to_string(),
                    None => return Ok(()),
                },
            };
            report(majors.add(&name).await, &notifications)?;
        }
        Some(("remove", remove_matches)) => {
            let id = remove_matches.get_one::<i64>("id").copied().unwrap_or_default();
            report(majors.load().await.map(|_| return ()), &notifications)?;

            let removed = report(
                majors.remove(id, confirmer(remove_matches).as_ref()).await,
                &notifications,
            )?;
            if !removed {
                println!("Kept the major.");
            }
        }
        _ => bail!("Unknown majors command"),
    }

    return Ok(());
}

async fn programs(matches: &ArgMatches) -> Result<()> {
    let notifications = Notifications::default();
    let api = auth().client().await?;
    let mut programs = ProgramManager::new(Arc::new(api), notifications.clone());

    match matches.subcommand() {
        Some(("list", _)) => {
            let list = report(
                programs.load().await.map(|programs| return programs.to_vec()),
                &notifications,
            )?;
            if list.is_empty() {
                println!("You have not added any programs yet.");
            }
            for program in list {
                println!(
                    "{:>5}  {:<13} {} ({} required courses)",
                    program.id,
                    program.program_type,
                    program.program_name,
                    program.required_courses.len()
                );
            }
        }
        Some(("templates", _)) => {
            let list = report(
                programs.load_templates().await.map(|templates| return templates.to_vec()),
                &notifications,
            )?;
            for template in list {
                println!(
                    "{:<20} {:<13} {}",
                    template.id, template.program_type, template.program_name
                );
            }
        }
        Some(("assign", assign_matches)) => {
            report(programs.load().await.map(|_| return ()), &notifications)?;
            report(programs.load_templates().await.map(|_| return ()), &notifications)?;

            let template_id = match assign_matches.get_one::<String>("template") {
                Some(template_id) => template_id.to_string(),
                None => {
                    let items = programs
                        .templates
                        .iter()
                        .map(|template| {
                            return format!("{} ({})", template.program_name, template.program_type);
                        })
                        .collect::<Vec<String>>();
                    match prompts::ask_select("Program", &items)? {
                        Some(idx) => programs.templates[idx].id.to_string(),
                        None => return Ok(()),
                    }
                }
            };
            report(programs.assign(&template_id).await, &notifications)?;
        }
        Some(("create", create_matches)) => {
            let kind = program_kind(create_matches)?;
            let name = arg_or_ask(create_matches, "name", "Program name")?;

            report(programs.load().await.map(|_| return ()), &notifications)?;
            report(programs.create(kind, &name).await, &notifications)?;
        }
        Some(("update", update_matches)) => {
            let name = arg_or_ask(update_matches, "name", "Program name")?;
            report(programs.load().await.map(|_| return ()), &notifications)?;

            let current = programs
                .programs
                .iter()
                .find(|program| return program.program_name == name.trim())
                .cloned();
            let current = match current {
                Some(current) => current,
                None => bail!("No program named {name}"),
            };

            let kind = match update_matches.get_one::<String>("type") {
                Some(_) => program_kind(update_matches)?,
                None => match ProgramKind::parse(&current.program_type) {
                    Some(kind) => kind,
                    None => bail!("Unknown program type {}", current.program_type),
                },
            };
            let new_name = update_matches
                .get_one::<String>("new-name")
                .map(|new_name| return new_name.to_string())
                .unwrap_or_else(|| return current.program_name.to_string());

            report(programs.update(&name, kind, &new_name).await, &notifications)?;
        }
        Some(("progress", _)) => {
            let progress = report(programs.progress().await, &notifications)?;
            let completed = progress
                .completed_courses
                .iter()
                .map(|course| return course.course_code.to_string())
                .collect::<Vec<String>>();
            println!("Completed: {}", completed.join(", "));

            for (name, requirements) in &progress.programs {
                let remaining = progress.remaining(name);
                println!(
                    "\n{} ({}): {} of {} requirements remaining",
                    Paint::new(name).bold(),
                    requirements.program_type,
                    remaining.len(),
                    requirements.required_courses.len()
                );
                for requirement in remaining {
                    println!("  - {}", requirement_text(&requirement));
                }
            }
        }
        Some(("remove", remove_matches)) => {
            let name = arg_or_ask(remove_matches, "name", "Program name")?;
            report(programs.load().await.map(|_| return ()), &notifications)?;

            let removed = report(
                programs.remove(&name, confirmer(remove_matches).as_ref()).await,
                &notifications,
            )?;
            if !removed {
                println!("Kept the program.");
            }
        }
        _ => bail!("Unknown programs command"),
    }

    return Ok(());
}

fn program_kind(matches: &ArgMatches) -> Result<ProgramKind> {
    let kind = matches
        .get_one::<String>("type")
        .and_then(|kind| return ProgramKind::parse(kind));
    match kind {
        Some(kind) => return Ok(kind),
        None => bail!("Unknown program type"),
    }
}

async fn recommend() -> Result<()> {
    let notifications = Notifications::default();
    let api = auth().client().await?;
    let courses = CourseManager::new(Arc::new(api), notifications.clone());

    let content = report(courses.recommendations().await, &notifications)?;
    for line in rendering::content_lines(&content, true) {
        println!("{line}");
    }

    return Ok(());
}

async fn logout() -> Result<()> {
    auth().logout().await?;
    println!("Logged out.");

    return Ok(());
}

pub async fn run(name: &str, matches: &ArgMatches) -> Result<()> {
    match name {
        "courses" => return courses(matches).await,
        "login" => return login(matches).await,
        "logout" => return logout().await,
        "majors" => return majors(matches).await,
        "programs" => return programs(matches).await,
        "recommend" => return recommend().await,
        "register" => return register(matches).await,
        "whoami" => return whoami().await,
        _ => bail!("Unknown command {name}"),
    }
}
