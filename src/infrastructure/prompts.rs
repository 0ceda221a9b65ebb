use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::Select;

use crate::domain::models::Confirm;

/// Confirmation prompt on the controlling terminal. Anything other than an
/// explicit yes counts as declining.
#[derive(Default)]
pub struct TerminalConfirm {}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let res = dialoguer::Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact_opt();

        match res {
            Ok(Some(answer)) => return answer,
            Ok(None) => return false,
            Err(err) => {
                tracing::warn!(error = ?err, "Confirmation prompt failed");
                return false;
            }
        }
    }
}

pub fn ask_text(prompt: &str) -> anyhow::Result<String> {
    let res = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;

    return Ok(res);
}

/// Like `ask_text`, but an empty answer is allowed and returned as `None`.
pub fn ask_optional_text(prompt: &str) -> anyhow::Result<Option<String>> {
    let res = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    if res.trim().is_empty() {
        return Ok(None);
    }
    return Ok(Some(res));
}

pub fn ask_new_password(prompt: &str) -> anyhow::Result<String> {
    let res = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_confirmation("Repeat password", "Passwords do not match.")
        .interact()?;

    return Ok(res);
}

pub fn ask_password(prompt: &str) -> anyhow::Result<String> {
    let res = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?;

    return Ok(res);
}

/// Returns the index of the picked item, or `None` when the prompt is
/// dismissed.
pub fn ask_select(prompt: &str, items: &[String]) -> anyhow::Result<Option<usize>> {
    let res = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()?;

    return Ok(res);
}
