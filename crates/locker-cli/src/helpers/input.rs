use dialoguer::{Confirm as ConfirmPrompt, Input, Password};
use zeroize::Zeroizing;

use locker_core::validation::MpinSlots;
use locker_core::Confirm;

use crate::app::AppContext;
use crate::errors::CliError;

/// A text value from a flag, a prompt, or empty.
pub fn text(ctx: &AppContext, label: &str, given: Option<String>) -> anyhow::Result<String> {
    if let Some(value) = given {
        return Ok(value);
    }
    if !ctx.interactive() {
        return Ok(String::new());
    }
    Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", label.to_lowercase(), e))
}

/// A text value for an edit form, pre-filled with `current`.
///
/// Without a prompt the current value is kept.
pub fn edited_text(
    ctx: &AppContext,
    label: &str,
    given: Option<String>,
    current: &str,
) -> anyhow::Result<String> {
    if let Some(value) = given {
        return Ok(value);
    }
    if !ctx.interactive() {
        return Ok(current.to_string());
    }
    Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", label.to_lowercase(), e))
}

/// A hidden value from a flag, a prompt, or empty.
pub fn secret(
    ctx: &AppContext,
    label: &str,
    given: Option<String>,
) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = given {
        return Ok(Zeroizing::new(value));
    }
    if !ctx.interactive() {
        return Ok(Zeroizing::new(String::new()));
    }
    Password::new()
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", label.to_lowercase(), e))
}

/// A hidden value and its confirmation.
///
/// When the value comes from a flag and no confirmation was given, the
/// value confirms itself. Mismatches are left for form validation.
pub fn secret_pair(
    ctx: &AppContext,
    label: &str,
    confirm_label: &str,
    given: Option<String>,
    given_confirm: Option<String>,
) -> anyhow::Result<(Zeroizing<String>, Zeroizing<String>)> {
    let from_flag = given.is_some();
    let value = secret(ctx, label, given)?;
    let confirm = match given_confirm {
        Some(confirm) => Zeroizing::new(confirm),
        None if from_flag => value.clone(),
        None => secret(ctx, confirm_label, None)?,
    };
    Ok((value, confirm))
}

/// A 6-digit MPIN split into slots.
pub fn mpin(ctx: &AppContext, label: &str, given: Option<String>) -> anyhow::Result<MpinSlots> {
    let value = secret(ctx, label, given)?;
    Ok(MpinSlots::parse(&value))
}

/// Ask before deleting, unless `force` was passed.
pub fn confirm_delete(ctx: &AppContext, what: &str, force: bool) -> anyhow::Result<Confirm> {
    if force {
        return Ok(Confirm::Accepted);
    }
    if !ctx.interactive() {
        return Err(CliError::invalid_input(format!(
            "Refusing to delete {} without confirmation; pass --force",
            what
        ))
        .into());
    }
    let accepted = ConfirmPrompt::new()
        .with_prompt(format!("Delete {}?", what))
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))?;
    Ok(Confirm::from(accepted))
}
