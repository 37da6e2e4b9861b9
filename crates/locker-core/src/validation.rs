//! Client-side form validation.
//!
//! Every validator is pure and returns `Err(reason)` with a human-readable
//! message on failure. Callers collect failures per field in [`FieldErrors`]
//! and refuse to submit while any failure is present.

use std::fmt;

use serde::Serialize;

/// Number of digits in an MPIN.
pub const MPIN_LEN: usize = 6;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check an email address against `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub fn validate_email(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Email is required");
    }
    if !is_email_shape(value) {
        return Err("Enter a valid email");
    }
    Ok(())
}

/// Check password strength: at least six characters including one digit.
///
/// Follows `^(?=.*\d).{6,}$`: line terminators never match `.`, and length
/// counts UTF-16 code units.
pub fn validate_password(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Password is required");
    }
    let single_line = !value.chars().any(is_line_terminator);
    let long_enough = value.encode_utf16().count() >= MIN_PASSWORD_LEN;
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(single_line && long_enough && has_digit) {
        return Err("Min 6 chars & include a number");
    }
    Ok(())
}

/// Check that a confirmation is present and matches the password exactly.
pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if confirm.is_empty() {
        return Err("Confirm your password");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(())
}

/// Check that all six MPIN slots hold exactly one digit each.
pub fn validate_mpin<S: AsRef<str>>(slots: &[S]) -> Result<(), &'static str> {
    let complete = slots.len() == MPIN_LEN && slots.iter().all(|slot| is_single_digit(slot.as_ref()));
    if !complete {
        return Err("Enter a valid 6-digit MPIN");
    }
    Ok(())
}

/// Check that a free-text field is non-empty after trimming.
pub fn validate_required(value: &str, reason: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err(reason);
    }
    Ok(())
}

fn is_single_digit(slot: &str) -> bool {
    let mut chars = slot.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

/// The `\s` class of the email pattern. Differs from `char::is_whitespace`
/// on U+FEFF (included) and U+0085 (excluded).
fn is_pattern_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{0B}' | '\u{0C}' | ' ' | '\u{A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}'
            | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    ) || is_line_terminator(c)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_email_shape(value: &str) -> bool {
    if value.chars().any(is_pattern_space) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // Some dot must have at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// The six slots of an MPIN entry form.
///
/// Empty slots are kept so an incomplete entry fails validation instead of
/// being silently compacted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MpinSlots(Vec<String>);

impl MpinSlots {
    /// Split typed input into slots.
    ///
    /// Whitespace-separated input (`"1 2 3 4 5 6"`) yields one slot per
    /// token; otherwise each character is a slot. Missing trailing slots
    /// are left empty.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let mut slots: Vec<String> = if trimmed.contains(char::is_whitespace) {
            trimmed.split_whitespace().map(str::to_string).collect()
        } else {
            trimmed.chars().map(String::from).collect()
        };
        while slots.len() < MPIN_LEN {
            slots.push(String::new());
        }
        Self(slots)
    }

    /// Build from explicit slot values.
    pub fn from_slots<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(slots.into_iter().map(Into::into).collect())
    }

    pub fn slots(&self) -> &[String] {
        &self.0
    }

    /// Whether every slot holds one digit.
    pub fn is_complete(&self) -> bool {
        validate_mpin(&self.0).is_ok()
    }

    /// Join the slots into a validated MPIN.
    pub fn to_mpin(&self) -> Result<Mpin, &'static str> {
        validate_mpin(&self.0)?;
        Ok(Mpin(self.0.concat()))
    }
}

/// A validated six-digit MPIN.
#[derive(Clone, PartialEq, Eq)]
pub struct Mpin(String);

impl Mpin {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Mpin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mpin(******)")
    }
}

/// Per-field validation failures, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(Vec<(String, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure, replacing any earlier message for the same field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = message,
            None => self.0.push((field, message)),
        }
    }

    /// Record the outcome of a validator under `field`.
    pub fn check(&mut self, field: &str, outcome: Result<(), &'static str>) -> &mut Self {
        if let Err(reason) = outcome {
            self.insert(field, reason);
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}
