//! Notice reporting.
//!
//! Flows never print. They hand a [`Notice`] to a [`Reporter`], and a single
//! [`ReportPolicy`] decides how each notice is presented.

use std::sync::Mutex;

use serde::Serialize;

use crate::validation::FieldErrors;

/// How serious a notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Where a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Next to the form field it concerns.
    Inline,
    /// Blocking, must be acknowledged.
    Alert,
    /// Transient, non-blocking.
    Toast,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    /// Form field the message belongs to, if any.
    pub field: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: None,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Attach the notice to a form field.
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// One warning per failed field.
    pub fn from_field_errors(errors: &FieldErrors) -> Vec<Notice> {
        errors
            .iter()
            .map(|(field, message)| Notice::warning(message).on_field(field))
            .collect()
    }
}

/// Maps notices to presentations.
///
/// Field-bound notices are shown inline when `inline_fields` is set;
/// everything else goes by severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPolicy {
    pub inline_fields: bool,
    pub info: Presentation,
    pub success: Presentation,
    pub warning: Presentation,
    pub error: Presentation,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            inline_fields: true,
            info: Presentation::Toast,
            success: Presentation::Toast,
            warning: Presentation::Alert,
            error: Presentation::Alert,
        }
    }
}

impl ReportPolicy {
    /// Present every notice the same way.
    pub fn uniform(presentation: Presentation) -> Self {
        Self {
            inline_fields: presentation == Presentation::Inline,
            info: presentation,
            success: presentation,
            warning: presentation,
            error: presentation,
        }
    }

    pub fn presentation(&self, notice: &Notice) -> Presentation {
        if self.inline_fields && notice.field.is_some() {
            return Presentation::Inline;
        }
        match notice.severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }
}

/// Sink for notices raised by flows and screens.
pub trait Reporter: Send + Sync {
    fn report(&self, notice: Notice);
}

/// Reporter that keeps every notice with its presentation.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    policy: ReportPolicy,
    notices: Mutex<Vec<(Notice, Presentation)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ReportPolicy) -> Self {
        Self {
            policy,
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn notices(&self) -> Vec<(Notice, Presentation)> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .map(|(notice, _)| notice.message)
            .collect()
    }

    pub fn last(&self) -> Option<(Notice, Presentation)> {
        self.notices().pop()
    }

    pub fn is_empty(&self) -> bool {
        self.notices().is_empty()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, notice: Notice) {
        let presentation = self.policy.presentation(&notice);
        if let Ok(mut guard) = self.notices.lock() {
            guard.push((notice, presentation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_keeps_field_errors_inline() {
        let policy = ReportPolicy::default();
        let inline = Notice::error("Invalid password").on_field("server");
        assert_eq!(policy.presentation(&inline), Presentation::Inline);
        assert_eq!(policy.presentation(&Notice::error("Signup failed")), Presentation::Alert);
        assert_eq!(policy.presentation(&Notice::success("Saved")), Presentation::Toast);
    }

    #[test]
    fn test_uniform_policy() {
        let policy = ReportPolicy::uniform(Presentation::Toast);
        let notice = Notice::warning("Title is required.").on_field("title");
        assert_eq!(policy.presentation(&notice), Presentation::Toast);
    }

    #[test]
    fn test_recording_reporter() {
        let reporter = RecordingReporter::new();
        assert!(reporter.is_empty());

        let mut errors = FieldErrors::new();
        errors.insert("email", "Enter a valid email");
        for notice in Notice::from_field_errors(&errors) {
            reporter.report(notice);
        }
        reporter.report(Notice::info("No notes found"));

        assert_eq!(reporter.messages(), vec!["Enter a valid email", "No notes found"]);
        let (first, presentation) = reporter.notices().remove(0);
        assert_eq!(first.field.as_deref(), Some("email"));
        assert_eq!(presentation, Presentation::Inline);
    }
}
