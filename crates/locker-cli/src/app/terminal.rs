//! Terminal implementations of the reporter and navigator.
//!
//! Flows report while a spinner may be drawing, so notices are queued and
//! written by [`TerminalReporter::flush`] once the request has settled.

use std::sync::{Mutex, PoisonError};

use locker_core::{Navigator, Notice, Presentation, ReportPolicy, Reporter, Route, Severity};

use crate::ui::{notice_line, UiContext};

pub struct TerminalReporter {
    ui: UiContext,
    quiet: bool,
    policy: ReportPolicy,
    pending: Mutex<Vec<(Notice, Presentation)>>,
}

impl TerminalReporter {
    pub fn new(ui: UiContext, quiet: bool) -> Self {
        Self {
            ui,
            quiet,
            policy: ReportPolicy::default(),
            pending: Mutex::new(Vec::new()),
        }
    }

    fn take_pending(&self) -> Vec<(Notice, Presentation)> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }

    /// Write queued notices. Returns whether any were queued.
    ///
    /// Successful toasts go to stdout (never in JSON mode) and are dropped
    /// under `--quiet`. Everything else goes to stderr.
    pub fn flush(&self) -> bool {
        let pending = self.take_pending();
        for (notice, presentation) in &pending {
            let line = notice_line(&self.ui, notice, *presentation);
            if is_routine(notice, *presentation) {
                if self.quiet {
                    continue;
                }
                if self.ui.mode.is_json() {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            } else {
                eprintln!("{}", line);
            }
        }
        !pending.is_empty()
    }
}

fn is_routine(notice: &Notice, presentation: Presentation) -> bool {
    presentation == Presentation::Toast
        && matches!(notice.severity, Severity::Info | Severity::Success)
}

impl Reporter for TerminalReporter {
    fn report(&self, notice: Notice) {
        let presentation = self.policy.presentation(&notice);
        tracing::debug!(severity = ?notice.severity, ?presentation, "notice");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((notice, presentation));
    }
}

/// Remembers where a flow asked to go so the command can suggest it.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<Route> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigate");
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}

/// The command that opens `route`, if it has one.
pub fn next_step(route: Route) -> Option<&'static str> {
    match route {
        Route::Root => Some("locker login"),
        Route::Home => Some("locker search <QUERY>"),
        Route::Back => None,
        Route::Notes => Some("locker notes list"),
        Route::Links => Some("locker links list"),
        Route::Credentials => Some("locker creds list"),
        Route::Files => Some("locker files list"),
        Route::SetMpin => Some("locker set-mpin"),
        Route::Settings => Some("locker profile"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_reporter_queues_until_flush() {
        let reporter = TerminalReporter::new(plain_ctx(), true);
        reporter.report(Notice::success("Link saved successfully!"));
        assert!(reporter.flush());
        assert!(!reporter.flush());
    }

    #[test]
    fn test_field_errors_are_not_routine() {
        let notice = Notice::warning("Enter a valid email").on_field("email");
        assert!(!is_routine(&notice, Presentation::Inline));
        assert!(is_routine(&Notice::info("No notes found"), Presentation::Toast));
    }

    #[test]
    fn test_navigator_keeps_last_route() {
        let navigator = TerminalNavigator::new();
        navigator.navigate(Route::Home);
        navigator.navigate(Route::Notes);
        assert_eq!(navigator.take(), Some(Route::Notes));
        assert_eq!(navigator.take(), None);
    }

    #[test]
    fn test_next_step_for_routes() {
        assert_eq!(next_step(Route::Credentials), Some("locker creds list"));
        assert_eq!(next_step(Route::Back), None);
    }
}
