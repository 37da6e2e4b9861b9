//! Spinner for requests to the backend.
//!
//! The hosted backend can take several seconds to wake up, so every
//! network-bound command shows a spinner on stderr. Nothing is drawn unless
//! [`UiContext::allows_animation`] says so.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

const TICK: Duration = Duration::from_millis(80);

/// A running spinner, or nothing when animation is off.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        if !ctx.allows_animation() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        let template = if ctx.unicode {
            "{spinner:.cyan} {msg}"
        } else {
            "{spinner} {msg}"
        };
        let mut style =
            ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner());
        if !ctx.unicode {
            style = style.tick_strings(&["|", "/", "-", "\\", "+"]);
        }
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK);
        Self { bar: Some(bar) }
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Clear the spinner line.
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Await `fut` with a spinner showing `message`.
pub async fn with_spinner<F, T>(ctx: &UiContext, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = Spinner::start(ctx, message);
    tracing::trace!(animated = spinner.is_active(), message, "waiting on backend");
    let out = fut.await;
    spinner.finish();
    out
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
    fn test_spinner_is_inert_without_tty() {
        let spinner = Spinner::start(&plain_ctx(), "Loading notes");
        assert!(!spinner.is_active());
        spinner.finish();
    }

    #[tokio::test]
    async fn test_with_spinner_returns_value() {
        let value = with_spinner(&plain_ctx(), "Searching", async { 42 }).await;
        assert_eq!(value, 42);
    }
}
