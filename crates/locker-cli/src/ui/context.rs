//! Terminal detection for output decisions.

use std::io::IsTerminal;

use super::mode::OutputMode;

const FALLBACK_WIDTH: usize = 80;

/// What the terminal supports, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// stdout is a terminal
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Columns available for tables and wrapped text
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Probe stdout and the environment, then apply the output flags.
    ///
    /// `format` is `--format` or the `[ui] format` config key. Color is off
    /// under `NO_COLOR`, `TERM=dumb`, `--no-color`, or when stdout is piped.
    pub fn from_env(json: bool, format: Option<&str>, no_color: bool, ascii: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let dumb = std::env::var("TERM").is_ok_and(|term| term == "dumb");

        Self {
            is_tty,
            color: is_tty && !no_color && !dumb && std::env::var_os("NO_COLOR").is_none(),
            unicode: !ascii,
            width: env_columns()
                .or_else(tty_columns)
                .unwrap_or(FALLBACK_WIDTH),
            mode: OutputMode::resolve(json, format, is_tty, dumb),
        }
    }

    /// Prompts read stdin and draw on stderr, so stdout may be piped.
    pub fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
    }

    /// Whether the request spinner may draw on stderr.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty() && std::io::stderr().is_terminal()
    }
}

fn env_columns() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()?
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|width| *width > 0)
}

/// Width of whichever of stdout or stderr is a terminal.
#[cfg(unix)]
fn tty_columns() -> Option<usize> {
    [libc::STDOUT_FILENO, libc::STDERR_FILENO]
        .into_iter()
        .find_map(|fd| {
            let mut size = libc::winsize {
                ws_row: 0,
                ws_col: 0,
                ws_xpixel: 0,
                ws_ypixel: 0,
            };
            // SAFETY: TIOCGWINSZ only writes a winsize into `size`.
            let rc = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size as *mut libc::winsize) };
            (rc == 0 && size.ws_col > 0).then_some(usize::from(size.ws_col))
        })
}

#[cfg(not(unix))]
fn tty_columns() -> Option<usize> {
    None
}
