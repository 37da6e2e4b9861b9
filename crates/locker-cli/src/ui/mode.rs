//! Output mode selection.

use std::str::FromStr;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single JSON document per command
    Json,
    /// `key=value` and space-separated lines for scripts
    #[default]
    Plain,
    /// Tables, badges and colors for a terminal
    Pretty,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "plain" | "text" => Ok(Self::Plain),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl OutputMode {
    /// Pick the mode for this run.
    ///
    /// `--json` always wins. A named format is honored, except that pretty
    /// output needs a terminal that is not `TERM=dumb`. Without a format a
    /// terminal gets pretty output and anything else plain.
    pub fn resolve(
        json_flag: bool,
        format: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }

        let requested = format.and_then(|value| match value.parse::<Self>() {
            Ok(mode) => Some(mode),
            Err(reason) => {
                tracing::warn!("{}; choosing automatically", reason);
                None
            }
        });
        let capable = is_tty && !term_is_dumb;

        match requested {
            Some(Self::Json) => Self::Json,
            Some(Self::Pretty) | None if capable => Self::Pretty,
            _ => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
