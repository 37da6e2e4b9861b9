//! Rendering primitives for CLI output.
//!
//! Every function returns the text for the active [`OutputMode`]: decorated
//! for a terminal, `key=value` lines for scripts, and nothing for JSON where
//! callers print their own document.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use locker_core::{Notice, Presentation, Severity};

use super::context::UiContext;
use super::format::single_line;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge, SEPARATOR};

/// Title line for a command, e.g. "Locker · search (git)".
///
/// `account` adds an "Account:" line in pretty mode. Plain mode prints
/// "locker <command>" only.
pub fn header_with_context(
    ctx: &UiContext,
    command: &str,
    context: Option<&str>,
    account: Option<&str>,
) -> String {
    match ctx.mode {
        OutputMode::Json => String::new(),
        OutputMode::Plain => format!("locker {}", command),
        OutputMode::Pretty => {
            let mut out = format!(
                "{} {} {}",
                styled("Locker", styles::bold(), ctx.color),
                SEPARATOR.get(ctx.unicode),
                command
            );
            if let Some(context) = context {
                out.push_str(&format!(" ({})", context));
            }
            if let Some(account) = account {
                out.push('\n');
                out.push_str(&kv(ctx, "Account", account));
            }
            out
        }
    }
}

pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    header_with_context(ctx, command, context, None)
}

/// A horizontal rule.
pub fn divider(ctx: &UiContext) -> String {
    match ctx.mode {
        OutputMode::Pretty if ctx.unicode => "\u{2500}".repeat(ctx.width.min(60)),
        OutputMode::Pretty => "-".repeat(ctx.width.min(60)),
        _ => "---".to_string(),
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let marker = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        marker
    } else {
        format!("{} {}", marker, message)
    }
}

/// "Key: value" for a terminal, `key=value` otherwise.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled(&format!("{}:", key), styles::dim(), ctx.color), value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Summary after an action: a badge and indented fields, or `status=ok`
/// followed by `key=value` lines.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };
    std::iter::once(first)
        .chain(
            items
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// A table column.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Bordered table for grouped results.
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }
    let mut table = Table::new();
    if ctx.unicode {
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|c| c.header));
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Borderless table with dimmed headers for record lists.
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|c| {
            let cell = Cell::new(c.header);
            if ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        }));
    for column in table.column_iter_mut() {
        column.set_padding((0, 2));
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// One space-separated line per row, no header.
fn plain_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print to stdout unless the command is writing JSON.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Render a notice the way its presentation asks for.
///
/// Inline notices name the field they belong to. Alerts are emphasized.
pub fn notice_line(ctx: &UiContext, notice: &Notice, presentation: Presentation) -> String {
    let message = match (&notice.field, presentation) {
        (Some(field), Presentation::Inline) => format!("{}: {}", field_label(field), notice.message),
        _ => notice.message.clone(),
    };

    if !ctx.mode.is_pretty() {
        return format!("{}={}", severity_key(notice.severity), single_line(&message));
    }
    let kind = Badge::for_severity(notice.severity);
    match presentation {
        Presentation::Alert => badge(ctx, kind, &styled(&message, styles::bold(), ctx.color)),
        Presentation::Inline | Presentation::Toast => badge(ctx, kind, &message),
    }
}

fn severity_key(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

fn field_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "[ERR] message" plus a hint line, or `error=` and `hint=` lines.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = vec![if ctx.mode.is_pretty() {
        badge(ctx, Badge::Err, message)
    } else {
        format!("error={}", single_line(message))
    }];
    if let Some(h) = error_hint {
        lines.push(hint(ctx, h));
    }
    lines.join("\n")
}

pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
