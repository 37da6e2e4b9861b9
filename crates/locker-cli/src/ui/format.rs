//! Text shaping for table cells and record details.

use chrono::{DateTime, Utc};

const ELLIPSIS: &str = "...";

/// Cut `s` to at most `max_len` characters, marking the cut with "...".
pub fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some(_) if max_len <= ELLIPSIS.len() => s.chars().take(max_len).collect(),
        Some(_) => {
            let keep = max_len - ELLIPSIS.len();
            let end = s.char_indices().nth(keep).map_or(s.len(), |(i, _)| i);
            format!("{}{}", &s[..end], ELLIPSIS)
        }
    }
}

/// Break `text` into lines of at most `width` characters.
///
/// Existing line breaks are kept. Words longer than `width`, such as URLs,
/// are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(width) {
                let needed = if line_len == 0 { piece.len() } else { line_len + 1 + piece.len() };
                if needed > width && line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.extend(piece);
                line_len += piece.len();
            }
        }
        lines.push(line);
    }

    lines
}

/// Creation time of a record, or "-" when the backend sent none.
pub fn format_created(dt: Option<&DateTime<Utc>>, pretty: bool) -> String {
    match dt {
        None => "-".to_string(),
        Some(dt) if pretty => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        Some(dt) => dt.to_rfc3339(),
    }
}

/// Collapse all whitespace, line breaks included, to single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
