//! Text rendering for record lists and single records.

use locker_core::models::{Credential, FileEntry, Link, Note};
use locker_core::{Resource, ResourceScreen};

use crate::ui::{
    format_created, kv, print, simple_table, single_line, truncate, wrap, Column, UiContext,
};

/// How a record kind is shown on the terminal.
pub trait RecordView: Resource {
    const COLUMNS: &'static [Column];

    /// One table row. `shown` is the sensitive field as it should appear.
    fn row(&self, shown: Option<&str>) -> Vec<String>;

    /// Labeled fields for `show`.
    fn details(&self, shown: Option<&str>) -> Vec<(&'static str, String)>;

    fn to_json(&self, shown: Option<&str>) -> serde_json::Value;
}

const CELL: usize = 40;

impl RecordView for Note {
    const COLUMNS: &'static [Column] = &[
        Column::new("ID"),
        Column::new("Title"),
        Column::new("Note"),
    ];

    fn row(&self, shown: Option<&str>) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&single_line(&self.title), CELL),
            truncate(&single_line(shown.unwrap_or(&self.note)), CELL),
        ]
    }

    fn details(&self, shown: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Created", format_created(self.created_at.as_ref(), true)),
            ("Note", shown.unwrap_or(&self.note).to_string()),
        ]
    }

    fn to_json(&self, shown: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "note": shown.unwrap_or(&self.note),
            "created_at": self.created_at,
        })
    }
}

impl RecordView for Link {
    const COLUMNS: &'static [Column] = &[
        Column::new("ID"),
        Column::new("Title"),
        Column::new("URL"),
    ];

    fn row(&self, _shown: Option<&str>) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&single_line(Resource::title(self)), CELL),
            self.url.clone(),
        ]
    }

    fn details(&self, _shown: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("URL", self.url.clone()),
            ("Created", format_created(self.created_at.as_ref(), true)),
        ]
    }

    fn to_json(&self, _shown: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "url": self.url,
            "created_at": self.created_at,
        })
    }
}

impl RecordView for Credential {
    const COLUMNS: &'static [Column] = &[
        Column::new("ID"),
        Column::new("Site"),
        Column::new("Username"),
        Column::new("Email"),
        Column::new("Password"),
    ];

    fn row(&self, shown: Option<&str>) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&self.site, CELL),
            self.username.clone(),
            self.user_email.clone(),
            shown.unwrap_or_default().to_string(),
        ]
    }

    fn details(&self, shown: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Site", self.site.clone()),
            ("Username", self.username.clone()),
            ("Email", self.user_email.clone()),
            ("Password", shown.unwrap_or_default().to_string()),
            ("Created", format_created(self.created_at.as_ref(), true)),
        ]
    }

    fn to_json(&self, shown: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "site": self.site,
            "username": self.username,
            "email": self.user_email,
            "password": shown,
            "created_at": self.created_at,
        })
    }
}

impl RecordView for FileEntry {
    const COLUMNS: &'static [Column] = &[
        Column::new("ID"),
        Column::new("Title"),
        Column::new("Type"),
        Column::new("Description"),
    ];

    fn row(&self, _shown: Option<&str>) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&single_line(&self.title), CELL),
            self.kind().label().to_string(),
            truncate(&single_line(self.description.as_deref().unwrap_or("")), CELL),
        ]
    }

    fn details(&self, _shown: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Type", self.kind().label().to_string()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("URL", self.file_url.clone()),
            ("Created", format_created(self.created_at.as_ref(), true)),
        ]
    }

    fn to_json(&self, _shown: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "description": self.description,
            "kind": self.kind(),
            "url": self.file_url,
            "created_at": self.created_at,
        })
    }
}

/// Print the listed records as a table.
pub fn print_record_list<R: RecordView>(ctx: &UiContext, screen: &ResourceScreen<R>) {
    let rows: Vec<Vec<String>> = screen
        .items()
        .iter()
        .map(|item| item.row(screen.display_sensitive(item)))
        .collect();
    if rows.is_empty() {
        return;
    }
    print(ctx, &simple_table(ctx, R::COLUMNS, &rows));
}

/// Print one record as labeled fields; multi-line values are wrapped.
pub fn print_record<R: RecordView>(ctx: &UiContext, screen: &ResourceScreen<R>, item: &R) {
    for (label, value) in item.details(screen.display_sensitive(item)) {
        if ctx.mode.is_pretty() && value.contains('\n') {
            print(ctx, &kv(ctx, label, ""));
            for line in wrap(&value, ctx.width.saturating_sub(2).max(20)) {
                print(ctx, &format!("  {}", line));
            }
        } else {
            print(ctx, &kv(ctx, label, &single_line(&value)));
        }
    }
}
