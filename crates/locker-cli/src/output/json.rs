//! JSON output formatting for records and search results.

use locker_core::search::ResultCard;
use locker_core::ResourceScreen;

use super::text::RecordView;

/// Print a value as pretty JSON on stdout.
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Convert a record to JSON, with its sensitive field as currently displayed.
pub fn record_json<R: RecordView>(screen: &ResourceScreen<R>, item: &R) -> serde_json::Value {
    item.to_json(screen.display_sensitive(item))
}

/// Convert every listed record to a JSON array.
pub fn records_json<R: RecordView>(screen: &ResourceScreen<R>) -> serde_json::Value {
    serde_json::Value::Array(
        screen
            .items()
            .iter()
            .map(|item| record_json(screen, item))
            .collect(),
    )
}

pub fn card_json(card: &ResultCard) -> serde_json::Value {
    serde_json::json!({
        "kind": card.category,
        "id": card.id,
        "title": card.title,
        "subtitle": card.subtitle,
    })
}
