use locker_core::models::{Credential, FileEntry, Link, Note};
use locker_core::search::ResultCard;
use locker_core::{Category, Route};

use crate::app::AppContext;
use crate::cli::{ListArgs, SearchArgs};
use crate::output::{card_json, print_json};
use crate::ui::theme::{styled, styles, BULLET};
use crate::ui::{
    blank_line, divider, header, print, single_line, table, truncate, Column, UiContext,
};

use super::records;

const CARD_COLUMNS: &[Column] = &[Column::new("ID"), Column::new("Title"), Column::new("Detail")];

pub async fn handle_search(ctx: &AppContext<'_>, args: &SearchArgs) -> anyhow::Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        return Ok(());
    }

    ctx.require_login()?;
    let mut dashboard = ctx.dashboard()?;
    ctx.step("Searching", dashboard.submit(query)).await?;

    if let Some(group) = args.open {
        dashboard.select(Category::from(group));
        return open(ctx).await;
    }

    let cards = dashboard.cards();
    let ui = ctx.ui();
    if ui.mode.is_json() {
        let values: Vec<serde_json::Value> = cards.iter().map(card_json).collect();
        return print_json(&serde_json::Value::Array(values));
    }
    render_cards(ctx, query, &cards);
    Ok(())
}

fn render_cards(ctx: &AppContext<'_>, query: &str, cards: &[ResultCard]) {
    let ui = ctx.ui();
    if !ui.mode.is_pretty() {
        for card in cards {
            println!(
                "{} {} {}",
                group_name(card.category),
                card.id,
                single_line(&card.title)
            );
        }
        return;
    }

    if !ctx.quiet() {
        print(ui, &header(ui, "search", Some(query)));
        print(ui, &divider(ui));
    }
    if cards.is_empty() {
        if !ctx.quiet() {
            print(ui, "No matches");
        }
        return;
    }
    for category in Category::ALL {
        let rows = card_rows(ui, cards, category);
        if rows.is_empty() {
            continue;
        }
        blank_line(ui);
        let title = format!("{} {} ({})", BULLET.get(ui.unicode), category.label(), rows.len());
        print(ui, &styled(&title, styles::bold(), ui.color));
        print(ui, &table(ui, CARD_COLUMNS, &rows));
    }
}

fn card_rows(ui: &UiContext, cards: &[ResultCard], category: Category) -> Vec<Vec<String>> {
    let width = ui.width.saturating_sub(20).clamp(20, 60);
    cards
        .iter()
        .filter(|card| card.category == category)
        .map(|card| {
            vec![
                card.id.clone(),
                truncate(&single_line(&card.title), width / 2),
                truncate(&single_line(&card.subtitle), width),
            ]
        })
        .collect()
}

/// The name `search --open` and `locker <kind>` use for a group.
fn group_name(category: Category) -> &'static str {
    match category {
        Category::Docs => "files",
        Category::Links => "links",
        Category::Creds => "creds",
        Category::Notes => "notes",
    }
}

/// List the kind the dashboard navigated to.
async fn open(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let args = ListArgs { reveal: false };
    match ctx.navigator().take() {
        Some(Route::Notes) => records::list::<Note>(ctx, "notes list", &args).await,
        Some(Route::Links) => records::list::<Link>(ctx, "links list", &args).await,
        Some(Route::Credentials) => records::list::<Credential>(ctx, "creds list", &args).await,
        Some(Route::Files) => records::list::<FileEntry>(ctx, "files list", &args).await,
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    fn card(category: Category, id: &str) -> ResultCard {
        ResultCard {
            category,
            id: id.to_string(),
            title: format!("title {}", id),
            subtitle: "detail\nsecond line".to_string(),
        }
    }

    #[test]
    fn test_card_rows_keep_one_category() {
        let ui = UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Pretty,
        };
        let cards = vec![
            card(Category::Links, "l1"),
            card(Category::Notes, "n1"),
            card(Category::Links, "l2"),
        ];
        let rows = card_rows(&ui, &cards, Category::Links);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "l1");
        assert!(!rows[0][2].contains('\n'));
    }

    #[test]
    fn test_group_names_match_commands() {
        assert_eq!(group_name(Category::Docs), "files");
        assert_eq!(group_name(Category::Creds), "creds");
    }
}
