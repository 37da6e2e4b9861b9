//! Handlers shared by the four record kinds.

use locker_core::ResourceScreen;

use crate::app::{command_name, resolve_record_id, AppContext};
use crate::cli::{DeleteArgs, ListArgs, ShareArgs, ShowArgs};
use crate::errors::CliError;
use crate::helpers::confirm_delete;
use crate::output::{
    print_json, print_record, print_record_list, record_json, records_json, RecordView,
};
use crate::ui::{badge, header_with_context, hint, print, Badge, OutputMode};

fn plural<R: RecordView>() -> String {
    let noun = R::KIND.noun().to_lowercase();
    if noun.ends_with('s') {
        noun
    } else {
        format!("{}s", noun)
    }
}

/// Open the screen for `R` and load the owner's records.
pub async fn load<R: RecordView>(ctx: &AppContext<'_>) -> anyhow::Result<ResourceScreen<R>> {
    ctx.require_login()?;
    let mut screen = ctx.screen::<R>()?;
    ctx.step(&format!("Loading {}", plural::<R>()), screen.load())
        .await?;
    Ok(screen)
}

/// Load and resolve `fragment` to a listed id.
async fn load_one<R: RecordView>(
    ctx: &AppContext<'_>,
    fragment: &str,
) -> anyhow::Result<(ResourceScreen<R>, String)> {
    let screen = load::<R>(ctx).await?;
    let id = resolve_record_id(screen.items(), fragment)?;
    Ok((screen, id))
}

fn reveal_all<R: RecordView>(screen: &mut ResourceScreen<R>) {
    let ids: Vec<String> = screen.items().iter().map(|item| item.id().to_string()).collect();
    for id in ids {
        if !screen.is_revealed(&id) {
            screen.toggle_reveal(&id);
        }
    }
}

pub async fn list<R: RecordView>(
    ctx: &AppContext<'_>,
    command: &str,
    args: &ListArgs,
) -> anyhow::Result<()> {
    let mut screen = load::<R>(ctx).await?;
    if args.reveal {
        reveal_all(&mut screen);
    }

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&records_json(&screen));
    }

    if ui.mode.is_pretty() && !ctx.quiet() && !screen.items().is_empty() {
        let count = format!("{}", screen.items().len());
        print(ui, &header_with_context(ui, command, Some(&count), None));
    }
    print_record_list(ui, &screen);
    let masked = screen.items().iter().any(|item| item.sensitive().is_some());
    if ui.mode.is_pretty() && !ctx.quiet() && masked && !args.reveal {
        print(ui, &hint(ui, &format!("locker {} --reveal", command)));
    }
    Ok(())
}

pub async fn show<R: RecordView>(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let (mut screen, id) = load_one::<R>(ctx, &args.id).await?;
    if args.reveal {
        screen.toggle_reveal(&id);
    }
    let item = screen.find(&id).ok_or_else(|| {
        CliError::not_found(
            format!("No record with id {}", id),
            format!("Run: locker {} list", command_name::<R>()),
        )
    })?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&record_json(&screen, item));
    }
    print_record(ui, &screen, item);
    Ok(())
}

pub async fn share<R: RecordView>(ctx: &AppContext<'_>, args: &ShareArgs) -> anyhow::Result<()> {
    let (screen, id) = load_one::<R>(ctx, &args.id).await?;
    let text = screen.share_text(&id).map_err(CliError::from)?;

    if ctx.ui().mode.is_json() {
        return print_json(&serde_json::json!({ "id": id, "text": text }));
    }
    println!("{}", text);
    Ok(())
}

pub async fn delete<R: RecordView>(ctx: &AppContext<'_>, args: &DeleteArgs) -> anyhow::Result<()> {
    let (mut screen, id) = load_one::<R>(ctx, &args.id).await?;
    let what = screen
        .find(&id)
        .map(|item| format!("{} '{}'", R::KIND.noun().to_lowercase(), item.title()))
        .unwrap_or_else(|| id.clone());
    let confirm = confirm_delete(ctx, &what, args.force)?;

    let deleted = ctx
        .step(&format!("Deleting {}", what), screen.delete(&id, confirm))
        .await?;

    let ui = ctx.ui();
    if deleted {
        if ui.mode.is_json() {
            print_json(&serde_json::json!({ "status": "ok", "deleted": id }))?;
        }
        return Ok(());
    }

    if !ctx.quiet() {
        match ui.mode {
            OutputMode::Pretty => print(ui, &badge(ui, Badge::Info, "Cancelled")),
            OutputMode::Plain => println!("status=cancelled"),
            OutputMode::Json => print_json(&serde_json::json!({ "status": "cancelled" }))?,
        }
    }
    Ok(())
}

pub async fn create<R: RecordView>(ctx: &AppContext<'_>, draft: &R::Draft) -> anyhow::Result<()> {
    ctx.require_login()?;
    let mut screen = ctx.screen::<R>()?;
    ctx.step(&format!("Saving {}", R::KIND.noun().to_lowercase()), screen.create(draft))
        .await?;

    if ctx.ui().mode.is_json() {
        print_json(&serde_json::json!({ "status": "ok", "kind": R::KIND }))?;
    }
    Ok(())
}

/// Load, open the editor on `fragment`, let `fill` change the draft, save.
pub async fn edit<R, F>(ctx: &AppContext<'_>, fragment: &str, fill: F) -> anyhow::Result<()>
where
    R: RecordView,
    F: FnOnce(&AppContext<'_>, &mut R::Draft) -> anyhow::Result<()>,
{
    let (mut screen, id) = load_one::<R>(ctx, fragment).await?;
    let draft = screen.begin_edit(&id).map_err(CliError::from)?;
    if let Err(err) = fill(ctx, draft) {
        screen.cancel_edit();
        return Err(err);
    }

    ctx.step(&format!("Saving {}", R::KIND.noun().to_lowercase()), screen.save_edit())
        .await?;

    if ctx.ui().mode.is_json() {
        if let Some(item) = screen.find(&id) {
            print_json(&record_json(&screen, item))?;
        }
    }
    Ok(())
}
