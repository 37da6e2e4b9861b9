use std::path::PathBuf;

use locker_core::models::{FileDraft, FileEntry, FilePick};

use crate::app::{resolve_record_id, AppContext};
use crate::cli::{DownloadArgs, FileArgs, FileEditArgs, FilesCommand};
use crate::errors::CliError;
use crate::helpers::{edited_text, text};
use crate::output::print_json;

use super::records;

pub async fn handle(ctx: &AppContext<'_>, command: &FilesCommand) -> anyhow::Result<()> {
    match command {
        FilesCommand::List(args) => records::list::<FileEntry>(ctx, "files list", args).await,
        FilesCommand::Show(args) => records::show::<FileEntry>(ctx, args).await,
        FilesCommand::Add(args) => handle_add(ctx, args).await,
        FilesCommand::Edit(args) => handle_edit(ctx, args).await,
        FilesCommand::Delete(args) => records::delete::<FileEntry>(ctx, args).await,
        FilesCommand::Share(args) => records::share::<FileEntry>(ctx, args).await,
        FilesCommand::Download(args) => handle_download(ctx, args).await,
    }
}

/// Read the chosen file, if any. A missing choice is left for validation.
fn pick(path: Option<&PathBuf>) -> anyhow::Result<Option<FilePick>> {
    match path {
        Some(path) => Ok(Some(FilePick::from_path(path).map_err(CliError::from)?)),
        None => Ok(None),
    }
}

async fn handle_add(ctx: &AppContext<'_>, args: &FileArgs) -> anyhow::Result<()> {
    let path = match args.path.clone() {
        Some(path) => Some(path),
        None => {
            let answer = text(ctx, "File path", None)?;
            (!answer.trim().is_empty()).then(|| PathBuf::from(answer.trim()))
        }
    };
    let file = pick(path.as_ref())?;
    let title = text(ctx, "Title", args.title.clone())?;
    let description = text(ctx, "Description (optional)", args.description.clone())?;

    let draft = FileDraft::new(title, description, file);
    records::create::<FileEntry>(ctx, &draft).await
}

async fn handle_edit(ctx: &AppContext<'_>, args: &FileEditArgs) -> anyhow::Result<()> {
    let replacement = pick(args.file.as_ref())?;
    records::edit::<FileEntry, _>(ctx, &args.id, |ctx, draft: &mut FileDraft| {
        draft.title = edited_text(ctx, "Title", args.title.clone(), &draft.title)?;
        draft.description = edited_text(
            ctx,
            "Description",
            args.description.clone(),
            &draft.description,
        )?;
        if replacement.is_some() {
            draft.file = replacement;
        }
        Ok(())
    })
    .await
}

async fn handle_download(ctx: &AppContext<'_>, args: &DownloadArgs) -> anyhow::Result<()> {
    let screen = records::load::<FileEntry>(ctx).await?;
    let id = resolve_record_id(screen.items(), &args.id)?;
    let path = ctx
        .step("Downloading", screen.download(&id, &args.dest))
        .await?;

    if ctx.ui().mode.is_json() {
        print_json(&serde_json::json!({ "status": "ok", "id": id, "path": path }))?;
    }
    Ok(())
}
