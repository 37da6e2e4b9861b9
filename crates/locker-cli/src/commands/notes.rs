use locker_core::models::{Note, NoteDraft};

use crate::app::AppContext;
use crate::cli::{NoteArgs, NotesCommand};
use crate::helpers::{edited_text, text};

use super::records;

pub async fn handle(ctx: &AppContext<'_>, command: &NotesCommand) -> anyhow::Result<()> {
    match command {
        NotesCommand::List(args) => records::list::<Note>(ctx, "notes list", args).await,
        NotesCommand::Show(args) => records::show::<Note>(ctx, args).await,
        NotesCommand::Add(args) => handle_add(ctx, args).await,
        NotesCommand::Edit(args) => {
            records::edit::<Note, _>(ctx, &args.id, |ctx, draft: &mut NoteDraft| {
                fill(ctx, &args.fields, draft)
            })
            .await
        }
        NotesCommand::Delete(args) => records::delete::<Note>(ctx, args).await,
        NotesCommand::Share(args) => records::share::<Note>(ctx, args).await,
    }
}

async fn handle_add(ctx: &AppContext<'_>, args: &NoteArgs) -> anyhow::Result<()> {
    let draft = NoteDraft::new(
        text(ctx, "Title", args.title.clone())?,
        text(ctx, "Note", args.body.clone())?,
    );
    records::create::<Note>(ctx, &draft).await
}

fn fill(ctx: &AppContext<'_>, args: &NoteArgs, draft: &mut NoteDraft) -> anyhow::Result<()> {
    draft.title = edited_text(ctx, "Title", args.title.clone(), &draft.title)?;
    draft.note = edited_text(ctx, "Note", args.body.clone(), &draft.note)?;
    Ok(())
}
