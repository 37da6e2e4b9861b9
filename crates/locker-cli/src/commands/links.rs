use locker_core::models::{Link, LinkDraft};

use crate::app::AppContext;
use crate::cli::{LinkArgs, LinksCommand};
use crate::helpers::{edited_text, text};

use super::records;

pub async fn handle(ctx: &AppContext<'_>, command: &LinksCommand) -> anyhow::Result<()> {
    match command {
        LinksCommand::List(args) => records::list::<Link>(ctx, "links list", args).await,
        LinksCommand::Show(args) => records::show::<Link>(ctx, args).await,
        LinksCommand::Add(args) => handle_add(ctx, args).await,
        LinksCommand::Edit(args) => {
            records::edit::<Link, _>(ctx, &args.id, |ctx, draft: &mut LinkDraft| {
                draft.title = edited_text(ctx, "Title", args.fields.title.clone(), &draft.title)?;
                draft.url = edited_text(ctx, "URL", args.fields.url.clone(), &draft.url)?;
                Ok(())
            })
            .await
        }
        LinksCommand::Delete(args) => records::delete::<Link>(ctx, args).await,
        LinksCommand::Share(args) => records::share::<Link>(ctx, args).await,
    }
}

async fn handle_add(ctx: &AppContext<'_>, args: &LinkArgs) -> anyhow::Result<()> {
    let draft = LinkDraft::new(
        text(ctx, "Title", args.title.clone())?,
        text(ctx, "URL", args.url.clone())?,
    );
    records::create::<Link>(ctx, &draft).await
}
