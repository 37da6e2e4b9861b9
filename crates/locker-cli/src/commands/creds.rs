use locker_core::models::{Credential, CredentialDraft};

use crate::app::AppContext;
use crate::cli::{CredArgs, CredsCommand};
use crate::helpers::{edited_text, secret, text};

use super::records;

pub async fn handle(ctx: &AppContext<'_>, command: &CredsCommand) -> anyhow::Result<()> {
    match command {
        CredsCommand::List(args) => records::list::<Credential>(ctx, "creds list", args).await,
        CredsCommand::Show(args) => records::show::<Credential>(ctx, args).await,
        CredsCommand::Add(args) => handle_add(ctx, args).await,
        CredsCommand::Edit(args) => {
            records::edit::<Credential, _>(ctx, &args.id, |ctx, draft: &mut CredentialDraft| {
                fill(ctx, &args.fields, draft)
            })
            .await
        }
        CredsCommand::Delete(args) => records::delete::<Credential>(ctx, args).await,
        CredsCommand::Share(args) => records::share::<Credential>(ctx, args).await,
    }
}

async fn handle_add(ctx: &AppContext<'_>, args: &CredArgs) -> anyhow::Result<()> {
    let site = text(ctx, "Site", args.site.clone())?;
    let username = text(ctx, "Username", args.username.clone())?;
    let email = text(ctx, "Email", args.email.clone())?;
    let password = secret(ctx, "Password", args.password.clone())?;
    let draft = CredentialDraft::new(site, username, email, password.as_str());
    records::create::<Credential>(ctx, &draft).await
}

fn fill(ctx: &AppContext<'_>, args: &CredArgs, draft: &mut CredentialDraft) -> anyhow::Result<()> {
    draft.site = edited_text(ctx, "Site", args.site.clone(), &draft.site)?;
    draft.username = edited_text(ctx, "Username", args.username.clone(), &draft.username)?;
    draft.user_email = edited_text(ctx, "Email", args.email.clone(), &draft.user_email)?;
    // An empty answer keeps the stored password.
    let password = secret(ctx, "Password (empty keeps current)", args.password.clone())?;
    if !password.is_empty() {
        draft.password = password.to_string();
    }
    Ok(())
}
