use locker_core::MpinChange;

use crate::app::AppContext;
use crate::cli::{PasswordArgs, ProfileArgs, SetMpinArgs};
use crate::helpers::{mpin, secret};
use crate::output::print_json;
use crate::ui::{header_with_context, kv, print, OutputMode};

pub async fn handle_set_mpin(ctx: &AppContext<'_>, args: &SetMpinArgs) -> anyhow::Result<()> {
    ctx.require_login()?;
    let current = ctx.current()?;
    let user = ctx.step("Loading account", current.user()).await?;

    // The old MPIN is only asked for when the account already has one.
    let old = if user.has_mpin() {
        Some(mpin(ctx, "Current MPIN", args.old.clone())?)
    } else {
        None
    };
    let change = MpinChange {
        old,
        new: mpin(ctx, "New MPIN", args.new.clone())?,
        confirm: mpin(ctx, "Confirm MPIN", args.confirm.clone())?,
    };

    let mut auth = ctx.auth()?;
    ctx.step("Updating MPIN", auth.set_mpin(&change)).await?;

    if ctx.ui().mode.is_json() {
        print_json(&serde_json::json!({ "status": "ok", "mpin": auth.mpin_state() }))?;
    }
    ctx.print_next_step();
    Ok(())
}

/// Show the account, or update it when `--name` or `--email` is given.
pub async fn handle_profile(ctx: &AppContext<'_>, args: &ProfileArgs) -> anyhow::Result<()> {
    let email = ctx.require_login()?;
    let current = ctx.current()?;
    let user = ctx.step("Loading account", current.user()).await?;

    if args.name.is_none() && args.email.is_none() {
        let ui = ctx.ui();
        let mpin_set = if user.has_mpin() { "yes" } else { "no" };
        match ui.mode {
            OutputMode::Json => print_json(&serde_json::json!({
                "id": user.id,
                "fullname": user.fullname,
                "email": user.email.as_deref().unwrap_or(&email),
                "mpin": user.has_mpin(),
            }))?,
            mode => {
                if mode == OutputMode::Pretty && !ctx.quiet() {
                    print(ui, &header_with_context(ui, "profile", None, Some(&email)));
                }
                print(ui, &kv(ui, "Name", &user.fullname));
                print(ui, &kv(ui, "Email", user.email.as_deref().unwrap_or(&email)));
                print(ui, &kv(ui, "MPIN set", mpin_set));
            }
        }
        return Ok(());
    }

    let fullname = args.name.clone().unwrap_or_else(|| user.fullname.clone());
    let new_email = args
        .email
        .clone()
        .or_else(|| user.email.clone())
        .unwrap_or(email);

    let mut auth = ctx.auth()?;
    ctx.step(
        "Updating profile",
        auth.update_profile(fullname.trim(), new_email.trim()),
    )
    .await?;

    if ctx.ui().mode.is_json() {
        print_json(&serde_json::json!({
            "status": "ok",
            "fullname": fullname.trim(),
            "email": new_email.trim(),
        }))?;
    }
    Ok(())
}

pub async fn handle_password(ctx: &AppContext<'_>, args: &PasswordArgs) -> anyhow::Result<()> {
    ctx.require_login()?;
    let old = secret(ctx, "Current password", args.old.clone())?;
    let new = secret(ctx, "New password", args.new.clone())?;

    let mut auth = ctx.auth()?;
    ctx.step("Updating password", auth.update_password(&old, &new))
        .await?;

    if ctx.ui().mode.is_json() {
        print_json(&serde_json::json!({ "status": "ok" }))?;
    }
    Ok(())
}
