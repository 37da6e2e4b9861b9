use locker_core::AuthState;

use crate::app::AppContext;
use crate::cli::{LoginArgs, LoginMpinArgs, SignupArgs};
use crate::errors::CliError;
use crate::helpers::{mpin, secret, secret_pair, text};
use crate::output::print_json;
use crate::ui::{header, hint, kv, print, receipt, OutputMode};

/// Show the stored session. Reads only the local session file.
pub fn handle_status(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let mut auth = ctx.auth()?;
    let state = auth.restore().map_err(CliError::from)?.clone();
    let session_path = ctx.session_path()?;
    let base_url = ctx.base_url();

    let ui = ctx.ui();
    if ui.mode.is_json() {
        let mut value = serde_json::to_value(&state)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("base_url".to_string(), base_url.into());
            object.insert(
                "session_path".to_string(),
                session_path.display().to_string().into(),
            );
        }
        return print_json(&value);
    }

    let email = match &state {
        AuthState::Authenticated { email } => email.as_str(),
        _ => "",
    };
    let status = if state.is_authenticated() {
        "logged in"
    } else {
        "logged out"
    };

    if ui.mode == OutputMode::Pretty && !ctx.quiet() {
        print(ui, &header(ui, "status", None));
    }
    print(ui, &kv(ui, "Status", status));
    if !email.is_empty() {
        print(ui, &kv(ui, "Account", email));
    }
    print(ui, &kv(ui, "Server", &base_url));
    print(ui, &kv(ui, "Session", &session_path.display().to_string()));
    if !state.is_authenticated() && ui.mode.is_pretty() && !ctx.quiet() {
        print(ui, &hint(ui, "locker login"));
    }
    Ok(())
}

pub async fn handle_login(ctx: &AppContext<'_>, args: &LoginArgs) -> anyhow::Result<()> {
    let email = text(ctx, "Email", args.email.clone())?;
    let password = secret(ctx, "Password", args.password.clone())?;

    let mut auth = ctx.auth()?;
    ctx.step("Logging in", auth.login(email.trim(), &password))
        .await?;
    finish_login(ctx, email.trim())
}

pub async fn handle_login_mpin(ctx: &AppContext<'_>, args: &LoginMpinArgs) -> anyhow::Result<()> {
    let email = text(ctx, "Email", args.email.clone())?;
    let slots = mpin(ctx, "MPIN", args.mpin.clone())?;

    let mut auth = ctx.auth()?;
    ctx.step("Logging in", auth.login_with_mpin(email.trim(), &slots))
        .await?;
    finish_login(ctx, email.trim())
}

pub async fn handle_signup(ctx: &AppContext<'_>, args: &SignupArgs) -> anyhow::Result<()> {
    let name = text(ctx, "Full name", args.name.clone())?;
    let email = text(ctx, "Email", args.email.clone())?;
    let (password, confirm) = secret_pair(
        ctx,
        "Password",
        "Confirm password",
        args.password.clone(),
        args.confirm.clone(),
    )?;

    let mut auth = ctx.auth()?;
    ctx.step(
        "Creating account",
        auth.signup(name.trim(), email.trim(), &password, &confirm),
    )
    .await?;
    finish_login(ctx, email.trim())
}

fn finish_login(ctx: &AppContext<'_>, email: &str) -> anyhow::Result<()> {
    let ui = ctx.ui();
    match ui.mode {
        OutputMode::Json => {
            print_json(&serde_json::json!({ "status": "ok", "email": email }))?;
        }
        _ if ctx.quiet() => {}
        _ => print(ui, &receipt(ui, "Logged in", &[("Account", email)])),
    }
    ctx.print_next_step();
    Ok(())
}

pub fn handle_logout(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let mut auth = ctx.auth()?;
    auth.logout().map_err(CliError::from)?;
    ctx.flush_notices();

    let ui = ctx.ui();
    match ui.mode {
        OutputMode::Json => print_json(&serde_json::json!({ "status": "ok" }))?,
        _ if ctx.quiet() => {}
        _ => print(ui, &receipt(ui, "Logged out", &[])),
    }
    ctx.print_next_step();
    Ok(())
}
