//! Command handlers.

mod account;
mod auth;
mod creds;
mod files;
mod links;
mod misc;
mod notes;
mod records;
mod search;

use crate::app::AppContext;
use crate::cli::Commands;

/// Run one parsed command.
pub async fn dispatch(ctx: &AppContext<'_>, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Status => auth::handle_status(ctx),
        Commands::Login(args) => auth::handle_login(ctx, args).await,
        Commands::LoginMpin(args) => auth::handle_login_mpin(ctx, args).await,
        Commands::Signup(args) => auth::handle_signup(ctx, args).await,
        Commands::Logout => auth::handle_logout(ctx),
        Commands::SetMpin(args) => account::handle_set_mpin(ctx, args).await,
        Commands::Profile(args) => account::handle_profile(ctx, args).await,
        Commands::Password(args) => account::handle_password(ctx, args).await,
        Commands::Notes { command } => notes::handle(ctx, command).await,
        Commands::Links { command } => links::handle(ctx, command).await,
        Commands::Creds { command } => creds::handle(ctx, command).await,
        Commands::Files { command } => files::handle(ctx, command).await,
        Commands::Search(args) => search::handle_search(ctx, args).await,
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}
