//! Locker CLI - notes, links, credentials and files kept in a remote locker
//!
//! This is the command-line interface for Locker. It drives the flows in
//! `locker-core` and renders their results on the terminal.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::Cli;
use crate::errors::CliError;
use crate::ui::{print_error, UiContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli).await {
        let ui = UiContext::from_env(cli.json, cli.format.as_deref(), cli.no_color, cli.ascii);
        fail(&ui, &e);
    }
}

/// Logs go to stderr. `RUST_LOG=locker=debug` shows requests and flow steps.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("locker=warn,locker_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let ctx = AppContext::new(cli)?;
    commands::dispatch(&ctx, command).await
}

fn fail(ui: &UiContext, err: &anyhow::Error) -> ! {
    match err.downcast_ref::<CliError>() {
        Some(CliError::Reported { code }) => std::process::exit(*code),
        Some(cli_err) => {
            print_error(ui, &cli_err.message(), cli_err.hint());
            std::process::exit(cli_err.exit_code())
        }
        None => {
            print_error(ui, &format!("{:#}", err), None);
            std::process::exit(1)
        }
    }
}
