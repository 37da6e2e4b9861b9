//! Application context for the Locker CLI.
//!
//! Bundles CLI arguments and config with the lazily-built gateway, session
//! store and current user, and hands out the core flows wired to the
//! terminal reporter and navigator.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use locker_core::{
    AuthFlow, CurrentUser, Dashboard, Gateway, HttpGateway, JsonFileStore, Resource,
    ResourceScreen, SessionStore,
};

use crate::cli::Cli;
use crate::config::{load_config, LockerConfig};
use crate::errors::CliError;
use crate::ui::{hint, print, with_spinner, UiContext};

use super::resolver::{resolve_config_path, resolve_session_path};
use super::terminal::{next_step, TerminalNavigator, TerminalReporter};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: LockerConfig,
    ui: UiContext,
    reporter: Arc<TerminalReporter>,
    navigator: Arc<TerminalNavigator>,
    session: OnceCell<SessionStore>,
    gateway: OnceCell<Arc<dyn Gateway>>,
    current: OnceCell<CurrentUser>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    ///
    /// Reads the config file if there is one; nothing touches the network.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config = load_config(&resolve_config_path()?)?;
        let format = cli.format.as_deref().or(config.ui.format.as_deref());
        let ui = UiContext::from_env(cli.json, format, cli.no_color, cli.ascii);
        Ok(Self {
            cli,
            reporter: Arc::new(TerminalReporter::new(ui.clone(), cli.quiet)),
            navigator: Arc::new(TerminalNavigator::new()),
            config,
            ui,
            session: OnceCell::new(),
            gateway: OnceCell::new(),
            current: OnceCell::new(),
        })
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        !self.cli.no_input && self.ui.is_interactive()
    }

    pub fn session_path(&self) -> anyhow::Result<PathBuf> {
        resolve_session_path(self.cli, &self.config)
    }

    pub fn session(&self) -> anyhow::Result<&SessionStore> {
        self.session.get_or_try_init(|| {
            let path = self.session_path()?;
            tracing::debug!(path = %path.display(), "session store");
            Ok(SessionStore::new(Arc::new(JsonFileStore::new(path))))
        })
    }

    pub fn gateway(&self) -> anyhow::Result<Arc<dyn Gateway>> {
        self.gateway
            .get_or_try_init(|| {
                let config = self.config.gateway_config(self.cli.base_url.as_deref());
                tracing::debug!(base_url = %config.base_url, "gateway");
                let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(config)?);
                Ok(gateway)
            })
            .cloned()
    }

    /// Backend the gateway talks to, after flag and config resolution.
    pub fn base_url(&self) -> String {
        let config = self.config.gateway_config(self.cli.base_url.as_deref());
        config.base_url.trim_end_matches('/').to_string()
    }

    pub fn current(&self) -> anyhow::Result<CurrentUser> {
        self.current
            .get_or_try_init(|| Ok(CurrentUser::new(self.gateway()?, self.session()?.clone())))
            .cloned()
    }

    /// Email of the active session, or an auth error pointing at `login`.
    pub fn require_login(&self) -> anyhow::Result<String> {
        self.session()?.require_email().map_err(|_| {
            CliError::auth_failed_with_hint("Not logged in", "Run: locker login").into()
        })
    }

    pub fn auth(&self) -> anyhow::Result<AuthFlow> {
        Ok(AuthFlow::new(
            self.gateway()?,
            self.current()?,
            self.reporter.clone(),
            self.navigator.clone(),
        ))
    }

    pub fn screen<R: Resource>(&self) -> anyhow::Result<ResourceScreen<R>> {
        Ok(ResourceScreen::new(
            self.gateway()?,
            self.current()?,
            self.reporter.clone(),
        ))
    }

    pub fn dashboard(&self) -> anyhow::Result<Dashboard> {
        Ok(Dashboard::new(
            self.gateway()?,
            self.current()?,
            self.reporter.clone(),
            self.navigator.clone(),
        ))
    }

    pub fn navigator(&self) -> &TerminalNavigator {
        &self.navigator
    }

    /// Run one backend step behind a spinner, then print its notices.
    ///
    /// A failure the flow already reported exits quietly with the matching
    /// code; anything else is left for `main` to print.
    pub async fn step<T, F>(&self, message: &str, fut: F) -> anyhow::Result<T>
    where
        F: Future<Output = locker_core::Result<T>>,
    {
        let outcome = with_spinner(&self.ui, message, fut).await;
        let reported = self.reporter.flush();
        outcome.map_err(|err| {
            tracing::debug!(error = %err, reported, "step failed");
            if reported {
                CliError::reported(&err).into()
            } else {
                CliError::from(err).into()
            }
        })
    }

    /// Print notices raised outside [`AppContext::step`].
    pub fn flush_notices(&self) -> bool {
        self.reporter.flush()
    }

    /// Suggest the command for wherever the last flow navigated.
    pub fn print_next_step(&self) {
        let Some(route) = self.navigator.take() else {
            return;
        };
        if self.quiet() || !self.ui.mode.is_pretty() {
            return;
        }
        if let Some(command) = next_step(route) {
            print(&self.ui, &hint(&self.ui, command));
        }
    }
}
