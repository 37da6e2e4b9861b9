//! Route sink standing in for the app router.

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;

/// Destinations a flow can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Entry point: MPIN login, or login when no session exists.
    Root,
    /// Dashboard with search.
    Home,
    /// Pop the current screen.
    Back,
    Notes,
    Links,
    Credentials,
    Files,
    SetMpin,
    Settings,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Home => "/home",
            Route::Back => "..",
            Route::Notes => "/notes",
            Route::Links => "/links",
            Route::Credentials => "/creds",
            Route::Files => "/files",
            Route::SetMpin => "/set-mpin",
            Route::Settings => "/settings",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that remembers every route it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigate");
        if let Ok(mut guard) = self.routes.lock() {
            guard.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(Route::Home);
        navigator.navigate(Route::Credentials);
        assert_eq!(navigator.routes(), vec![Route::Home, Route::Credentials]);
        assert_eq!(navigator.last().map(|r| r.path()), Some("/creds"));
    }
}
