//! Auth flow controller.
//!
//! Drives login, signup, MPIN login, MPIN change, logout and the account
//! settings forms. Each operation validates locally first; a failing form
//! never reaches the gateway. Failures are reported through the
//! [`Reporter`] and also returned so callers can pick an exit status.

use std::sync::Arc;

use serde::Serialize;

use crate::context::CurrentUser;
use crate::error::{LockerError, Result};
use crate::gateway::Gateway;
use crate::navigation::{Navigator, Route};
use crate::report::{Notice, Reporter};
use crate::storage::SessionStore;
use crate::validation::{
    validate_confirm_password, validate_email, validate_password, validate_required, FieldErrors,
    MpinSlots,
};

const LOGIN_FALLBACK: &str = "Something went wrong";
const SIGNUP_FALLBACK: &str = "Signup failed";
const MPIN_LOGIN_FALLBACK: &str = "Login failed";
const SET_MPIN_FALLBACK: &str = "Failed to update MPIN. Try again.";
const PROFILE_FALLBACK: &str = "Failed to update profile";
const PASSWORD_FALLBACK: &str = "Failed to update password";

/// Field name used for server-side failures shown next to a form.
pub const SERVER_FIELD: &str = "server";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated { email: String },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }
}

/// Whether the account has an MPIN. Only known after a `findUser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MpinState {
    Unknown,
    Unset,
    Set,
}

/// Input of the MPIN change form.
#[derive(Debug, Clone, Default)]
pub struct MpinChange {
    /// Current MPIN. Ignored when the account has none.
    pub old: Option<MpinSlots>,
    pub new: MpinSlots,
    pub confirm: MpinSlots,
}

pub struct AuthFlow {
    gateway: Arc<dyn Gateway>,
    current: CurrentUser,
    reporter: Arc<dyn Reporter>,
    navigator: Arc<dyn Navigator>,
    state: AuthState,
    mpin: MpinState,
    errors: FieldErrors,
}

impl AuthFlow {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        current: CurrentUser,
        reporter: Arc<dyn Reporter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            current,
            reporter,
            navigator,
            state: AuthState::Anonymous,
            mpin: MpinState::Unknown,
            errors: FieldErrors::new(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn mpin_state(&self) -> MpinState {
        self.mpin
    }

    /// Field errors left by the last submission.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn session(&self) -> &SessionStore {
        self.current.session()
    }

    /// Read the stored session and derive the starting state.
    pub fn restore(&mut self) -> Result<&AuthState> {
        let session = self.session().load()?;
        self.state = match session.authenticated_email() {
            Some(email) => AuthState::Authenticated {
                email: email.to_string(),
            },
            None => AuthState::Anonymous,
        };
        Ok(&self.state)
    }

    /// Email and password login. Navigates home on success.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .check("email", validate_email(email))
            .check("password", validate_password(password));
        self.reject_invalid(errors)?;

        self.state = AuthState::Authenticating;
        tracing::info!("login");
        let failure = match self.gateway.login(email, password).await {
            Ok(reply) if reply.success => {
                return self.complete_login(email, Route::Home);
            }
            Ok(reply) => LockerError::server(
                None,
                reply.message.unwrap_or_else(|| LOGIN_FALLBACK.to_string()),
            ),
            Err(e) => e,
        };
        Err(self.fail_inline(SERVER_FIELD, failure, LOGIN_FALLBACK))
    }

    /// Create an account. Failures are reported as alerts.
    pub async fn signup(
        &mut self,
        fullname: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .check("fullname", validate_required(fullname, "Full name is required"))
            .check("email", validate_email(email))
            .check("password", validate_password(password))
            .check("confirm", validate_confirm_password(password, confirm));
        self.reject_invalid(errors)?;

        self.state = AuthState::Authenticating;
        tracing::info!("signup");
        match self.gateway.signup(fullname, email, password).await {
            Ok(()) => self.complete_login(email, Route::Root),
            Err(e) => {
                self.state = AuthState::Anonymous;
                let message = e.server_message().unwrap_or(SIGNUP_FALLBACK).to_string();
                self.reporter.report(Notice::error(message.clone()));
                Err(relay(e, message))
            }
        }
    }

    /// Quick login with email and the six MPIN slots.
    pub async fn login_with_mpin(&mut self, email: &str, mpin: &MpinSlots) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.check("email", validate_email(email));
        let pin = match mpin.to_mpin() {
            Ok(pin) => Some(pin),
            Err(reason) => {
                errors.insert("mpin", reason);
                None
            }
        };
        self.reject_invalid(errors)?;
        let Some(pin) = pin else {
            return Err(LockerError::InvalidInput("MPIN incomplete".to_string()));
        };

        self.state = AuthState::Authenticating;
        tracing::info!("mpin login");
        let failure = match self.gateway.login_with_mpin(email, pin.as_str()).await {
            Ok(reply) if reply.success => {
                return self.complete_login(email, Route::Root);
            }
            Ok(reply) => LockerError::server(
                None,
                reply.message.unwrap_or_else(|| MPIN_LOGIN_FALLBACK.to_string()),
            ),
            Err(e) => e,
        };
        Err(self.fail_inline(SERVER_FIELD, failure, MPIN_LOGIN_FALLBACK))
    }

    /// Set a first MPIN, or change an existing one.
    ///
    /// The account is looked up first. When it already has an MPIN the old
    /// one must be entered; when it has none, no old value is sent even if
    /// one was typed.
    pub async fn set_mpin(&mut self, change: &MpinChange) -> Result<()> {
        self.errors = FieldErrors::new();
        let email = self.current.email()?;
        let user = match self.current.user().await {
            Ok(user) => user,
            Err(e) => {
                let message = e.server_message().unwrap_or(SET_MPIN_FALLBACK).to_string();
                self.reporter.report(Notice::error(message));
                return Err(e);
            }
        };
        let has_old_mpin = user.has_mpin();
        self.mpin = if has_old_mpin {
            MpinState::Set
        } else {
            MpinState::Unset
        };

        let old = if has_old_mpin {
            match change.old.as_ref().map(MpinSlots::to_mpin) {
                Some(Ok(pin)) => Some(pin),
                _ => return Err(self.warn("old", "Please enter your old 6-digit MPIN.")),
            }
        } else {
            None
        };
        let Ok(new) = change.new.to_mpin() else {
            return Err(self.warn("new", "Please enter a valid 6-digit new MPIN."));
        };
        let Ok(confirm) = change.confirm.to_mpin() else {
            return Err(self.warn("confirm", "Please confirm your new 6-digit MPIN."));
        };
        if new != confirm {
            return Err(self.warn("confirm", "New MPIN and Confirm MPIN do not match."));
        }

        tracing::info!(has_old_mpin, "set mpin");
        let old = old.as_ref().map(|pin| pin.as_str());
        let failure = match self.gateway.set_mpin(&email, old, new.as_str()).await {
            Ok(reply) if reply.success => {
                self.mpin = MpinState::Set;
                self.current.invalidate();
                self.reporter
                    .report(Notice::success("Your MPIN has been updated successfully!"));
                self.navigator.navigate(Route::Back);
                return Ok(());
            }
            Ok(reply) => LockerError::server(
                None,
                reply.message.unwrap_or_else(|| SET_MPIN_FALLBACK.to_string()),
            ),
            Err(e) => e,
        };
        Err(self.fail_inline(SERVER_FIELD, failure, SET_MPIN_FALLBACK))
    }

    /// Forget the session and return to the entry screen.
    pub fn logout(&mut self) -> Result<()> {
        self.session().clear()?;
        self.current.invalidate();
        self.state = AuthState::Anonymous;
        self.mpin = MpinState::Unknown;
        tracing::info!("logout");
        self.navigator.navigate(Route::Root);
        Ok(())
    }

    /// Change the account's name and email.
    ///
    /// On success the stored email is replaced so later requests use the
    /// new address.
    pub async fn update_profile(&mut self, fullname: &str, email: &str) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .check("fullname", validate_required(fullname, "Full name is required"))
            .check("email", validate_email(email));
        self.reject_invalid(errors)?;

        let old_email = self.current.email()?;
        match self.gateway.update_user(&old_email, email, fullname).await {
            Ok(()) => {
                self.session().replace_email(email)?;
                self.current.invalidate();
                self.state = AuthState::Authenticated {
                    email: email.to_string(),
                };
                self.reporter.report(Notice::success("Profile updated"));
                Ok(())
            }
            Err(e) => {
                let message = e.server_message().unwrap_or(PROFILE_FALLBACK).to_string();
                self.reporter.report(Notice::error(message.clone()));
                Err(relay(e, message))
            }
        }
    }

    /// Change the account password.
    pub async fn update_password(&mut self, old_password: &str, new_password: &str) -> Result<()> {
        self.errors = FieldErrors::new();
        if old_password.is_empty() || new_password.is_empty() {
            return Err(self.warn("password", "Please enter both old and new password"));
        }

        let email = self.current.email()?;
        match self
            .gateway
            .update_password(&email, old_password, new_password)
            .await
        {
            Ok(message) => {
                let message = message.unwrap_or_else(|| "Password updated".to_string());
                self.reporter.report(Notice::success(message));
                Ok(())
            }
            Err(e) => Err(self.fail_inline("password", e, PASSWORD_FALLBACK)),
        }
    }

    fn complete_login(&mut self, email: &str, route: Route) -> Result<()> {
        self.session().persist_login(email)?;
        self.current.invalidate();
        self.state = AuthState::Authenticated {
            email: email.to_string(),
        };
        self.navigator.navigate(route);
        Ok(())
    }

    /// Record and report validation failures, returning them as an error.
    fn reject_invalid(&mut self, errors: FieldErrors) -> Result<()> {
        self.errors = errors.clone();
        if errors.is_empty() {
            return Ok(());
        }
        for notice in Notice::from_field_errors(&errors) {
            self.reporter.report(notice);
        }
        Err(LockerError::Validation(errors))
    }

    fn warn(&mut self, field: &str, message: &'static str) -> LockerError {
        let mut errors = FieldErrors::new();
        errors.insert(field, message);
        self.errors = errors.clone();
        self.reporter.report(Notice::warning(message).on_field(field));
        LockerError::Validation(errors)
    }

    /// Report a request failure next to `field`.
    ///
    /// Server messages are shown verbatim; anything else falls back to
    /// `fallback`.
    fn fail_inline(&mut self, field: &str, error: LockerError, fallback: &str) -> LockerError {
        if self.state == AuthState::Authenticating {
            self.state = AuthState::Anonymous;
        }
        tracing::warn!(error = %error, "auth request failed");
        let message = error.server_message().unwrap_or(fallback).to_string();
        self.errors = FieldErrors::new();
        self.errors.insert(field, message.clone());
        self.reporter
            .report(Notice::error(message.clone()).on_field(field));
        relay(error, message)
    }
}

/// Server failures carry the message that was shown; transport failures
/// keep their own kind.
fn relay(error: LockerError, shown: String) -> LockerError {
    match error {
        LockerError::Server { status, .. } => LockerError::server(status, shown),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_state_serializes_with_tag() {
        let state = AuthState::Authenticated {
            email: "a@b.com".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "authenticated");
        assert_eq!(json["email"], "a@b.com");
        assert!(state.is_authenticated());
        assert!(!AuthState::Anonymous.is_authenticated());
    }
}
