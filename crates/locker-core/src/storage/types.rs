//! Session data types.

use serde::{Deserialize, Serialize};

/// Key holding the logged-in flag (`"true"` or absent).
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";

/// Key holding the account email.
pub const EMAIL_KEY: &str = "email";

/// Locally cached session state.
///
/// This is the entire client-side persisted footprint. It never expires on
/// its own and lives until an explicit logout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_logged_in: bool,
    pub email: Option<String>,
}

impl Session {
    /// The email of an authenticated session, if any.
    pub fn authenticated_email(&self) -> Option<&str> {
        if self.is_logged_in {
            self.email.as_deref().filter(|email| !email.is_empty())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_email_requires_flag() {
        let session = Session {
            is_logged_in: false,
            email: Some("a@b.com".to_string()),
        };
        assert_eq!(session.authenticated_email(), None);

        let session = Session {
            is_logged_in: true,
            email: Some("a@b.com".to_string()),
        };
        assert_eq!(session.authenticated_email(), Some("a@b.com"));

        let session = Session {
            is_logged_in: true,
            email: Some(String::new()),
        };
        assert_eq!(session.authenticated_email(), None);
    }
}
