mod common;

use common::{Failure, Harness, EMAIL};
use locker_core::validation::MpinSlots;
use locker_core::{AuthReply, AuthState, LockerError, MpinChange, MpinState, Presentation, Route};

#[tokio::test]
async fn test_login_success_persists_and_navigates_once() {
    let harness = Harness::new();
    let mut auth = harness.auth();

    auth.login(EMAIL, "secret1").await.unwrap();

    assert_eq!(harness.session.require_email().unwrap(), EMAIL);
    assert_eq!(harness.navigator.routes(), vec![Route::Home]);
    assert_eq!(harness.gateway.count("login"), 1);
    assert!(auth.state().is_authenticated());
}

#[tokio::test]
async fn test_login_rejected_leaves_session_untouched() {
    let harness = Harness::new();
    harness.gateway.state().auth_reply = Some(AuthReply::rejected("Invalid password"));
    let mut auth = harness.auth();

    let err = auth.login(EMAIL, "secret1").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid password");
    assert_eq!(auth.errors().get("server"), Some("Invalid password"));
    assert!(harness.session.load().unwrap().email.is_none());
    assert!(harness.navigator.routes().is_empty());
    assert_eq!(auth.state(), &AuthState::Anonymous);

    let (notice, presentation) = harness.reporter.last().unwrap();
    assert_eq!(notice.message, "Invalid password");
    assert_eq!(presentation, Presentation::Inline);
}

#[tokio::test]
async fn test_login_http_error_relays_body_message() {
    let harness = Harness::new();
    harness
        .gateway
        .fail_with(Failure::Server(401, "User not found".to_string()));
    let mut auth = harness.auth();

    let err = auth.login(EMAIL, "secret1").await.unwrap_err();

    assert!(matches!(err, LockerError::Server { status: Some(401), .. }));
    assert_eq!(auth.errors().get("server"), Some("User not found"));
    assert!(!harness.session.load().unwrap().is_logged_in);
}

#[tokio::test]
async fn test_login_network_failure_uses_fallback() {
    let harness = Harness::new();
    harness.gateway.fail_with(Failure::Network);
    let mut auth = harness.auth();

    let err = auth.login(EMAIL, "secret1").await.unwrap_err();

    assert!(matches!(err, LockerError::Network(_)));
    assert_eq!(auth.errors().get("server"), Some("Something went wrong"));
}

#[tokio::test]
async fn test_login_invalid_form_makes_no_request() {
    let harness = Harness::new();
    let mut auth = harness.auth();

    let err = auth.login("a@b", "short").await.unwrap_err();

    assert!(matches!(err, LockerError::Validation(_)));
    assert_eq!(auth.errors().get("email"), Some("Enter a valid email"));
    assert_eq!(auth.errors().get("password"), Some("Min 6 chars & include a number"));
    assert!(harness.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_signup_failure_is_an_alert() {
    let harness = Harness::new();
    harness
        .gateway
        .fail_with(Failure::Server(409, "Email already registered".to_string()));
    let mut auth = harness.auth();

    auth.signup("Ada", EMAIL, "secret1", "secret1").await.unwrap_err();

    let (notice, presentation) = harness.reporter.last().unwrap();
    assert_eq!(notice.message, "Email already registered");
    assert_eq!(presentation, Presentation::Alert);
    assert!(harness.session.load().unwrap().email.is_none());
}

#[tokio::test]
async fn test_signup_network_failure_falls_back() {
    let harness = Harness::new();
    harness.gateway.fail_with(Failure::Network);
    let mut auth = harness.auth();

    auth.signup("Ada", EMAIL, "secret1", "secret1").await.unwrap_err();

    assert_eq!(harness.reporter.messages(), vec!["Signup failed"]);
}

#[tokio::test]
async fn test_signup_success_goes_to_root() {
    let harness = Harness::new();
    let mut auth = harness.auth();

    auth.signup("Ada", EMAIL, "secret1", "secret1").await.unwrap();

    assert_eq!(harness.navigator.routes(), vec![Route::Root]);
    assert_eq!(harness.session.require_email().unwrap(), EMAIL);
}

#[tokio::test]
async fn test_signup_confirm_mismatch_blocks_submit() {
    let harness = Harness::new();
    let mut auth = harness.auth();

    auth.signup("", EMAIL, "secret1", "secret2").await.unwrap_err();

    assert_eq!(auth.errors().get("fullname"), Some("Full name is required"));
    assert_eq!(auth.errors().get("confirm"), Some("Passwords do not match"));
    assert!(harness.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_mpin_login_requires_all_six_slots() {
    let harness = Harness::new();
    let mut auth = harness.auth();

    let slots = MpinSlots::from_slots(["1", "2", "3", "4", "5", ""]);
    auth.login_with_mpin(EMAIL, &slots).await.unwrap_err();

    assert_eq!(auth.errors().get("mpin"), Some("Enter a valid 6-digit MPIN"));
    assert!(harness.gateway.calls().is_empty());

    auth.login_with_mpin(EMAIL, &MpinSlots::parse("123456"))
        .await
        .unwrap();
    assert_eq!(harness.navigator.routes(), vec![Route::Root]);
}

#[tokio::test]
async fn test_mpin_login_rejection_falls_back() {
    let harness = Harness::new();
    harness.gateway.state().auth_reply = Some(AuthReply::default());
    let mut auth = harness.auth();

    auth.login_with_mpin(EMAIL, &MpinSlots::parse("1 2 3 4 5 6"))
        .await
        .unwrap_err();

    assert_eq!(auth.errors().get("server"), Some("Login failed"));
    assert!(!harness.session.load().unwrap().is_logged_in);
}

#[tokio::test]
async fn test_first_mpin_never_sends_old_value() {
    let harness = Harness::logged_in();
    let mut auth = harness.auth();
    let change = MpinChange {
        old: Some(MpinSlots::parse("999999")),
        new: MpinSlots::parse("123456"),
        confirm: MpinSlots::parse("123456"),
    };

    auth.set_mpin(&change).await.unwrap();

    assert_eq!(harness.gateway.state().set_mpin_old, vec![None]);
    assert_eq!(auth.mpin_state(), MpinState::Set);
    assert_eq!(harness.navigator.routes(), vec![Route::Back]);
    assert_eq!(
        harness.reporter.messages(),
        vec!["Your MPIN has been updated successfully!"]
    );
}

#[tokio::test]
async fn test_changing_mpin_requires_old_value() {
    let harness = Harness::logged_in();
    harness.gateway.state().user = Some(common::user(common::OWNER, true));
    let mut auth = harness.auth();
    let change = MpinChange {
        old: None,
        new: MpinSlots::parse("123456"),
        confirm: MpinSlots::parse("123456"),
    };

    let err = auth.set_mpin(&change).await.unwrap_err();

    assert!(matches!(err, LockerError::Validation(_)));
    assert_eq!(auth.errors().get("old"), Some("Please enter your old 6-digit MPIN."));
    assert_eq!(harness.gateway.count("set_mpin"), 0);
    assert_eq!(auth.mpin_state(), MpinState::Set);

    let change = MpinChange {
        old: Some(MpinSlots::parse("654321")),
        ..change
    };
    auth.set_mpin(&change).await.unwrap();
    assert_eq!(
        harness.gateway.state().set_mpin_old,
        vec![Some("654321".to_string())]
    );
}

#[tokio::test]
async fn test_set_mpin_checks_new_and_confirm() {
    let harness = Harness::logged_in();
    let mut auth = harness.auth();

    let change = MpinChange {
        old: None,
        new: MpinSlots::parse("12345"),
        confirm: MpinSlots::parse("123456"),
    };
    auth.set_mpin(&change).await.unwrap_err();
    assert_eq!(auth.errors().get("new"), Some("Please enter a valid 6-digit new MPIN."));

    let change = MpinChange {
        old: None,
        new: MpinSlots::parse("123456"),
        confirm: MpinSlots::parse("654321"),
    };
    auth.set_mpin(&change).await.unwrap_err();
    assert_eq!(
        auth.errors().get("confirm"),
        Some("New MPIN and Confirm MPIN do not match.")
    );
    assert_eq!(harness.gateway.count("set_mpin"), 0);
}

#[tokio::test]
async fn test_set_mpin_rejection_is_inline() {
    let harness = Harness::logged_in();
    harness.gateway.state().auth_reply = Some(AuthReply::rejected("Old MPIN is incorrect"));
    let mut auth = harness.auth();
    let change = MpinChange {
        old: None,
        new: MpinSlots::parse("123456"),
        confirm: MpinSlots::parse("123456"),
    };

    auth.set_mpin(&change).await.unwrap_err();

    assert_eq!(auth.errors().get("server"), Some("Old MPIN is incorrect"));
    assert!(harness.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let harness = Harness::logged_in();
    let mut auth = harness.auth();
    assert!(auth.restore().unwrap().is_authenticated());

    auth.logout().unwrap();

    assert_eq!(harness.session.load().unwrap(), Default::default());
    assert_eq!(auth.state(), &AuthState::Anonymous);
    assert_eq!(harness.navigator.routes(), vec![Route::Root]);
}

#[tokio::test]
async fn test_update_profile_replaces_stored_email() {
    let harness = Harness::logged_in();
    let mut auth = harness.auth();

    auth.update_profile("Ada L", "ada@b.com").await.unwrap();

    assert_eq!(harness.session.require_email().unwrap(), "ada@b.com");
    assert_eq!(
        harness.gateway.state().updated_users,
        vec![(EMAIL.to_string(), "ada@b.com".to_string(), "Ada L".to_string())]
    );
}

#[tokio::test]
async fn test_update_password() {
    let harness = Harness::logged_in();
    let mut auth = harness.auth();

    auth.update_password("", "new1234").await.unwrap_err();
    assert_eq!(
        auth.errors().get("password"),
        Some("Please enter both old and new password")
    );
    assert_eq!(harness.gateway.count("update_password"), 0);

    auth.update_password("old1234", "new1234").await.unwrap();
    assert_eq!(harness.reporter.last().unwrap().0.message, "Password changed");
}

#[tokio::test]
async fn test_restore_requires_flag_and_email() {
    let harness = Harness::new();
    let mut auth = harness.auth();
    assert_eq!(auth.restore().unwrap(), &AuthState::Anonymous);

    harness.session.persist_login(EMAIL).unwrap();
    assert_eq!(
        auth.restore().unwrap(),
        &AuthState::Authenticated {
            email: EMAIL.to_string()
        }
    );
}
