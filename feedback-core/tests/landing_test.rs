//! Landing page signup gate and account auth.
//!
//! Run:
//!   cargo test -p feedback-core --test landing_test

mod support;

use std::rc::Rc;

use feedback_core::config::VariantConfig;
use feedback_core::copy::LANDING_PT;
use feedback_core::error::{SubmitError, ValidationError};
use feedback_core::landing::{AuthForm, AuthMode, LandingController, SignupOutcome};
use feedback_core::storage::MemoryStore;
use shared_types::SignupReceipt;

use support::{offline, rejected, Call, Harness, MockAuth};

fn landing(harness: &Harness) -> (LandingController, Rc<MockAuth>) {
    let auth = Rc::new(MockAuth::default());
    let controller = LandingController::new(harness.session(), auth.clone());
    (controller, auth)
}

// ─── Signup gate ────────────────────────────────────────────────────────────

#[tokio::test]
async fn signup_records_email_and_grants_access() {
    let harness = Harness::new(VariantConfig::bumblebee_landing());
    let (controller, _) = landing(&harness);
    assert!(!controller.has_access());

    controller.set_signup_email(" ana@example.com ");
    let outcome = controller.submit_signup().await.unwrap();

    assert_eq!(outcome, SignupOutcome::Recorded(SignupReceipt::Created));
    assert!(controller.has_access());
    assert_eq!(harness.stored("bumblebee_has_seen_signup").as_deref(), Some("true"));

    let calls = harness.api.calls();
    let Call::Signup(body) = &calls[0] else {
        panic!("expected signup call, got {calls:?}");
    };
    assert_eq!(body.email, "ana@example.com");
    assert_eq!(body.source, "bumblebee-landing");
}

#[tokio::test]
async fn network_failure_still_grants_access_when_fail_open() {
    let harness = Harness::new(VariantConfig::bumblebee_landing());
    *harness.api.signup.borrow_mut() = Err(offline());
    let (controller, _) = landing(&harness);

    controller.set_signup_email("ana@example.com");
    let outcome = controller.submit_signup().await.unwrap();

    assert_eq!(outcome, SignupOutcome::FailedOpen);
    assert!(controller.has_access());
    assert_eq!(harness.stored("bumblebee_has_seen_signup").as_deref(), Some("true"));
    assert!(!controller.state().signing_up);
}

#[tokio::test]
async fn server_rejection_is_not_failed_open() {
    let harness = Harness::new(VariantConfig::bumblebee_landing());
    *harness.api.signup.borrow_mut() = Err(rejected(400, "email already registered"));
    let (controller, _) = landing(&harness);

    controller.set_signup_email("ana@example.com");
    let err = controller.submit_signup().await.unwrap_err();

    assert!(matches!(err, SubmitError::Api(_)));
    let state = controller.state();
    assert!(!state.access_granted);
    assert_eq!(state.signup_error.as_deref(), Some("email already registered"));
    assert_eq!(harness.stored("bumblebee_has_seen_signup"), None);
}

#[tokio::test]
async fn network_failure_blocks_access_when_not_fail_open() {
    let config = VariantConfig {
        fail_open_signup: false,
        ..VariantConfig::bumblebee_landing()
    };
    let harness = Harness::new(config);
    *harness.api.signup.borrow_mut() = Err(offline());
    let (controller, _) = landing(&harness);

    controller.set_signup_email("ana@example.com");
    assert!(controller.submit_signup().await.is_err());
    assert!(!controller.has_access());
}

#[tokio::test]
async fn malformed_email_is_rejected_locally() {
    let harness = Harness::new(VariantConfig::bumblebee_landing());
    let (controller, _) = landing(&harness);

    controller.set_signup_email("not-an-email");
    let err = controller.submit_signup().await.unwrap_err();

    assert_eq!(err, SubmitError::Validation(ValidationError::InvalidEmail));
    assert!(harness.api.calls().is_empty());
}

#[tokio::test]
async fn previous_signup_is_remembered() {
    let harness = Harness::new(VariantConfig::bumblebee_landing())
        .with_storage(MemoryStore::with_entries([("bumblebee_has_seen_signup", "true")]));
    let (controller, _) = landing(&harness);

    assert!(controller.has_access());
}

// ─── Account auth ───────────────────────────────────────────────────────────

#[tokio::test]
async fn login_persists_account_and_logout_clears_it() {
    let harness = Harness::new(VariantConfig::bumblebee_landing());
    let (controller, auth) = landing(&harness);

    controller.set_email("ana@example.com");
    controller.set_password("secret");
    let account = controller.submit_auth().await.unwrap();

    assert_eq!(account.api_key, "bb_live_123");
    assert_eq!(auth.calls.borrow()[0].0, "login");
    assert_eq!(harness.stored("bumblebee_api_key").as_deref(), Some("bb_live_123"));
    assert!(harness
        .stored("bumblebee_user")
        .is_some_and(|user| user.contains("ana@example.com")));
    assert_eq!(controller.state().form, AuthForm::default());

    // A fresh page load restores the same account.
    let (reloaded, _) = landing(&harness);
    assert_eq!(reloaded.state().account, Some(account));

    controller.logout();
    assert_eq!(controller.state().account, None);
    assert_eq!(harness.stored("bumblebee_api_key"), None);
    assert_eq!(harness.stored("bumblebee_user"), None);
}

#[tokio::test]
async fn signup_mode_requires_name_before_calling_out() {
    let harness = Harness::new(VariantConfig::bumblebee_landing());
    let (controller, auth) = landing(&harness);

    controller.set_auth_mode(AuthMode::Signup);
    controller.set_email("ana@example.com");
    controller.set_password("secret");
    let err = controller.submit_auth().await.unwrap_err();
    assert_eq!(err, SubmitError::Validation(ValidationError::EmptyName));
    assert!(auth.calls.borrow().is_empty());

    controller.set_name("Ana");
    controller.submit_auth().await.unwrap();
    let form = controller.state().form;
    assert!(form.email.is_empty() && form.password.is_empty() && form.name.is_empty());
    let calls = auth.calls.borrow();
    assert_eq!(calls[0].0, "signup");
    assert_eq!(calls[0].1.name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn auth_failure_shows_server_text_or_default() {
    let harness = Harness::new(VariantConfig::bumblebee_landing());
    let (controller, auth) = landing(&harness);
    controller.set_email("ana@example.com");
    controller.set_password("wrong");

    *auth.response.borrow_mut() = Err(rejected(401, "Credenciais invalidas"));
    assert!(controller.submit_auth().await.is_err());
    assert_eq!(
        controller.state().auth_error.as_deref(),
        Some("Credenciais invalidas")
    );

    *auth.response.borrow_mut() = Err(offline());
    assert!(controller.submit_auth().await.is_err());
    let state = controller.state();
    assert_eq!(state.auth_error.as_deref(), Some(LANDING_PT.auth_error));
    assert!(!state.authenticating);
    assert_eq!(harness.stored("bumblebee_api_key"), None);
}

#[tokio::test]
async fn partial_or_corrupt_stored_account_is_ignored() {
    let only_key = Harness::new(VariantConfig::bumblebee_landing())
        .with_storage(MemoryStore::with_entries([("bumblebee_api_key", "bb_live_1")]));
    let (controller, _) = landing(&only_key);
    assert_eq!(controller.state().account, None);

    let corrupt = Harness::new(VariantConfig::bumblebee_landing()).with_storage(
        MemoryStore::with_entries([
            ("bumblebee_api_key", "bb_live_1"),
            ("bumblebee_user", "{not json"),
        ]),
    );
    let (controller, _) = landing(&corrupt);
    assert_eq!(controller.state().account, None);
}
