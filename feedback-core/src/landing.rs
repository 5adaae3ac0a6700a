//! Landing page controller: email signup gate and account auth.
//!
//! The signup gate is fail-open on variants that ask for it. A transport
//! failure still grants local access so the download is never blocked by an
//! unreachable API. Server rejections are shown inline.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use shared_types::{AccountUser, AuthCredentials, SignupReceipt, SignupRequest};

use crate::api::AuthApi;
use crate::controller::ListenerId;
use crate::controller::listeners::Listeners;
use crate::copy::{LandingCopy, LANDING_PT};
use crate::error::{ApiError, SubmitError, ValidationError};
use crate::identity::PreferenceKey;
use crate::session::ClientSession;

const ACCESS_GRANTED: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AuthForm {
    fn credentials(&self, mode: AuthMode) -> Result<AuthCredentials, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        let name = match mode {
            AuthMode::Login => None,
            AuthMode::Signup => {
                let name = self.name.trim();
                if name.is_empty() {
                    return Err(ValidationError::EmptyName);
                }
                Some(name.to_string())
            }
        };
        Ok(AuthCredentials {
            email: email.to_string(),
            password: self.password.clone(),
            name,
        })
    }
}

/// Signed-in account as persisted between visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSession {
    pub user: AccountUser,
    pub api_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Recorded(SignupReceipt),
    /// The API was unreachable and access was granted anyway.
    FailedOpen,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LandingState {
    pub mode: AuthMode,
    pub form: AuthForm,
    pub authenticating: bool,
    pub auth_error: Option<String>,
    pub account: Option<AccountSession>,
    pub signup_email: String,
    pub signing_up: bool,
    pub signup_error: Option<String>,
    pub access_granted: bool,
}

pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}

#[derive(Clone)]
pub struct LandingController {
    session: ClientSession,
    auth: Rc<dyn AuthApi>,
    state: Rc<RefCell<LandingState>>,
    listeners: Rc<Listeners<LandingState>>,
}

impl PartialEq for LandingController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl LandingController {
    pub fn new(session: ClientSession, auth: Rc<dyn AuthApi>) -> Self {
        let controller = Self {
            session,
            auth,
            state: Rc::new(RefCell::new(LandingState::default())),
            listeners: Rc::new(Listeners::default()),
        };
        controller.restore();
        controller
    }

    pub fn state(&self) -> LandingState {
        self.state.borrow().clone()
    }

    pub fn copy(&self) -> &'static LandingCopy {
        &LANDING_PT
    }

    pub fn subscribe(&self, listener: impl Fn(&LandingState) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn update(&self, apply: impl FnOnce(&mut LandingState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        self.listeners.emit(&snapshot);
    }

    /// Reload the stored account and signup flag.
    ///
    /// An account is restored only when both the user record and the key are
    /// present and the record parses.
    pub fn restore(&self) {
        let store = self.session.identity_store();
        let account = match (
            store.get_preference(PreferenceKey::AuthUser),
            store.get_preference(PreferenceKey::ApiKey),
        ) {
            (Some(user), Some(api_key)) => match serde_json::from_str::<AccountUser>(&user) {
                Ok(user) => Some(AccountSession { user, api_key }),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable stored account: {}", e);
                    None
                }
            },
            _ => None,
        };
        let access_granted = store
            .get_preference(PreferenceKey::HasSeenSignup)
            .is_some_and(|value| value == ACCESS_GRANTED);

        self.update(|state| {
            state.account = account;
            state.access_granted = access_granted;
        });
    }

    pub fn has_access(&self) -> bool {
        self.state.borrow().access_granted
    }

    pub fn set_auth_mode(&self, mode: AuthMode) {
        self.update(|state| {
            state.mode = mode;
            state.auth_error = None;
        });
    }

    pub fn set_email(&self, email: &str) {
        let email = email.to_string();
        self.update(|state| state.form.email = email);
    }

    pub fn set_password(&self, password: &str) {
        let password = password.to_string();
        self.update(|state| state.form.password = password);
    }

    pub fn set_name(&self, name: &str) {
        let name = name.to_string();
        self.update(|state| state.form.name = name);
    }

    pub fn set_signup_email(&self, email: &str) {
        let email = email.to_string();
        self.update(|state| state.signup_email = email);
    }

    pub async fn submit_auth(&self) -> Result<AccountSession, SubmitError> {
        let (mode, credentials) = {
            let state = self.state.borrow();
            if state.authenticating {
                return Err(SubmitError::Busy);
            }
            (state.mode, state.form.credentials(state.mode)?)
        };

        self.update(|state| {
            state.authenticating = true;
            state.auth_error = None;
        });

        let result = match mode {
            AuthMode::Login => self.auth.login(&credentials).await,
            AuthMode::Signup => self.auth.signup(&credentials).await,
        };

        match result {
            Ok(response) => {
                let account = AccountSession {
                    user: response.user,
                    api_key: response.api_key,
                };
                self.persist_account(&account);
                tracing::info!(?mode, "account session stored");
                let stored = account.clone();
                self.update(|state| {
                    state.authenticating = false;
                    state.form = AuthForm::default();
                    state.account = Some(stored);
                });
                Ok(account)
            }
            Err(e) => {
                tracing::warn!(?mode, "Authentication failed: {}", e);
                let message = auth_error_message(&e);
                self.update(|state| {
                    state.authenticating = false;
                    state.auth_error = Some(message);
                });
                Err(e.into())
            }
        }
    }

    fn persist_account(&self, account: &AccountSession) {
        let store = self.session.identity_store();
        match serde_json::to_string(&account.user) {
            Ok(user) => store.set_preference(PreferenceKey::AuthUser, &user),
            Err(e) => tracing::warn!("Failed to serialize account: {}", e),
        }
        store.set_preference(PreferenceKey::ApiKey, &account.api_key);
    }

    pub fn logout(&self) {
        let store = self.session.identity_store();
        store.remove_preference(PreferenceKey::AuthUser);
        store.remove_preference(PreferenceKey::ApiKey);
        tracing::info!("account session cleared");
        self.update(|state| {
            state.account = None;
            state.form = AuthForm::default();
        });
    }

    /// Send the signup email. Grants access on success, and on a transport
    /// failure when the variant is fail-open.
    pub async fn submit_signup(&self) -> Result<SignupOutcome, SubmitError> {
        let email = {
            let state = self.state.borrow();
            if state.signing_up {
                return Err(SubmitError::Busy);
            }
            validate_email(&state.signup_email)?
        };

        self.update(|state| {
            state.signing_up = true;
            state.signup_error = None;
        });

        let config = self.session.config();
        let body = SignupRequest {
            email,
            source: config.signup_source.clone(),
            timestamp: Utc::now(),
        };

        match self.session.api().create_signup(&body).await {
            Ok(receipt) => {
                self.grant_access();
                Ok(SignupOutcome::Recorded(receipt))
            }
            Err(e) if e.is_network() && config.fail_open_signup => {
                tracing::warn!("Signup not recorded, granting access anyway: {}", e);
                self.grant_access();
                Ok(SignupOutcome::FailedOpen)
            }
            Err(e) => {
                tracing::warn!("Signup failed: {}", e);
                let message = e.user_message();
                self.update(|state| {
                    state.signing_up = false;
                    state.signup_error = Some(message);
                });
                Err(e.into())
            }
        }
    }

    fn grant_access(&self) {
        self.session
            .identity_store()
            .set_preference(PreferenceKey::HasSeenSignup, ACCESS_GRANTED);
        self.update(|state| {
            state.signing_up = false;
            state.access_granted = true;
        });
    }
}

fn auth_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
        _ => LANDING_PT.auth_error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_both_sides_of_the_at() {
        assert_eq!(validate_email("  ana@example.com "), Ok("ana@example.com".to_string()));
        assert_eq!(validate_email("   "), Err(ValidationError::EmptyEmail));
        assert_eq!(validate_email("ana"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn signup_mode_requires_a_name() {
        let form = AuthForm {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            name: " ".to_string(),
        };
        assert_eq!(form.credentials(AuthMode::Signup), Err(ValidationError::EmptyName));

        let login = form.credentials(AuthMode::Login).unwrap();
        assert_eq!(login.name, None);
    }

    #[test]
    fn auth_errors_fall_back_to_default_text() {
        let rejected = ApiError::Rejected {
            status: 401,
            message: "Credenciais invalidas".to_string(),
        };
        assert_eq!(auth_error_message(&rejected), "Credenciais invalidas");
        assert_eq!(
            auth_error_message(&ApiError::Network("offline".to_string())),
            LANDING_PT.auth_error
        );
    }
}
