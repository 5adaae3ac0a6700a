//! Local identity store.
//!
//! Owns the per-browser anonymous identity and the display preferences. All
//! keys are namespaced per variant. When durable storage refuses a call the
//! store keeps the value in memory for the rest of the session instead of
//! failing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::copy::Language;
use crate::host::{HostEnvironment, Theme};
use crate::storage::KeyValueStore;

const IDENTITY_PREFIX: &str = "user_";
const IDENTITY_TOKEN_LEN: usize = 9;

/// Opaque per-browser token used as `user_id` on every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnonymousIdentity {
    pub id: String,
}

impl AnonymousIdentity {
    pub fn generate() -> Self {
        let token: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(IDENTITY_TOKEN_LEN)
            .collect();
        Self {
            id: format!("{IDENTITY_PREFIX}{token}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    UserId,
    Theme,
    Language,
    AuthUser,
    ApiKey,
    HasSeenSignup,
}

impl PreferenceKey {
    pub fn suffix(&self) -> &'static str {
        match self {
            PreferenceKey::UserId => "user_id",
            PreferenceKey::Theme => "theme",
            PreferenceKey::Language => "lang",
            PreferenceKey::AuthUser => "user",
            PreferenceKey::ApiKey => "api_key",
            PreferenceKey::HasSeenSignup => "has_seen_signup",
        }
    }
}

pub struct LocalIdentityStore {
    namespace: String,
    storage: Rc<dyn KeyValueStore>,
    fallback: RefCell<HashMap<String, String>>,
}

impl LocalIdentityStore {
    pub fn new(namespace: impl Into<String>, storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            namespace: namespace.into(),
            storage,
            fallback: RefCell::new(HashMap::new()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self, key: PreferenceKey) -> String {
        format!("{}_{}", self.namespace, key.suffix())
    }

    /// Read the stored identity or mint and persist a new one.
    pub fn get_or_create_identity(&self) -> AnonymousIdentity {
        if let Some(id) = self.get_preference(PreferenceKey::UserId) {
            if !id.is_empty() {
                return AnonymousIdentity { id };
            }
        }

        let identity = AnonymousIdentity::generate();
        tracing::info!(namespace = %self.namespace, "created anonymous identity");
        self.set_preference(PreferenceKey::UserId, &identity.id);
        identity
    }

    pub fn get_preference(&self, key: PreferenceKey) -> Option<String> {
        let full_key = self.key(key);
        match self.storage.get(&full_key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => self.fallback.borrow().get(&full_key).cloned(),
            Err(e) => {
                tracing::debug!(key = %full_key, "storage read failed, using session memory: {e}");
                self.fallback.borrow().get(&full_key).cloned()
            }
        }
    }

    pub fn set_preference(&self, key: PreferenceKey, value: &str) {
        let full_key = self.key(key);
        match self.storage.set(&full_key, value) {
            Ok(()) => {
                self.fallback.borrow_mut().remove(&full_key);
            }
            Err(e) => {
                tracing::warn!(key = %full_key, "storage write failed, keeping value for this session: {e}");
                self.fallback
                    .borrow_mut()
                    .insert(full_key, value.to_string());
            }
        }
    }

    pub fn remove_preference(&self, key: PreferenceKey) {
        let full_key = self.key(key);
        if let Err(e) = self.storage.remove(&full_key) {
            tracing::warn!(key = %full_key, "storage remove failed: {e}");
        }
        self.fallback.borrow_mut().remove(&full_key);
    }

    /// Stored theme, else the environment's colour-scheme signal, else `fallback`.
    pub fn resolve_theme(&self, host: &dyn HostEnvironment, fallback: Theme) -> Theme {
        if let Some(theme) = self
            .get_preference(PreferenceKey::Theme)
            .and_then(|value| Theme::parse(&value))
        {
            return theme;
        }

        match host.prefers_light_scheme() {
            Some(true) => Theme::Light,
            Some(false) => Theme::Dark,
            None => fallback,
        }
    }

    /// Persist the theme and mirror it onto the root attribute.
    pub fn set_theme(&self, host: &dyn HostEnvironment, theme: Theme) {
        self.set_preference(PreferenceKey::Theme, theme.as_str());
        host.apply_theme(theme);
    }

    /// Stored language, else a supported locale prefix, else `fallback`.
    pub fn resolve_language(
        &self,
        host: &dyn HostEnvironment,
        supported: &[Language],
        fallback: Language,
    ) -> Language {
        let stored = self
            .get_preference(PreferenceKey::Language)
            .and_then(|value| Language::parse(&value))
            .filter(|language| supported.contains(language));
        if let Some(language) = stored {
            return language;
        }

        host.locale()
            .and_then(|locale| Language::from_locale(&locale))
            .filter(|language| supported.contains(language))
            .unwrap_or(fallback)
    }

    pub fn set_language(&self, language: Language) {
        self.set_preference(PreferenceKey::Language, language.as_str());
    }
}
