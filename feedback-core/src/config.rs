//! Variant configuration.
//!
//! A variant names everything that differs between the dashboard and landing
//! front-ends: copy, endpoint bases, storage namespace, and a few product
//! policies. Variants are read from a TOML table:
//!
//! ```toml
//! [variants.bumblebee]
//! storage_namespace = "bumblebee_feedback"
//! copy = "bumble_bee"
//! languages = ["en", "pt"]
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::copy::{copy_table, CopySet, CopyTable, Language};
use crate::error::ConfigError;
use crate::host::Theme;

pub const DEFAULT_VARIANT: &str = "appfeedback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleResponses {
    /// Every response is applied on arrival; a slow stale response can
    /// overwrite a newer one.
    #[default]
    Apply,
    /// Responses older than the latest issued request for the same query are dropped.
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    #[default]
    Dashboard,
    Landing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    pub name: String,
    pub kind: VariantKind,
    /// Prefix for every durable storage key of this variant.
    pub storage_namespace: String,
    /// Base prepended to `/api/...`; empty means same origin.
    pub api_base: String,
    /// Used instead of `api_base` when the page is served from localhost.
    pub dev_api_base: Option<String>,
    /// Origin of the external account service.
    pub auth_base: String,
    pub copy: CopySet,
    pub languages: Vec<Language>,
    pub default_language: Language,
    pub default_theme: Theme,
    pub leaderboard_limit: u32,
    pub success_display_ms: u64,
    pub show_platform: bool,
    pub default_platform: String,
    pub fail_open_signup: bool,
    pub signup_source: String,
    pub stale_responses: StaleResponses,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_VARIANT.to_string(),
            kind: VariantKind::Dashboard,
            storage_namespace: "appfeedback".to_string(),
            api_base: String::new(),
            dev_api_base: None,
            auth_base: "https://b2bee.tech".to_string(),
            copy: CopySet::AppFeedback,
            languages: vec![Language::En],
            default_language: Language::En,
            default_theme: Theme::Dark,
            leaderboard_limit: 5,
            success_display_ms: 5_000,
            show_platform: false,
            default_platform: "windows".to_string(),
            fail_open_signup: false,
            signup_source: "appfeedback".to_string(),
            stale_responses: StaleResponses::Apply,
        }
    }
}

impl VariantConfig {
    pub fn appfeedback() -> Self {
        Self::default()
    }

    pub fn bumblebee() -> Self {
        Self {
            name: "bumblebee".to_string(),
            storage_namespace: "bumblebee_feedback".to_string(),
            copy: CopySet::BumbleBee,
            languages: vec![Language::En, Language::Pt],
            show_platform: true,
            signup_source: "bumblebee-feedback".to_string(),
            ..Self::default()
        }
    }

    pub fn bumblebee_landing() -> Self {
        Self {
            name: "landing".to_string(),
            kind: VariantKind::Landing,
            storage_namespace: "bumblebee".to_string(),
            copy: CopySet::BumbleBee,
            languages: vec![Language::Pt],
            default_language: Language::Pt,
            fail_open_signup: true,
            signup_source: "bumblebee-landing".to_string(),
            ..Self::default()
        }
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    pub fn supports_language(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }

    pub fn copy_for(&self, language: Language) -> &'static CopyTable {
        copy_table(self.copy, language)
    }

    /// Key under which `suffix` is stored for this variant.
    pub fn storage_key(&self, suffix: &str) -> String {
        format!("{}_{}", self.storage_namespace, suffix)
    }

    /// Pick the API base for a page served from `hostname`.
    pub fn resolve_api_base(&self, hostname: &str) -> String {
        let local = hostname == "localhost" || hostname == "127.0.0.1";
        match (&self.dev_api_base, local) {
            (Some(dev), true) => dev.trim_end_matches('/').to_string(),
            _ => self.api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VariantFile {
    #[serde(default)]
    variants: BTreeMap<String, VariantConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantRegistry {
    variants: BTreeMap<String, VariantConfig>,
}

impl VariantRegistry {
    pub fn builtin() -> Self {
        let variants = [
            VariantConfig::appfeedback(),
            VariantConfig::bumblebee(),
            VariantConfig::bumblebee_landing(),
        ]
        .into_iter()
        .map(|variant| (variant.name.clone(), variant))
        .collect();
        Self { variants }
    }

    /// Parse a `[variants.<key>]` table. Each table key becomes the variant name.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: VariantFile = toml::from_str(source)?;
        let variants = file
            .variants
            .into_iter()
            .map(|(key, mut variant)| {
                variant.name = key.clone();
                (key, variant)
            })
            .collect();
        Ok(Self { variants })
    }

    pub fn get(&self, name: &str) -> Result<&VariantConfig, ConfigError> {
        self.variants
            .get(name)
            .ok_or_else(|| ConfigError::UnknownVariant(name.to_string()))
    }

    /// Variant for a `?variant=` query value, falling back to the default variant.
    pub fn select(&self, requested: Option<&str>) -> VariantConfig {
        requested
            .and_then(|name| self.variants.get(name))
            .or_else(|| self.variants.get(DEFAULT_VARIANT))
            .cloned()
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}
