//! Host environment seams: colour-scheme and locale signals, the root theme
//! attribute, and timers.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

pub const DEFAULT_THEME: Theme = Theme::Dark;

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub trait HostEnvironment {
    /// `Some(true)` when the environment asks for a light scheme, `Some(false)`
    /// when it reports otherwise, `None` when there is no signal at all.
    fn prefers_light_scheme(&self) -> Option<bool>;

    /// Locale tag such as `pt-BR`, if the environment exposes one.
    fn locale(&self) -> Option<String>;

    /// Mirror the theme onto the root presentation attribute.
    fn apply_theme(&self, theme: Theme);
}

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Host with fixed signals that ignores theme application.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub prefers_light: Option<bool>,
    pub locale: Option<String>,
}

impl HostEnvironment for StaticHost {
    fn prefers_light_scheme(&self) -> Option<bool> {
        self.prefers_light
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn apply_theme(&self, _theme: Theme) {}
}

/// Timer that completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTimer;

#[async_trait(?Send)]
impl Timer for ImmediateTimer {
    async fn sleep(&self, _duration: Duration) {}
}
