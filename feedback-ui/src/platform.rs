//! Browser implementations of the storage, host and timer seams.

use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;

use feedback_core::error::StorageError;
use feedback_core::host::{HostEnvironment, Theme, Timer};
use feedback_core::storage::KeyValueStore;

const LIGHT_SCHEME_QUERY: &str = "(prefers-color-scheme: light)";

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

fn describe(error: JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(describe(e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(describe(e)))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHost;

impl HostEnvironment for BrowserHost {
    fn prefers_light_scheme(&self) -> Option<bool> {
        web_sys::window()
            .and_then(|window| window.match_media(LIGHT_SCHEME_QUERY).ok().flatten())
            .map(|query| query.matches())
    }

    fn locale(&self) -> Option<String> {
        web_sys::window().and_then(|window| window.navigator().language())
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(root) = document.document_element() {
                let _ = root.set_attribute("data-theme", theme.as_str());
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

pub fn page_hostname() -> String {
    web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default()
}

/// Value of `name` in the page's query string.
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window().and_then(|w| w.location().search().ok())?;
    url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(describe)
}
