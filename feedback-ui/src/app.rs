use std::rc::Rc;

use dioxus::prelude::*;

use feedback_core::config::{VariantConfig, VariantKind, VariantRegistry};
use feedback_core::session::ClientSession;

use crate::api::HttpFeedbackApi;
use crate::dashboard::Dashboard;
use crate::landing::Landing;
use crate::platform::{page_hostname, query_param, BrowserHost, BrowserStorage, GlooTimer};

const VARIANTS_TOML: &str = include_str!("../variants.toml");

pub fn load_variants() -> VariantRegistry {
    match VariantRegistry::from_toml_str(VARIANTS_TOML) {
        Ok(registry) => registry,
        Err(e) => {
            dioxus_logger::tracing::warn!("Invalid variants.toml, using built-in variants: {}", e);
            VariantRegistry::builtin()
        }
    }
}

/// Variant named by `?variant=`, or the default one.
pub fn selected_variant() -> VariantConfig {
    let requested = query_param("variant");
    let variant = load_variants().select(requested.as_deref());
    dioxus_logger::tracing::info!("Starting variant '{}'", variant.name);
    variant
}

pub fn build_session(config: VariantConfig) -> ClientSession {
    let api_base = config.resolve_api_base(&page_hostname());
    ClientSession::new(
        config,
        Rc::new(BrowserStorage),
        Rc::new(BrowserHost),
        Rc::new(HttpFeedbackApi::new(api_base)),
        Rc::new(GlooTimer),
    )
}

#[component]
pub fn App() -> Element {
    let config = use_hook(selected_variant);

    rsx! {
        style { "{STYLES}" }
        if config.kind == VariantKind::Landing {
            Landing { config: config.clone() }
        } else {
            Dashboard { config: config.clone() }
        }
    }
}

const STYLES: &str = r#"
:root, [data-theme="dark"] {
  --bg: #0f1115; --panel: #181b22; --text: #e8eaf0; --muted: #9aa1b1;
  --accent: #f5b82e; --border: #2a2f3a; --danger: #f26d6d;
}
[data-theme="light"] {
  --bg: #f7f7f9; --panel: #ffffff; --text: #16181d; --muted: #5d6472;
  --accent: #d99a00; --border: #e1e3e8; --danger: #c53030;
}
body { margin: 0; background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; }
.app, .landing { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
.header { display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.header-actions { display: flex; gap: .5rem; align-items: center; }
.panel { background: var(--panel); border: 1px solid var(--border); border-radius: 10px; padding: 1rem; }
.layout { display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; margin-top: 1rem; }
.stats { display: flex; gap: 1rem; margin-top: 1rem; }
.stats .panel { flex: 1; text-align: center; }
.tabs button.active, .sorts button.active { background: var(--accent); color: #000; }
.item { display: flex; gap: .75rem; padding: .75rem 0; border-bottom: 1px solid var(--border); }
.vote { min-width: 3rem; }
.vote.voted { border-color: var(--accent); }
.muted { color: var(--muted); font-size: .85rem; }
.error { color: var(--danger); }
.notice { border-left: 3px solid var(--accent); padding-left: .5rem; }
.comments { position: fixed; right: 1rem; bottom: 1rem; width: 360px; max-height: 70vh; overflow: auto; }
input, textarea, select, button { font: inherit; padding: .4rem .6rem; border-radius: 6px;
  border: 1px solid var(--border); background: var(--bg); color: var(--text); }
button { cursor: pointer; }
button:disabled { opacity: .5; cursor: default; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_core::config::StaleResponses;
    use feedback_core::copy::Language;

    #[test]
    fn embedded_variants_parse() {
        let registry = VariantRegistry::from_toml_str(VARIANTS_TOML).unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["appfeedback", "bumblebee", "landing"]);

        let landing = registry.get("landing").unwrap();
        assert_eq!(landing.kind, VariantKind::Landing);
        assert!(landing.fail_open_signup);
        assert_eq!(landing.default_language, Language::Pt);

        let bumblebee = registry.get("bumblebee").unwrap();
        assert!(bumblebee.show_platform);
        assert_eq!(bumblebee.stale_responses, StaleResponses::Apply);
    }
}
