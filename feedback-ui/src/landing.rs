//! Download landing page: signup gate, download links and account panel.

use std::rc::Rc;

use dioxus::prelude::*;

use feedback_core::config::VariantConfig;
use feedback_core::copy::LandingCopy;
use feedback_core::landing::{AccountSession, AuthMode, LandingController, LandingState};

use crate::api::HttpAuthApi;
use crate::app::build_session;
use crate::platform::copy_to_clipboard;

const WINDOWS_DOWNLOAD: &str = "https://pub-bumblebee.b2bee.tech/latest/BumbleBee-Windows.exe";
const MACOS_DOWNLOAD: &str = "https://pub-bumblebee.b2bee.tech/latest/BumbleBee-macOS.dmg";

fn use_landing_state(controller: &LandingController) -> Signal<LandingState> {
    let view = use_signal(|| controller.state());
    let listener = use_hook(|| {
        controller.subscribe(move |state| {
            let mut view = view;
            view.set(state.clone());
        })
    });
    let controller = controller.clone();
    use_drop(move || controller.unsubscribe(listener));
    view
}

#[component]
pub fn Landing(config: VariantConfig) -> Element {
    let controller = use_hook(|| {
        let auth = Rc::new(HttpAuthApi::new(config.auth_base.clone()));
        LandingController::new(build_session(config.clone()), auth)
    });
    let view = use_landing_state(&controller);
    let state = view();
    let copy = controller.copy();

    rsx! {
        div { class: "landing",
            header { class: "header",
                div {
                    h1 { "{copy.brand}" }
                    p { class: "muted", "{copy.tagline}" }
                }
            }
            if state.access_granted {
                Downloads { copy }
                AccountPanel { controller: controller.clone(), state: state.clone(), copy }
            } else {
                SignupGate { controller: controller.clone(), state: state.clone(), copy }
            }
        }
    }
}

#[component]
fn SignupGate(controller: LandingController, state: LandingState, copy: &'static LandingCopy) -> Element {
    let on_email = {
        let controller = controller.clone();
        move |evt: FormEvent| controller.set_signup_email(&evt.value())
    };
    let on_submit = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let controller = controller.clone();
            spawn(async move {
                let _ = controller.submit_signup().await;
            });
        }
    };
    let label = if state.signing_up { copy.working } else { copy.signup_button };

    rsx! {
        form { class: "panel", onsubmit: on_submit,
            h2 { "{copy.signup_heading}" }
            input {
                r#type: "email",
                value: "{state.signup_email}",
                placeholder: "{copy.signup_placeholder}",
                oninput: on_email,
            }
            button { r#type: "submit", disabled: state.signing_up, "{label}" }
            if let Some(error) = state.signup_error.clone() {
                p { class: "error", "{error}" }
            }
        }
    }
}

#[component]
fn Downloads(copy: &'static LandingCopy) -> Element {
    rsx! {
        div { class: "panel",
            h2 { "{copy.download_heading}" }
            p { class: "muted", "{copy.download_subtitle}" }
            div { class: "header-actions",
                a { href: WINDOWS_DOWNLOAD, "Windows" }
                a { href: MACOS_DOWNLOAD, "macOS" }
            }
        }
    }
}

#[component]
fn AccountPanel(controller: LandingController, state: LandingState, copy: &'static LandingCopy) -> Element {
    match state.account.clone() {
        Some(account) => rsx! {
            ApiKeyView { controller, account, copy }
        },
        None => rsx! {
            AuthForm { controller, state, copy }
        },
    }
}

#[component]
fn ApiKeyView(controller: LandingController, account: AccountSession, copy: &'static LandingCopy) -> Element {
    let who = account
        .user
        .name
        .clone()
        .or_else(|| account.user.email.clone())
        .unwrap_or_default();
    let on_copy = {
        let key = account.api_key.clone();
        move |_: MouseEvent| {
            let key = key.clone();
            spawn(async move {
                if let Err(e) = copy_to_clipboard(&key).await {
                    dioxus_logger::tracing::warn!("Failed to copy API key: {}", e);
                }
            });
        }
    };
    let on_logout = move |_: MouseEvent| controller.logout();

    rsx! {
        div { class: "panel",
            h3 { "{copy.api_key_heading}" }
            p { class: "muted", "{who}" }
            code { "{account.api_key}" }
            p { class: "muted", "{copy.api_key_hint}" }
            div { class: "header-actions",
                button { onclick: on_copy, "{copy.copy_key}" }
                button { onclick: on_logout, "{copy.logout}" }
            }
        }
    }
}

#[component]
fn AuthForm(controller: LandingController, state: LandingState, copy: &'static LandingCopy) -> Element {
    let signup = state.mode == AuthMode::Signup;
    let submit_label = match (state.authenticating, state.mode) {
        (true, _) => copy.working,
        (false, AuthMode::Login) => copy.sign_in,
        (false, AuthMode::Signup) => copy.create_account,
    };
    let on_submit = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let controller = controller.clone();
            spawn(async move {
                let _ = controller.submit_auth().await;
            });
        }
    };

    rsx! {
        form { class: "panel", onsubmit: on_submit,
            div { class: "tabs",
                for (mode, label) in [(AuthMode::Login, copy.login_tab), (AuthMode::Signup, copy.signup_tab)] {
                    button {
                        r#type: "button",
                        class: if state.mode == mode { "active" } else { "" },
                        onclick: {
                            let controller = controller.clone();
                            move |_: MouseEvent| controller.set_auth_mode(mode)
                        },
                        "{label}"
                    }
                }
            }
            if signup {
                label { "{copy.name}" }
                input {
                    value: "{state.form.name}",
                    oninput: {
                        let controller = controller.clone();
                        move |evt: FormEvent| controller.set_name(&evt.value())
                    },
                }
            }
            label { "{copy.email}" }
            input {
                r#type: "email",
                value: "{state.form.email}",
                oninput: {
                    let controller = controller.clone();
                    move |evt: FormEvent| controller.set_email(&evt.value())
                },
            }
            label { "{copy.password}" }
            input {
                r#type: "password",
                value: "{state.form.password}",
                oninput: {
                    let controller = controller.clone();
                    move |evt: FormEvent| controller.set_password(&evt.value())
                },
            }
            button { r#type: "submit", disabled: state.authenticating, "{submit_label}" }
            if let Some(error) = state.auth_error.clone() {
                p { class: "error", "{error}" }
            }
        }
    }
}
