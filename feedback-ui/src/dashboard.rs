//! Feedback dashboard view.
//!
//! Components only render [`DashboardState`] snapshots and forward events to
//! the [`FeedbackController`]; nothing here talks to the API directly.

use dioxus::prelude::*;
use shared_types::{FeedbackComment, FeedbackItem, ItemType, SortBy};

use feedback_core::config::VariantConfig;
use feedback_core::controller::{CommentThread, DashboardState, FeedbackController, SubmitPhase};
use feedback_core::copy::CopyTable;
use feedback_core::display::{
    algorithm_preview, credits_label, leaderboard_name, rank_label, relative_date, status_label,
    theme_toggle_glyph, theme_toggle_title, vote_marker,
};

use crate::app::build_session;

/// Mirror controller state into a signal for as long as the component lives.
fn use_dashboard_state(controller: &FeedbackController) -> Signal<DashboardState> {
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
pub fn Dashboard(config: VariantConfig) -> Element {
    let controller = use_hook(|| FeedbackController::new(build_session(config.clone())));
    let view = use_dashboard_state(&controller);

    {
        let controller = controller.clone();
        use_effect(move || {
            let controller = controller.clone();
            spawn(async move {
                controller.mount().await;
            });
        });
    }

    let state = view();
    let copy = controller.copy();

    rsx! {
        div { class: "app",
            Header { controller: controller.clone(), state: state.clone(), copy }
            StatsBar { state: state.clone(), copy }
            div { class: "layout",
                div {
                    FeedPanel { controller: controller.clone(), state: state.clone(), copy }
                }
                div {
                    SubmitForm { controller: controller.clone(), state: state.clone(), copy }
                    Leaderboard { state: state.clone(), copy }
                    AlgorithmPanel { state: state.clone(), copy }
                }
            }
            if let Some(thread) = state.comments.clone() {
                CommentsPanel { controller: controller.clone(), thread, copy }
            }
        }
    }
}

#[component]
fn Header(controller: FeedbackController, state: DashboardState, copy: &'static CopyTable) -> Element {
    let credits = credits_label(state.credits.as_ref(), copy.credit_unit);
    let multilingual = controller.session().config().languages.len() > 1;
    let badge = state.language.badge();
    let glyph = theme_toggle_glyph(state.theme);
    let toggle_title = theme_toggle_title(state.theme);

    let on_theme = {
        let controller = controller.clone();
        move |_: MouseEvent| controller.toggle_theme()
    };
    let on_language = {
        let controller = controller.clone();
        move |_: MouseEvent| controller.toggle_language()
    };

    rsx! {
        header { class: "header",
            div {
                h1 { "{copy.brand_mark} {copy.brand}" }
                p { class: "muted", "{copy.tagline}" }
                if let Some(notice) = copy.download_notice {
                    p { class: "notice", "{notice} {copy.latest_version}" }
                }
            }
            div { class: "header-actions",
                span { class: "credits", "{credits}" }
                if multilingual {
                    button { title: "{copy.language_switch_hint}", onclick: on_language, "{badge}" }
                }
                button { title: "{toggle_title}", onclick: on_theme, "{glyph}" }
            }
        }
    }
}

#[component]
fn StatsBar(state: DashboardState, copy: &'static CopyTable) -> Element {
    let stats = state.stats_or_default();

    rsx! {
        div { class: "stats",
            div { class: "panel",
                strong { "{stats.total_items}" }
                div { class: "muted", "{copy.total_items}" }
            }
            div { class: "panel",
                strong { "{stats.completed_count}" }
                div { class: "muted", "{copy.completed}" }
            }
            div { class: "panel",
                strong { "{stats.contributors_count}" }
                div { class: "muted", "{copy.contributors}" }
            }
        }
    }
}

fn sort_label(copy: &CopyTable, sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Rank => copy.top_ranked,
        SortBy::Votes => copy.most_votes,
        SortBy::Recent => copy.most_recent,
    }
}

#[component]
fn FeedPanel(controller: FeedbackController, state: DashboardState, copy: &'static CopyTable) -> Element {
    let heading = match state.active_tab {
        ItemType::Wishlist => copy.wishlist_heading,
        ItemType::Bug => copy.bug_heading,
    };
    let empty = match state.active_tab {
        ItemType::Wishlist => copy.no_features,
        ItemType::Bug => copy.no_bugs,
    };
    let show_empty = state.items.is_empty() && !state.loading;

    rsx! {
        div { class: "panel",
            div { class: "tabs",
                for (tab, label) in [(ItemType::Wishlist, copy.wishlist_tab), (ItemType::Bug, copy.bug_tab)] {
                    button {
                        class: if state.active_tab == tab { "active" } else { "" },
                        onclick: {
                            let controller = controller.clone();
                            move |_: MouseEvent| {
                                let controller = controller.clone();
                                spawn(async move { controller.set_active_tab(tab).await });
                            }
                        },
                        "{label}"
                    }
                }
            }
            h2 { "{heading}" }
            div { class: "sorts",
                for sort_by in SortBy::ALL {
                    button {
                        class: if state.sort_by == sort_by { "active" } else { "" },
                        onclick: {
                            let controller = controller.clone();
                            move |_: MouseEvent| {
                                let controller = controller.clone();
                                spawn(async move { controller.set_sort_by(sort_by).await });
                            }
                        },
                        {sort_label(copy, sort_by)}
                    }
                }
            }
            if state.loading && state.items.is_empty() {
                p { class: "muted", "..." }
            }
            if show_empty {
                p { "{empty}" }
                p { class: "muted", "{copy.be_first}" }
            }
            for item in state.items.clone() {
                FeedRow {
                    key: "{item.id}",
                    controller: controller.clone(),
                    vote_error: state.vote_error_for(&item.id).map(str::to_string),
                    item,
                    copy,
                }
            }
        }
    }
}

#[component]
fn FeedRow(
    controller: FeedbackController,
    item: FeedbackItem,
    vote_error: Option<String>,
    copy: &'static CopyTable,
) -> Element {
    let marker = vote_marker(item.user_voted);
    let status = status_label(&item.status);
    let date = relative_date(&item.created_at, chrono::Utc::now());
    let handle = item
        .x_handle
        .as_deref()
        .filter(|handle| !handle.is_empty())
        .map(|handle| format!("@{handle}"));

    let on_vote = {
        let controller = controller.clone();
        let item_id = item.id.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            let item_id = item_id.clone();
            spawn(async move {
                let _ = controller.vote(&item_id).await;
            });
        }
    };
    let on_comments = {
        let controller = controller.clone();
        let item_id = item.id.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            let item_id = item_id.clone();
            spawn(async move { controller.open_comments(&item_id).await });
        }
    };

    rsx! {
        div { class: "item",
            button {
                class: if item.user_voted { "vote voted" } else { "vote" },
                onclick: on_vote,
                "{marker} {item.vote_count}"
            }
            div {
                strong { "{item.title}" }
                p { "{item.description}" }
                if let Some(error) = vote_error {
                    p { class: "error", "{error}" }
                }
                div { class: "muted",
                    span { "{status}" }
                    " · "
                    span { "{date}" }
                    if let Some(handle) = handle {
                        " · "
                        span { "{handle}" }
                    }
                    if let Some(platform) = item.platform.clone() {
                        " · "
                        span { "{platform}" }
                    }
                    " · "
                    button { onclick: on_comments, "{copy.comments} ({item.comment_count})" }
                }
            }
        }
    }
}

#[component]
fn SubmitForm(controller: FeedbackController, state: DashboardState, copy: &'static CopyTable) -> Element {
    let draft = state.draft.clone();
    let is_bug = draft.item_type == ItemType::Bug;
    let show_platform = controller.session().config().show_platform;
    let (heading, title_placeholder, desc_label, desc_placeholder, submit_label) = if is_bug {
        (
            copy.form_heading_bug,
            copy.title_placeholder_bug,
            copy.what_happened,
            copy.desc_placeholder_bug,
            copy.submit_bug,
        )
    } else {
        (
            copy.form_heading_idea,
            copy.title_placeholder_idea,
            copy.description,
            copy.desc_placeholder_idea,
            copy.submit_idea,
        )
    };
    let submit_label = if state.submit.is_submitting() {
        copy.submitting
    } else {
        submit_label
    };
    let can_submit = state.can_submit();

    let on_submit = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let controller = controller.clone();
            spawn(async move {
                let _ = controller.submit_feedback().await;
            });
        }
    };

    rsx! {
        form { class: "panel", onsubmit: on_submit,
            h3 { "{heading}" }
            div { class: "tabs",
                for (item_type, label) in [(ItemType::Wishlist, copy.idea), (ItemType::Bug, copy.bug)] {
                    button {
                        r#type: "button",
                        class: if draft.item_type == item_type { "active" } else { "" },
                        onclick: {
                            let controller = controller.clone();
                            move |_: MouseEvent| controller.set_draft_item_type(item_type)
                        },
                        "{label}"
                    }
                }
            }
            if show_platform {
                label { "{copy.platform}" }
                select {
                    value: "{draft.platform}",
                    onchange: {
                        let controller = controller.clone();
                        move |evt: FormEvent| controller.set_draft_platform(&evt.value())
                    },
                    option { value: "windows", "Windows" }
                    option { value: "mac", "macOS" }
                    option { value: "both", "{copy.both}" }
                }
            }
            label { "{copy.title}" }
            input {
                value: "{draft.title}",
                placeholder: "{title_placeholder}",
                oninput: {
                    let controller = controller.clone();
                    move |evt: FormEvent| controller.set_draft_title(&evt.value())
                },
            }
            label { "{desc_label}" }
            textarea {
                value: "{draft.description}",
                placeholder: "{desc_placeholder}",
                oninput: {
                    let controller = controller.clone();
                    move |evt: FormEvent| controller.set_draft_description(&evt.value())
                },
            }
            if is_bug {
                label { "{copy.steps_to_reproduce}" }
                textarea {
                    value: "{draft.steps_to_reproduce}",
                    placeholder: "{copy.steps_placeholder}",
                    oninput: {
                        let controller = controller.clone();
                        move |evt: FormEvent| controller.set_draft_steps(&evt.value())
                    },
                }
            }
            label { "{copy.handle_label}" }
            input {
                value: "{draft.x_handle}",
                placeholder: "{copy.handle_placeholder}",
                oninput: {
                    let controller = controller.clone();
                    move |evt: FormEvent| controller.set_draft_handle(&evt.value())
                },
            }
            button { r#type: "submit", disabled: !can_submit, "{submit_label}" }
            SubmitStatus { phase: state.submit.clone(), copy }
        }
    }
}

#[component]
fn SubmitStatus(phase: SubmitPhase, copy: &'static CopyTable) -> Element {
    match phase {
        SubmitPhase::Succeeded(notice) => match notice.issue_url {
            Some(url) if notice.item_type == ItemType::Bug => rsx! {
                p { class: "notice",
                    "{copy.bug_reported} "
                    a { href: "{url}", target: "_blank", "{copy.view_on_github}" }
                }
            },
            _ => rsx! {
                p { class: "notice", "{copy.thanks_feedback}" }
            },
        },
        SubmitPhase::Failed(message) => rsx! {
            p { class: "error", "{message}" }
        },
        SubmitPhase::Idle | SubmitPhase::Submitting => rsx! {},
    }
}

#[component]
fn Leaderboard(state: DashboardState, copy: &'static CopyTable) -> Element {
    let rows: Vec<(String, String, i64, i64)> = state
        .leaderboard
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            (
                rank_label(index),
                leaderboard_name(entry),
                entry.items_submitted,
                entry.credits_earned_total,
            )
        })
        .collect();

    rsx! {
        div { class: "panel",
            h3 { "{copy.top_contributors}" }
            if rows.is_empty() {
                p { class: "muted", "{copy.no_contributors}" }
            }
            for (rank, name, submitted, earned) in rows {
                div { key: "{rank}",
                    strong { "{rank} " }
                    span { "{name}" }
                    div { class: "muted", "{submitted} {copy.submissions} · {earned} {copy.credit_unit}" }
                }
            }
        }
    }
}

#[component]
fn AlgorithmPanel(state: DashboardState, copy: &'static CopyTable) -> Element {
    let body = match state.algorithm {
        Some(algorithm) => {
            let preview = algorithm_preview(&algorithm.prompt_content);
            rsx! {
                div { class: "muted", "{algorithm.version}" }
                p { "{preview}" }
                if let Some(url) = algorithm.github_url {
                    a { href: "{url}", target: "_blank", "{copy.view_on_github}" }
                }
            }
        }
        None => rsx! {
            p { class: "muted", "{copy.loading_algorithm}" }
        },
    };

    rsx! {
        div { class: "panel",
            h3 { "{copy.ranking_heading}" }
            {body}
        }
    }
}

#[component]
fn CommentsPanel(controller: FeedbackController, thread: CommentThread, copy: &'static CopyTable) -> Element {
    let can_post = !thread.posting && !thread.draft.trim().is_empty();
    let on_close = {
        let controller = controller.clone();
        move |_: MouseEvent| controller.close_comments()
    };
    let on_draft = {
        let controller = controller.clone();
        move |evt: FormEvent| controller.set_comment_draft(&evt.value())
    };
    let on_post = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            spawn(async move {
                let _ = controller.submit_comment().await;
            });
        }
    };

    rsx! {
        div { class: "panel comments",
            div { class: "header",
                h3 { "{copy.comments}" }
                button { onclick: on_close, "\u{00D7}" }
            }
            if thread.loading {
                p { class: "muted", "..." }
            } else if thread.comments.is_empty() {
                p { class: "muted", "{copy.no_comments}" }
            }
            for comment in thread.comments.clone() {
                CommentRow { key: "{comment.id}", comment }
            }
            textarea {
                value: "{thread.draft}",
                placeholder: "{copy.comment_placeholder}",
                oninput: on_draft,
            }
            button { disabled: !can_post, onclick: on_post, "{copy.add_comment}" }
            if let Some(error) = thread.error.clone() {
                p { class: "error", "{error}" }
            }
        }
    }
}

#[component]
fn CommentRow(comment: FeedbackComment) -> Element {
    let author = comment
        .x_handle
        .as_deref()
        .filter(|handle| !handle.is_empty())
        .map(|handle| format!("@{handle}"))
        .unwrap_or_else(|| comment.user_id.chars().take(12).collect());
    let date = relative_date(&comment.created_at, chrono::Utc::now());

    rsx! {
        div { class: "item",
            div {
                div { class: "muted",
                    strong { "{author}" }
                    if comment.is_product_owner {
                        " \u{2605}"
                    }
                    " · {date}"
                }
                p { "{comment.content}" }
            }
        }
    }
}
