//! View-state controller for the feedback dashboard.
//!
//! Holds the render state, turns UI events into remote calls and folds the
//! answers back in. Server snapshots are never edited locally: every
//! successful write is followed by the reads in [`refetch_plan`].
//!
//! Requests for the same query are not cancelled. With
//! [`StaleResponses::Apply`] whichever feed response resolves last wins, even
//! if it answers an older query. [`StaleResponses::Discard`] drops feed
//! responses that are older than the latest issued request.

pub(crate) mod listeners;
pub mod refetch;
pub mod state;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::join_all;
use shared_types::{
    FeedbackComment, FeedbackCreated, ItemType, SortBy, VoteAck, VoteRequest, VoteType,
};

use crate::api::FeedQuery;
use crate::config::StaleResponses;
use crate::copy::{CopyTable, Language};
use crate::error::{ApiError, SubmitError, ValidationError};
use crate::session::ClientSession;

pub use listeners::ListenerId;
pub use refetch::{refetch_plan, MutationKind, ReadTask, MOUNT_READS};
pub use state::{
    sanitize_handle, sanitize_title, CommentThread, DashboardState, DraftSubmission,
    SubmitNotice, SubmitPhase, VoteFailure,
};

use listeners::Listeners;

#[derive(Clone)]
pub struct FeedbackController {
    session: ClientSession,
    state: Rc<RefCell<DashboardState>>,
    listeners: Rc<Listeners<DashboardState>>,
    feed_seq: Rc<Cell<u64>>,
    notice_seq: Rc<Cell<u64>>,
}

/// Two handles are equal when they drive the same dashboard.
impl PartialEq for FeedbackController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl FeedbackController {
    /// Resolve theme and language from storage and the host, and mirror the
    /// theme onto the page. Nothing is fetched until [`mount`](Self::mount).
    pub fn new(session: ClientSession) -> Self {
        let config = session.config();
        let store = session.identity_store();
        let theme = store.resolve_theme(session.host(), config.default_theme);
        let language =
            store.resolve_language(session.host(), &config.languages, config.default_language);
        session.host().apply_theme(theme);

        let state = DashboardState::new(theme, language, &config.default_platform);
        Self {
            session,
            state: Rc::new(RefCell::new(state)),
            listeners: Rc::new(Listeners::default()),
            feed_seq: Rc::new(Cell::new(0)),
            notice_seq: Rc::new(Cell::new(0)),
        }
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn copy(&self) -> &'static CopyTable {
        self.session.config().copy_for(self.state.borrow().language)
    }

    pub fn subscribe(&self, listener: impl Fn(&DashboardState) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn update(&self, apply: impl FnOnce(&mut DashboardState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        self.listeners.emit(&snapshot);
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn mount(&self) {
        self.run_reads(MOUNT_READS).await;
    }

    /// Issue `tasks` concurrently and wait for all of them.
    pub async fn run_reads(&self, tasks: &[ReadTask]) {
        join_all(tasks.iter().map(|task| self.refresh(*task))).await;
    }

    pub async fn refresh(&self, task: ReadTask) {
        match task {
            ReadTask::Feed => self.refresh_feed().await,
            ReadTask::Stats => self.refresh_stats().await,
            ReadTask::Leaderboard => self.refresh_leaderboard().await,
            ReadTask::Algorithm => self.refresh_algorithm().await,
            ReadTask::Credits => self.refresh_credits().await,
            ReadTask::Comments => self.refresh_comments().await,
        }
    }

    async fn after_mutation(&self, kind: MutationKind) {
        let plan = refetch_plan(kind);
        tracing::debug!(?kind, ?plan, "mutation succeeded, refetching");
        self.run_reads(plan).await;
    }

    pub async fn refresh_feed(&self) {
        let query = {
            let state = self.state.borrow();
            FeedQuery {
                item_type: state.active_tab,
                sort_by: state.sort_by,
                user_id: self.session.user_id().to_string(),
            }
        };
        let seq = self.feed_seq.get() + 1;
        self.feed_seq.set(seq);
        self.update(|state| state.loading = true);

        let result = self.session.api().list_feedback(&query).await;

        if self.session.config().stale_responses == StaleResponses::Discard
            && seq != self.feed_seq.get()
        {
            tracing::debug!(
                seq,
                latest = self.feed_seq.get(),
                sort_by = query.sort_by.as_str(),
                "discarding stale feed response"
            );
            return;
        }

        match result {
            Ok(items) => self.update(|state| {
                state.items = items;
                state.loading = false;
            }),
            Err(e) => {
                tracing::warn!("Failed to fetch feedback: {}", e);
                self.update(|state| state.loading = false);
            }
        }
    }

    pub async fn refresh_stats(&self) {
        match self.session.api().get_stats().await {
            Ok(stats) => self.update(|state| state.stats = Some(stats)),
            Err(e) => tracing::warn!("Failed to fetch stats: {}", e),
        }
    }

    pub async fn refresh_leaderboard(&self) {
        let limit = self.session.config().leaderboard_limit;
        match self.session.api().get_leaderboard(limit).await {
            Ok(entries) => self.update(|state| state.leaderboard = entries),
            Err(e) => tracing::warn!("Failed to fetch leaderboard: {}", e),
        }
    }

    pub async fn refresh_algorithm(&self) {
        match self.session.api().get_algorithm().await {
            Ok(algorithm) => self.update(|state| state.algorithm = Some(algorithm)),
            Err(e) => tracing::warn!("Failed to fetch ranking algorithm: {}", e),
        }
    }

    /// A failed balance lookup reads as "no balance yet".
    pub async fn refresh_credits(&self) {
        let balance = match self
            .session
            .api()
            .get_credit_balance(self.session.user_id())
            .await
        {
            Ok(balance) => balance,
            Err(e) => {
                tracing::debug!("No credit balance available: {}", e);
                None
            }
        };
        self.update(|state| state.credits = balance);
    }

    // ------------------------------------------------------------------
    // Feed controls
    // ------------------------------------------------------------------

    pub async fn set_active_tab(&self, tab: ItemType) {
        if self.state.borrow().active_tab == tab {
            return;
        }
        self.update(|state| state.active_tab = tab);
        self.refresh_feed().await;
    }

    pub async fn set_sort_by(&self, sort_by: SortBy) {
        if self.state.borrow().sort_by == sort_by {
            return;
        }
        self.update(|state| state.sort_by = sort_by);
        self.refresh_feed().await;
    }

    // ------------------------------------------------------------------
    // Draft
    // ------------------------------------------------------------------

    pub fn set_draft_item_type(&self, item_type: ItemType) {
        self.update(|state| state.draft.item_type = item_type);
    }

    pub fn set_draft_title(&self, title: &str) {
        let title = sanitize_title(title);
        self.update(|state| state.draft.title = title);
    }

    pub fn set_draft_description(&self, description: &str) {
        let description = description.to_string();
        self.update(|state| state.draft.description = description);
    }

    pub fn set_draft_handle(&self, handle: &str) {
        let handle = sanitize_handle(handle);
        self.update(|state| state.draft.x_handle = handle);
    }

    pub fn set_draft_platform(&self, platform: &str) {
        let platform = platform.to_string();
        self.update(|state| state.draft.platform = platform);
    }

    pub fn set_draft_steps(&self, steps: &str) {
        let steps = steps.to_string();
        self.update(|state| state.draft.steps_to_reproduce = steps);
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Validate and send the draft.
    ///
    /// On success the draft text is cleared, feed, stats and credits are
    /// re-read, and the success notice is held for the configured display
    /// time before the phase returns to idle. Resolves once both are done.
    pub async fn submit_feedback(&self) -> Result<FeedbackCreated, SubmitError> {
        let (body, item_type) = {
            let state = self.state.borrow();
            if state.submit.is_submitting() {
                return Err(SubmitError::Busy);
            }
            state.draft.validate()?;
            let body = state
                .draft
                .to_request(self.session.user_id(), self.session.config().show_platform);
            (body, state.draft.item_type)
        };

        self.update(|state| state.submit = SubmitPhase::Submitting);

        match self.session.api().create_feedback(&body).await {
            Ok(created) => {
                let ticket = self.notice_seq.get() + 1;
                self.notice_seq.set(ticket);
                let notice = SubmitNotice {
                    item_type,
                    issue_url: created.github_issue_url.clone(),
                };
                self.update(|state| {
                    state.draft.clear_after_submit();
                    state.submit = SubmitPhase::Succeeded(notice);
                });

                futures::join!(
                    self.after_mutation(MutationKind::FeedbackCreated),
                    self.dismiss_notice_after_display(ticket)
                );
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("Failed to submit feedback: {}", e);
                let message = e.user_message();
                self.update(|state| state.submit = SubmitPhase::Failed(message));
                Err(e.into())
            }
        }
    }

    async fn dismiss_notice_after_display(&self, ticket: u64) {
        self.session
            .timer()
            .sleep(self.session.config().success_display())
            .await;

        let current = self.notice_seq.get() == ticket
            && matches!(self.state.borrow().submit, SubmitPhase::Succeeded(_));
        if current {
            self.update(|state| state.submit = SubmitPhase::Idle);
        }
    }

    /// Up-vote toggle. The server owns the toggle semantics; the client only
    /// re-reads the feed afterwards.
    pub async fn vote(&self, item_id: &str) -> Result<VoteAck, ApiError> {
        let body = VoteRequest {
            user_id: self.session.user_id().to_string(),
            vote_type: VoteType::Up,
        };
        self.update(|state| state.vote_error = None);
        match self.session.api().cast_vote(item_id, &body).await {
            Ok(ack) => {
                self.after_mutation(MutationKind::VoteCast).await;
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(item_id, "Failed to vote: {}", e);
                let failure = VoteFailure {
                    item_id: item_id.to_string(),
                    message: e.user_message(),
                };
                self.update(|state| state.vote_error = Some(failure));
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    pub async fn open_comments(&self, item_id: &str) {
        let thread = CommentThread::new(item_id);
        self.update(|state| state.comments = Some(thread));
        self.refresh_comments().await;
    }

    pub fn close_comments(&self) {
        self.update(|state| state.comments = None);
    }

    pub fn set_comment_draft(&self, text: &str) {
        let text = text.to_string();
        self.update(|state| {
            if let Some(thread) = state.comments.as_mut() {
                thread.draft = text;
            }
        });
    }

    pub async fn refresh_comments(&self) {
        let Some(item_id) = self.open_thread_id() else {
            return;
        };

        let result = self.session.api().list_comments(&item_id).await;
        self.update(|state| {
            // The thread may have been closed or switched while loading.
            let Some(thread) = state
                .comments
                .as_mut()
                .filter(|thread| thread.item_id == item_id)
            else {
                return;
            };
            thread.loading = false;
            match result {
                Ok(comments) => thread.comments = comments,
                Err(e) => tracing::warn!(item_id = %item_id, "Failed to fetch comments: {}", e),
            }
        });
    }

    pub async fn submit_comment(&self) -> Result<FeedbackComment, SubmitError> {
        let (item_id, body) = {
            let state = self.state.borrow();
            let thread = state
                .comments
                .as_ref()
                .ok_or(SubmitError::Validation(ValidationError::EmptyComment))?;
            if thread.posting {
                return Err(SubmitError::Busy);
            }
            let body = thread.to_request(self.session.user_id(), state.draft.handle())?;
            (thread.item_id.clone(), body)
        };

        self.update_thread(&item_id, |thread| {
            thread.posting = true;
            thread.error = None;
        });

        match self.session.api().add_comment(&item_id, &body).await {
            Ok(comment) => {
                self.update_thread(&item_id, |thread| {
                    thread.posting = false;
                    thread.draft.clear();
                });
                self.after_mutation(MutationKind::CommentAdded).await;
                Ok(comment)
            }
            Err(e) => {
                tracing::warn!(item_id = %item_id, "Failed to add comment: {}", e);
                let message = e.user_message();
                self.update_thread(&item_id, |thread| {
                    thread.posting = false;
                    thread.error = Some(message);
                });
                Err(e.into())
            }
        }
    }

    fn open_thread_id(&self) -> Option<String> {
        self.state
            .borrow()
            .comments
            .as_ref()
            .map(|thread| thread.item_id.clone())
    }

    fn update_thread(&self, item_id: &str, apply: impl FnOnce(&mut CommentThread)) {
        self.update(|state| {
            if let Some(thread) = state
                .comments
                .as_mut()
                .filter(|thread| thread.item_id == item_id)
            {
                apply(thread);
            }
        });
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    pub fn toggle_theme(&self) {
        let next = self.state.borrow().theme.next();
        self.session
            .identity_store()
            .set_theme(self.session.host(), next);
        self.update(|state| state.theme = next);
    }

    /// Cycle through the variant's languages. No-op for single-language variants.
    pub fn toggle_language(&self) {
        let languages = &self.session.config().languages;
        let current = self.state.borrow().language;
        let next = languages
            .iter()
            .position(|language| *language == current)
            .map(|index| languages[(index + 1) % languages.len()])
            .or_else(|| languages.first().copied());
        if let Some(next) = next.filter(|next| *next != current) {
            self.set_language(next);
        }
    }

    pub fn set_language(&self, language: Language) {
        if !self.session.config().supports_language(language) {
            return;
        }
        self.session.identity_store().set_language(language);
        self.update(|state| state.language = language);
    }
}
