//! Test doubles shared by the controller integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use shared_types::{
    AccountUser, AlgorithmDescriptor, AuthCredentials, AuthResponse, CreditBalance,
    FeedbackComment, FeedbackCreated, FeedbackItem, ItemType, LeaderboardEntry, NewComment,
    NewFeedback, SignupReceipt, SignupRequest, SortBy, StatsSnapshot, VoteAck, VoteRequest,
};

use feedback_core::api::{AuthApi, FeedQuery, FeedbackApi};
use feedback_core::config::VariantConfig;
use feedback_core::error::ApiError;
use feedback_core::host::{HostEnvironment, ImmediateTimer, Theme, Timer};
use feedback_core::session::ClientSession;
use feedback_core::storage::{KeyValueStore, MemoryStore};

// ─── Recorded calls ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListFeedback(FeedQuery),
    Stats,
    Leaderboard(u32),
    Algorithm,
    Credits(String),
    Create(NewFeedback),
    Vote(String, VoteRequest),
    ListComments(String),
    AddComment(String, NewComment),
    Signup(SignupRequest),
}

pub fn item(id: &str) -> FeedbackItem {
    FeedbackItem {
        id: id.to_string(),
        item_type: ItemType::Wishlist,
        title: format!("title {id}"),
        description: "description".to_string(),
        status: "new".to_string(),
        created_at: "2024-06-01T12:00:00".to_string(),
        vote_count: 3,
        comment_count: 0,
        user_voted: false,
        x_handle: None,
        platform: None,
    }
}

pub fn comment(id: &str, item_id: &str, content: &str) -> FeedbackComment {
    FeedbackComment {
        id: id.to_string(),
        item_id: item_id.to_string(),
        user_id: "user_other0001".to_string(),
        x_handle: None,
        content: content.to_string(),
        is_product_owner: false,
        created_at: "2024-06-01T12:00:00".to_string(),
    }
}

/// Id of the single item the mock returns for a feed query.
pub fn feed_id(item_type: ItemType, sort_by: SortBy) -> String {
    format!("{}-{}", item_type.as_str(), sort_by.as_str())
}

pub fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: message.to_string(),
    }
}

pub fn offline() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

// ─── Mock feedback API ──────────────────────────────────────────────────────

/// Scripted, recording implementation of [`FeedbackApi`].
///
/// Feed responses can be held back per sort order with [`MockApi::gate_feed`]
/// to control the order in which concurrent requests resolve.
pub struct MockApi {
    calls: RefCell<Vec<Call>>,
    feed_gates: RefCell<HashMap<SortBy, oneshot::Receiver<()>>>,
    pub feed_error: RefCell<Option<ApiError>>,
    pub stats: RefCell<Result<StatsSnapshot, ApiError>>,
    pub credits: RefCell<Result<Option<CreditBalance>, ApiError>>,
    pub create: RefCell<Result<FeedbackCreated, ApiError>>,
    pub vote: RefCell<Result<VoteAck, ApiError>>,
    pub comments: RefCell<Vec<FeedbackComment>>,
    pub add_comment: RefCell<Result<FeedbackComment, ApiError>>,
    pub signup: RefCell<Result<SignupReceipt, ApiError>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            feed_gates: RefCell::new(HashMap::new()),
            feed_error: RefCell::new(None),
            stats: RefCell::new(Ok(StatsSnapshot {
                wishlist_count: 4,
                bug_count: 2,
                total_items: 6,
                completed_count: 1,
                contributors_count: 3,
            })),
            credits: RefCell::new(Ok(Some(CreditBalance {
                credits_balance: 10,
            }))),
            create: RefCell::new(Ok(FeedbackCreated::default())),
            vote: RefCell::new(Ok(VoteAck::default())),
            comments: RefCell::new(Vec::new()),
            add_comment: RefCell::new(Ok(comment("c-new", "item-1", "new comment"))),
            signup: RefCell::new(Ok(SignupReceipt::Created)),
        }
    }
}

impl MockApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    pub fn feed_calls(&self) -> usize {
        self.count(|call| matches!(call, Call::ListFeedback(_)))
    }

    /// Hold the next feed response for `sort_by` until the sender fires.
    pub fn gate_feed(&self, sort_by: SortBy) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.feed_gates.borrow_mut().insert(sort_by, rx);
        tx
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl FeedbackApi for MockApi {
    async fn list_feedback(&self, query: &FeedQuery) -> Result<Vec<FeedbackItem>, ApiError> {
        self.record(Call::ListFeedback(query.clone()));
        let gate = self.feed_gates.borrow_mut().remove(&query.sort_by);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(error) = self.feed_error.borrow().clone() {
            return Err(error);
        }
        Ok(vec![item(&feed_id(query.item_type, query.sort_by))])
    }

    async fn get_stats(&self) -> Result<StatsSnapshot, ApiError> {
        self.record(Call::Stats);
        self.stats.borrow().clone()
    }

    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.record(Call::Leaderboard(limit));
        Ok(vec![LeaderboardEntry {
            id: "lb-1".to_string(),
            user_id: "user_top000001".to_string(),
            x_handle: Some("ana".to_string()),
            items_submitted: 5,
            credits_earned_total: 50,
        }])
    }

    async fn get_algorithm(&self) -> Result<AlgorithmDescriptor, ApiError> {
        self.record(Call::Algorithm);
        Ok(AlgorithmDescriptor {
            version: "v1".to_string(),
            prompt_content: "Rank by impact".to_string(),
            github_url: None,
        })
    }

    async fn get_credit_balance(&self, user_id: &str) -> Result<Option<CreditBalance>, ApiError> {
        self.record(Call::Credits(user_id.to_string()));
        self.credits.borrow().clone()
    }

    async fn create_feedback(&self, body: &NewFeedback) -> Result<FeedbackCreated, ApiError> {
        self.record(Call::Create(body.clone()));
        self.create.borrow().clone()
    }

    async fn cast_vote(&self, item_id: &str, body: &VoteRequest) -> Result<VoteAck, ApiError> {
        self.record(Call::Vote(item_id.to_string(), body.clone()));
        self.vote.borrow().clone()
    }

    async fn list_comments(&self, item_id: &str) -> Result<Vec<FeedbackComment>, ApiError> {
        self.record(Call::ListComments(item_id.to_string()));
        Ok(self.comments.borrow().clone())
    }

    async fn add_comment(
        &self,
        item_id: &str,
        body: &NewComment,
    ) -> Result<FeedbackComment, ApiError> {
        self.record(Call::AddComment(item_id.to_string(), body.clone()));
        self.add_comment.borrow().clone()
    }

    async fn create_signup(&self, body: &SignupRequest) -> Result<SignupReceipt, ApiError> {
        self.record(Call::Signup(body.clone()));
        self.signup.borrow().clone()
    }
}

// ─── Mock account service ───────────────────────────────────────────────────

pub struct MockAuth {
    pub calls: RefCell<Vec<(&'static str, AuthCredentials)>>,
    pub response: RefCell<Result<AuthResponse, ApiError>>,
}

impl Default for MockAuth {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            response: RefCell::new(Ok(AuthResponse {
                user: AccountUser {
                    id: Some("acct-1".to_string()),
                    email: Some("ana@example.com".to_string()),
                    name: Some("Ana".to_string()),
                },
                api_key: "bb_live_123".to_string(),
            })),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for MockAuth {
    async fn signup(&self, credentials: &AuthCredentials) -> Result<AuthResponse, ApiError> {
        self.calls.borrow_mut().push(("signup", credentials.clone()));
        self.response.borrow().clone()
    }

    async fn login(&self, credentials: &AuthCredentials) -> Result<AuthResponse, ApiError> {
        self.calls.borrow_mut().push(("login", credentials.clone()));
        self.response.borrow().clone()
    }
}

// ─── Host and timer ─────────────────────────────────────────────────────────

/// Host with fixed signals that records every theme application.
#[derive(Default)]
pub struct RecordingHost {
    pub prefers_light: Option<bool>,
    pub locale: Option<String>,
    pub applied: RefCell<Vec<Theme>>,
}

impl HostEnvironment for RecordingHost {
    fn prefers_light_scheme(&self) -> Option<bool> {
        self.prefers_light
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn apply_theme(&self, theme: Theme) {
        self.applied.borrow_mut().push(theme);
    }
}

/// Timer whose sleeps complete only when the test fires them.
#[derive(Default)]
pub struct ManualTimer {
    pending: RefCell<Vec<oneshot::Sender<()>>>,
    pub requested: RefCell<Vec<Duration>>,
}

impl ManualTimer {
    /// Wake the oldest pending sleep only.
    pub fn fire_next(&self) {
        let mut pending = self.pending.borrow_mut();
        if !pending.is_empty() {
            let _ = pending.remove(0).send(());
        }
    }

    pub fn fire_all(&self) {
        for tx in self.pending.borrow_mut().drain(..) {
            let _ = tx.send(());
        }
    }
}

#[async_trait(?Send)]
impl Timer for ManualTimer {
    async fn sleep(&self, duration: Duration) {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push(tx);
        self.requested.borrow_mut().push(duration);
        let _ = rx.await;
    }
}

// ─── Session wiring ─────────────────────────────────────────────────────────

pub struct Harness {
    pub storage: Rc<MemoryStore>,
    pub host: Rc<RecordingHost>,
    pub api: Rc<MockApi>,
    pub timer: Rc<dyn Timer>,
    pub config: VariantConfig,
}

impl Harness {
    pub fn new(config: VariantConfig) -> Self {
        Self {
            storage: Rc::new(MemoryStore::new()),
            host: Rc::new(RecordingHost::default()),
            api: Rc::new(MockApi::default()),
            timer: Rc::new(ImmediateTimer),
            config,
        }
    }

    pub fn with_storage(mut self, storage: MemoryStore) -> Self {
        self.storage = Rc::new(storage);
        self
    }

    pub fn with_host(mut self, host: RecordingHost) -> Self {
        self.host = Rc::new(host);
        self
    }

    pub fn with_timer(mut self, timer: Rc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    pub fn session(&self) -> ClientSession {
        ClientSession::new(
            self.config.clone(),
            self.storage.clone(),
            self.host.clone(),
            self.api.clone(),
            self.timer.clone(),
        )
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.get(key).ok().flatten()
    }
}

/// Let spawned local tasks run until they block.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
