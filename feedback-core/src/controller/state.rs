use shared_types::{
    AlgorithmDescriptor, CreditBalance, FeedbackComment, FeedbackItem, ItemType,
    LeaderboardEntry, NewComment, NewFeedback, SortBy, StatsSnapshot,
};

use crate::copy::Language;
use crate::error::ValidationError;
use crate::host::Theme;

pub const TITLE_MAX_CHARS: usize = 200;
pub const HANDLE_MAX_CHARS: usize = 50;

/// Transient form state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftSubmission {
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    pub x_handle: String,
    pub platform: String,
    pub steps_to_reproduce: String,
}

impl DraftSubmission {
    pub fn new(default_platform: &str) -> Self {
        Self {
            platform: default_platform.to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn handle(&self) -> Option<String> {
        let handle = self.x_handle.trim();
        (!handle.is_empty()).then(|| handle.to_string())
    }

    pub fn to_request(&self, user_id: &str, include_platform: bool) -> NewFeedback {
        let steps = match self.item_type {
            ItemType::Bug => self.steps_to_reproduce.trim().to_string(),
            ItemType::Wishlist => String::new(),
        };
        NewFeedback {
            item_type: self.item_type,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            user_id: user_id.to_string(),
            x_handle: self.handle(),
            platform: include_platform.then(|| self.platform.clone()),
            steps_to_reproduce: Some(steps),
        }
    }

    /// Reset the free-text fields; type, handle and platform stay for the next report.
    pub fn clear_after_submit(&mut self) {
        self.title.clear();
        self.description.clear();
        self.steps_to_reproduce.clear();
    }
}

pub fn sanitize_title(raw: &str) -> String {
    raw.chars().take(TITLE_MAX_CHARS).collect()
}

pub fn sanitize_handle(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '@')
        .take(HANDLE_MAX_CHARS)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitNotice {
    pub item_type: ItemType,
    pub issue_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    /// Shown until the display timeout elapses.
    Succeeded(SubmitNotice),
    /// Inline message; the form is usable again.
    Failed(String),
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }

    pub fn notice(&self) -> Option<&SubmitNotice> {
        match self {
            SubmitPhase::Succeeded(notice) => Some(notice),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub item_id: String,
    pub comments: Vec<FeedbackComment>,
    pub loading: bool,
    pub draft: String,
    pub posting: bool,
    pub error: Option<String>,
}

impl CommentThread {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            comments: Vec::new(),
            loading: true,
            draft: String::new(),
            posting: false,
            error: None,
        }
    }

    pub fn to_request(&self, user_id: &str, x_handle: Option<String>) -> Result<NewComment, ValidationError> {
        let content = self.draft.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        Ok(NewComment {
            user_id: user_id.to_string(),
            x_handle,
            content: content.to_string(),
        })
    }
}

/// Render state of one dashboard.
/// Last vote that the server did not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteFailure {
    pub item_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub active_tab: ItemType,
    pub sort_by: SortBy,
    pub items: Vec<FeedbackItem>,
    pub loading: bool,
    pub stats: Option<StatsSnapshot>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub algorithm: Option<AlgorithmDescriptor>,
    pub credits: Option<CreditBalance>,
    pub theme: Theme,
    pub language: Language,
    pub draft: DraftSubmission,
    pub submit: SubmitPhase,
    pub vote_error: Option<VoteFailure>,
    pub comments: Option<CommentThread>,
}

impl DashboardState {
    pub fn new(theme: Theme, language: Language, default_platform: &str) -> Self {
        Self {
            active_tab: ItemType::Wishlist,
            sort_by: SortBy::Rank,
            items: Vec::new(),
            loading: true,
            stats: None,
            leaderboard: Vec::new(),
            algorithm: None,
            credits: None,
            theme,
            language,
            draft: DraftSubmission::new(default_platform),
            submit: SubmitPhase::Idle,
            vote_error: None,
            comments: None,
        }
    }

    /// Submit control is enabled only for a complete draft with nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.submit.is_submitting() && self.draft.is_ready()
    }

    /// Inline vote error for one feed row.
    pub fn vote_error_for(&self, item_id: &str) -> Option<&str> {
        self.vote_error
            .as_ref()
            .filter(|failure| failure.item_id == item_id)
            .map(|failure| failure.message.as_str())
    }

    pub fn stats_or_default(&self) -> StatsSnapshot {
        self.stats.clone().unwrap_or_default()
    }
}
