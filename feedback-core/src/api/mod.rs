//! Remote feedback client contract.
//!
//! Implementations own the transport only. URL construction, status
//! classification and body decoding live in [`wire`] so every transport
//! speaks the same dialect.

pub mod wire;

use async_trait::async_trait;
use shared_types::{
    AlgorithmDescriptor, AuthCredentials, AuthResponse, CreditBalance, FeedbackComment,
    FeedbackCreated, FeedbackItem, ItemType, LeaderboardEntry, NewComment, NewFeedback,
    SignupReceipt, SignupRequest, SortBy, StatsSnapshot, VoteAck, VoteRequest,
};

use crate::error::ApiError;

/// Parameters of `GET /api/feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedQuery {
    pub item_type: ItemType,
    pub sort_by: SortBy,
    pub user_id: String,
}

#[async_trait(?Send)]
pub trait FeedbackApi {
    async fn list_feedback(&self, query: &FeedQuery) -> Result<Vec<FeedbackItem>, ApiError>;

    async fn get_stats(&self) -> Result<StatsSnapshot, ApiError>;

    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ApiError>;

    async fn get_algorithm(&self) -> Result<AlgorithmDescriptor, ApiError>;

    /// `Ok(None)` when the server has no balance for this identity yet.
    async fn get_credit_balance(&self, user_id: &str) -> Result<Option<CreditBalance>, ApiError>;

    async fn create_feedback(&self, body: &NewFeedback) -> Result<FeedbackCreated, ApiError>;

    async fn cast_vote(&self, item_id: &str, body: &VoteRequest) -> Result<VoteAck, ApiError>;

    async fn list_comments(&self, item_id: &str) -> Result<Vec<FeedbackComment>, ApiError>;

    async fn add_comment(
        &self,
        item_id: &str,
        body: &NewComment,
    ) -> Result<FeedbackComment, ApiError>;

    async fn create_signup(&self, body: &SignupRequest) -> Result<SignupReceipt, ApiError>;
}

/// External account service that hands out desktop API keys.
#[async_trait(?Send)]
pub trait AuthApi {
    async fn signup(&self, credentials: &AuthCredentials) -> Result<AuthResponse, ApiError>;

    async fn login(&self, credentials: &AuthCredentials) -> Result<AuthResponse, ApiError>;
}
