//! gloo-net transport for the feedback and account APIs.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use shared_types::{
    AlgorithmDescriptor, AuthCredentials, AuthResponse, CreditBalance, FeedbackComment,
    FeedbackCreated, FeedbackItem, LeaderboardEntry, NewComment, NewFeedback, SignupReceipt,
    SignupRequest, StatsSnapshot, VoteAck, VoteRequest,
};

use feedback_core::api::wire::{self, AuthEndpoints, Endpoints};
use feedback_core::api::{AuthApi, FeedQuery, FeedbackApi};
use feedback_core::error::ApiError;

/// Status and raw body of a completed request.
struct Reply {
    status: u16,
    body: String,
}

async fn read(response: Result<Response, gloo_net::Error>) -> Result<Reply, ApiError> {
    let response = response.map_err(|e| ApiError::Network(format!("Request failed: {e}")))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to read response: {e}")))?;
    Ok(Reply { status, body })
}

async fn get(url: &str) -> Result<Reply, ApiError> {
    read(Request::get(url).send().await).await
}

async fn post<B: Serialize>(url: &str, body: &B) -> Result<Reply, ApiError> {
    let request = Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {e}")))?;
    read(request.send().await).await
}

pub struct HttpFeedbackApi {
    endpoints: Endpoints,
}

impl HttpFeedbackApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            endpoints: Endpoints::new(base),
        }
    }
}

#[async_trait(?Send)]
impl FeedbackApi for HttpFeedbackApi {
    async fn list_feedback(&self, query: &FeedQuery) -> Result<Vec<FeedbackItem>, ApiError> {
        let reply = get(&self.endpoints.feedback_list(query)).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn get_stats(&self) -> Result<StatsSnapshot, ApiError> {
        let reply = get(&self.endpoints.stats()).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let reply = get(&self.endpoints.leaderboard(limit)).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn get_algorithm(&self) -> Result<AlgorithmDescriptor, ApiError> {
        let reply = get(&self.endpoints.algorithm()).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn get_credit_balance(&self, user_id: &str) -> Result<Option<CreditBalance>, ApiError> {
        let reply = get(&self.endpoints.credit_balance(user_id)).await?;
        wire::decode_optional(reply.status, &reply.body)
    }

    async fn create_feedback(&self, body: &NewFeedback) -> Result<FeedbackCreated, ApiError> {
        let reply = post(&self.endpoints.feedback_create(), body).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn cast_vote(&self, item_id: &str, body: &VoteRequest) -> Result<VoteAck, ApiError> {
        let reply = post(&self.endpoints.vote(item_id), body).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn list_comments(&self, item_id: &str) -> Result<Vec<FeedbackComment>, ApiError> {
        let reply = get(&self.endpoints.comments(item_id)).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn add_comment(
        &self,
        item_id: &str,
        body: &NewComment,
    ) -> Result<FeedbackComment, ApiError> {
        let reply = post(&self.endpoints.comments(item_id), body).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn create_signup(&self, body: &SignupRequest) -> Result<SignupReceipt, ApiError> {
        let reply = post(&self.endpoints.signups(), body).await?;
        wire::signup_receipt(reply.status, &reply.body)
    }
}

pub struct HttpAuthApi {
    endpoints: AuthEndpoints,
}

impl HttpAuthApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            endpoints: AuthEndpoints::new(base),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn signup(&self, credentials: &AuthCredentials) -> Result<AuthResponse, ApiError> {
        let reply = post(&self.endpoints.signup(), credentials).await?;
        wire::decode(reply.status, &reply.body)
    }

    async fn login(&self, credentials: &AuthCredentials) -> Result<AuthResponse, ApiError> {
        let reply = post(&self.endpoints.login(), credentials).await?;
        wire::decode(reply.status, &reply.body)
    }
}
