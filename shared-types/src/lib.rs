//! Shared wire types for the feedback API
//!
//! These types are used by both:
//! - the platform-agnostic client core (native Rust, tested natively)
//! - Dioxus components (WASM)
//!
//! Serializable with serde for JSON over HTTP. Every server-owned entity is a
//! read-only snapshot: the client never patches one of these in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// ============================================================================
// Enumerations
// ============================================================================

/// Which feed an item belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub enum ItemType {
    #[default]
    Wishlist,
    Bug,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Wishlist => "wishlist",
            ItemType::Bug => "bug",
        }
    }
}

/// Server-side ordering of the feed. The client never re-sorts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub enum SortBy {
    #[default]
    Rank,
    Votes,
    Recent,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [SortBy::Rank, SortBy::Votes, SortBy::Recent];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Rank => "rank",
            SortBy::Votes => "votes",
            SortBy::Recent => "recent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rank" => Some(SortBy::Rank),
            "votes" => Some(SortBy::Votes),
            "recent" => Some(SortBy::Recent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub enum VoteType {
    #[default]
    Up,
    Down,
}

// ============================================================================
// Read models
// ============================================================================

/// One wishlist entry or bug report as returned by `GET /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct FeedbackItem {
    pub id: String,
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    pub status: String,
    /// RFC 3339 or naive ISO-8601, depending on the deployment.
    pub created_at: String,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub comment_count: i64,
    #[serde(default, deserialize_with = "voted_flag")]
    pub user_voted: bool,
    #[serde(default)]
    pub x_handle: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Aggregate counters from `GET /api/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct StatsSnapshot {
    #[serde(default)]
    pub wishlist_count: i64,
    #[serde(default)]
    pub bug_count: i64,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub completed_count: i64,
    #[serde(default)]
    pub contributors_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct LeaderboardEntry {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub x_handle: Option<String>,
    #[serde(default)]
    pub items_submitted: i64,
    #[serde(default)]
    pub credits_earned_total: i64,
}

/// Balance for one identity. A missing balance (404) means "no credits yet".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct CreditBalance {
    pub credits_balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct AlgorithmDescriptor {
    pub version: String,
    pub prompt_content: String,
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct FeedbackComment {
    pub id: String,
    pub item_id: String,
    pub user_id: String,
    #[serde(default)]
    pub x_handle: Option<String>,
    pub content: String,
    #[serde(default)]
    pub is_product_owner: bool,
    pub created_at: String,
}

// ============================================================================
// Write models
// ============================================================================

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct NewFeedback {
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub x_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<String>,
}

/// Acknowledgment of a created item. Bug reports may carry a tracker link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct FeedbackCreated {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub github_issue_url: Option<String>,
}

/// Body of `POST /api/feedback/{id}/vote`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct VoteRequest {
    pub user_id: String,
    pub vote_type: VoteType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct VoteAck {
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub user_voted: Option<String>,
}

/// Body of `POST /api/feedback/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct NewComment {
    pub user_id: String,
    pub x_handle: Option<String>,
    pub content: String,
}

/// Body of `POST /api/signups`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct SignupRequest {
    pub email: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub enum SignupReceipt {
    /// 201 Created
    Created,
    /// Any other success status
    Acknowledged,
}

// ============================================================================
// External account auth
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct AuthCredentials {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct AccountUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `{ user, apiKey }` returned by the account service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../feedback-ui/src/types/generated.ts")]
pub struct AuthResponse {
    pub user: AccountUser,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

// ============================================================================
// Tolerant decoders
// ============================================================================

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Some deployments send the vote type the viewer cast (`"up"`), others a bool.
fn voted_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(flag)) => flag,
        Some(serde_json::Value::String(kind)) => !kind.is_empty(),
        Some(_) => true,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ts_rs::Config;

    #[test]
    fn test_feedback_item_accepts_vote_type_string() {
        let json = serde_json::json!({
            "id": "7f1c",
            "item_type": "bug",
            "title": "Crash on open",
            "description": "The app crashes when opening settings",
            "status": "under_review",
            "created_at": "2024-05-01T10:00:00.123456",
            "vote_count": 3,
            "comment_count": null,
            "user_voted": "up",
            "rank_score": 3.5
        });

        let item: FeedbackItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.item_type, ItemType::Bug);
        assert!(item.user_voted);
        assert_eq!(item.comment_count, 0);
        assert_eq!(item.x_handle, None);
    }

    #[test]
    fn test_feedback_item_missing_vote_means_not_voted() {
        let json = serde_json::json!({
            "id": "1",
            "item_type": "wishlist",
            "title": "Dark mode",
            "description": "Please add a dark mode",
            "status": "new",
            "created_at": "2024-05-01T10:00:00Z",
            "vote_count": 0,
            "user_voted": null
        });

        let item: FeedbackItem = serde_json::from_value(json).unwrap();
        assert!(!item.user_voted);
    }

    #[test]
    fn test_new_feedback_omits_absent_bug_fields() {
        let body = NewFeedback {
            item_type: ItemType::Wishlist,
            title: "Calendar".to_string(),
            description: "Add calendar integration".to_string(),
            user_id: "user_abc123xyz".to_string(),
            x_handle: None,
            platform: None,
            steps_to_reproduce: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["item_type"], "wishlist");
        assert!(json["x_handle"].is_null());
        assert!(json.get("platform").is_none());
        assert!(json.get("steps_to_reproduce").is_none());
    }

    #[test]
    fn test_auth_response_uses_camel_case_key() {
        let json = r#"{"user":{"id":"u1","email":"a@b.c","name":"Ana"},"apiKey":"bb_123"}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.api_key, "bb_123");
        assert_eq!(auth.user.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_sort_by_round_trips_query_value() {
        for sort in SortBy::ALL {
            assert_eq!(SortBy::parse(sort.as_str()), Some(sort));
        }
        assert_eq!(SortBy::parse("oldest"), None);
    }

    #[test]
    fn export_types() {
        // Export all types to TypeScript
        // The export_to attribute in each type's #[ts] macro specifies the output file
        let config = Config::default();
        ItemType::export(&config).unwrap();
        SortBy::export(&config).unwrap();
        VoteType::export(&config).unwrap();
        FeedbackItem::export(&config).unwrap();
        StatsSnapshot::export(&config).unwrap();
        LeaderboardEntry::export(&config).unwrap();
        CreditBalance::export(&config).unwrap();
        AlgorithmDescriptor::export(&config).unwrap();
        FeedbackComment::export(&config).unwrap();
        NewFeedback::export(&config).unwrap();
        FeedbackCreated::export(&config).unwrap();
        VoteRequest::export(&config).unwrap();
        VoteAck::export(&config).unwrap();
        NewComment::export(&config).unwrap();
        SignupRequest::export(&config).unwrap();
        SignupReceipt::export(&config).unwrap();
        AuthCredentials::export(&config).unwrap();
        AccountUser::export(&config).unwrap();
        AuthResponse::export(&config).unwrap();
    }
}
