//! Endpoint URLs and response handling shared by every transport.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use shared_types::SignupReceipt;
use url::form_urlencoded;

use super::FeedQuery;
use crate::error::ApiError;

pub const API_PREFIX: &str = "/api";

/// URL builder for the same-origin feedback API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` is the origin (or empty for same origin), without the `/api` prefix.
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base, API_PREFIX, path)
    }

    pub fn feedback_list(&self, query: &FeedQuery) -> String {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("item_type", query.item_type.as_str())
            .append_pair("sort_by", query.sort_by.as_str())
            .append_pair("user_id", &query.user_id)
            .finish();
        format!("{}?{}", self.url("/feedback"), params)
    }

    pub fn feedback_create(&self) -> String {
        self.url("/feedback")
    }

    pub fn stats(&self) -> String {
        self.url("/stats")
    }

    pub fn leaderboard(&self, limit: u32) -> String {
        format!("{}?limit={limit}", self.url("/credits/leaderboard"))
    }

    pub fn algorithm(&self) -> String {
        self.url("/ranking/algorithm")
    }

    pub fn credit_balance(&self, user_id: &str) -> String {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("user_id", user_id)
            .finish();
        format!("{}?{}", self.url("/credits/balance"), params)
    }

    pub fn vote(&self, item_id: &str) -> String {
        self.url(&format!("/feedback/{}/vote", segment(item_id)))
    }

    pub fn comments(&self, item_id: &str) -> String {
        self.url(&format!("/feedback/{}/comments", segment(item_id)))
    }

    pub fn signups(&self) -> String {
        self.url("/signups")
    }
}

/// URL builder for the external account service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEndpoints {
    base: String,
}

impl AuthEndpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn signup(&self) -> String {
        format!("{}/api/public/auth/signup", self.base)
    }

    pub fn login(&self) -> String {
        format!("{}/api/public/auth/login", self.base)
    }
}

/// Unreserved characters stay literal inside a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a non-success status to [`ApiError::Rejected`], pulling the message out
/// of a `detail` or `error` field when the body carries one.
pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        return Ok(());
    }
    Err(ApiError::Rejected {
        status,
        message: rejection_message(body),
    })
}

fn rejection_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    ["detail", "error", "message"]
        .iter()
        .find_map(|field| json.get(*field).and_then(|v| v.as_str()))
        .map(ToString::to_string)
        .unwrap_or_default()
}

pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    check_status(status, body)?;
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Like [`decode`], but a 404 is the expected "nothing yet" answer.
pub fn decode_optional<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<Option<T>, ApiError> {
    if status == 404 {
        return Ok(None);
    }
    decode(status, body).map(Some)
}

/// Signup acknowledgments carry no payload the client relies on.
pub fn signup_receipt(status: u16, body: &str) -> Result<SignupReceipt, ApiError> {
    check_status(status, body)?;
    Ok(if status == 201 {
        SignupReceipt::Created
    } else {
        SignupReceipt::Acknowledged
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CreditBalance, ItemType, SortBy};

    #[test]
    fn feed_url_carries_all_query_parameters() {
        let endpoints = Endpoints::new("");
        let url = endpoints.feedback_list(&FeedQuery {
            item_type: ItemType::Bug,
            sort_by: SortBy::Recent,
            user_id: "user_a1b2c3d4e".to_string(),
        });
        assert_eq!(
            url,
            "/api/feedback?item_type=bug&sort_by=recent&user_id=user_a1b2c3d4e"
        );
    }

    #[test]
    fn base_trailing_slash_is_dropped() {
        let endpoints = Endpoints::new("http://localhost:8080/");
        assert_eq!(endpoints.stats(), "http://localhost:8080/api/stats");
        assert_eq!(
            endpoints.leaderboard(5),
            "http://localhost:8080/api/credits/leaderboard?limit=5"
        );
    }

    #[test]
    fn user_and_item_ids_are_escaped() {
        let endpoints = Endpoints::new("");
        assert_eq!(
            endpoints.credit_balance("a&b c"),
            "/api/credits/balance?user_id=a%26b+c"
        );
        assert_eq!(endpoints.vote("x/y"), "/api/feedback/x%2Fy/vote");
    }

    #[test]
    fn path_segments_encode_spaces_as_percent_twenty() {
        let endpoints = Endpoints::new("");
        assert_eq!(endpoints.vote("item 7+8"), "/api/feedback/item%207%2B8/vote");
        assert_eq!(
            endpoints.comments("f7c1-2a_b.c~d"),
            "/api/feedback/f7c1-2a_b.c~d/comments"
        );
    }

    #[test]
    fn auth_endpoints_target_external_origin() {
        let auth = AuthEndpoints::new("https://b2bee.tech");
        assert_eq!(auth.login(), "https://b2bee.tech/api/public/auth/login");
        assert_eq!(auth.signup(), "https://b2bee.tech/api/public/auth/signup");
    }

    #[test]
    fn rejection_message_prefers_detail_then_error() {
        let err = check_status(422, r#"{"detail":"title too short"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 422,
                message: "title too short".to_string()
            }
        );

        let err = check_status(401, r#"{"error":"Credenciais invalidas"}"#).unwrap_err();
        assert_eq!(err.user_message(), "Credenciais invalidas");

        let err = check_status(502, "Bad Gateway").unwrap_err();
        assert_eq!(err.user_message(), "Bad Gateway");
    }

    #[test]
    fn missing_balance_is_none_not_error() {
        let balance: Option<CreditBalance> =
            decode_optional(404, r#"{"detail":"User not found"}"#).unwrap();
        assert_eq!(balance, None);

        let balance: Option<CreditBalance> =
            decode_optional(200, r#"{"credits_balance":20,"items_submitted":2}"#).unwrap();
        assert_eq!(balance, Some(CreditBalance { credits_balance: 20 }));

        let err = decode_optional::<CreditBalance>(500, "").unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode::<CreditBalance>(200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn signup_receipt_distinguishes_created() {
        assert_eq!(signup_receipt(201, "").unwrap(), SignupReceipt::Created);
        assert_eq!(signup_receipt(200, "{}").unwrap(), SignupReceipt::Acknowledged);
        assert!(signup_receipt(400, "").is_err());
    }
}
