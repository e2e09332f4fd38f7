//! Helix REST client library.
//!
//! Provides EventSub subscription management over the Helix API
//! and parsing of chat emote offset strings.

pub mod api;
pub mod emotes;
pub mod eventsub;

use serde::{Deserialize, Serialize};

/// Credential used for Helix requests.
///
/// Acquiring and refreshing this token is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    /// Space-separated list of granted scopes.
    #[serde(default)]
    pub scope: String,
    /// Owner of a user access token. `None` for app access tokens.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Token {
    pub fn new(access_token: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            scope: scope.into(),
            user_id: None,
        }
    }

    /// Whether the token was granted `scope`.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.split_whitespace().any(|s| s == scope)
    }

    /// Whether the token holds at least one of `scopes`. An empty list always passes.
    pub fn has_any_scope(&self, scopes: &[&str]) -> bool {
        scopes.is_empty() || scopes.iter().any(|s| self.has_scope(s))
    }
}

/// Unified error type for the helix-client crate.
#[derive(Debug, thiserror::Error)]
pub enum HelixError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Helix API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Token lacks scope for {event_type}: need one of {}", required.join(", "))]
    MissingScope {
        event_type: String,
        required: Vec<String>,
    },

    #[error("Condition for {event_type} requires {field}")]
    MissingCondition {
        event_type: String,
        field: &'static str,
    },

    #[error("Unknown EventSub subscription type: {0}")]
    UnknownSubscriptionType(String),
}
