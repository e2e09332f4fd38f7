//! EventSub subscription management over the Helix REST API.
//!
//! Lists, creates and deletes subscriptions, and sweeps stale ones.
//! Receiving notifications (webhook or WebSocket) is left to the caller.

mod pages;
mod subscriptions;
mod sweep;
mod types;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::HelixPagination;

pub use pages::SubscriptionPages;
pub use sweep::{SubscriptionDeleter, SubscriptionPager, SubscriptionRemover, sweep_subscriptions};
pub use types::{ConditionParams, ConditionShape, SUBSCRIPTION_TYPES, SubscriptionType};

/// Status of an EventSub subscription as reported by Helix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSubStatus {
    Enabled,
    WebhookCallbackVerificationPending,
    WebhookCallbackVerificationFailed,
    NotificationFailuresExceeded,
    AuthorizationRevoked,
    ModeratorRemoved,
    UserRemoved,
    VersionRemoved,
    BetaMaintenance,
    WebsocketDisconnected,
    WebsocketFailedPingPong,
    WebsocketReceivedInboundTraffic,
    WebsocketConnectionUnused,
    WebsocketInternalError,
    WebsocketNetworkTimeout,
    WebsocketNetworkError,
    WebsocketFailedToReconnect,
    ConduitDeleted,
    /// A status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl EventSubStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::WebhookCallbackVerificationPending => "webhook_callback_verification_pending",
            Self::WebhookCallbackVerificationFailed => "webhook_callback_verification_failed",
            Self::NotificationFailuresExceeded => "notification_failures_exceeded",
            Self::AuthorizationRevoked => "authorization_revoked",
            Self::ModeratorRemoved => "moderator_removed",
            Self::UserRemoved => "user_removed",
            Self::VersionRemoved => "version_removed",
            Self::BetaMaintenance => "beta_maintenance",
            Self::WebsocketDisconnected => "websocket_disconnected",
            Self::WebsocketFailedPingPong => "websocket_failed_ping_pong",
            Self::WebsocketReceivedInboundTraffic => "websocket_received_inbound_traffic",
            Self::WebsocketConnectionUnused => "websocket_connection_unused",
            Self::WebsocketInternalError => "websocket_internal_error",
            Self::WebsocketNetworkTimeout => "websocket_network_timeout",
            Self::WebsocketNetworkError => "websocket_network_error",
            Self::WebsocketFailedToReconnect => "websocket_failed_to_reconnect",
            Self::ConduitDeleted => "conduit_deleted",
            Self::Unknown => "unknown",
        }
    }

    /// Enabled, or still waiting on webhook callback verification.
    pub fn is_healthy(&self) -> bool {
        matches!(
            self,
            Self::Enabled | Self::WebhookCallbackVerificationPending
        )
    }
}

impl std::fmt::Display for EventSubStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport details of an existing subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionTransport {
    pub method: String,
    #[serde(default)]
    pub callback: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub conduit_id: Option<String>,
    #[serde(default)]
    pub connected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disconnected_at: Option<DateTime<Utc>>,
}

/// An EventSub subscription from GET /helix/eventsub/subscriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSubSubscription {
    pub id: String,
    pub status: EventSubStatus,
    #[serde(rename = "type")]
    pub event_type: String,
    pub version: String,
    #[serde(default)]
    pub condition: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub transport: SubscriptionTransport,
    #[serde(default)]
    pub cost: u64,
}

impl EventSubSubscription {
    /// String value of a condition field, e.g. `broadcaster_user_id`.
    pub fn condition_value(&self, key: &str) -> Option<&str> {
        self.condition.get(key).and_then(|v| v.as_str())
    }

    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}

/// Transport to request when creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EventSubTransportOptions {
    Webhook { callback: String, secret: String },
    Websocket { session_id: String },
    Conduit { conduit_id: String },
}

impl EventSubTransportOptions {
    pub fn method(&self) -> &'static str {
        match self {
            Self::Webhook { .. } => "webhook",
            Self::Websocket { .. } => "websocket",
            Self::Conduit { .. } => "conduit",
        }
    }
}

/// Parameters for POST /helix/eventsub/subscriptions.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionRequest {
    pub event_type: String,
    pub version: String,
    pub condition: serde_json::Value,
    pub transport: EventSubTransportOptions,
    /// Scopes of which the user token needs at least one. Checked for WebSocket transports only.
    pub scopes: Vec<String>,
    pub batched: bool,
}

/// Narrowing for subscription listings. Helix accepts at most one filter per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubscriptionFilter {
    #[default]
    All,
    Status(EventSubStatus),
    Type(String),
    User(String),
}

impl SubscriptionFilter {
    pub(crate) fn query_pair(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::All => None,
            Self::Status(status) => Some(("status", status.as_str())),
            Self::Type(event_type) => Some(("type", event_type.as_str())),
            Self::User(user_id) => Some(("user_id", user_id.as_str())),
        }
    }
}

/// One page of subscriptions plus the account-wide totals Helix reports with it.
#[derive(Debug, Clone)]
pub struct SubscriptionPage {
    pub data: Vec<EventSubSubscription>,
    pub total: u64,
    pub total_cost: u64,
    pub max_total_cost: u64,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionListResponse {
    data: Vec<EventSubSubscription>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    total_cost: u64,
    #[serde(default)]
    max_total_cost: u64,
    #[serde(default)]
    pagination: Option<HelixPagination>,
}

impl From<SubscriptionListResponse> for SubscriptionPage {
    fn from(resp: SubscriptionListResponse) -> Self {
        Self {
            data: resp.data,
            total: resp.total,
            total_cost: resp.total_cost,
            max_total_cost: resp.max_total_cost,
            cursor: resp.pagination.and_then(HelixPagination::next_cursor),
        }
    }
}
