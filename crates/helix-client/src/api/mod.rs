//! Helix REST API client.
//!
//! Owns the HTTP client and injects the Bearer token and Client-ID
//! headers on every request. Endpoint groups live in their own
//! modules as `impl HelixApiClient` blocks.

#[cfg(test)]
pub(crate) mod mock;
mod request;

pub mod models;

pub use models::HelixPagination;

pub const HELIX_BASE: &str = "https://api.twitch.tv/helix";

/// Helix API client with automatic auth header injection.
pub struct HelixApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) client_id: String,
    pub(crate) base_url: String,
}

impl HelixApiClient {
    pub fn new(client_id: String) -> Self {
        Self::with_base_url(client_id, HELIX_BASE)
    }

    /// Create a client that talks to a non-default Helix endpoint, such as a mock server.
    pub fn with_base_url(client_id: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            client_id,
            base_url,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
