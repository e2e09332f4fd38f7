use serde::Serialize;

use super::*;
use crate::api::HelixApiClient;
use crate::{HelixError, Token};

const SUBSCRIPTIONS_PATH: &str = "eventsub/subscriptions";

#[derive(Debug, Serialize)]
pub(crate) struct SubscribeBody<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    version: &'a str,
    condition: &'a serde_json::Value,
    transport: &'a EventSubTransportOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_batching_enabled: Option<bool>,
}

impl<'a> From<&'a CreateSubscriptionRequest> for SubscribeBody<'a> {
    fn from(req: &'a CreateSubscriptionRequest) -> Self {
        Self {
            event_type: &req.event_type,
            version: &req.version,
            condition: &req.condition,
            transport: &req.transport,
            is_batching_enabled: req.batched.then_some(true),
        }
    }
}

/// Reject a WebSocket subscription whose user token holds none of the required scopes.
///
/// Webhook and conduit subscriptions use app access tokens, so there is nothing to check locally.
pub(crate) fn check_scopes(token: &Token, req: &CreateSubscriptionRequest) -> Result<(), HelixError> {
    if !matches!(req.transport, EventSubTransportOptions::Websocket { .. }) {
        return Ok(());
    }
    let required: Vec<&str> = req.scopes.iter().map(String::as_str).collect();
    if token.has_any_scope(&required) {
        return Ok(());
    }
    Err(HelixError::MissingScope {
        event_type: req.event_type.clone(),
        required: req.scopes.clone(),
    })
}

impl HelixApiClient {
    /// Fetch one page of EventSub subscriptions.
    pub async fn get_subscriptions(
        &self,
        token: &Token,
        filter: &SubscriptionFilter,
        after: Option<&str>,
    ) -> Result<SubscriptionPage, HelixError> {
        let mut query = Vec::with_capacity(2);
        query.extend(filter.query_pair());
        if let Some(cursor) = after {
            query.push(("after", cursor));
        }
        let url = self.helix_url(SUBSCRIPTIONS_PATH, &query)?;
        let body = self.authenticated_get(url, token).await?;
        let resp: SubscriptionListResponse = serde_json::from_str(&body)?;
        let page = SubscriptionPage::from(resp);
        tracing::debug!(
            count = page.data.len(),
            total = page.total,
            has_more = page.cursor.is_some(),
            "Fetched EventSub subscriptions page"
        );
        Ok(page)
    }

    /// Lazily page through EventSub subscriptions.
    pub fn get_subscriptions_paginated<'a>(
        &'a self,
        token: &'a Token,
        filter: SubscriptionFilter,
    ) -> SubscriptionPages<'a> {
        SubscriptionPages::new(self, token, filter)
    }

    /// Fetch every EventSub subscription matching `filter`.
    pub async fn get_all_subscriptions(
        &self,
        token: &Token,
        filter: SubscriptionFilter,
    ) -> Result<Vec<EventSubSubscription>, HelixError> {
        self.get_subscriptions_paginated(token, filter)
            .collect_all()
            .await
    }

    /// Create an EventSub subscription.
    pub async fn create_subscription(
        &self,
        token: &Token,
        req: &CreateSubscriptionRequest,
    ) -> Result<EventSubSubscription, HelixError> {
        check_scopes(token, req)?;

        let url = self.helix_url(SUBSCRIPTIONS_PATH, &[])?;
        let body = self
            .authenticated_post(url, token, &SubscribeBody::from(req))
            .await?;
        let resp: SubscriptionListResponse = serde_json::from_str(&body)?;
        let created = resp
            .data
            .into_iter()
            .next()
            .ok_or_else(|| HelixError::ApiError {
                status: 404,
                message: "Subscription not found in response".into(),
            })?;

        tracing::info!(
            id = %created.id,
            event_type = %created.event_type,
            transport = req.transport.method(),
            "Subscribed to EventSub event"
        );
        Ok(created)
    }

    /// Create a subscription by friendly name or event type from [`SUBSCRIPTION_TYPES`].
    pub async fn subscribe(
        &self,
        token: &Token,
        name: &str,
        params: &ConditionParams,
        transport: EventSubTransportOptions,
    ) -> Result<EventSubSubscription, HelixError> {
        let sub_type = SubscriptionType::find(name)
            .ok_or_else(|| HelixError::UnknownSubscriptionType(name.to_string()))?;
        let req = sub_type.request(params, transport)?;
        self.create_subscription(token, &req).await
    }

    /// Delete an EventSub subscription by ID.
    pub async fn delete_subscription(&self, token: &Token, id: &str) -> Result<(), HelixError> {
        let url = self.helix_url(SUBSCRIPTIONS_PATH, &[("id", id)])?;
        self.authenticated_delete(url, token).await
    }

    /// Delete every EventSub subscription.
    pub async fn delete_all_subscriptions(&self, token: &Token) -> Result<usize, HelixError> {
        self.delete_subscriptions_matching(token, None).await
    }

    /// Delete subscriptions that are neither enabled nor pending webhook verification.
    pub async fn delete_broken_subscriptions(&self, token: &Token) -> Result<usize, HelixError> {
        let is_broken = |sub: &EventSubSubscription| !sub.is_healthy();
        self.delete_subscriptions_matching(token, Some(&is_broken))
            .await
    }

    async fn delete_subscriptions_matching(
        &self,
        token: &Token,
        should_delete: Option<&(dyn Fn(&EventSubSubscription) -> bool + Sync)>,
    ) -> Result<usize, HelixError> {
        let pages = self.get_subscriptions_paginated(token, SubscriptionFilter::All);
        let deleter = SubscriptionDeleter::new(self, token);
        let removed = sweep_subscriptions(pages, &deleter, should_delete).await?;
        tracing::info!(removed, "EventSub subscription sweep finished");
        Ok(removed)
    }
}
