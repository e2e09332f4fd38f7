use super::EventSubSubscription;
use crate::api::HelixApiClient;
use crate::{HelixError, Token};

/// Source of subscription pages, fetched on demand.
pub trait SubscriptionPager {
    /// The next page, or `Ok(None)` when there are no more.
    fn next_page(
        &mut self,
    ) -> impl Future<Output = Result<Option<Vec<EventSubSubscription>>, HelixError>> + Send;
}

impl<P: SubscriptionPager> SubscriptionPager for &mut P {
    fn next_page(
        &mut self,
    ) -> impl Future<Output = Result<Option<Vec<EventSubSubscription>>, HelixError>> + Send {
        (**self).next_page()
    }
}

/// Removes a single subscription.
pub trait SubscriptionRemover {
    fn unsubscribe(
        &self,
        subscription: &EventSubSubscription,
    ) -> impl Future<Output = Result<(), HelixError>> + Send;
}

/// Deletes subscriptions through the Helix API with a fixed token.
pub struct SubscriptionDeleter<'a> {
    client: &'a HelixApiClient,
    token: &'a Token,
}

impl<'a> SubscriptionDeleter<'a> {
    pub fn new(client: &'a HelixApiClient, token: &'a Token) -> Self {
        Self { client, token }
    }
}

impl SubscriptionRemover for SubscriptionDeleter<'_> {
    async fn unsubscribe(&self, subscription: &EventSubSubscription) -> Result<(), HelixError> {
        self.client
            .delete_subscription(self.token, &subscription.id)
            .await
    }
}

/// Walk every page of `pager` and unsubscribe the subscriptions `should_delete` accepts.
///
/// With no predicate every subscription is removed. Removals run one at a
/// time in listing order. The first error from either the pager or the
/// remover ends the sweep and is returned as-is; subscriptions removed
/// before it stay removed.
///
/// Returns the number of subscriptions removed.
pub async fn sweep_subscriptions<P, R>(
    mut pager: P,
    remover: &R,
    should_delete: Option<&(dyn Fn(&EventSubSubscription) -> bool + Sync)>,
) -> Result<usize, HelixError>
where
    P: SubscriptionPager,
    R: SubscriptionRemover,
{
    let mut removed = 0;
    while let Some(page) = pager.next_page().await? {
        for subscription in page {
            if !should_delete.is_none_or(|matches| matches(&subscription)) {
                continue;
            }
            remover.unsubscribe(&subscription).await?;
            tracing::info!(
                id = %subscription.id,
                event_type = %subscription.event_type,
                status = %subscription.status,
                "EventSub subscription deleted"
            );
            removed += 1;
        }
    }
    Ok(removed)
}
