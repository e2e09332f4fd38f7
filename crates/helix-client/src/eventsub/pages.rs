use super::{EventSubSubscription, SubscriptionFilter, SubscriptionPage, SubscriptionPager};
use crate::api::HelixApiClient;
use crate::{HelixError, Token};

/// Lazy, forward-only walk over the subscription listing.
///
/// Each call to [`SubscriptionPages::fetch_next`] requests one page and
/// follows the returned cursor. Create a new pager to start over.
pub struct SubscriptionPages<'a> {
    client: &'a HelixApiClient,
    token: &'a Token,
    filter: SubscriptionFilter,
    cursor: Option<String>,
    done: bool,
}

impl<'a> SubscriptionPages<'a> {
    pub(crate) fn new(client: &'a HelixApiClient, token: &'a Token, filter: SubscriptionFilter) -> Self {
        Self {
            client,
            token,
            filter,
            cursor: None,
            done: false,
        }
    }

    /// Fetch the next page. Returns `Ok(None)` once the listing is exhausted.
    pub async fn fetch_next(&mut self) -> Result<Option<SubscriptionPage>, HelixError> {
        if self.done {
            return Ok(None);
        }

        let page = self
            .client
            .get_subscriptions(self.token, &self.filter, self.cursor.as_deref())
            .await?;

        self.cursor = page.cursor.clone();
        self.done = self.cursor.is_none();
        Ok(Some(page))
    }

    /// Drain the remaining pages into a single list.
    pub async fn collect_all(mut self) -> Result<Vec<EventSubSubscription>, HelixError> {
        let mut out = Vec::new();
        while let Some(page) = self.fetch_next().await? {
            out.extend(page.data);
        }
        Ok(out)
    }
}

impl SubscriptionPager for SubscriptionPages<'_> {
    async fn next_page(&mut self) -> Result<Option<Vec<EventSubSubscription>>, HelixError> {
        Ok(self.fetch_next().await?.map(|page| page.data))
    }
}
