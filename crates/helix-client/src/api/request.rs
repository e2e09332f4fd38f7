use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use url::Url;

use super::HelixApiClient;
use crate::{HelixError, Token};

impl HelixApiClient {
    /// Build a Helix URL for `path` with the given query pairs.
    ///
    /// Pairs with an empty value are skipped.
    pub(crate) fn helix_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, HelixError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter().filter(|(_, v)| !v.is_empty()) {
                pairs.append_pair(key, value);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    /// Build auth headers from the given token.
    fn auth_headers(&self, token: &Token) -> Result<HeaderMap, HelixError> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.access_token))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("Client-Id", HeaderValue::from_str(&self.client_id)?);
        Ok(headers)
    }

    /// Execute a GET request with auth headers.
    pub(crate) async fn authenticated_get(
        &self,
        url: Url,
        token: &Token,
    ) -> Result<String, HelixError> {
        let headers = self.auth_headers(token)?;
        tracing::debug!(url = %url, "Helix GET");
        let resp = self.http.get(url.clone()).headers(headers).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %url, "Got 401, caller should refresh token and retry");
        }

        if !status.is_success() {
            return Err(HelixError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    /// Execute a POST request with auth headers and JSON body.
    pub(crate) async fn authenticated_post(
        &self,
        url: Url,
        token: &Token,
        body: &impl Serialize,
    ) -> Result<String, HelixError> {
        let headers = self.auth_headers(token)?;
        tracing::debug!(url = %url, "Helix POST");
        let resp = self.http.post(url).headers(headers).json(body).send().await?;

        let status = resp.status();
        let resp_body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %resp_body, "Helix POST failed");
            return Err(HelixError::ApiError {
                status: status.as_u16(),
                message: resp_body,
            });
        }

        Ok(resp_body)
    }

    /// Execute a DELETE request with auth headers.
    pub(crate) async fn authenticated_delete(
        &self,
        url: Url,
        token: &Token,
    ) -> Result<(), HelixError> {
        let headers = self.auth_headers(token)?;
        tracing::debug!(url = %url, "Helix DELETE");
        let resp = self.http.delete(url).headers(headers).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(HelixError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}
