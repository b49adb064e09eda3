//! HTTP client for the content API
//!
//! Endpoints:
//! - `GET {base}/blogs`, `GET {base}/blogs/{slug}`
//! - `GET {base}/events`, `GET {base}/events/{slug}`, `GET {base}/events/upcoming`
//!
//! Failures are returned once; nothing is retried automatically.

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

use super::envelope::{
    BLOG_DETAIL_RULES, BLOG_LIST_RULES, EVENT_DETAIL_RULES, EVENT_LIST_RULES, ExtractionRule,
    unwrap_list, unwrap_payload,
};
use super::errors::{ApiError, ApiResult};
use super::models::{Blog, ContentKind, Event};
use crate::config::SiteConfig;
use crate::routes::Slug;
use crate::utils::USER_AGENT;

/// Query parameters for list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: BTreeMap<String, String>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn limit(self, limit: usize) -> Self {
        self.param("limit", limit.to_string())
    }

    #[must_use]
    pub fn page(self, page: usize) -> Self {
        self.param("page", page.to_string())
    }

    #[must_use]
    pub fn tag(self, tag: impl Into<String>) -> Self {
        self.param("tag", tag)
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

/// Content API client
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the site configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be created.
    pub fn new(config: &SiteConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Self::with_client(http, config.api_base_url())
    }

    /// Build a client around an existing `reqwest::Client`
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse.
    pub fn with_client(http: Client, base_url: &str) -> ApiResult<Self> {
        Url::parse(base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_blogs(&self, query: &ListQuery) -> ApiResult<Vec<Blog>> {
        self.fetch_list("/blogs", query, BLOG_LIST_RULES, "blog list")
            .await
    }

    pub async fn fetch_blog(&self, slug: &str) -> ApiResult<Blog> {
        self.fetch_detail(ContentKind::Blog, "/blogs", slug, BLOG_DETAIL_RULES)
            .await
    }

    pub async fn fetch_events(&self, query: &ListQuery) -> ApiResult<Vec<Event>> {
        self.fetch_list("/events", query, EVENT_LIST_RULES, "event list")
            .await
    }

    pub async fn fetch_event(&self, slug: &str) -> ApiResult<Event> {
        self.fetch_detail(ContentKind::Event, "/events", slug, EVENT_DETAIL_RULES)
            .await
    }

    pub async fn fetch_upcoming_events(&self) -> ApiResult<Vec<Event>> {
        self.fetch_list(
            "/events/upcoming",
            &ListQuery::new(),
            EVENT_LIST_RULES,
            "upcoming event list",
        )
        .await
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
        rules: &[ExtractionRule],
        shape: &'static str,
    ) -> ApiResult<Vec<T>> {
        let body = self.get_json(path, query).await?;
        unwrap_list(&body, rules).ok_or(ApiError::UnexpectedShape(shape))
    }

    async fn fetch_detail<T: DeserializeOwned>(
        &self,
        kind: ContentKind,
        collection: &str,
        raw_slug: &str,
        rules: &[ExtractionRule],
    ) -> ApiResult<T> {
        let Some(slug) = Slug::parse(raw_slug) else {
            debug!(%kind, slug = raw_slug, "rejecting malformed slug");
            return Err(ApiError::not_found(kind, raw_slug));
        };

        let path = format!("{collection}/{}", slug.encoded());
        let body = match self.get_json(&path, &ListQuery::new()).await {
            Err(ApiError::Status { status: 404, .. }) => {
                return Err(ApiError::not_found(kind, slug.as_str()));
            }
            other => other?,
        };

        unwrap_payload(&body, rules).ok_or_else(|| ApiError::not_found(kind, slug.as_str()))
    }

    async fn get_json(&self, path: &str, query: &ListQuery) -> ApiResult<Value> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "content API request");

        let mut request = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query.params());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_client(Client::new(), "http://localhost:4000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000/api");
    }

    #[test]
    fn test_invalid_base_url() {
        let error = ApiClient::with_client(Client::new(), "not a url").unwrap_err();
        assert!(matches!(error, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_list_query_params_sorted() {
        let query = ListQuery::new().tag("markets").limit(5);
        let keys: Vec<_> = query.params().keys().cloned().collect();
        assert_eq!(keys, vec!["limit", "tag"]);
    }
}
