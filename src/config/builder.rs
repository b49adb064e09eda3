//! Type-safe builder for `SiteConfig` using the typestate pattern
//!
//! The API base URL is the only required setting, so `build()` is only
//! available once it has been provided.

use anyhow::{Result, anyhow, bail};
use std::marker::PhantomData;
use url::Url;

use super::types::SiteConfig;
use crate::content_normalizer::NormalizerConfig;

/// Normalize a base URL: add `https://` when no scheme is present and drop
/// trailing slashes so endpoint paths can be appended with `/`.
pub(crate) fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    let parsed = Url::parse(value).map_err(|e| anyhow!("Invalid {field} '{value}': {e}"))?;
    if parsed.host_str().is_none() {
        bail!("Invalid {field} '{value}': missing host");
    }
    Ok(())
}

// Type states for the builder
pub struct WithApiBase;

pub struct SiteConfigBuilder<State = ()> {
    pub(crate) inner: SiteConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for SiteConfigBuilder<()> {
    fn default() -> Self {
        Self {
            inner: SiteConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl SiteConfig {
    /// Create a builder for configuring a `SiteConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> SiteConfigBuilder<()> {
        SiteConfigBuilder::default()
    }
}

impl SiteConfigBuilder<()> {
    pub fn api_base_url(self, url: impl Into<String>) -> SiteConfigBuilder<WithApiBase> {
        let mut inner = self.inner;
        inner.api_base_url = normalize_base_url(&url.into());
        SiteConfigBuilder {
            inner,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the API base URL is set
impl SiteConfigBuilder<WithApiBase> {
    pub fn build(self) -> Result<SiteConfig> {
        let config = self.inner;
        config.validate()?;
        Ok(config)
    }
}

// Optional settings, available in any state
impl<State> SiteConfigBuilder<State> {
    #[must_use]
    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.inner.site_url = normalize_base_url(&url.into());
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.inner.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn newsletter_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.inner.newsletter_endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn analytics_tracking_id(mut self, id: impl Into<String>) -> Self {
        self.inner.analytics_tracking_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn analytics_collector_url(mut self, url: impl Into<String>) -> Self {
        self.inner.analytics_collector_url = Some(url.into());
        self
    }

    /// Set how many columns a table may have before it is turned into cards
    ///
    /// # Example
    /// ```rust
    /// # use gic_site::config::SiteConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = SiteConfig::builder()
    ///     .api_base_url("https://api.example.com/api")
    ///     .table_column_threshold(5)
    ///     .build()?;
    /// assert_eq!(config.normalizer().column_threshold, 5);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn table_column_threshold(mut self, columns: usize) -> Self {
        self.inner.normalizer.column_threshold = columns;
        self
    }

    #[must_use]
    pub fn normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.inner.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn words_per_minute(mut self, words: usize) -> Self {
        self.inner.words_per_minute = words;
        self
    }

    #[must_use]
    pub fn scroll_threshold_px(mut self, px: u32) -> Self {
        self.inner.scroll_threshold_px = px;
        self
    }

    #[must_use]
    pub fn table_breakpoint_px(mut self, px: u32) -> Self {
        self.inner.table_breakpoint_px = px;
        self
    }
}

impl SiteConfig {
    /// Check invariants that serde and the builder cannot express
    pub fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_url("site_url", &self.site_url)?;
        if let Some(endpoint) = &self.newsletter_endpoint {
            validate_url("newsletter_endpoint", endpoint)?;
        }
        if let Some(collector) = &self.analytics_collector_url {
            validate_url("analytics_collector_url", collector)?;
        }
        if self.words_per_minute == 0 {
            bail!("words_per_minute must be greater than zero");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
