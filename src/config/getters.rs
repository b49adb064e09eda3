//! Getter methods for `SiteConfig`

use std::time::Duration;

use super::types::SiteConfig;
use crate::content_normalizer::NormalizerConfig;

impl SiteConfig {
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn newsletter_endpoint(&self) -> Option<&str> {
        self.newsletter_endpoint.as_deref()
    }

    #[must_use]
    pub fn analytics_tracking_id(&self) -> Option<&str> {
        self.analytics_tracking_id.as_deref()
    }

    #[must_use]
    pub fn analytics_collector_url(&self) -> Option<&str> {
        self.analytics_collector_url.as_deref()
    }

    #[must_use]
    pub fn normalizer(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    #[must_use]
    pub fn words_per_minute(&self) -> usize {
        self.words_per_minute
    }

    #[must_use]
    pub fn scroll_threshold_px(&self) -> u32 {
        self.scroll_threshold_px
    }

    #[must_use]
    pub fn table_breakpoint_px(&self) -> u32 {
        self.table_breakpoint_px
    }
}
