//! Core configuration types
//!
//! This module contains the main `SiteConfig` struct that every client and
//! view model in the crate is configured from.

use serde::{Deserialize, Serialize};

use crate::content_normalizer::NormalizerConfig;
use crate::utils::{
    DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCROLL_THRESHOLD_PX,
    DEFAULT_SITE_URL, DEFAULT_TABLE_BREAKPOINT_PX, DEFAULT_WORDS_PER_MINUTE,
};

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Content API prefix, without trailing slash.
    ///
    /// **INVARIANT:** Always an absolute `http(s)` URL (normalized in builder).
    pub(crate) api_base_url: String,

    /// Public site URL used for share links, without trailing slash
    pub(crate) site_url: String,

    /// Timeout in seconds for a single content API request
    ///
    /// Default: 30 seconds
    pub(crate) request_timeout_secs: u64,

    /// Newsletter intake endpoint
    ///
    /// The endpoint answers with an opaque response; see `newsletter`.
    /// Signup is disabled when unset.
    pub(crate) newsletter_endpoint: Option<String>,

    /// Analytics tracking id; analytics is a no-op when unset
    pub(crate) analytics_tracking_id: Option<String>,

    /// Collector receiving analytics hits over HTTP
    ///
    /// When unset, hits are only logged.
    pub(crate) analytics_collector_url: Option<String>,

    /// Table and image normalization settings
    pub(crate) normalizer: NormalizerConfig,

    /// Reading speed for read-time estimates
    ///
    /// Default: 200 words per minute
    pub(crate) words_per_minute: usize,

    /// Scroll offset after which the floating button appears
    pub(crate) scroll_threshold_px: u32,

    /// Viewport width where hybrid tables switch from cards to table
    pub(crate) table_breakpoint_px: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            newsletter_endpoint: None,
            analytics_tracking_id: None,
            analytics_collector_url: None,
            normalizer: NormalizerConfig::default(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            table_breakpoint_px: DEFAULT_TABLE_BREAKPOINT_PX,
        }
    }
}
