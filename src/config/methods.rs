//! Loading and override methods for `SiteConfig`
//!
//! Configuration is assembled from defaults, an optional JSON file and
//! `GIC_*` environment variables, in that order.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use super::builder::normalize_base_url;
use super::types::SiteConfig;

pub const ENV_API_BASE_URL: &str = "GIC_API_BASE_URL";
pub const ENV_SITE_URL: &str = "GIC_SITE_URL";
pub const ENV_NEWSLETTER_ENDPOINT: &str = "GIC_NEWSLETTER_ENDPOINT";
pub const ENV_GA_TRACKING_ID: &str = "GIC_GA_TRACKING_ID";
pub const ENV_ANALYTICS_COLLECTOR_URL: &str = "GIC_ANALYTICS_COLLECTOR_URL";
pub const ENV_TABLE_COLUMN_THRESHOLD: &str = "GIC_TABLE_COLUMN_THRESHOLD";

impl SiteConfig {
    /// Read a JSON config file; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        config.api_base_url = normalize_base_url(&config.api_base_url);
        config.site_url = normalize_base_url(&config.site_url);
        config.validate()?;

        debug!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    /// Apply `GIC_*` environment variables on top of this config
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unusable value.
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, test fixtures)
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or the result fails
    /// validation.
    pub fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(ENV_API_BASE_URL) {
            self.api_base_url = normalize_base_url(&url);
        }
        if let Some(url) = get(ENV_SITE_URL) {
            self.site_url = normalize_base_url(&url);
        }
        if let Some(endpoint) = get(ENV_NEWSLETTER_ENDPOINT) {
            self.newsletter_endpoint = Some(endpoint);
        }
        if let Some(id) = get(ENV_GA_TRACKING_ID) {
            self.analytics_tracking_id = Some(id);
        }
        if let Some(url) = get(ENV_ANALYTICS_COLLECTOR_URL) {
            self.analytics_collector_url = Some(url);
        }
        if let Some(raw) = get(ENV_TABLE_COLUMN_THRESHOLD) {
            self.normalizer.column_threshold = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TABLE_COLUMN_THRESHOLD} must be a number, got '{raw}'"))?;
        }

        self.validate()?;
        Ok(self)
    }
}
