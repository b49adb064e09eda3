//! Configuration module for the site content core
//!
//! This module provides the `SiteConfig` struct and its type-safe builder
//! for configuring API access, analytics, the newsletter endpoint and the
//! content normalizer, with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{SiteConfigBuilder, WithApiBase};
pub use types::SiteConfig;
