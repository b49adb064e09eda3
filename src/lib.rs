//! Content core of the investment community website.
//!
//! - [`content_normalizer`] makes author HTML responsive (fluid images,
//!   hybrid card/table layouts for wide tables).
//! - [`api`] talks to the remote content API and unwraps its envelopes.
//! - [`pages`] turns API data into per-page view models.
//! - [`routes`], [`schedule`], [`formatting`] and [`presentation`] hold the
//!   page-level rules; [`analytics`], [`newsletter`] and [`share`] the
//!   outward-facing side effects.

pub mod analytics;
pub mod api;
pub mod config;
pub mod content_normalizer;
pub mod formatting;
pub mod newsletter;
pub mod pages;
pub mod presentation;
pub mod routes;
pub mod schedule;
pub mod share;
pub mod utils;

pub use analytics::{Analytics, AnalyticsEvent, AnalyticsHit, AnalyticsSink};
pub use api::{ApiClient, ApiError, ApiResult, Blog, ContentKind, Event, ListQuery};
pub use config::SiteConfig;
pub use content_normalizer::{ContentNormalizer, NormalizerConfig, normalize, normalize_with};
pub use newsletter::{NewsletterClient, NewsletterError, SubmissionOutcome};
pub use pages::PageState;
pub use routes::{Route, Slug};
pub use schedule::{EventSchedule, EventStatus};
pub use share::{Clipboard, ShareConfirmation, copy_link};
