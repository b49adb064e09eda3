//! Remote content API: typed models, envelope unwrapping and the HTTP client.

pub mod client;
pub mod envelope;
pub mod errors;
pub mod models;

pub use client::{ApiClient, ListQuery};
pub use envelope::{ExtractionRule, unwrap_list, unwrap_payload};
pub use errors::{ApiError, ApiResult, GENERIC_FETCH_MESSAGE};
pub use models::{Blog, ContentId, ContentKind, Event, ResourceLink};
