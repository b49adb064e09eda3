//! Shared configuration constants for the site content core
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default content API base URL
///
/// Every endpoint is appended to this prefix, e.g. `{base}/blogs/{slug}`.
/// Overridden with `GIC_API_BASE_URL` or the config file.
pub const DEFAULT_API_BASE_URL: &str = "https://gic-server.onrender.com/api";

/// Default public site URL, used when building share links
pub const DEFAULT_SITE_URL: &str = "https://gic.community";

/// Timeout for a single content API request
///
/// The API host sleeps when idle and the first request after a quiet period
/// can take well over ten seconds to answer.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Tables with more columns than this are rendered with the hybrid layout
pub const DEFAULT_TABLE_COLUMN_THRESHOLD: usize = 3;

/// Reading speed used for "N min read" estimates
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Scroll offset after which the floating back-to-top button is shown
pub const DEFAULT_SCROLL_THRESHOLD_PX: u32 = 300;

/// Viewport width at which the hybrid table switches from cards to table
///
/// Matches the `md` breakpoint of the styling layer.
pub const DEFAULT_TABLE_BREAKPOINT_PX: u32 = 768;

/// Number of past events listed on the events page
pub const PAST_EVENTS_LIMIT: usize = 4;

/// Number of blog posts featured on the home page
pub const HOME_LATEST_BLOGS: usize = 2;

/// Excerpt length for blog cards, in characters
pub const BLOG_EXCERPT_CHARS: usize = 150;

/// Excerpt length for event cards, in characters
pub const EVENT_EXCERPT_CHARS: usize = 100;

/// How long newsletter banners stay on screen before dismissing themselves
pub const NEWSLETTER_BANNER_SECS: u64 = 5;

/// User agent sent with every outbound request
pub const USER_AGENT: &str = concat!("gic-site/", env!("CARGO_PKG_VERSION"));
