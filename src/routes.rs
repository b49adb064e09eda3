//! URL path to page mapping
//!
//! Mirrors the site's router: `/`, `/about`, `/blog`, `/blog/{slug}`,
//! `/events`, `/events/{slug}`, `/forum`, and a catch-all not-found page.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Longest slug accepted; anything longer is not a real post
const MAX_SLUG_CHARS: usize = 200;

/// URL-safe identifier of a blog post or event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Accept a trimmed, non-empty slug made of ASCII letters, digits, `-` and `_`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let slug = raw.trim();
        let valid = !slug.is_empty()
            && slug.chars().count() <= MAX_SLUG_CHARS
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Slug(slug.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use in request paths
    #[must_use]
    pub fn encoded(&self) -> Cow<'_, str> {
        urlencoding::encode(&self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavSection {
    Home,
    About,
    Blog,
    Events,
    Forum,
}

/// A page of the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "slug", rename_all = "snake_case")]
pub enum Route {
    Home,
    About,
    Blog,
    /// Raw path segment; validity is checked when the post is looked up
    BlogDetail(String),
    Events,
    EventDetail(String),
    Forum,
    NotFound,
}

impl Route {
    /// Resolve a request path
    ///
    /// Query string, fragment and trailing slashes are ignored; path
    /// segments are percent-decoded.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["blog"] => Route::Blog,
            ["blog", slug] => Route::BlogDetail(decode_segment(slug)),
            ["events"] => Route::Events,
            ["events", slug] => Route::EventDetail(decode_segment(slug)),
            ["forum"] => Route::Forum,
            _ => Route::NotFound,
        }
    }

    /// Canonical path of this route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Blog => "/blog".to_string(),
            Route::BlogDetail(slug) => format!("/blog/{}", urlencoding::encode(slug)),
            Route::Events => "/events".to_string(),
            Route::EventDetail(slug) => format!("/events/{}", urlencoding::encode(slug)),
            Route::Forum => "/forum".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Highlighted navigation entry; the not-found page highlights nothing
    #[must_use]
    pub fn nav_section(&self) -> Option<NavSection> {
        match self {
            Route::Home => Some(NavSection::Home),
            Route::About => Some(NavSection::About),
            Route::Blog | Route::BlogDetail(_) => Some(NavSection::Blog),
            Route::Events | Route::EventDetail(_) => Some(NavSection::Events),
            Route::Forum => Some(NavSection::Forum),
            Route::NotFound => None,
        }
    }

    /// Page title used for page-view analytics
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About Us",
            Route::Blog => "Blog",
            Route::BlogDetail(_) => "Article",
            Route::Events => "Events",
            Route::EventDetail(_) => "Event",
            Route::Forum => "Forum Coming Soon",
            Route::NotFound => "Page Not Found",
        }
    }
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string())
}
