//! Typed content returned by the API
//!
//! Only `title` and `slug` are required. The API omits or nulls most other
//! fields depending on how a post was authored, so everything else is
//! optional and defaults when absent.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deserialize `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Record id; the API has served integer, floating point and string ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentId {
    Number(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentId::Number(id) => write!(f, "{id}"),
            ContentId::Float(id) if id.is_finite() && id.fract() == 0.0 => write!(f, "{id:.0}"),
            ContentId::Float(id) => write!(f, "{id}"),
            ContentId::Text(id) => f.write_str(id),
        }
    }
}

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Blog,
    Event,
}

impl ContentKind {
    /// Collection path on the site (`/blog`, `/events`)
    #[must_use]
    pub fn collection_path(self) -> &'static str {
        match self {
            ContentKind::Blog => "/blog",
            ContentKind::Event => "/events",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentKind::Blog => "blog",
            ContentKind::Event => "event",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(default)]
    pub id: Option<ContentId>,
    pub title: String,
    pub slug: String,
    /// Rich HTML body
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_links: Vec<ResourceLink>,
}

impl Blog {
    /// Publication date, falling back to the creation timestamp
    #[must_use]
    pub fn display_date(&self) -> Option<&str> {
        fn non_blank(date: Option<&str>) -> Option<&str> {
            date.filter(|date| !date.trim().is_empty())
        }
        non_blank(self.published_date.as_deref())
            .or_else(|| non_blank(self.created_at.as_deref()))
    }
}

/// A community event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<ContentId>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Rich HTML body
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    /// `HH:MM` or `HH:MM:SS`
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub booking_end_date: Option<String>,
    #[serde(default)]
    pub booking_end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Free-text directions, parking and the like
    #[serde(default)]
    pub venue_details: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub registration_link: Option<String>,
    #[serde(default)]
    pub external_payment_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Event {
    /// Where the register button leads: the registration form, else the
    /// external payment page
    #[must_use]
    pub fn registration_target(&self) -> Option<&str> {
        self.registration_link
            .as_deref()
            .filter(|link| !link.is_empty())
            .or_else(|| {
                self.external_payment_link
                    .as_deref()
                    .filter(|link| !link.is_empty())
            })
    }

    #[must_use]
    pub fn payment_link(&self) -> Option<&str> {
        self.external_payment_link
            .as_deref()
            .filter(|link| !link.trim().is_empty())
    }

    #[must_use]
    pub fn venue_details(&self) -> Option<&str> {
        self.venue_details
            .as_deref()
            .filter(|details| !details.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_tolerates_nulls_and_missing_fields() {
        let blog: Blog = serde_json::from_str(
            r#"{"id": 7, "title": "T", "slug": "t", "tags": null, "author": null}"#,
        )
        .unwrap();
        assert_eq!(blog.id, Some(ContentId::Number(7)));
        assert!(blog.tags.is_empty());
        assert!(blog.resource_links.is_empty());
        assert_eq!(blog.author, None);
    }

    #[test]
    fn test_blog_requires_title_and_slug() {
        assert!(serde_json::from_str::<Blog>(r#"{"success": true}"#).is_err());
    }

    #[test]
    fn test_string_ids() {
        let event: Event =
            serde_json::from_str(r#"{"id": "66a1", "title": "Meetup", "slug": "meetup"}"#).unwrap();
        assert_eq!(event.id.unwrap().to_string(), "66a1");
    }

    #[test]
    fn test_float_ids() {
        let blog: Blog = serde_json::from_str(r#"{"id": 12.0, "title": "T", "slug": "t"}"#).unwrap();
        assert_eq!(blog.id, Some(ContentId::Float(12.0)));
        assert_eq!(blog.id.unwrap().to_string(), "12");
        assert_eq!(ContentId::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_display_date_prefers_published() {
        let blog: Blog = serde_json::from_str(
            r#"{"title": "T", "slug": "t", "published_date": "2025-02-01", "created_at": "2025-01-01"}"#,
        )
        .unwrap();
        assert_eq!(blog.display_date(), Some("2025-02-01"));
    }

    #[test]
    fn test_blank_published_date_falls_back_to_created_at() {
        let blog: Blog = serde_json::from_str(
            r#"{"title": "T", "slug": "t", "published_date": "  ", "created_at": "2025-01-01"}"#,
        )
        .unwrap();
        assert_eq!(blog.display_date(), Some("2025-01-01"));
    }

    #[test]
    fn test_registration_target_fallback() {
        let event: Event = serde_json::from_str(
            r#"{"title": "M", "slug": "m", "registration_link": "", "external_payment_link": "https://pay.example/m"}"#,
        )
        .unwrap();
        assert_eq!(event.registration_target(), Some("https://pay.example/m"));
    }
}
