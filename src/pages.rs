//! View models for the site's pages
//!
//! Each page turns API data into display-ready values: formatted dates,
//! excerpts, status badges and normalized HTML bodies. Loading outcomes are
//! folded into [`PageState`] so a failed or missing lookup never takes down
//! the rest of the page.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::api::{ApiError, ApiResult, Blog, ContentKind, Event, ResourceLink};
use crate::content_normalizer::ContentNormalizer;
use crate::formatting::{
    format_day_month, format_long_date, format_time_12h, read_time_label, read_time_minutes,
    truncate_plain_text,
};
use crate::routes::Route;
use crate::schedule::{EventSchedule, EventStatus};
use crate::utils::{BLOG_EXCERPT_CHARS, EVENT_EXCERPT_CHARS, HOME_LATEST_BLOGS};

pub const HOME_TITLE: &str = "Gurugram Investors Club";
pub const HOME_SUBTITLE: &str = "Building wealth through informed analysis, collaborative research, and strategic networking in the heart of India's financial capital.";
pub const REGISTRATION_PENDING_NOTICE: &str =
    "Registration information will be available soon. Please check back later.";

/// Outcome of loading the data behind a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum PageState<T> {
    Loaded(T),
    /// Empty state with a way back to the collection page
    NotFound {
        message: String,
        back_path: String,
        back_label: String,
    },
    /// Generic error with a retry affordance
    Failed { message: String, retryable: bool },
}

impl<T> PageState<T> {
    /// Fold a fetch result into a page state for a `kind` page
    pub fn from_result(result: ApiResult<T>, kind: ContentKind) -> Self {
        match result {
            Ok(value) => PageState::Loaded(value),
            Err(error) if error.is_not_found() => not_found(kind),
            Err(error) => failed(&error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageState<U> {
        match self {
            PageState::Loaded(value) => PageState::Loaded(f(value)),
            PageState::NotFound {
                message,
                back_path,
                back_label,
            } => PageState::NotFound {
                message,
                back_path,
                back_label,
            },
            PageState::Failed { message, retryable } => PageState::Failed { message, retryable },
        }
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&T> {
        match self {
            PageState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

fn not_found<T>(kind: ContentKind) -> PageState<T> {
    let (message, back_label) = match kind {
        ContentKind::Blog => ("Article not found", "Back to Blog"),
        ContentKind::Event => ("Event not found", "Back to Events"),
    };
    PageState::NotFound {
        message: message.to_string(),
        back_path: kind.collection_path().to_string(),
        back_label: back_label.to_string(),
    }
}

fn failed<T>(error: &ApiError) -> PageState<T> {
    warn!(%error, "content fetch failed");
    PageState::Failed {
        message: error.user_message().to_string(),
        retryable: true,
    }
}

// ============================================================================
// Blog
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogCardView {
    pub title: String,
    pub path: String,
    pub excerpt: String,
    pub date_label: Option<String>,
    pub read_time_label: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

impl BlogCardView {
    #[must_use]
    pub fn new(blog: &Blog, words_per_minute: usize) -> Self {
        let content = blog.content.as_deref().unwrap_or_default();
        let excerpt = match blog.excerpt.as_deref() {
            Some(excerpt) if !excerpt.trim().is_empty() => {
                truncate_plain_text(excerpt, BLOG_EXCERPT_CHARS)
            }
            _ => truncate_plain_text(content, BLOG_EXCERPT_CHARS),
        };

        Self {
            title: blog.title.clone(),
            path: Route::BlogDetail(blog.slug.clone()).path(),
            excerpt,
            date_label: blog.display_date().and_then(format_long_date),
            read_time_label: read_time_label(read_time_minutes(content, words_per_minute)),
            image_url: blog.image_url.clone(),
            tags: blog.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogDetailView {
    pub title: String,
    pub tags: Vec<String>,
    /// "By {author}"
    pub byline: Option<String>,
    pub date_label: Option<String>,
    pub read_time_label: String,
    pub image_url: Option<String>,
    /// Body after responsive normalization
    pub content_html: String,
    pub resource_links: Vec<ResourceLink>,
    pub back_path: String,
}

impl BlogDetailView {
    #[must_use]
    pub fn new(blog: &Blog, normalizer: &ContentNormalizer, words_per_minute: usize) -> Self {
        let content = blog.content.as_deref().unwrap_or_default();
        Self {
            title: blog.title.clone(),
            tags: blog.tags.clone(),
            byline: blog
                .author
                .as_deref()
                .filter(|author| !author.trim().is_empty())
                .map(|author| format!("By {author}")),
            date_label: blog.display_date().and_then(format_long_date),
            read_time_label: read_time_label(read_time_minutes(content, words_per_minute)),
            image_url: blog.image_url.clone(),
            content_html: normalizer.normalize(content),
            resource_links: blog.resource_links.clone(),
            back_path: ContentKind::Blog.collection_path().to_string(),
        }
    }
}

/// Home page: hero plus the two latest posts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_label: String,
    pub cta_path: String,
    pub latest_blogs: Vec<BlogCardView>,
}

impl HomeView {
    #[must_use]
    pub fn new(blogs: &[Blog], words_per_minute: usize) -> Self {
        Self {
            hero_title: HOME_TITLE.to_string(),
            hero_subtitle: HOME_SUBTITLE.to_string(),
            cta_label: "Join Our Community".to_string(),
            cta_path: Route::Forum.path(),
            latest_blogs: blogs
                .iter()
                .take(HOME_LATEST_BLOGS)
                .map(|blog| BlogCardView::new(blog, words_per_minute))
                .collect(),
        }
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCardView {
    pub title: String,
    pub path: String,
    /// Day of month and short month for the date badge
    pub day: Option<u32>,
    pub month: Option<String>,
    pub status: EventStatus,
    pub status_label: String,
    pub description: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub venue_details: Option<String>,
    pub registration_deadline_label: Option<String>,
    /// External payment page, only while registration is open
    pub payment_link: Option<String>,
    /// "Registration Available" or "More Details"
    pub availability_label: String,
    /// "Register" or "View Details"
    pub action_label: String,
}

impl EventCardView {
    #[must_use]
    pub fn new(event: &Event, now: DateTime<Utc>) -> Self {
        let status = EventStatus::for_event(event, now);
        let (day, month) = match event.event_date.as_deref().and_then(format_day_month) {
            Some((day, month)) => (Some(day), Some(month)),
            None => (None, None),
        };

        Self {
            title: event.title.clone(),
            path: Route::EventDetail(event.slug.clone()).path(),
            day,
            month,
            status,
            status_label: status.label().to_string(),
            description: event
                .description
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(|text| truncate_plain_text(text, EVENT_EXCERPT_CHARS)),
            time: event.event_time.clone(),
            location: event.location.clone(),
            venue_details: event.venue_details().map(str::to_string),
            registration_deadline_label: registration_deadline_label(event),
            payment_link: payment_link(event, status),
            availability_label: if event.registration_target().is_some() {
                "Registration Available".to_string()
            } else {
                "More Details".to_string()
            },
            action_label: if status.can_register() {
                "Register".to_string()
            } else {
                "View Details".to_string()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetailView {
    pub title: String,
    pub status: EventStatus,
    pub status_label: String,
    pub can_register: bool,
    pub date_label: Option<String>,
    pub time_label: Option<String>,
    pub location: Option<String>,
    pub venue_details: Option<String>,
    /// "June 30, 2025 at 6:00 PM"
    pub registration_deadline_label: Option<String>,
    /// External payment page, only while registration is open
    pub payment_link: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    /// Body after responsive normalization
    pub content_html: Option<String>,
    pub registration_target: Option<String>,
    /// Shown when the register button has nowhere to go
    pub registration_notice: Option<String>,
    pub back_path: String,
}

impl EventDetailView {
    #[must_use]
    pub fn new(event: &Event, normalizer: &ContentNormalizer, now: DateTime<Utc>) -> Self {
        let status = EventStatus::for_event(event, now);
        let registration_target = event.registration_target().map(str::to_string);

        Self {
            title: event.title.clone(),
            status,
            status_label: status.detail_label().to_string(),
            can_register: status.can_register(),
            date_label: event.event_date.as_deref().and_then(format_long_date),
            time_label: event.event_time.as_deref().and_then(format_time_12h),
            location: event.location.clone(),
            venue_details: event.venue_details().map(str::to_string),
            registration_deadline_label: registration_deadline_label(event),
            payment_link: payment_link(event, status),
            image_url: event.image_url.clone(),
            description: event.description.clone(),
            content_html: event
                .content
                .as_deref()
                .filter(|content| !content.trim().is_empty())
                .map(|content| normalizer.normalize(content)),
            registration_notice: registration_target
                .is_none()
                .then(|| REGISTRATION_PENDING_NOTICE.to_string()),
            registration_target,
            back_path: ContentKind::Event.collection_path().to_string(),
        }
    }
}

/// Booking deadline date, with the cut-off time when one is given
fn registration_deadline_label(event: &Event) -> Option<String> {
    let date = format_long_date(event.booking_end_date.as_deref()?)?;
    match event.booking_end_time.as_deref().and_then(format_time_12h) {
        Some(time) => Some(format!("{date} at {time}")),
        None => Some(date),
    }
}

fn payment_link(event: &Event, status: EventStatus) -> Option<String> {
    status
        .can_register()
        .then(|| event.payment_link())
        .flatten()
        .map(str::to_string)
}

/// Events page: featured event, remaining upcoming events, recent past events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventsOverview {
    pub featured: Option<EventCardView>,
    pub upcoming: Vec<EventCardView>,
    pub past: Vec<EventCardView>,
}

impl EventsOverview {
    #[must_use]
    pub fn new(events: Vec<Event>, now: DateTime<Utc>) -> Self {
        let schedule = EventSchedule::partition(events, now);
        let card = |event: &Event| EventCardView::new(event, now);

        Self {
            featured: schedule.featured.as_ref().map(card),
            upcoming: schedule.upcoming.iter().map(card).collect(),
            past: schedule.past.iter().map(card).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn blog(json: serde_json::Value) -> Blog {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_not_found_state_points_back_to_collection() {
        let state: PageState<Blog> =
            PageState::from_result(Err(ApiError::not_found(ContentKind::Blog, "x")), ContentKind::Blog);
        assert_eq!(
            state,
            PageState::NotFound {
                message: "Article not found".into(),
                back_path: "/blog".into(),
                back_label: "Back to Blog".into(),
            }
        );
    }

    #[test]
    fn test_failed_state_is_generic_and_retryable() {
        let state: PageState<Vec<Event>> = PageState::from_result(
            Err(ApiError::Status {
                status: 502,
                url: "http://api/events".into(),
            }),
            ContentKind::Event,
        );
        match state {
            PageState::Failed { message, retryable } => {
                assert_eq!(message, crate::api::GENERIC_FETCH_MESSAGE);
                assert!(retryable);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_blog_detail_view() {
        let blog = blog(serde_json::json!({
            "title": "Reading Balance Sheets",
            "slug": "reading-balance-sheets",
            "author": "Priya",
            "published_date": "2025-02-03",
            "content": "<p>Assets equal liabilities plus equity.</p><img src=\"a.png\" width=\"800\">",
            "tags": ["basics"]
        }));
        let view = BlogDetailView::new(&blog, &ContentNormalizer::default(), 200);
        assert_eq!(view.byline.as_deref(), Some("By Priya"));
        assert_eq!(view.date_label.as_deref(), Some("February 3, 2025"));
        assert_eq!(view.read_time_label, "1 min read");
        assert!(view.content_html.contains("<img src=\"a.png\">"));
        assert_eq!(view.back_path, "/blog");
    }

    #[test]
    fn test_home_takes_two_latest() {
        let blogs: Vec<Blog> = (0..5)
            .map(|i| blog(serde_json::json!({"title": format!("Post {i}"), "slug": format!("post-{i}")})))
            .collect();
        let home = HomeView::new(&blogs, 200);
        assert_eq!(home.latest_blogs.len(), 2);
        assert_eq!(home.latest_blogs[1].path, "/blog/post-1");
        assert_eq!(home.cta_path, "/forum");
    }

    #[test]
    fn test_event_views() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let event: Event = serde_json::from_value(serde_json::json!({
            "title": "Annual Meet",
            "slug": "annual-meet",
            "event_date": "2025-07-12",
            "event_time": "18:30",
            "location": "Cyber City"
        }))
        .unwrap();

        let card = EventCardView::new(&event, now);
        assert_eq!(card.day, Some(12));
        assert_eq!(card.month.as_deref(), Some("Jul"));
        assert_eq!(card.action_label, "Register");
        assert_eq!(card.availability_label, "More Details");

        let detail = EventDetailView::new(&event, &ContentNormalizer::default(), now);
        assert_eq!(detail.time_label.as_deref(), Some("6:30 PM"));
        assert_eq!(detail.status_label, "Registration Open");
        assert_eq!(
            detail.registration_notice.as_deref(),
            Some(REGISTRATION_PENDING_NOTICE)
        );
        assert_eq!(detail.venue_details, None);
        assert_eq!(detail.registration_deadline_label, None);
        assert_eq!(detail.payment_link, None);

        let paid: Event = serde_json::from_value(serde_json::json!({
            "title": "Annual Meet",
            "slug": "annual-meet",
            "event_date": "2025-07-12",
            "booking_end_date": "2025-06-30",
            "booking_end_time": "18:00:00",
            "venue_details": "Hall B, parking at gate 3",
            "external_payment_link": "https://pay.example.com/meet"
        }))
        .unwrap();

        let card = EventCardView::new(&paid, now);
        assert_eq!(card.venue_details.as_deref(), Some("Hall B, parking at gate 3"));
        assert_eq!(
            card.registration_deadline_label.as_deref(),
            Some("June 30, 2025 at 6:00 PM")
        );
        assert_eq!(card.payment_link.as_deref(), Some("https://pay.example.com/meet"));

        let detail = EventDetailView::new(&paid, &ContentNormalizer::default(), now);
        assert_eq!(detail.venue_details.as_deref(), Some("Hall B, parking at gate 3"));
        assert_eq!(
            detail.registration_deadline_label.as_deref(),
            Some("June 30, 2025 at 6:00 PM")
        );
        assert_eq!(detail.payment_link.as_deref(), Some("https://pay.example.com/meet"));
    }

    #[test]
    fn test_payment_link_hidden_once_registration_closes() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let event: Event = serde_json::from_value(serde_json::json!({
            "title": "Annual Meet",
            "slug": "annual-meet",
            "event_date": "2025-07-12",
            "booking_end_date": "2025-06-30",
            "venue_details": "  ",
            "external_payment_link": "https://pay.example.com/meet"
        }))
        .unwrap();

        let detail = EventDetailView::new(&event, &ContentNormalizer::default(), now);
        assert_eq!(detail.status, EventStatus::RegistrationClosed);
        assert_eq!(detail.payment_link, None);
        assert_eq!(detail.venue_details, None);
        assert_eq!(
            detail.registration_deadline_label.as_deref(),
            Some("June 30, 2025")
        );
    }
}
