//! Page-view and interaction analytics
//!
//! Hits are fire-and-forget: [`Analytics`] hands each one to an
//! [`AnalyticsSink`] and never reports failure back to the caller. Without a
//! tracking id every call is a no-op. Sinks that deliver in the background
//! keep their in-flight work until [`Analytics::flush`] awaits it, so a
//! short-lived process can drain hits before its runtime shuts down.

use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::routes::Route;
use crate::utils::USER_AGENT;

/// A discrete interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub category: String,
    pub label: String,
    pub value: i64,
}

/// `"{first} - {second}"`, or just `first` when `second` is empty
fn join_label(first: &str, second: &str) -> String {
    if second.is_empty() {
        first.to_string()
    } else {
        format!("{first} - {second}")
    }
}

impl AnalyticsEvent {
    pub fn new(
        action: impl Into<String>,
        category: impl Into<String>,
        label: impl Into<String>,
        value: i64,
    ) -> Self {
        Self {
            action: action.into(),
            category: category.into(),
            label: label.into(),
            value,
        }
    }

    #[must_use]
    pub fn button_click(button: &str, location: &str) -> Self {
        Self::new("click", "button", join_label(button, location), 1)
    }

    #[must_use]
    pub fn link_click(url: &str, text: &str) -> Self {
        Self::new("click", "link", format!("{text} - {url}"), 1)
    }

    /// A blog post or event detail being viewed
    #[must_use]
    pub fn content_view(content_type: &str, title: &str, id: &str) -> Self {
        Self::new("view_content", content_type, join_label(title, id), 1)
    }
}

/// Anything sent to the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyticsHit {
    PageView { path: String, title: String },
    Event(AnalyticsEvent),
}

/// Destination for analytics hits
///
/// Implementations must not block and must swallow their own failures.
pub trait AnalyticsSink: Send + Sync {
    fn deliver(&self, tracking_id: &str, hit: AnalyticsHit);

    /// Hand over deliveries still in flight
    fn take_pending(&self) -> Vec<JoinHandle<()>> {
        Vec::new()
    }
}

/// Writes hits to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn deliver(&self, tracking_id: &str, hit: AnalyticsHit) {
        info!(tracking_id, ?hit, "analytics hit");
    }
}

#[derive(Debug, Serialize)]
struct CollectorPayload<'a> {
    tracking_id: &'a str,
    #[serde(flatten)]
    hit: &'a AnalyticsHit,
}

/// POSTs hits as JSON to a collector endpoint on the current tokio runtime
#[derive(Debug, Clone)]
pub struct HttpCollectorSink {
    http: Client,
    collector_url: String,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl HttpCollectorSink {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(collector_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            collector_url: collector_url.into(),
            pending: Arc::default(),
        })
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalyticsSink for HttpCollectorSink {
    fn deliver(&self, tracking_id: &str, hit: AnalyticsHit) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, analytics hit dropped");
            return;
        };

        let request = self
            .http
            .post(&self.collector_url)
            .json(&CollectorPayload {
                tracking_id,
                hit: &hit,
            });

        let handle = runtime.spawn(async move {
            match request.send().await {
                Ok(response) => debug!(status = %response.status(), "analytics hit sent"),
                Err(error) => debug!(%error, "analytics hit not delivered"),
            }
        });

        let mut pending = self.pending();
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }

    fn take_pending(&self) -> Vec<JoinHandle<()>> {
        std::mem::take(&mut *self.pending())
    }
}

/// Analytics front end used by pages
#[derive(Clone)]
pub struct Analytics {
    tracking_id: Option<String>,
    sink: Arc<dyn AnalyticsSink>,
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("tracking_id", &self.tracking_id)
            .finish_non_exhaustive()
    }
}

impl Analytics {
    pub fn new(tracking_id: Option<String>, sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            tracking_id: tracking_id.filter(|id| !id.trim().is_empty()),
            sink,
        }
    }

    /// Analytics that drops everything
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, Arc::new(TracingSink))
    }

    /// Collector sink when a collector URL is configured, log sink otherwise
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        let tracking_id = config.analytics_tracking_id().map(str::to_string);
        let sink: Arc<dyn AnalyticsSink> = match config.analytics_collector_url() {
            Some(url) => match HttpCollectorSink::new(url, config.request_timeout()) {
                Ok(sink) => Arc::new(sink),
                Err(error) => {
                    warn!(%error, "analytics collector unavailable, logging hits instead");
                    Arc::new(TracingSink)
                }
            },
            None => Arc::new(TracingSink),
        };
        Self::new(tracking_id, sink)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.tracking_id.is_some()
    }

    /// Wait up to `timeout` for in-flight hits to finish
    ///
    /// Hits still pending at the deadline are abandoned with a warning.
    pub async fn flush(&self, timeout: Duration) {
        let pending = self.sink.take_pending();
        if pending.is_empty() {
            return;
        }

        let count = pending.len();
        let drain = async {
            for handle in pending {
                if let Err(error) = handle.await {
                    debug!(%error, "analytics delivery task failed");
                }
            }
        };
        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => debug!(count, "analytics hits flushed"),
            Err(_) => warn!(count, ?timeout, "analytics flush timed out"),
        }
    }

    fn send(&self, hit: AnalyticsHit) {
        if let Some(tracking_id) = &self.tracking_id {
            self.sink.deliver(tracking_id, hit);
        }
    }

    pub fn track_page_view(&self, path: &str, title: &str) {
        self.send(AnalyticsHit::PageView {
            path: path.to_string(),
            title: title.to_string(),
        });
    }

    pub fn track_route(&self, route: &Route) {
        self.track_page_view(&route.path(), route.title());
    }

    pub fn track_event(&self, event: AnalyticsEvent) {
        self.send(AnalyticsHit::Event(event));
    }

    pub fn track_button_click(&self, button: &str, location: &str) {
        self.track_event(AnalyticsEvent::button_click(button, location));
    }

    pub fn track_link_click(&self, url: &str, text: &str) {
        self.track_event(AnalyticsEvent::link_click(url, text));
    }

    pub fn track_content_view(&self, content_type: &str, title: &str, id: &str) {
        self.track_event(AnalyticsEvent::content_view(content_type, title, id));
    }
}
