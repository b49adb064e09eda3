//! Newsletter signup
//!
//! The signup endpoint is a form-post target whose response cannot be read
//! reliably, so a submission that reached the network counts as dispatched
//! whatever status came back. Only transport failures surface as errors.

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::utils::{NEWSLETTER_BANNER_SECS, USER_AGENT};

pub const SUBSCRIBE_SUCCESS_MESSAGE: &str = "Thank you for subscribing!";
pub const SUBSCRIBE_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Newsletter signup is not configured")]
    NotConfigured,

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Subscription request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl NewsletterError {
    /// Whether resubmitting the same address could succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result of a submission that made it onto the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Dispatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient message shown under the signup form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterBanner {
    pub kind: BannerKind,
    pub message: String,
    pub dismiss_after_secs: u64,
}

impl NewsletterBanner {
    #[must_use]
    pub fn from_result(result: &Result<SubmissionOutcome, NewsletterError>) -> Self {
        let (kind, message) = match result {
            Ok(SubmissionOutcome::Dispatched) => {
                (BannerKind::Success, SUBSCRIBE_SUCCESS_MESSAGE.to_string())
            }
            Err(NewsletterError::InvalidEmail) => {
                (BannerKind::Error, NewsletterError::InvalidEmail.to_string())
            }
            Err(_) => (BannerKind::Error, SUBSCRIBE_FAILURE_MESSAGE.to_string()),
        };
        Self {
            kind,
            message,
            dismiss_after_secs: NEWSLETTER_BANNER_SECS,
        }
    }
}

/// Loose shape check: one `@`, non-empty local part, dotted domain, no spaces
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Debug, Serialize)]
struct SignupForm<'a> {
    email: &'a str,
    subscribed_at: String,
}

#[derive(Debug, Clone)]
pub struct NewsletterClient {
    http: Client,
    endpoint: Option<String>,
}

impl NewsletterClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &SiteConfig) -> Result<Self, NewsletterError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(NewsletterError::ClientBuild)?;
        Ok(Self::with_client(
            http,
            config.newsletter_endpoint().map(str::to_string),
        ))
    }

    #[must_use]
    pub fn with_client(http: Client, endpoint: Option<String>) -> Self {
        Self { http, endpoint }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Submit `email` to the signup endpoint
    ///
    /// # Errors
    ///
    /// - [`NewsletterError::InvalidEmail`] before any request is made
    /// - [`NewsletterError::NotConfigured`] when no endpoint is set
    /// - [`NewsletterError::Transport`] when the request never completed
    pub async fn subscribe(&self, email: &str) -> Result<SubmissionOutcome, NewsletterError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(NewsletterError::InvalidEmail);
        }
        let Some(endpoint) = &self.endpoint else {
            warn!("newsletter signup attempted without an endpoint");
            return Err(NewsletterError::NotConfigured);
        };

        let form = SignupForm {
            email,
            subscribed_at: Utc::now().to_rfc3339(),
        };
        let response = self.http.post(endpoint).form(&form).send().await?;

        // Status is not meaningful for this endpoint
        debug!(status = %response.status(), "newsletter endpoint responded");
        info!("newsletter signup dispatched");
        Ok(SubmissionOutcome::Dispatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("member@gic.community"));
        assert!(is_valid_email("  first.last+news@mail.example.org "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@.example"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_endpoint_check() {
        let client = NewsletterClient::with_client(Client::new(), None);
        let err = client.subscribe("nope").await.unwrap_err();
        assert!(matches!(err, NewsletterError::InvalidEmail));
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let client = NewsletterClient::with_client(Client::new(), None);
        let err = client.subscribe("member@gic.community").await.unwrap_err();
        assert!(matches!(err, NewsletterError::NotConfigured));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_banner_messages() {
        let ok = NewsletterBanner::from_result(&Ok(SubmissionOutcome::Dispatched));
        assert_eq!(ok.kind, BannerKind::Success);
        assert_eq!(ok.message, SUBSCRIBE_SUCCESS_MESSAGE);
        assert_eq!(ok.dismiss_after_secs, 5);

        let invalid = NewsletterBanner::from_result(&Err(NewsletterError::InvalidEmail));
        assert_eq!(invalid.kind, BannerKind::Error);
        assert_eq!(invalid.message, "Please enter a valid email address");

        let unconfigured = NewsletterBanner::from_result(&Err(NewsletterError::NotConfigured));
        assert_eq!(unconfigured.message, SUBSCRIBE_FAILURE_MESSAGE);
    }
}
