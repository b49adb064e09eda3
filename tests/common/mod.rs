//! Test utilities and helper functions for the gic_site test suite

use gic_site::api::ApiClient;
use gic_site::config::SiteConfig;
use mockito::{Mock, Server, ServerGuard};

/// Builds a `<table>` with a header row and the given data rows
#[allow(dead_code)]
pub fn create_table(headers: &[&str], rows: &[&[&str]]) -> String {
    let mut html = String::from("<table>\n<thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in *row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Wraps a fragment between two paragraphs, the way editor bodies look
#[allow(dead_code)]
pub fn create_article_body(inner: &str) -> String {
    format!("<p>Intro paragraph.</p>\n{inner}\n<p>Closing paragraph.</p>")
}

/// Counts non-overlapping occurrences of `needle`
#[allow(dead_code)]
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Sets up a mock HTTP server
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    Server::new_async().await
}

/// Creates a mock endpoint that returns JSON
#[allow(dead_code)]
pub async fn create_json_mock(server: &mut Server, path: &str, body: &serde_json::Value) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error status
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Site configuration pointed at a mock server
#[allow(dead_code)]
pub fn create_test_config(server: &Server) -> SiteConfig {
    SiteConfig::builder()
        .api_base_url(format!("{}/api", server.url()))
        .request_timeout_secs(5)
        .build()
        .expect("Failed to create test config")
}

/// API client talking to a mock server
#[allow(dead_code)]
pub fn create_test_client(server: &Server) -> ApiClient {
    ApiClient::new(&create_test_config(server)).expect("Failed to create test client")
}

/// A blog record as the API returns it
#[allow(dead_code)]
pub fn blog_json(slug: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": format!("id-{slug}"),
        "title": title,
        "slug": slug,
        "content": "<p>Body text for the article.</p>",
        "author": "Research Desk",
        "tags": ["markets"],
        "published_date": "2024-03-15T10:00:00Z"
    })
}

/// An event record as the API returns it
#[allow(dead_code)]
pub fn event_json(slug: &str, title: &str, event_date: &str) -> serde_json::Value {
    serde_json::json!({
        "id": format!("id-{slug}"),
        "title": title,
        "slug": slug,
        "description": "Members meet to discuss the quarter.",
        "event_date": event_date,
        "location": "Gurugram"
    })
}

/// Waits for a condition to be true with timeout
#[allow(dead_code)]
pub async fn wait_for_condition<F, Fut>(mut check: F, timeout_secs: u64) -> anyhow::Result<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_secs(timeout_secs);

    while start.elapsed() < timeout {
        if check().await {
            return Ok(());
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    Err(anyhow::anyhow!("Timeout waiting for condition"))
}
