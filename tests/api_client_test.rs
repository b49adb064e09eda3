//! Content API client tests against a mock server

use gic_site::api::{ApiError, ContentKind, ListQuery};
use gic_site::pages::{BlogDetailView, EventsOverview};
use gic_site::{ContentNormalizer, PageState};
use mockito::Matcher;
use serde_json::json;

mod common;
use common::{
    blog_json, create_error_mock, create_json_mock, create_test_client, event_json,
    setup_mock_server,
};

#[tokio::test]
async fn test_blog_list_envelope_shapes() {
    let bodies = [
        json!({"data": {"blogs": [blog_json("a", "A"), blog_json("b", "B")]}}),
        json!({"data": [blog_json("a", "A"), blog_json("b", "B")]}),
        json!([blog_json("a", "A"), blog_json("b", "B")]),
    ];

    for body in bodies {
        let mut server = setup_mock_server().await;
        let mock = create_json_mock(&mut server, "/api/blogs", &body).await;
        let client = create_test_client(&server);

        let blogs = client.fetch_blogs(&ListQuery::new()).await.unwrap();
        let slugs: Vec<_> = blogs.iter().map(|blog| blog.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"], "body: {body}");
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_blog_detail_envelope_shapes() {
    let bodies = [
        json!({"data": {"blog": blog_json("q3", "Q3 Review")}}),
        json!({"data": blog_json("q3", "Q3 Review")}),
        blog_json("q3", "Q3 Review"),
    ];

    for body in bodies {
        let mut server = setup_mock_server().await;
        create_json_mock(&mut server, "/api/blogs/q3", &body).await;
        let client = create_test_client(&server);

        let blog = client.fetch_blog("q3").await.unwrap();
        assert_eq!(blog.title, "Q3 Review");
        assert_eq!(blog.author.as_deref(), Some("Research Desk"));
    }
}

#[tokio::test]
async fn test_event_endpoints() {
    let mut server = setup_mock_server().await;
    create_json_mock(
        &mut server,
        "/api/events",
        &json!({"data": {"events": [event_json("agm", "AGM", "2030-01-20")]}}),
    )
    .await;
    create_json_mock(
        &mut server,
        "/api/events/upcoming",
        &json!({"data": [event_json("meetup", "Meetup", "2030-02-01")]}),
    )
    .await;
    create_json_mock(
        &mut server,
        "/api/events/agm",
        &json!({"data": {"event": event_json("agm", "AGM", "2030-01-20")}}),
    )
    .await;
    let client = create_test_client(&server);

    let events = client.fetch_events(&ListQuery::new()).await.unwrap();
    assert_eq!(events[0].slug, "agm");

    let upcoming = client.fetch_upcoming_events().await.unwrap();
    assert_eq!(upcoming[0].title, "Meetup");

    let event = client.fetch_event("agm").await.unwrap();
    assert_eq!(event.location.as_deref(), Some("Gurugram"));
}

#[tokio::test]
async fn test_list_query_is_sent() {
    let mut server = setup_mock_server().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/api/blogs".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "2".into()),
            Matcher::UrlEncoded("tag".into(), "value investing".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([blog_json("a", "A")]).to_string())
        .create_async()
        .await;
    let client = create_test_client(&server);

    let query = ListQuery::new().limit(2).tag("value investing");
    let blogs = client.fetch_blogs(&query).await.unwrap();
    assert_eq!(blogs.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_404_is_not_found() {
    let mut server = setup_mock_server().await;
    create_error_mock(&mut server, "/api/blogs/missing", 404).await;
    let client = create_test_client(&server);

    let error = client.fetch_blog("missing").await.unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "blog not found: missing");
}

#[tokio::test]
async fn test_malformed_slug_never_reaches_server() {
    let mut server = setup_mock_server().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = create_test_client(&server);

    for slug in ["", "   ", "../admin", "a/b", "bad slug!"] {
        let error = client.fetch_event(slug).await.unwrap_err();
        assert!(
            matches!(error, ApiError::NotFound { kind: ContentKind::Event, .. }),
            "slug {slug:?} gave {error:?}"
        );
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_detail_without_payload_is_not_found() {
    let mut server = setup_mock_server().await;
    create_json_mock(&mut server, "/api/blogs/ghost", &json!({"data": null})).await;
    let client = create_test_client(&server);

    let error = client.fetch_blog("ghost").await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_malformed_list_item_does_not_hide_the_rest() {
    let mut server = setup_mock_server().await;
    create_json_mock(
        &mut server,
        "/api/blogs",
        &json!({"data": [
            blog_json("good", "Good"),
            {"title": "No slug yet"},
            {"id": 4.0, "title": "Float id", "slug": "float-id"}
        ]}),
    )
    .await;
    let client = create_test_client(&server);

    let state = PageState::from_result(client.fetch_blogs(&ListQuery::new()).await, ContentKind::Blog);
    let blogs = state.loaded().unwrap();
    let slugs: Vec<_> = blogs.iter().map(|blog| blog.slug.as_str()).collect();
    assert_eq!(slugs, vec!["good", "float-id"]);
    assert_eq!(blogs[1].id.as_ref().unwrap().to_string(), "4");
}

#[tokio::test]
async fn test_list_with_wrong_shape() {
    let mut server = setup_mock_server().await;
    create_json_mock(&mut server, "/api/events", &json!({"data": {"events": {"count": 0}}})).await;
    let client = create_test_client(&server);

    let error = client.fetch_events(&ListQuery::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::UnexpectedShape(_)));
}

#[tokio::test]
async fn test_server_error() {
    let mut server = setup_mock_server().await;
    create_error_mock(&mut server, "/api/blogs", 500).await;
    let client = create_test_client(&server);

    let error = client.fetch_blogs(&ListQuery::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::Status { status: 500, .. }));
    assert!(error.is_transient());
    assert_eq!(error.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_invalid_json() {
    let mut server = setup_mock_server().await;
    server
        .mock("GET", "/api/blogs")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;
    let client = create_test_client(&server);

    let error = client.fetch_blogs(&ListQuery::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::Decode { .. }));
    assert!(!error.is_transient());
}

#[tokio::test]
async fn test_page_states_from_fetches() {
    let mut server = setup_mock_server().await;
    create_error_mock(&mut server, "/api/blogs/gone", 404).await;
    create_error_mock(&mut server, "/api/blogs/broken", 503).await;
    let mut body = blog_json("tables", "Tables");
    body["content"] = json!(
        "<table><tr><th>A</th><th>B</th><th>C</th><th>D</th></tr><tr><td>1</td><td>2</td><td>3</td><td>4</td></tr></table>"
    );
    create_json_mock(&mut server, "/api/blogs/tables", &json!({"data": body})).await;
    let client = create_test_client(&server);
    let normalizer = ContentNormalizer::default();

    let gone = PageState::from_result(client.fetch_blog("gone").await, ContentKind::Blog);
    assert!(matches!(
        gone,
        PageState::NotFound { ref back_path, .. } if back_path == "/blog"
    ));

    let broken = PageState::from_result(client.fetch_blog("broken").await, ContentKind::Blog);
    assert!(matches!(broken, PageState::Failed { retryable: true, .. }));

    let loaded = PageState::from_result(client.fetch_blog("tables").await, ContentKind::Blog)
        .map(|blog| BlogDetailView::new(&blog, &normalizer, 200));
    let view = loaded.loaded().unwrap();
    assert!(view.content_html.contains("hybrid-table"));
}

#[tokio::test]
async fn test_events_overview_from_fetch() {
    let mut server = setup_mock_server().await;
    create_json_mock(
        &mut server,
        "/api/events",
        &json!([
            event_json("old", "Old", "2020-01-01"),
            event_json("next", "Next", "2099-05-01"),
            event_json("later", "Later", "2099-09-01"),
        ]),
    )
    .await;
    let client = create_test_client(&server);

    let events = client.fetch_events(&ListQuery::new()).await.unwrap();
    let overview = EventsOverview::new(events, chrono::Utc::now());
    assert_eq!(overview.featured.as_ref().map(|e| e.title.as_str()), Some("Next"));
    assert_eq!(overview.past.len(), 1);
}
