use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trendline::chat::{ChatResponder, EMPTY_MESSAGE_PROMPT};
use trendline::error::FetchError;
use trendline::news::{NewsClient, SortBy};

fn ok_body(titles: &[&str]) -> serde_json::Value {
    json!({
        "status": "ok",
        "totalResults": titles.len(),
        "articles": titles.iter().map(|t| json!({
            "source": {"id": null, "name": "Example Wire"},
            "author": null,
            "title": t,
            "description": format!("{t} in some detail"),
            "url": format!("https://example.com/{}", t.replace(' ', "-")),
            "urlToImage": null,
            "publishedAt": "2024-01-15T10:00:00Z",
            "content": null
        })).collect::<Vec<_>>()
    })
}

fn responder_for(server: &MockServer) -> ChatResponder {
    ChatResponder::new(NewsClient::new(server.uri(), "test-key"), 10)
}

#[tokio::test]
async fn trending_message_renders_numbered_entries_and_closing_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_body(&["Alpha", "Beta", "Gamma"])),
        )
        .mount(&server)
        .await;

    let reply = responder_for(&server).respond("What's trending today?").await;

    assert!(reply.contains("Trending News"));
    assert!(reply.contains("**1. Alpha**"));
    assert!(reply.contains("**2. Beta**"));
    assert!(reply.contains("**3. Gamma**"));
    assert!(!reply.contains("**4."));
    assert!(reply.contains("Try asking about specific topics"));
}

#[tokio::test]
async fn empty_message_issues_no_network_call() {
    let server = MockServer::start().await;
    let responder = responder_for(&server);

    assert_eq!(responder.respond("").await, EMPTY_MESSAGE_PROMPT);
    assert_eq!(responder.respond("   \n").await, EMPTY_MESSAGE_PROMPT);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn greeting_issues_no_network_call() {
    let server = MockServer::start().await;
    let reply = responder_for(&server).respond("hello there").await;

    assert!(reply.contains("Welcome to TrendLine News Chat"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthorized_key_surfaces_readable_hint_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let reply = responder_for(&server).respond("any trending stories?").await;

    assert!(reply.contains("API Connection Issue"));
    assert!(reply.contains("invalid or expired"));
}

#[tokio::test]
async fn search_with_no_results_suggests_alternatives() {
    let server = MockServer::start().await;
    // Probe succeeds, the actual search comes back empty.
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["Probe article"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&[])))
        .mount(&server)
        .await;

    let reply = responder_for(&server).respond("tell me about eclipses").await;

    assert!(reply.contains("couldn't find any news about 'eclipses'"));
    assert!(reply.contains("Trending news"));
    assert!(reply.contains("Sports updates"));
}

#[tokio::test]
async fn removed_articles_are_filtered_from_replies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_body(&["[Removed]", "Real story"])),
        )
        .mount(&server)
        .await;

    let reply = responder_for(&server).respond("what's trending").await;

    assert!(reply.contains("**1. Real story**"));
    assert!(!reply.contains("Removed"));
}

#[tokio::test]
async fn recent_message_uses_top_headlines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["Fresh story"])))
        .mount(&server)
        .await;

    let reply = responder_for(&server).respond("latest headlines please").await;

    assert!(reply.contains("Latest News"));
    assert!(reply.contains("**1. Fresh story**"));
}

#[tokio::test]
async fn rejected_request_classifies_as_api_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "code": "parametersMissing",
            "message": "Required parameters are missing."
        })))
        .mount(&server)
        .await;

    let client = NewsClient::new(server.uri(), "test-key");
    let err = client
        .search_everything("anything", None, None, SortBy::Relevancy, 5)
        .await
        .unwrap_err();

    match err {
        FetchError::ApiRejected(msg) => assert!(msg.contains("missing")),
        other => panic!("expected ApiRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn http_status_codes_map_to_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = NewsClient::new(server.uri(), "test-key");

    let err = client.top_headlines(Some("us"), None, 5).await.unwrap_err();
    assert!(matches!(err, FetchError::RateLimited));

    let err = client
        .search_everything("q", None, None, SortBy::PublishedAt, 5)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::UnexpectedStatus(500)));
}

#[tokio::test]
async fn unreachable_host_classifies_as_connection_failed() {
    // Nothing listens on the discard port, so the connect itself fails.
    let client = NewsClient::new("http://127.0.0.1:9", "test-key");

    let err = client.top_headlines(Some("us"), None, 5).await.unwrap_err();
    assert!(matches!(err, FetchError::ConnectionFailed));
}

#[tokio::test]
async fn slow_upstream_classifies_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(ok_body(&["Too late"])),
        )
        .mount(&server)
        .await;

    let client = NewsClient::with_timeout(server.uri(), "test-key", Duration::from_millis(250));

    let err = client.top_headlines(Some("us"), None, 5).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout));
}

#[tokio::test]
async fn category_fallback_kicks_in_when_headlines_are_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&[])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["Transfer window drama"])))
        .mount(&server)
        .await;

    let reply = responder_for(&server).respond("football updates please").await;

    assert!(reply.contains("Sports News"));
    assert!(reply.contains("**1. Transfer window drama**"));
}
