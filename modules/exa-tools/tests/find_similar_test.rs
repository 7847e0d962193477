//! End-to-end tests for the Exa tools, driven through the JSON tool boundary.

use std::sync::Arc;

use ai_client::{Tool, ToolCallError, ToolSet};
use exa_client::{ErrorKind, ExaClient, ExaConfig, ExaError, HighlightsOptions};
use exa_tools::{exa_toolset, FindSimilarArgs, FindSimilarTool, SimilarResults};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEED: &str = "https://boutiquejapan.com/when-is-the-best-time-of-year-to-visit-japan/";
const FIND_SIMILAR: &str = "exa_find_similar_results_json";

fn client_for(server: &MockServer) -> Arc<ExaClient> {
    Arc::new(ExaClient::new(ExaConfig::new("test-key").with_base_url(&server.uri())).unwrap())
}

fn similar_pages(n: usize) -> serde_json::Value {
    let results: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "id": format!("https://www.japan-guide.com/e/e{i}.html"),
                "url": format!("https://www.japan-guide.com/e/e{i}.html"),
                "title": "When to visit Japan",
                "score": 0.88,
                "text": "Cherry blossoms bloom in late March and early April."
            })
        })
        .collect();
    json!({ "requestId": "req-1", "results": results })
}

async fn mount_similar(server: &MockServer, n: usize) {
    Mock::given(method("POST"))
        .and(path("/findSimilar"))
        .and(body_partial_json(json!({ "url": SEED, "numResults": n })))
        .respond_with(ResponseTemplate::new(200).set_body_json(similar_pages(n)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn seed_url_yields_structured_records() {
    let server = MockServer::start().await;
    mount_similar(&server, 5).await;

    let tools = exa_toolset(client_for(&server));
    let value = tools
        .invoke(FIND_SIMILAR, json!({ "url": SEED, "num_results": 5 }))
        .await
        .unwrap();

    assert!(!value.is_string());
    let results: SimilarResults = serde_json::from_value(value).unwrap();
    assert_eq!(results.seed_url, SEED);
    assert_eq!(results.results.len(), 5);
    assert!(results.results.iter().all(|r| r.url.starts_with("https://")));
}

#[tokio::test]
async fn typed_call_returns_records() {
    let server = MockServer::start().await;
    mount_similar(&server, 5).await;

    let tool = FindSimilarTool::new(client_for(&server));
    let results = tool.call(FindSimilarArgs::new(SEED, 5)).await.unwrap();
    assert_eq!(results.request_id.as_deref(), Some("req-1"));
    assert_eq!(results.results[0].score, Some(0.88));
}

#[tokio::test]
async fn repeated_calls_return_same_size() {
    let server = MockServer::start().await;
    mount_similar(&server, 5).await;

    let tool = FindSimilarTool::new(client_for(&server));
    let first = tool.call(FindSimilarArgs::new(SEED, 5)).await.unwrap();
    let second = tool.call(FindSimilarArgs::new(SEED, 5)).await.unwrap();
    assert_eq!(first.results.len(), second.results.len());
}

#[tokio::test]
async fn highlights_option_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findSimilar"))
        .and(body_partial_json(json!({ "contents": { "highlights": { "numSentences": 2 } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(similar_pages(2)))
        .expect(1)
        .mount(&server)
        .await;

    let tool = FindSimilarTool::new(client_for(&server)).with_highlights(HighlightsOptions {
        num_sentences: Some(2),
        ..Default::default()
    });
    let results = tool.call(FindSimilarArgs::new(SEED, 2)).await.unwrap();
    assert_eq!(results.results.len(), 2);
}

#[tokio::test]
async fn long_text_is_clipped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findSimilar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "url": "https://example.com", "text": "x".repeat(100) }]
        })))
        .mount(&server)
        .await;

    let tool = FindSimilarTool::new(client_for(&server)).with_max_text_bytes(10);
    let results = tool.call(FindSimilarArgs::new(SEED, 1)).await.unwrap();
    assert_eq!(results.results[0].text.as_deref(), Some("xxxxxxxxxx..."));
}

#[tokio::test]
async fn remote_failure_is_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findSimilar"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = exa_toolset(client_for(&server))
        .invoke(FIND_SIMILAR, json!({ "url": SEED, "num_results": 5 }))
        .await
        .unwrap_err();

    let exa = err.source_as::<ExaError>().expect("ExaError source");
    assert_eq!(exa.kind(), ErrorKind::Auth);
}

#[tokio::test]
async fn rate_limit_is_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findSimilar"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = FindSimilarTool::new(client_for(&server))
        .call(FindSimilarArgs::new(SEED, 5))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn bad_mappings_never_reach_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(similar_pages(1)))
        .expect(0)
        .mount(&server)
        .await;

    let tools = exa_toolset(client_for(&server));

    for args in [json!({ "url": SEED, "num_results": -3 }), json!({ "num_results": 5 })] {
        let err = tools.invoke(FIND_SIMILAR, args).await.unwrap_err();
        assert!(matches!(err, ToolCallError::InvalidArgs { .. }));
    }

    for args in [
        json!({ "url": SEED, "num_results": 0 }),
        json!({ "url": SEED, "num_results": 500 }),
        json!({ "url": "", "num_results": 5 }),
        json!({ "url": "not a url", "num_results": 5 }),
    ] {
        let err = tools.invoke(FIND_SIMILAR, args).await.unwrap_err();
        let exa = err.source_as::<ExaError>().expect("ExaError source");
        assert_eq!(exa.kind(), ErrorKind::InvalidParameter);
    }
}

#[tokio::test]
async fn search_tool_is_registered_alongside() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({ "query": "japan travel seasons", "numResults": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(similar_pages(3)))
        .mount(&server)
        .await;

    let tools: ToolSet = exa_toolset(client_for(&server));
    let names: Vec<_> = tools.names().collect();
    assert!(names.contains(&FIND_SIMILAR));
    assert!(names.contains(&"exa_search_results_json"));

    let value = tools
        .invoke(
            "exa_search_results_json",
            json!({ "query": "japan travel seasons", "num_results": 3 }),
        )
        .await
        .unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), 3);
    assert_eq!(value["query"], "japan travel seasons");
}

#[tokio::test]
#[tracing_test::traced_test]
async fn failed_call_is_logged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findSimilar"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let _ = exa_toolset(client_for(&server))
        .invoke(FIND_SIMILAR, json!({ "url": SEED, "num_results": 5 }))
        .await;

    assert!(logs_contain("Tool call failed"));
}

#[tokio::test]
#[ignore] // requires live EXA_API_KEY
async fn live_find_similar() {
    let tool = FindSimilarTool::from_config(ExaConfig::from_env().unwrap()).unwrap();
    let results = tool.call(FindSimilarArgs::new(SEED, 5)).await.unwrap();
    assert!(!results.results.is_empty());
    assert!(results.results.len() <= 5);
}
