// tests/api_http.rs
//
// HTTP smoke tests via tower `oneshot` against the public router, with a
// seeded mock feed so responses are reproducible.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use http::StatusCode;
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use bvmt_sentiment_analyzer::feed::mock::MockProvider;
use bvmt_sentiment_analyzer::{create_router, AppState, SentimentAnalyzer};

fn test_router() -> axum::Router {
    let state = AppState {
        analyzer: Arc::new(SentimentAnalyzer::new()),
        providers: Arc::new(MockProvider::all_seeded(0xB7_2026)),
    };
    create_router(state)
}

async fn get_json(path: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, body) = get_json("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "BVMT Stock Sentiment Analysis API");
    assert!(body["endpoints"]["/analyze"].is_string());
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn analyze_scores_french_text() {
    let (status, body) = post_json(
        "/analyze",
        serde_json::json!({
            "text": "ATB annonce des résultats exceptionnels avec une croissance de 25% \
                     et des profits records. Excellente performance pour la banque.",
            "stock_symbol": "ATB",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "positive");
    assert_eq!(body["language"], "fr");
    assert_eq!(body["method"], "keyword_based");
    let score = body["score"].as_f64().unwrap();
    assert!(score > 0.5 && score <= 1.0);
    assert_eq!(
        body["explanation_detail"]["summary"].as_str(),
        body["explanation"].as_str()
    );
}

#[tokio::test]
async fn analyze_without_symbol_still_works() {
    let (status, body) = post_json(
        "/analyze",
        serde_json::json!({ "text": "Heavy losses and a profit warning for the group." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "en");
    assert!(body["score"].as_f64().unwrap() <= 0.0);
}

#[tokio::test]
async fn stocks_catalog_is_complete() {
    let (status, body) = get_json("/stocks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);
    let symbols: Vec<&str> = body["tunisian_stocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["symbol"].as_str().unwrap())
        .collect();
    assert!(symbols.contains(&"ATB"));
    assert!(symbols.contains(&"TUNTEL"));
}

#[tokio::test]
async fn symbol_report_shape() {
    let (status, body) = get_json("/sentiment/atb").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "ATB");
    let n = body["articles_analyzed"].as_u64().unwrap();
    let d = &body["sentiment_distribution"];
    let sum = d["positive"].as_u64().unwrap()
        + d["negative"].as_u64().unwrap()
        + d["neutral"].as_u64().unwrap();
    assert_eq!(sum, n);
    assert_eq!(body["articles"].as_array().unwrap().len() as u64, n);
}

#[tokio::test]
async fn sentiment_all_covers_universe() {
    let (status, body) = get_json("/sentiment/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stocks_analyzed"], 10);
    assert!(body["results"]["ATB"].is_object());
    assert!(body["results"]["UIB"].is_object());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _) = get_json("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
