// src/api.rs
//! HTTP surface: scoring, per-symbol reports, and the stock catalog.
//! Thin handlers only — all decision logic lives in `analyze` and `report`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;

use crate::analyze::{normalize, result::SentimentResult, SentimentAnalyzer};
use crate::feed::types::NewsProvider;
use crate::feed::universe;
use crate::report::{self, SymbolReport};

pub const SERVICE_NAME: &str = "BVMT Stock Sentiment Analysis API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Articles fetched per symbol on `/sentiment/{symbol}`.
const MAX_ARTICLES_PER_SYMBOL: usize = 3;
/// Articles fetched per symbol on `/sentiment/all`.
const MAX_ARTICLES_ALL: usize = 2;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
    pub providers: Arc<Vec<Box<dyn NewsProvider>>>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/stocks", get(list_stocks))
        .route("/sentiment/all", get(sentiment_all))
        .route("/sentiment/{symbol}", get(sentiment_for_symbol))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "endpoints": {
            "/health": "Check API health",
            "/analyze": "Score one text (POST {text, stock_symbol?})",
            "/sentiment/{symbol}": "Get sentiment for one stock",
            "/sentiment/all": "Get sentiment for all stocks",
            "/stocks": "List available stocks",
            "/metrics": "Prometheus metrics",
        }
    }))
}

#[derive(serde::Serialize)]
struct HealthResp {
    status: &'static str,
    timestamp: chrono::DateTime<Utc>,
}

async fn health() -> Json<HealthResp> {
    Json(HealthResp {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    text: String,
    #[serde(default)]
    stock_symbol: Option<String>,
}

#[derive(serde::Serialize)]
struct AnalyzeResp {
    /// Advisory language hint; matching always runs against all lexicons.
    language: &'static str,
    #[serde(flatten)]
    result: SentimentResult,
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Json<AnalyzeResp> {
    metrics::counter!("analyze_requests_total").increment(1);
    let language = normalize::detect_language(&body.text);
    let result = state
        .analyzer
        .analyze(&body.text, body.stock_symbol.as_deref());
    Json(AnalyzeResp { language, result })
}

async fn sentiment_for_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<SymbolReport> {
    let symbol = symbol.to_uppercase();
    let report = report::analyze_symbol(
        &state.analyzer,
        &state.providers,
        &symbol,
        MAX_ARTICLES_PER_SYMBOL,
    )
    .await;
    Json(report)
}

#[derive(serde::Serialize)]
struct AllSentimentsResp {
    timestamp: chrono::DateTime<Utc>,
    stocks_analyzed: usize,
    results: std::collections::BTreeMap<String, SymbolReport>,
}

async fn sentiment_all(State(state): State<AppState>) -> Json<AllSentimentsResp> {
    let symbols = universe::symbols();
    let results = report::analyze_many(
        &state.analyzer,
        &state.providers,
        &symbols,
        MAX_ARTICLES_ALL,
    )
    .await;
    Json(AllSentimentsResp {
        timestamp: Utc::now(),
        stocks_analyzed: symbols.len(),
        results,
    })
}

#[derive(serde::Serialize)]
struct StocksResp {
    tunisian_stocks: &'static [universe::Company],
    count: usize,
}

async fn list_stocks() -> Json<StocksResp> {
    Json(StocksResp {
        tunisian_stocks: universe::UNIVERSE,
        count: universe::UNIVERSE.len(),
    })
}
