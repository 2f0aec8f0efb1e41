//! BVMT Sentiment Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the analyzer, the mock news feed,
//! shared state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bvmt_sentiment_analyzer::analyze::lexicon::Lexicon;
use bvmt_sentiment_analyzer::analyze::SentimentAnalyzer;
use bvmt_sentiment_analyzer::api::{self, AppState};
use bvmt_sentiment_analyzer::feed::mock::MockProvider;
use bvmt_sentiment_analyzer::metrics::Metrics;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments. This enables
    // LEXICON_CONFIG_PATH / BIND_ADDR overrides from .env.
    let _ = dotenvy::dotenv();
    init_tracing();

    let lexicon = Arc::new(Lexicon::load()?);
    let metrics = Metrics::init(&lexicon);

    let state = AppState {
        analyzer: Arc::new(SentimentAnalyzer::with_lexicon(lexicon)),
        providers: Arc::new(MockProvider::all()),
    };
    let router = api::create_router(state).merge(metrics.router());

    let addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "sentiment service listening");
    axum::serve(listener, router).await?;
    Ok(())
}
