// src/metrics.rs
use axum::{routing::get, Router};
use metrics::{describe_counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::analyze::lexicon::Lexicon;

/// One-time metric descriptions (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("analyze_requests_total", "Texts scored via the HTTP API.");
        describe_counter!("symbol_reports_total", "Per-symbol reports produced.");
        describe_counter!("feed_articles_total", "Articles collected from providers.");
        describe_counter!(
            "feed_provider_errors_total",
            "Provider fetch failures (skipped, not fatal)."
        );
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and expose static lexicon gauges.
    pub fn init(lexicon: &Lexicon) -> Self {
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        ensure_metrics_described();
        gauge!("lexicon_positive_terms").set(lexicon.positive_terms().len() as f64);
        gauge!("lexicon_negative_terms").set(lexicon.negative_terms().len() as f64);

        Self { handle }
    }

    /// Router exposing `/metrics` in Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
