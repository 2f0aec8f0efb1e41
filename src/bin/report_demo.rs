//! Offline demo: analyze a few symbols against the mock feed and export the
//! reports as JSON — no HTTP server involved.
//!
//! ```bash
//! cargo run --bin report_demo
//! ```

use std::sync::Arc;

use bvmt_sentiment_analyzer::analyze::lexicon::Lexicon;
use bvmt_sentiment_analyzer::analyze::SentimentAnalyzer;
use bvmt_sentiment_analyzer::feed::mock::MockProvider;
use bvmt_sentiment_analyzer::report;

const EXPORT_PATH: &str = "stock_sentiment_results.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().compact().init();

    let analyzer = SentimentAnalyzer::with_lexicon(Arc::new(Lexicon::load()?));
    let providers = MockProvider::all();

    let symbols = ["ATB", "TUNTEL", "BH", "STB"];
    let results = report::analyze_many(&analyzer, &providers, &symbols, 2).await;

    println!(
        "{:<10} {:<10} {:>8} {:>12} {:>10}",
        "Stock", "Sentiment", "Score", "Confidence", "Articles"
    );
    println!("{}", "-".repeat(54));
    for (symbol, r) in &results {
        println!(
            "{:<10} {:<10} {:>8.2} {:>12.2} {:>10}",
            symbol,
            r.sentiment.as_str().to_uppercase(),
            r.overall_score,
            r.confidence,
            r.articles_analyzed
        );
    }

    if let (Some(best), Some(worst)) = (
        results
            .values()
            .max_by(|a, b| a.overall_score.total_cmp(&b.overall_score)),
        results
            .values()
            .min_by(|a, b| a.overall_score.total_cmp(&b.overall_score)),
    ) {
        println!("\nBest performing:  {} ({:.2})", best.symbol, best.overall_score);
        println!("Worst performing: {} ({:.2})", worst.symbol, worst.overall_score);
    }

    report::export_json(EXPORT_PATH, &results)?;
    println!("\nResults exported to {EXPORT_PATH}");
    Ok(())
}
