// src/report.rs
//! # Per-Symbol Reporting
//! Aggregates many per-article results into one symbol summary: mean score,
//! overall label, label distribution, and an overall explanation. The
//! aggregation itself is pure (`summarize`) so it stays unit-testable; the
//! async wrappers only do the fetching.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyze::result::{ExplanationDetail, SentimentResult};
use crate::analyze::scoring::{round3, Label, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
use crate::analyze::SentimentAnalyzer;
use crate::feed;
use crate::feed::types::{Article, NewsProvider};

/// One analyzed article inside a symbol report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSentiment {
    pub id: String,
    pub title: String,
    pub source: String,
    pub language: String,
    pub published_date: DateTime<Utc>,
    pub sentiment_score: f64,
    pub sentiment_label: Label,
    pub confidence: f64,
    pub analysis_method: String,
    pub positive_keywords: u32,
    pub negative_keywords: u32,
    pub explanation: String,
    pub explanation_detail: Option<ExplanationDetail>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Aggregated sentiment for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub overall_score: f64,
    pub sentiment: Label,
    pub confidence: f64,
    pub articles_analyzed: usize,
    pub sentiment_distribution: SentimentDistribution,
    pub overall_explanation: String,
    pub analysis_timestamp: DateTime<Utc>,
    pub articles: Vec<ArticleSentiment>,
}

/// Score each article against `symbol` and fold the results into one report.
pub fn summarize(symbol: &str, analyzer: &SentimentAnalyzer, articles: &[Article]) -> SymbolReport {
    if articles.is_empty() {
        return empty_report(symbol);
    }

    let mut analyzed = Vec::with_capacity(articles.len());
    let mut score_sum = 0.0;
    let mut confidence_sum = 0.0;
    let mut distribution = SentimentDistribution::default();

    for article in articles {
        let result: SentimentResult = analyzer.analyze(&article.content, Some(symbol));
        score_sum += result.score;
        confidence_sum += result.confidence;
        match result.label {
            Label::Positive => distribution.positive += 1,
            Label::Negative => distribution.negative += 1,
            Label::Neutral => distribution.neutral += 1,
        }
        analyzed.push(ArticleSentiment {
            id: article.id.clone(),
            title: article.title.clone(),
            source: article.source.clone(),
            language: article.language.clone(),
            published_date: article.published_date,
            sentiment_score: result.score,
            sentiment_label: result.label,
            confidence: result.confidence,
            analysis_method: result.method,
            positive_keywords: result.positive_keywords,
            negative_keywords: result.negative_keywords,
            explanation: result.explanation,
            explanation_detail: result.explanation_detail,
        });
    }

    let n = analyzed.len();
    let overall_score = score_sum / n as f64;
    let sentiment = if overall_score > POSITIVE_THRESHOLD {
        Label::Positive
    } else if overall_score < NEGATIVE_THRESHOLD {
        Label::Negative
    } else {
        Label::Neutral
    };

    let mut overall_explanation = format!(
        "Overall {} sentiment from {} articles. Distribution: {} positive, {} negative, {} neutral. ",
        sentiment, n, distribution.positive, distribution.negative, distribution.neutral
    );
    if let Some(first) = analyzed.first() {
        overall_explanation.push_str(&format!("Example: {}", first.explanation));
    }

    SymbolReport {
        symbol: symbol.to_string(),
        overall_score: round3(overall_score),
        sentiment,
        confidence: round3(confidence_sum / n as f64),
        articles_analyzed: n,
        sentiment_distribution: distribution,
        overall_explanation,
        analysis_timestamp: Utc::now(),
        articles: analyzed,
    }
}

fn empty_report(symbol: &str) -> SymbolReport {
    SymbolReport {
        symbol: symbol.to_string(),
        overall_score: 0.0,
        sentiment: Label::Neutral,
        confidence: 0.0,
        articles_analyzed: 0,
        sentiment_distribution: SentimentDistribution::default(),
        overall_explanation: format!("No articles found for {symbol}."),
        analysis_timestamp: Utc::now(),
        articles: Vec::new(),
    }
}

/// Fetch articles for one symbol and summarize them.
pub async fn analyze_symbol(
    analyzer: &SentimentAnalyzer,
    providers: &[Box<dyn NewsProvider>],
    symbol: &str,
    max_articles: usize,
) -> SymbolReport {
    let articles = feed::articles_for_stock(providers, symbol, max_articles).await;
    tracing::info!(symbol, articles = articles.len(), "symbol report");
    metrics::counter!("symbol_reports_total").increment(1);
    summarize(symbol, analyzer, &articles)
}

/// Reports for many symbols, keyed by symbol.
pub async fn analyze_many(
    analyzer: &SentimentAnalyzer,
    providers: &[Box<dyn NewsProvider>],
    symbols: &[&str],
    max_articles_per_symbol: usize,
) -> BTreeMap<String, SymbolReport> {
    let mut out = BTreeMap::new();
    for symbol in symbols {
        let report = analyze_symbol(analyzer, providers, symbol, max_articles_per_symbol).await;
        out.insert(symbol.to_string(), report);
    }
    out
}

/// Export reports as pretty-printed UTF-8 JSON.
pub fn export_json<P: AsRef<Path>>(
    path: P,
    reports: &BTreeMap<String, SymbolReport>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(reports).context("serialize reports")?;
    fs::write(path.as_ref(), json)
        .with_context(|| format!("write report file {}", path.as_ref().display()))?;
    Ok(())
}
