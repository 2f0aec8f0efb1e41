// src/feed/mod.rs
pub mod mock;
pub mod types;
pub mod universe;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::feed::types::{Article, NewsProvider};

/// Normalize article text before it reaches the analyzer: decode HTML
/// entities, strip tags, collapse whitespace. The analyzer applies its own
/// stricter charset filtering afterwards.
pub fn normalize_article_text(s: &str) -> String {
    let out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    let out = re_tags.replace_all(&out, "").to_string();

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fetch once from every provider, normalizing titles and bodies. Provider
/// failures are logged and skipped; the rest of the feed still flows.
pub async fn collect_articles(
    providers: &[Box<dyn NewsProvider>],
    max_per_provider: usize,
) -> Vec<Article> {
    let mut out = Vec::new();
    for p in providers {
        match p.fetch_latest(max_per_provider).await {
            Ok(articles) => {
                for mut a in articles {
                    a.title = normalize_article_text(&a.title);
                    a.content = normalize_article_text(&a.content);
                    out.push(a);
                }
            }
            Err(e) => {
                tracing::warn!(error = ?e, provider = p.name(), "provider error");
                metrics::counter!("feed_provider_errors_total").increment(1);
            }
        }
    }
    metrics::counter!("feed_articles_total").increment(out.len() as u64);
    out
}

/// Articles mentioning `symbol`, over-fetching to keep the filter fed.
pub async fn articles_for_stock(
    providers: &[Box<dyn NewsProvider>],
    symbol: &str,
    max_articles: usize,
) -> Vec<Article> {
    let pool = collect_articles(providers, max_articles * 3).await;
    let mut out: Vec<Article> = pool
        .into_iter()
        .filter(|a| {
            a.mentioned_stocks
                .iter()
                .any(|s| s.eq_ignore_ascii_case(symbol))
        })
        .collect();
    out.truncate(max_articles);
    out
}
