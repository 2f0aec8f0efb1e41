// tests/feed_mock.rs
//
// Mock feed behavior: article shape, language per source, filtering, and
// that generated articles flow through the analyzer cleanly.

use bvmt_sentiment_analyzer::feed::mock::{MockProvider, SOURCES};
use bvmt_sentiment_analyzer::feed::types::NewsProvider;
use bvmt_sentiment_analyzer::feed::{self, universe};
use bvmt_sentiment_analyzer::SentimentAnalyzer;

#[tokio::test]
async fn every_source_produces_wellformed_articles() {
    for (i, source) in SOURCES.iter().enumerate() {
        let p = MockProvider::with_seed(source.key, 1000 + i as u64).unwrap();
        let articles = p.fetch_latest(4).await.unwrap();
        assert!((2..=4).contains(&articles.len()), "{}", source.key);
        for a in &articles {
            assert_eq!(a.language, source.language);
            assert_eq!(a.source, source.name);
            assert!(a.source_url.is_some());
            assert!(!a.title.is_empty());
            assert!(a.content.starts_with(&a.title));
            assert_eq!(a.mentioned_stocks.len(), 1);
            assert!(universe::find(&a.mentioned_stocks[0]).is_some());
        }
    }
}

#[tokio::test]
async fn collect_articles_normalizes_bodies() {
    let providers = MockProvider::all_seeded(5);
    let articles = feed::collect_articles(&providers, 4).await;
    assert!(!articles.is_empty());
    for a in &articles {
        // Feed normalization collapses whitespace; no double spaces survive.
        assert!(!a.content.contains("  "), "unnormalized body: {}", a.id);
    }
}

#[tokio::test]
async fn generated_articles_are_analyzable() {
    let analyzer = SentimentAnalyzer::new();
    let providers = MockProvider::all_seeded(21);
    let articles = feed::collect_articles(&providers, 4).await;
    for a in &articles {
        let symbol = a.mentioned_stocks.first().map(|s| s.as_str());
        let r = analyzer.analyze(&a.content, symbol);
        assert!((-1.0..=1.0).contains(&r.score), "article {}", a.id);
        assert!((0.0..=1.0).contains(&r.confidence));
        // Template bodies are always long enough to be scored.
        assert!(r.explanation_detail.is_some(), "article {}", a.id);
    }
}

#[tokio::test]
async fn article_filter_respects_the_requested_cap() {
    let providers = MockProvider::all_seeded(17);
    for symbol in universe::symbols() {
        let picked = feed::articles_for_stock(&providers, symbol, 2).await;
        assert!(picked.len() <= 2, "{symbol}");
    }
}
