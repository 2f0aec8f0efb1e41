// src/feed/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

/// One article-like record as delivered by a news source.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source: String,
    pub source_url: Option<String>,
    pub published_date: DateTime<Utc>,
    pub language: String,
    pub mentioned_stocks: Vec<String>,
}

#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch up to `max_articles` fresh articles from this source.
    async fn fetch_latest(&self, max_articles: usize) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
}
