// src/analyze/mod.rs
//! # Sentiment Analysis Pipeline
//! Pure, deterministic scoring of one text: normalize → match → context
//! adjust → aggregate → explain. No I/O, no shared mutable state; the only
//! shared resource is the immutable [`lexicon::Lexicon`], so concurrent
//! calls from request handlers need no locks.

pub mod context;
pub mod explain;
pub mod lexicon;
pub mod matcher;
pub mod normalize;
pub mod result;
pub mod scoring;

use std::sync::Arc;

use self::lexicon::Lexicon;
use self::result::{SentimentResult, METHOD_KEYWORD};
use self::scoring::round3;

/// Normalized texts shorter than this are not analyzed at all.
pub const MIN_TEXT_CHARS: usize = 10;

/// Keyword-based multilingual sentiment analyzer.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl SentimentAnalyzer {
    /// Analyzer over the embedded default lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: lexicon::builtin(),
        }
    }

    /// Analyzer over an injected lexicon (custom config path, tests).
    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score one text. `symbol` engages company-specific weighting when it
    /// names a known company; anything else is ignored. Never fails:
    /// malformed input degrades to a neutral result.
    pub fn analyze(&self, text: &str, symbol: Option<&str>) -> SentimentResult {
        let cleaned = normalize::clean_text(text);
        if cleaned.chars().count() < MIN_TEXT_CHARS {
            return SentimentResult::too_short();
        }

        let text_lower = cleaned.to_lowercase();
        let matches = matcher::scan(&self.lexicon, &text_lower, symbol);

        let (positive, negative) = context::dampen_counts(
            &self.lexicon,
            &text_lower,
            matches.positive_weight(),
            matches.negative_weight(),
        );
        let total = positive + negative;

        if total == 0 {
            let (explanation, detail) = explain::no_keyword_detail(&matches.neutral);
            dev_log(&cleaned, 0.0, "neutral", 0, 0);
            return SentimentResult {
                score: 0.0,
                label: scoring::Label::Neutral,
                confidence: 0.5,
                positive_keywords: 0,
                negative_keywords: 0,
                explanation,
                explanation_detail: Some(detail),
                method: METHOD_KEYWORD.to_string(),
            };
        }

        let agg = scoring::aggregate(positive, negative);
        let (explanation, detail) =
            explain::build(&self.lexicon, &matches, agg.score, agg.label, total, symbol);
        dev_log(&cleaned, agg.score, agg.label.as_str(), positive, negative);

        SentimentResult {
            score: round3(agg.score),
            label: agg.label,
            confidence: round3(agg.confidence),
            positive_keywords: positive,
            negative_keywords: negative,
            explanation,
            explanation_detail: Some(detail),
            method: METHOD_KEYWORD.to_string(),
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Short, stable fingerprint of a text for diagnostics. Never log raw text.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn dev_log(text: &str, score: f64, label: &str, positive: u32, negative: u32) {
    tracing::debug!(
        target: "analyze",
        id = %anon_hash(text),
        score,
        label,
        positive,
        negative,
        "scored text"
    );
}
