// src/analyze/result.rs
//! Wire types for one analysis call: the flat `SentimentResult` contract and
//! the structured explanation detail behind it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lexicon::Lang;
use super::scoring::Label;

/// Constant identifying this algorithm family on the wire (as opposed to
/// any future model-based scorer).
pub const METHOD_KEYWORD: &str = "keyword_based";

pub const TOO_SHORT_EXPLANATION: &str = "Text too short to analyze.";

/// Output of one scoring call. Immutable value; scores and confidence are
/// rounded to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub label: Label,
    pub confidence: f64,
    pub positive_keywords: u32,
    pub negative_keywords: u32,
    pub explanation: String,
    pub explanation_detail: Option<ExplanationDetail>,
    pub method: String,
}

impl SentimentResult {
    /// Fixed result for text shorter than the analysis minimum. The only
    /// case (besides "no keywords") that reports zero confidence.
    pub fn too_short() -> Self {
        Self {
            score: 0.0,
            label: Label::Neutral,
            confidence: 0.0,
            positive_keywords: 0,
            negative_keywords: 0,
            explanation: TOO_SHORT_EXPLANATION.to_string(),
            explanation_detail: None,
            method: METHOD_KEYWORD.to_string(),
        }
    }
}

/// Structured, human-readable account of why a score was produced. The
/// `summary` field always equals the flat `explanation` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationDetail {
    pub summary: String,
    pub intensity: String,
    pub key_findings: Vec<String>,
    pub keyword_breakdown: KeywordBreakdown,
    pub language_analysis: BTreeMap<String, LanguageStats>,
    pub sector_insights: Option<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordBreakdown {
    pub positive_keywords: Vec<KeywordImpact>,
    pub negative_keywords: Vec<KeywordImpact>,
    pub positive: PolaritySummary,
    pub negative: PolaritySummary,
    pub neutral: PolaritySummary,
}

/// One unique (word, language) pair with its cumulative count and signed
/// share of the total evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordImpact {
    pub word: String,
    pub language: Lang,
    pub count: u32,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolaritySummary {
    pub count: u32,
    pub top_terms: Vec<String>,
}

/// Per-language sub-score over the matches tagged with that language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub score: f64,
    pub keywords_found: u32,
    pub positive_hits: u32,
    pub negative_hits: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_shape() {
        let r = SentimentResult::too_short();
        assert_eq!(r.score, 0.0);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.explanation, TOO_SHORT_EXPLANATION);
        assert!(r.explanation_detail.is_none());
    }

    #[test]
    fn result_serializes_with_lowercase_tags() {
        let r = SentimentResult::too_short();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["label"], serde_json::json!("neutral"));
        assert_eq!(v["method"], serde_json::json!("keyword_based"));
        assert!(v["explanation_detail"].is_null());
    }
}
