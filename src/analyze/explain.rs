// src/analyze/explain.rs
//! Explanation builder: turns the match records and the aggregated verdict
//! into a summary sentence plus the structured detail object.
//!
//! Counts shown here are the raw (pre-dampening) match weights; only the
//! `total` used for impact shares is the dampened one, so impacts line up
//! with the score the caller actually returned.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::lexicon::{Lang, Lexicon};
use super::matcher::{KeywordMatch, MatchSet};
use super::result::{
    ExplanationDetail, KeywordBreakdown, KeywordImpact, LanguageStats, PolaritySummary,
};
use super::scoring::{intensity, round3, Label};

pub const NO_KEYWORDS_SUMMARY: &str =
    "Neutral sentiment. No strong sentiment keywords found; context suggests stable or mixed outlook.";
const MONITOR_RECOMMENDATION: &str = "Mixed or neutral outlook; monitor for further developments.";

/// Build the `(explanation, detail)` pair for a scored text.
/// `score` is the softened, pre-rounding score; `total` the dampened sum.
pub fn build(
    lexicon: &Lexicon,
    matches: &MatchSet,
    score: f64,
    label: Label,
    total: u32,
    symbol: Option<&str>,
) -> (String, ExplanationDetail) {
    let pos_count = matches.positive_weight();
    let neg_count = matches.negative_weight();
    let intensity = intensity(score).to_string();

    let top_pos = top_terms(&matches.positive, 5);
    let top_neg = top_terms(&matches.negative, 5);
    let top_neutral = dedup_preserving_order(&matches.neutral, 5);

    // Key findings: ranked evidence fragments for the UI.
    let mut key_findings = Vec::new();
    if pos_count > 0 {
        let unique: BTreeSet<&str> = matches.positive.iter().map(|m| m.term.as_str()).collect();
        let mentions: Vec<String> = unique
            .iter()
            .take(5)
            .map(|w| {
                let c: u32 = matches
                    .positive
                    .iter()
                    .filter(|m| m.term == *w)
                    .map(|m| m.weight)
                    .sum();
                if c > 1 {
                    format!("'{w}' ({c} mentions)")
                } else {
                    format!("'{w}'")
                }
            })
            .collect();
        key_findings.push(format!("Key positive indicators: {}", mentions.join(", ")));
    }
    if neg_count > 0 {
        let unique: BTreeSet<&str> = matches.negative.iter().map(|m| m.term.as_str()).collect();
        let listed: Vec<String> = unique.iter().take(5).map(|w| format!("'{w}'")).collect();
        key_findings.push(format!("Negative terms present: {}", listed.join(", ")));
    } else if label == Label::Positive {
        key_findings.push("No concerning negative terms detected.".to_string());
    }
    if !matches.neutral.is_empty() && (pos_count > 0 || neg_count > 0) {
        let unique: BTreeSet<&str> = matches.neutral.iter().map(|w| w.as_str()).collect();
        let listed: Vec<&str> = unique.iter().take(4).copied().collect();
        key_findings.push(format!("Neutral/context terms: {}", listed.join(", ")));
    }

    // Summary sentence, one template per label.
    let summary = if total == 0 {
        NO_KEYWORDS_SUMMARY.to_string()
    } else {
        match label {
            Label::Positive => {
                let tail = if neg_count == 0 {
                    "No negative terms detected.".to_string()
                } else {
                    format!("Some negative terms ({}) present.", join_first(&top_neg, 2))
                };
                format!(
                    "{intensity} positive sentiment ({score:.2}). Key positive indicators: {}. {tail}",
                    join_first(&top_pos, 4)
                )
            }
            Label::Negative => {
                let tail = if pos_count == 0 {
                    "No positive terms.".to_string()
                } else {
                    format!(
                        "Some positive terms ({}) also present.",
                        join_first(&top_pos, 2)
                    )
                };
                format!(
                    "{intensity} negative sentiment ({score:.2}). Key negative indicators: {}. {tail}",
                    join_first(&top_neg, 4)
                )
            }
            Label::Neutral => format!(
                "Neutral sentiment ({score:.2}). Balanced positive and negative terms. \
                 Context suggests stable or mixed performance."
            ),
        }
    };

    let recommendation = if label == Label::Positive && score > 0.5 {
        "Overall positive outlook for investment consideration.".to_string()
    } else if label == Label::Negative && score < -0.5 {
        "Caution advised; negative indicators present.".to_string()
    } else {
        MONITOR_RECOMMENDATION.to_string()
    };

    // Per-(word, language) breakdown with signed impact shares.
    let impact_per_hit = if total > 0 { 1.0 / total as f64 } else { 0.0 };
    let keyword_breakdown = KeywordBreakdown {
        positive_keywords: breakdown(&matches.positive, impact_per_hit, 1.0),
        negative_keywords: breakdown(&matches.negative, impact_per_hit, -1.0),
        positive: PolaritySummary {
            count: pos_count,
            top_terms: top_pos,
        },
        negative: PolaritySummary {
            count: neg_count,
            top_terms: top_neg,
        },
        neutral: PolaritySummary {
            count: matches.neutral.len() as u32,
            top_terms: top_neutral,
        },
    };

    // Per-language sub-scores over the raw hit weights.
    let mut lang_pos: BTreeMap<Lang, u32> = BTreeMap::new();
    let mut lang_neg: BTreeMap<Lang, u32> = BTreeMap::new();
    for m in &matches.positive {
        *lang_pos.entry(m.lang).or_insert(0) += m.weight;
    }
    for m in &matches.negative {
        *lang_neg.entry(m.lang).or_insert(0) += m.weight;
    }
    let mut language_analysis = BTreeMap::new();
    for lang in lang_pos.keys().chain(lang_neg.keys()) {
        let p = lang_pos.get(lang).copied().unwrap_or(0);
        let n = lang_neg.get(lang).copied().unwrap_or(0);
        let tot = p + n;
        let lang_score = if tot > 0 {
            (p as f64 - n as f64) / tot as f64
        } else {
            0.0
        };
        language_analysis.insert(
            lang.as_str().to_string(),
            LanguageStats {
                score: round3(lang_score),
                keywords_found: tot,
                positive_hits: p,
                negative_hits: n,
            },
        );
    }

    // Sector insight, only when a known company actually contributed.
    let mut sector_insights = None;
    if let Some((sym, company)) = symbol.and_then(|s| lexicon.company(s).map(|c| (s, c))) {
        let found_pos: Vec<&str> = matches
            .positive
            .iter()
            .filter(|m| company.positive.iter().any(|t| t == &m.term))
            .map(|m| m.term.as_str())
            .collect();
        let found_neg: Vec<&str> = matches
            .negative
            .iter()
            .filter(|m| company.negative.iter().any(|t| t == &m.term))
            .map(|m| m.term.as_str())
            .collect();
        if !found_pos.is_empty() || !found_neg.is_empty() {
            let mut parts = Vec::new();
            if !found_pos.is_empty() {
                parts.push(format!("positive ({})", found_pos.join(", ")));
            }
            if !found_neg.is_empty() {
                parts.push(format!("negative ({})", found_neg.join(", ")));
            }
            sector_insights = Some(format!(
                "Company-specific keywords for {sym} contributed: {}.",
                parts.join("; ")
            ));
        }
    }

    let detail = ExplanationDetail {
        summary: summary.clone(),
        intensity,
        key_findings,
        keyword_breakdown,
        language_analysis,
        sector_insights,
        recommendation,
    };
    (summary, detail)
}

/// Fixed explanation for the "matched nothing" outcome (distinct from the
/// too-short case: confidence stays 0.5 there and the detail is populated).
pub fn no_keyword_detail(neutral_found: &[String]) -> (String, ExplanationDetail) {
    let detail = ExplanationDetail {
        summary: NO_KEYWORDS_SUMMARY.to_string(),
        intensity: "Neutral".to_string(),
        key_findings: vec!["No sentiment keywords detected; neutral/stable context.".to_string()],
        keyword_breakdown: KeywordBreakdown {
            positive_keywords: Vec::new(),
            negative_keywords: Vec::new(),
            positive: PolaritySummary {
                count: 0,
                top_terms: Vec::new(),
            },
            negative: PolaritySummary {
                count: 0,
                top_terms: Vec::new(),
            },
            neutral: PolaritySummary {
                count: neutral_found.len() as u32,
                top_terms: neutral_found.iter().take(5).cloned().collect(),
            },
        },
        language_analysis: BTreeMap::new(),
        sector_insights: None,
        recommendation: MONITOR_RECOMMENDATION.to_string(),
    };
    (NO_KEYWORDS_SUMMARY.to_string(), detail)
}

/// Top `n` unique terms by cumulative weight; ties keep first-seen order.
fn top_terms(items: &[KeywordMatch], n: usize) -> Vec<String> {
    let mut seen: Vec<(String, u32)> = Vec::new();
    for m in items {
        match seen.iter_mut().find(|(w, _)| *w == m.term) {
            Some((_, c)) => *c += m.weight,
            None => seen.push((m.term.clone(), m.weight)),
        }
    }
    seen.sort_by(|a, b| b.1.cmp(&a.1));
    seen.into_iter().take(n).map(|(w, _)| w).collect()
}

fn dedup_preserving_order(items: &[String], n: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for w in items {
        if !out.contains(w) {
            out.push(w.clone());
        }
    }
    out.truncate(n);
    out
}

fn join_first(terms: &[String], n: usize) -> String {
    terms
        .iter()
        .take(n)
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Group matches by (word, language), summing weights, preserving first-seen
/// order; impacts are the signed share of the dampened total.
fn breakdown(items: &[KeywordMatch], impact_per_hit: f64, sign: f64) -> Vec<KeywordImpact> {
    let mut out: Vec<KeywordImpact> = Vec::new();
    for m in items {
        match out
            .iter_mut()
            .find(|k| k.word == m.term && k.language == m.lang)
        {
            Some(k) => k.count += m.weight,
            None => out.push(KeywordImpact {
                word: m.term.clone(),
                language: m.lang,
                count: m.weight,
                impact: 0.0,
            }),
        }
    }
    for k in &mut out {
        k.impact = round3(sign * k.count as f64 * impact_per_hit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::lexicon::{self, Lang};

    fn m(term: &str, lang: Lang, weight: u32) -> KeywordMatch {
        KeywordMatch {
            term: term.to_string(),
            lang,
            weight,
        }
    }

    fn sample_matches() -> MatchSet {
        MatchSet {
            positive: vec![
                m("croissance", Lang::Fr, 2),
                m("profit", Lang::Fr, 1),
                m("profit", Lang::En, 1),
                m("banque", Lang::Company, 2),
            ],
            negative: vec![m("risque", Lang::Fr, 1)],
            neutral: vec!["résultats".to_string()],
            neutral_context: false,
        }
    }

    #[test]
    fn top_terms_rank_by_cumulative_weight() {
        let set = sample_matches();
        let top = top_terms(&set.positive, 5);
        // "croissance" ties "profit" (2 each) but was seen first.
        assert_eq!(top[0], "croissance");
        assert_eq!(top[1], "profit");
        assert_eq!(top[2], "banque");
    }

    #[test]
    fn summary_matches_detail_and_mentions_terms() {
        let lex = lexicon::builtin();
        let set = sample_matches();
        let (summary, detail) = build(&lex, &set, 0.71, Label::Positive, 7, Some("ATB"));
        assert_eq!(summary, detail.summary);
        assert!(summary.starts_with("Strong positive sentiment (0.71)"));
        assert!(summary.contains("croissance"));
        assert!(detail
            .key_findings
            .iter()
            .any(|f| f.starts_with("Key positive indicators:")));
        assert!(detail
            .key_findings
            .iter()
            .any(|f| f.starts_with("Negative terms present:")));
    }

    #[test]
    fn impacts_are_signed_shares_of_total() {
        let lex = lexicon::builtin();
        let set = sample_matches();
        let (_, detail) = build(&lex, &set, 0.71, Label::Positive, 7, None);
        let b = &detail.keyword_breakdown;
        let croissance = b
            .positive_keywords
            .iter()
            .find(|k| k.word == "croissance")
            .unwrap();
        assert_eq!(croissance.count, 2);
        assert!((croissance.impact - 0.286).abs() < 1e-9);
        let risque = b.negative_keywords.iter().find(|k| k.word == "risque").unwrap();
        assert!((risque.impact + 0.143).abs() < 1e-9);
    }

    #[test]
    fn profit_grouped_per_language_not_merged() {
        let lex = lexicon::builtin();
        let set = sample_matches();
        let (_, detail) = build(&lex, &set, 0.71, Label::Positive, 7, None);
        let profits: Vec<_> = detail
            .keyword_breakdown
            .positive_keywords
            .iter()
            .filter(|k| k.word == "profit")
            .collect();
        assert_eq!(profits.len(), 2);
    }

    #[test]
    fn language_analysis_scores_per_tag() {
        let lex = lexicon::builtin();
        let set = sample_matches();
        let (_, detail) = build(&lex, &set, 0.71, Label::Positive, 7, None);
        let fr = &detail.language_analysis["fr"];
        // fr: 3 positive, 1 negative → (3-1)/4 = 0.5.
        assert_eq!(fr.positive_hits, 3);
        assert_eq!(fr.negative_hits, 1);
        assert!((fr.score - 0.5).abs() < 1e-9);
        let company = &detail.language_analysis["company"];
        assert_eq!(company.keywords_found, 2);
        assert!((company.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sector_insight_requires_known_symbol_and_contribution() {
        let lex = lexicon::builtin();
        let set = sample_matches();
        let (_, with) = build(&lex, &set, 0.71, Label::Positive, 7, Some("ATB"));
        assert!(with
            .sector_insights
            .as_deref()
            .unwrap()
            .contains("Company-specific keywords for ATB"));
        let (_, without) = build(&lex, &set, 0.71, Label::Positive, 7, None);
        assert!(without.sector_insights.is_none());
        // Known symbol whose terms never matched → no insight either.
        let (_, miss) = build(&lex, &set, 0.71, Label::Positive, 7, Some("TUNTEL"));
        assert!(miss.sector_insights.is_none());
    }

    #[test]
    fn recommendation_thresholds() {
        let lex = lexicon::builtin();
        let set = sample_matches();
        let (_, hot) = build(&lex, &set, 0.71, Label::Positive, 7, None);
        assert!(hot.recommendation.contains("positive outlook"));
        let (_, cold) = build(&lex, &set, -0.71, Label::Negative, 7, None);
        assert!(cold.recommendation.contains("Caution advised"));
        let (_, mild) = build(&lex, &set, 0.4, Label::Positive, 7, None);
        assert!(mild.recommendation.contains("monitor"));
    }

    #[test]
    fn no_keyword_detail_shape() {
        let (summary, detail) = no_keyword_detail(&["stable".to_string()]);
        assert_eq!(summary, NO_KEYWORDS_SUMMARY);
        assert_eq!(detail.intensity, "Neutral");
        assert_eq!(detail.keyword_breakdown.neutral.count, 1);
        assert!(detail.language_analysis.is_empty());
        assert!(detail.sector_insights.is_none());
    }
}
