// src/analyze/matcher.rs
//! Keyword matcher: substring scans of the lower-cased normalized text
//! against every lexicon table.
//!
//! Per-term occurrence counts are capped at 3. Context-sensitive positive
//! terms are skipped entirely under the neutral-context flag, as are all
//! company-positive terms; company matches carry double weight and the
//! `company` language tag. Multi-word phrases ("pas de", "solde positif")
//! stay literal substring tests — no tokenizer.

use super::context;
use super::lexicon::{Lang, Lexicon};

pub const OCCURRENCE_CAP: u32 = 3;
pub const COMPANY_WEIGHT: u32 = 2;

/// One matched keyword with its cumulative occurrence weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub term: String,
    pub lang: Lang,
    pub weight: u32,
}

/// Everything one scan pass produces, consumed by aggregation and the
/// explanation builder.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    pub positive: Vec<KeywordMatch>,
    pub negative: Vec<KeywordMatch>,
    /// Neutral words found (reporting only, never scored).
    pub neutral: Vec<String>,
    pub neutral_context: bool,
}

impl MatchSet {
    pub fn positive_weight(&self) -> u32 {
        self.positive.iter().map(|m| m.weight).sum()
    }

    pub fn negative_weight(&self) -> u32 {
        self.negative.iter().map(|m| m.weight).sum()
    }
}

fn occurrences(text_lower: &str, term: &str) -> u32 {
    text_lower.matches(term).count() as u32
}

/// Scan `text_lower` for every lexicon term. `symbol` engages the company
/// override when it names a known company; anything else is ignored.
pub fn scan(lexicon: &Lexicon, text_lower: &str, symbol: Option<&str>) -> MatchSet {
    let neutral_context = context::has_neutral_context(lexicon, text_lower);

    let mut set = MatchSet {
        neutral_context,
        ..MatchSet::default()
    };

    for word in lexicon.neutral_terms() {
        if text_lower.contains(word.as_str()) {
            set.neutral.push(word.clone());
        }
    }

    for (term, lang) in lexicon.positive_terms() {
        // Skip "performance(s)" and friends when the text reads as stable.
        if neutral_context && lexicon.is_context_sensitive(term) {
            continue;
        }
        let n = occurrences(text_lower, term);
        if n > 0 {
            set.positive.push(KeywordMatch {
                term: term.clone(),
                lang: *lang,
                weight: n.min(OCCURRENCE_CAP),
            });
        }
    }

    for (term, lang) in lexicon.negative_terms() {
        let n = occurrences(text_lower, term);
        if n > 0 {
            set.negative.push(KeywordMatch {
                term: term.clone(),
                lang: *lang,
                weight: n.min(OCCURRENCE_CAP),
            });
        }
    }

    if let Some(company) = symbol.and_then(|s| lexicon.company(s)) {
        for term in &company.positive {
            // Sector terms read neutral in stable context ("secteur
            // immobilier" next to "performances stables").
            if neutral_context {
                continue;
            }
            let n = occurrences(text_lower, term);
            if n > 0 {
                set.positive.push(KeywordMatch {
                    term: term.clone(),
                    lang: Lang::Company,
                    weight: n.min(OCCURRENCE_CAP) * COMPANY_WEIGHT,
                });
            }
        }
        for term in &company.negative {
            let n = occurrences(text_lower, term);
            if n > 0 {
                set.negative.push(KeywordMatch {
                    term: term.clone(),
                    lang: Lang::Company,
                    weight: n.min(OCCURRENCE_CAP) * COMPANY_WEIGHT,
                });
            }
        }
    }

    set
}
