// src/analyze/lexicon.rs
//! # Lexicon
//! Immutable multilingual keyword tables: per-language positive/negative
//! terms, neutral terms, context phrases, and per-company overrides.
//!
//! Built once (from the embedded `config/lexicon.toml` or a file named by
//! `LEXICON_CONFIG_PATH`) and shared read-only by every analysis call.

use anyhow::Context as _;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_LEXICON_PATH: &str = "config/lexicon.toml";
pub const ENV_LEXICON_PATH: &str = "LEXICON_CONFIG_PATH";

/// Language tag attached to every keyword match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Fr,
    Ar,
    En,
    /// Company-specific override terms (weighted double by the matcher).
    Company,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::Ar => "ar",
            Lang::En => "en",
            Lang::Company => "company",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra terms for one listed company, weighted more heavily on match.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyTerms {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/* ----------------------------
TOML schema
---------------------------- */

#[derive(Debug, Deserialize)]
struct LexiconFile {
    positive: PositiveTables,
    negative: NegativeTables,
    context: ContextTables,
    #[serde(default)]
    companies: BTreeMap<String, CompanyTerms>,
}

#[derive(Debug, Deserialize)]
struct PositiveTables {
    fr: Vec<String>,
    #[serde(default)]
    fr_strong: Vec<String>,
    ar: Vec<String>,
    en: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NegativeTables {
    fr: Vec<String>,
    ar: Vec<String>,
    en: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ContextTables {
    neutral: Vec<String>,
    neutral_indicators: Vec<String>,
    negation: Vec<String>,
    context_sensitive: Vec<String>,
}

/* ----------------------------
Compiled lexicon
---------------------------- */

/// The compiled, immutable knowledge base consulted by the matcher and the
/// context analyzer.
#[derive(Debug)]
pub struct Lexicon {
    positive: Vec<(String, Lang)>,
    negative: Vec<(String, Lang)>,
    neutral: Vec<String>,
    neutral_indicators: Vec<String>,
    negation: Vec<String>,
    context_sensitive: Vec<String>,
    companies: BTreeMap<String, CompanyTerms>,
}

impl Lexicon {
    /// Parse and compile a lexicon from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let file: LexiconFile = toml::from_str(toml_str).context("parse lexicon TOML")?;

        // Combined positive list: fr base + fr strong + ar + en,
        // de-duplicated by (term, language) pair.
        let mut positive: Vec<(String, Lang)> = Vec::new();
        let chained = file
            .positive
            .fr
            .iter()
            .chain(file.positive.fr_strong.iter())
            .map(|w| (w, Lang::Fr))
            .chain(file.positive.ar.iter().map(|w| (w, Lang::Ar)))
            .chain(file.positive.en.iter().map(|w| (w, Lang::En)));
        for (word, lang) in chained {
            if !positive.iter().any(|(w, l)| w == word && *l == lang) {
                positive.push((word.clone(), lang));
            }
        }

        // Combined negative list: kept exactly as listed. Repeated entries
        // weight a term double; the data file says which ones are intentional.
        let negative: Vec<(String, Lang)> = file
            .negative
            .fr
            .iter()
            .map(|w| (w.clone(), Lang::Fr))
            .chain(file.negative.ar.iter().map(|w| (w.clone(), Lang::Ar)))
            .chain(file.negative.en.iter().map(|w| (w.clone(), Lang::En)))
            .collect();

        Ok(Self {
            positive,
            negative,
            neutral: file.context.neutral,
            neutral_indicators: file.context.neutral_indicators,
            negation: file.context.negation,
            context_sensitive: file.context.context_sensitive,
            companies: file.companies,
        })
    }

    /// Load a lexicon. Resolution order: `LEXICON_CONFIG_PATH`, then
    /// `config/lexicon.toml` on disk (editable without rebuild), then the
    /// embedded copy of that file.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var(ENV_LEXICON_PATH) {
            let path = PathBuf::from(path);
            let content = fs::read_to_string(&path)
                .with_context(|| format!("read lexicon config at {}", path.display()))?;
            return Self::from_toml_str(&content);
        }
        match fs::read_to_string(DEFAULT_LEXICON_PATH) {
            Ok(content) => Self::from_toml_str(&content),
            Err(_) => Self::from_toml_str(EMBEDDED_LEXICON),
        }
    }

    /// Combined positive terms, `(term, language)`, de-duplicated.
    pub fn positive_terms(&self) -> &[(String, Lang)] {
        &self.positive
    }

    /// Combined negative terms, `(term, language)`, as listed.
    pub fn negative_terms(&self) -> &[(String, Lang)] {
        &self.negative
    }

    /// Neutral terms, tracked for reporting only.
    pub fn neutral_terms(&self) -> &[String] {
        &self.neutral
    }

    /// Stability phrases that raise the neutral-context flag.
    pub fn neutral_indicators(&self) -> &[String] {
        &self.neutral_indicators
    }

    /// Negation/absence phrases that trigger count dampening.
    pub fn negation_phrases(&self) -> &[String] {
        &self.negation
    }

    /// True for terms that count as positive only outside neutral context.
    pub fn is_context_sensitive(&self, term: &str) -> bool {
        self.context_sensitive.iter().any(|w| w == term)
    }

    /// Company override tables for a known symbol; `None` otherwise.
    pub fn company(&self, symbol: &str) -> Option<&CompanyTerms> {
        self.companies.get(symbol)
    }

    pub fn company_symbols(&self) -> impl Iterator<Item = &str> {
        self.companies.keys().map(|s| s.as_str())
    }
}

const EMBEDDED_LEXICON: &str = include_str!("../../config/lexicon.toml");

static BUILTIN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(Lexicon::from_toml_str(EMBEDDED_LEXICON).expect("valid embedded lexicon"))
});

/// Shared handle to the embedded default lexicon.
pub fn builtin() -> Arc<Lexicon> {
    BUILTIN.clone()
}
