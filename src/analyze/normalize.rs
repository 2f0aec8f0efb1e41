// src/analyze/normalize.rs
//! Text normalization and the cheap per-article language hint.
//!
//! The normalizer keeps all three scripts (Latin, Latin-1 accents, Arabic)
//! and a small punctuation set; everything else becomes whitespace. The
//! language hint samples the first 200 characters and is advisory metadata
//! only — matching always runs against every lexicon table.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("url regex"));
static RE_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup regex"));
static RE_UNSAFE: Lazy<Regex> = Lazy::new(|| {
    // Word chars, whitespace, the Arabic block, Latin accents, and basic
    // punctuation survive; the rest is blanked.
    Regex::new(r"[^\w\s\x{0600}-\x{06FF}\x{00C0}-\x{017F}.,!?;:'-]").expect("charset regex")
});

/// Clean raw text for analysis. Empty input yields an empty string.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = RE_URL.replace_all(text, "");
    let text = RE_MARKUP.replace_all(&text, "");
    let text = RE_UNSAFE.replace_all(&text, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True if `c` falls in one of the Arabic Unicode blocks.
pub fn is_arabic_char(c: char) -> bool {
    matches!(
        c as u32,
        0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF
    )
}

const FRENCH_ACCENTS: &str = "éèêëàâäôöûüçÉÈÊËÀÂÄÔÖÛÜÇ";

/// Heuristic language hint over the first 200 characters: `ar`, `fr`, `en`,
/// or `unknown` for empty input.
pub fn detect_language(text: &str) -> &'static str {
    if text.is_empty() {
        return "unknown";
    }
    let mut has_french = false;
    for c in text.chars().take(200) {
        if is_arabic_char(c) {
            return "ar";
        }
        if FRENCH_ACCENTS.contains(c) {
            has_french = true;
        }
    }
    if has_french {
        "fr"
    } else {
        "en"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_and_markup() {
        let out = clean_text("Voir https://example.com/x?a=1 et <b>profits</b> records");
        assert_eq!(out, "Voir et profits records");
    }

    #[test]
    fn blanks_unsafe_chars_and_collapses_whitespace() {
        let out = clean_text("Croissance   de \u{00a0}25%  (environ)");
        assert_eq!(out, "Croissance de 25 environ");
    }

    #[test]
    fn keeps_all_three_scripts() {
        let out = clean_text("résultats جيد good.");
        assert_eq!(out, "résultats جيد good.");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn language_hint_priorities() {
        assert_eq!(detect_language("أداء ممتاز للبنك"), "ar");
        assert_eq!(detect_language("résultats exceptionnels"), "fr");
        assert_eq!(detect_language("strong growth reported"), "en");
        assert_eq!(detect_language(""), "unknown");
    }

    #[test]
    fn hint_samples_only_the_head() {
        // Arabic beyond the 200-char sample must not flip the hint.
        let long = format!("{}{}", "a".repeat(200), "جيد");
        assert_eq!(detect_language(&long), "en");
    }
}
