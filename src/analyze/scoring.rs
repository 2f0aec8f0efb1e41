// src/analyze/scoring.rs
//! Score aggregation: dampened polarity counts → normalized score, label,
//! confidence. Pure and branch-complete; the "too short" fast path lives in
//! the analyzer front door, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const POSITIVE_THRESHOLD: f64 = 0.3;
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

/// Categorical sentiment label, a deterministic function of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated verdict for one analysis call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub score: f64,
    pub label: Label,
    pub confidence: f64,
}

/// Convert dampened counts into the final score/label/confidence triple.
pub fn aggregate(positive: u32, negative: u32) -> Aggregate {
    let total = positive + negative;
    if total == 0 {
        return Aggregate {
            score: 0.0,
            label: Label::Neutral,
            confidence: 0.5,
        };
    }

    let raw = (positive as f64 - negative as f64) / total as f64;
    let mut score = raw.clamp(-1.0, 1.0);

    // Soften the extremes: a one-sided text should not pin at ±1.0.
    if score.abs() > 0.8 {
        score *= 0.9;
    }
    // Pull toward neutral when evidence is thin.
    if total < 3 {
        score *= 0.85;
    }

    let (label, confidence) = if score > POSITIVE_THRESHOLD {
        (Label::Positive, (0.5 + score.abs() * 0.5).min(0.95))
    } else if score < NEGATIVE_THRESHOLD {
        (Label::Negative, (0.5 + score.abs() * 0.5).min(0.95))
    } else {
        (Label::Neutral, 0.5)
    };

    Aggregate {
        score,
        label,
        confidence,
    }
}

/// Human-readable intensity band for a (signed) score.
pub fn intensity(score: f64) -> &'static str {
    if score > 0.8 {
        "Very strong"
    } else if score > 0.6 {
        "Strong"
    } else if score > 0.3 {
        "Moderate"
    } else if score > 0.1 {
        "Slight"
    } else if score >= -0.1 {
        "Neutral"
    } else if score >= -0.3 {
        "Slight"
    } else if score >= -0.6 {
        "Moderate"
    } else if score >= -0.8 {
        "Strong"
    } else {
        "Very strong"
    }
}

/// Round to three decimals (wire precision for scores and impacts).
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_neutral_with_half_confidence() {
        let a = aggregate(0, 0);
        assert_eq!(a.score, 0.0);
        assert_eq!(a.label, Label::Neutral);
        assert_eq!(a.confidence, 0.5);
    }

    #[test]
    fn one_sided_text_softens_below_one() {
        let a = aggregate(12, 0);
        assert_eq!(a.label, Label::Positive);
        assert!((a.score - 0.9).abs() < 1e-9);
        assert!((a.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn thin_evidence_pulls_toward_neutral() {
        // Two positive hits: 1.0 → ×0.9 → ×0.85 = 0.765.
        let a = aggregate(2, 0);
        assert!((a.score - 0.765).abs() < 1e-9);
        assert_eq!(a.label, Label::Positive);
    }

    #[test]
    fn labels_flip_strictly_beyond_point_three() {
        // 4 vs 2 → 1/3: positive. 7 vs 5 → 1/6: neutral.
        assert_eq!(aggregate(4, 2).label, Label::Positive);
        assert_eq!(aggregate(7, 5).label, Label::Neutral);
        assert_eq!(aggregate(5, 7).label, Label::Neutral);
        assert_eq!(aggregate(2, 4).label, Label::Negative);
    }

    #[test]
    fn score_and_confidence_stay_bounded() {
        for (p, n) in [(0u32, 0u32), (1, 0), (0, 1), (3, 3), (50, 1), (1, 50), (7, 2)] {
            let a = aggregate(p, n);
            assert!((-1.0..=1.0).contains(&a.score), "score {p}/{n}");
            assert!((0.0..=1.0).contains(&a.confidence), "confidence {p}/{n}");
        }
    }

    #[test]
    fn intensity_bands_mirror() {
        assert_eq!(intensity(0.9), "Very strong");
        assert_eq!(intensity(0.7), "Strong");
        assert_eq!(intensity(0.4), "Moderate");
        assert_eq!(intensity(0.2), "Slight");
        assert_eq!(intensity(0.0), "Neutral");
        assert_eq!(intensity(-0.2), "Slight");
        assert_eq!(intensity(-0.5), "Moderate");
        assert_eq!(intensity(-0.7), "Strong");
        assert_eq!(intensity(-0.9), "Very strong");
    }

    #[test]
    fn round3_wire_precision() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(-0.8999999), -0.9);
    }
}
