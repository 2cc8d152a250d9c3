//! Risk tier classification shared by every surface that displays a tier.
//!
//! The three-band threshold rule lives here and nowhere else; the log
//! renderer and all three detection modules call into this module instead of
//! restating the thresholds inline.

use serde::{Deserialize, Serialize};

/// Discrete risk bucket derived from a 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Determine the tier for a raw risk score.
    ///
    /// The same ordering comparisons apply to out-of-range input, so the
    /// result stays deterministic without explicit range validation.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            RiskTier::High
        } else if score >= 40.0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

/// Tier plus the derived display confidence for a single score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub tier: RiskTier,
    /// Display heuristic, not a probability. Never exceeds 0.95.
    pub confidence: f64,
}

/// Classify a raw risk score into a tier and a display confidence.
///
/// Confidence is `min(0.95, score/100 + 0.15)` rounded to two decimals.
pub fn classify(score: f64) -> Classification {
    let confidence = (score / 100.0 + 0.15).min(0.95);
    Classification {
        tier: RiskTier::from_score(score),
        confidence: (confidence * 100.0).round() / 100.0,
    }
}
