use serde::Serialize;

use client::Verdict;

use crate::factors::{FactorFlags, FactorNote};

/// Percent at or above which confidence is high.
pub const HIGH_CONFIDENCE_PERCENT: u8 = 70;
/// Percent at or above which confidence is at least medium.
pub const MEDIUM_CONFIDENCE_PERCENT: u8 = 50;

/// Coarse grouping of the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBucket {
    High,
    Medium,
    Low,
}

impl ConfidenceBucket {
    /// `>= 70` high, `50..=69` medium, below that low.
    pub fn from_percent(percent: u8) -> Self {
        if percent >= HIGH_CONFIDENCE_PERCENT {
            ConfidenceBucket::High
        } else if percent >= MEDIUM_CONFIDENCE_PERCENT {
            ConfidenceBucket::Medium
        } else {
            ConfidenceBucket::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBucket::High => "high",
            ConfidenceBucket::Medium => "medium",
            ConfidenceBucket::Low => "low",
        }
    }
}

/// Semantic color class of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// Renderer-agnostic view of one verification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub verdict: Verdict,
    pub tone: Tone,
    pub headline: &'static str,
    /// `round(confidence * 100)`, clamped to `0..=100`.
    pub confidence_percent: u8,
    pub bucket: ConfidenceBucket,
    /// Service message, or a placeholder when it was empty.
    pub message: String,
    /// Best-effort hints derived from the message wording.
    pub factors: FactorFlags,
    pub notes: [FactorNote; 3],
}
