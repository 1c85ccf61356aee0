//! TruthScan Verdict Interpretation
//!
//! Turns a [`VerificationResult`] into a [`Presentation`] any UI can render:
//! verdict, tone, headline, confidence percent and bucket, plus a few
//! best-effort factor hints. Pure and deterministic; the same result always
//! yields the same presentation.
//!
//! ```
//! use client::{Verdict, VerificationResult};
//! use verdict::{interpret, ConfidenceBucket, Tone};
//!
//! let presentation = interpret(&VerificationResult {
//!     result: Verdict::Uncertain,
//!     confidence: 0.55,
//!     message: "Unable to verify authenticity, exercise caution".into(),
//! });
//! assert_eq!(presentation.bucket, ConfidenceBucket::Medium);
//! assert_eq!(presentation.tone, Tone::Neutral);
//! assert_eq!(presentation.confidence_percent, 55);
//! ```

pub mod factors;
pub mod types;

use client::{Verdict, VerificationResult};

pub use crate::factors::{Factor, FactorFlags, FactorNote};
pub use crate::types::{
    ConfidenceBucket, Presentation, Tone, HIGH_CONFIDENCE_PERCENT, MEDIUM_CONFIDENCE_PERCENT,
};

/// Shown when the service sent an empty message.
pub const NO_DETAILS_MESSAGE: &str = "No additional details available.";

/// Interpret a successful verification result for display.
pub fn interpret(result: &VerificationResult) -> Presentation {
    let confidence_percent = confidence_percent(result.confidence);
    let factors = FactorFlags::from_message(&result.message);
    let message = if result.message.trim().is_empty() {
        NO_DETAILS_MESSAGE.to_string()
    } else {
        result.message.clone()
    };

    Presentation {
        verdict: result.result,
        tone: tone(result.result),
        headline: headline(result.result),
        confidence_percent,
        bucket: ConfidenceBucket::from_percent(confidence_percent),
        message,
        factors,
        notes: factors.notes(),
    }
}

/// Bucket for a raw confidence score in `[0, 1]`.
pub fn bucket_for(confidence: f64) -> ConfidenceBucket {
    ConfidenceBucket::from_percent(confidence_percent(confidence))
}

/// `round(confidence * 100)`, clamped to `0..=100`. Non-finite input maps to 0.
pub fn confidence_percent(confidence: f64) -> u8 {
    if !confidence.is_finite() {
        return 0;
    }
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn tone(verdict: Verdict) -> Tone {
    match verdict {
        Verdict::Real => Tone::Positive,
        Verdict::Fake => Tone::Negative,
        Verdict::Uncertain => Tone::Neutral,
    }
}

pub fn headline(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Real => "This content appears to be real",
        Verdict::Fake => "This content may be fake",
        Verdict::Uncertain => "Verification uncertain",
    }
}
