//! Heuristic factor annotations.
//!
//! These flags are inferred from the wording of the service's free-text
//! message. The service makes no promise about that wording, so the flags are
//! advisory only: nothing in the verdict or bucket depends on them.

use serde::Serialize;

const SENSATIONAL_TOKEN: &str = "sensational";
const SOURCES_TOKEN: &str = "sources";
const SHORT_TOKEN: &str = "short";

/// Which token was found in the message (case-insensitive).
///
/// An empty message sets no flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactorFlags {
    pub sensational_language: bool,
    pub mentions_sources: bool,
    pub too_short: bool,
}

impl FactorFlags {
    pub fn from_message(message: &str) -> Self {
        let lowered = message.to_lowercase();
        Self {
            sensational_language: lowered.contains(SENSATIONAL_TOKEN),
            mentions_sources: lowered.contains(SOURCES_TOKEN),
            too_short: lowered.contains(SHORT_TOKEN),
        }
    }

    /// One note per factor, in display order.
    pub fn notes(&self) -> [FactorNote; 3] {
        [
            if self.sensational_language {
                FactorNote::concern(Factor::SensationalLanguage, "Contains sensational language")
            } else {
                FactorNote::pass(
                    Factor::SensationalLanguage,
                    "No excessive sensationalism detected",
                )
            },
            if self.mentions_sources {
                FactorNote::pass(Factor::SourceCitation, "References to credible sources found")
            } else {
                FactorNote::concern(Factor::SourceCitation, "No credible source references found")
            },
            if self.too_short {
                FactorNote::concern(
                    Factor::SufficientLength,
                    "Content is too short for thorough analysis",
                )
            } else {
                FactorNote::pass(Factor::SufficientLength, "Content has sufficient depth")
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    SensationalLanguage,
    SourceCitation,
    SufficientLength,
}

/// Display line for one factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorNote {
    pub factor: Factor,
    pub concern: bool,
    pub summary: &'static str,
}

impl FactorNote {
    fn pass(factor: Factor, summary: &'static str) -> Self {
        Self {
            factor,
            concern: false,
            summary,
        }
    }

    fn concern(factor: Factor, summary: &'static str) -> Self {
        Self {
            factor,
            concern: true,
            summary,
        }
    }
}
