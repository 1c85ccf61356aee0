//! Configuration for the intake stage.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default character count above which a [`LengthAdvisory`](crate::LengthAdvisory)
/// is raised.
///
/// Counted in Unicode scalar values of the trimmed text, not UTF-16 code
/// units of the raw field, so text with surrounding whitespace or astral
/// characters can land a little under a browser character counter.
pub const DEFAULT_LONG_TEXT_THRESHOLD: usize = 5000;

/// Runtime configuration for intake behavior.
///
/// ```rust
/// use intake::IntakeConfig;
///
/// let config = IntakeConfig::default();
/// assert_eq!(config.long_text_threshold, 5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Text longer than this many characters triggers a length advisory.
    pub long_text_threshold: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            long_text_threshold: DEFAULT_LONG_TEXT_THRESHOLD,
        }
    }
}

/// Invalid intake configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid intake config: {0}")]
    Invalid(String),
}

impl IntakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.long_text_threshold == 0 {
            return Err(ConfigError::Invalid(
                "long_text_threshold must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threshold_is_rejected() {
        let cfg = IntakeConfig {
            long_text_threshold: 0,
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("long_text_threshold"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: IntakeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, IntakeConfig::default());
    }
}
