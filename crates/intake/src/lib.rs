//! TruthScan Intake Layer
//!
//! This is where user content enters the verification flow. We take the raw
//! text/URL pair from whatever UI collected it, check it, and turn it into
//! the smallest possible request body for the verification service.
//!
//! ## What we do here
//!
//! - **Trim** - Surrounding whitespace never reaches the wire.
//! - **Validate** - At least one of text or URL must be present, and a URL
//!   must be an absolute `http`/`https` URL with a host.
//! - **Build payloads** - Empty fields are dropped entirely, not sent as `""`.
//! - **Advise** - Very long text gets a non-blocking advisory.
//!
//! Nothing in this crate touches the network.
//!
//! ## Example
//!
//! ```
//! use intake::{build, validate, ValidationError, VerificationInput};
//!
//! let input = VerificationInput::from_url("  https://example.com/news/1  ");
//! let validated = validate(input).unwrap();
//! assert_eq!(validated.url(), Some("https://example.com/news/1"));
//!
//! let payload = build(validated);
//! assert_eq!(payload.url.as_deref(), Some("https://example.com/news/1"));
//!
//! let err = validate(VerificationInput::default()).unwrap_err();
//! assert_eq!(err, ValidationError::MissingInput);
//! ```
use tracing::debug;
use url::Url;

mod config;
mod error;
mod payload;
mod types;

pub use crate::config::{ConfigError, IntakeConfig, DEFAULT_LONG_TEXT_THRESHOLD};
pub use crate::error::ValidationError;
pub use crate::payload::build;
pub use crate::types::{
    LengthAdvisory, ValidatedInput, VerificationInput, VerificationRequestPayload,
};

/// Validates a raw input pair.
///
/// Rules are applied in order: missing input first, then URL format. The URL
/// is checked whenever it is non-empty, even if text is also present.
pub fn validate(input: VerificationInput) -> Result<ValidatedInput, ValidationError> {
    let text = trimmed(input.text);
    let url = trimmed(input.url);

    if text.is_none() && url.is_none() {
        debug!("intake_rejected_missing_input");
        return Err(ValidationError::MissingInput);
    }

    if let Some(raw) = url.as_deref() {
        if let Err(reason) = check_url(raw) {
            debug!(url = %raw, reason, "intake_rejected_invalid_url");
            return Err(ValidationError::InvalidUrl);
        }
    }

    debug!(
        has_text = text.is_some(),
        has_url = url.is_some(),
        "intake_validated"
    );
    Ok(ValidatedInput { text, url })
}

/// Returns an advisory when the text is longer than the configured threshold.
pub fn length_advisory(input: &ValidatedInput, cfg: &IntakeConfig) -> Option<LengthAdvisory> {
    let text_chars = input.text_chars();
    (text_chars > cfg.long_text_threshold).then_some(LengthAdvisory {
        text_chars,
        threshold: cfg.long_text_threshold,
    })
}

fn trimmed(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn check_url(raw: &str) -> Result<(), &'static str> {
    let parsed = Url::parse(raw).map_err(|_| "unparsable")?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("unsupported scheme");
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err("missing host"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let input = VerificationInput {
            text: Some("   \n\t ".into()),
            url: Some("  ".into()),
        };
        assert_eq!(validate(input), Err(ValidationError::MissingInput));
    }

    #[test]
    fn none_fields_count_as_missing() {
        assert_eq!(
            validate(VerificationInput::default()),
            Err(ValidationError::MissingInput)
        );
    }

    #[test]
    fn any_non_empty_text_passes_without_url() {
        for text in ["x", "Breaking news...", "!!!", "12345", "Ünïcödé text"] {
            let validated = validate(VerificationInput::from_text(text)).unwrap();
            assert_eq!(validated.text(), Some(text));
            assert_eq!(validated.url(), None);
        }
    }

    #[test]
    fn text_is_trimmed() {
        let validated = validate(VerificationInput::from_text("  padded  ")).unwrap();
        assert_eq!(validated.text(), Some("padded"));
    }

    #[test]
    fn malformed_urls_are_rejected() {
        for url in [
            "not a url",
            "example.com/news",
            "http://",
            "mailto:editor@example.com",
            "ftp://example.com/file",
            "https://exa mple.com",
        ] {
            assert_eq!(
                validate(VerificationInput::from_url(url)),
                Err(ValidationError::InvalidUrl),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_url_rejected_even_with_text() {
        let input = VerificationInput::from_text("valid body").with_url("not a url");
        assert_eq!(validate(input), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn missing_input_checked_before_url() {
        let input = VerificationInput {
            text: Some(" ".into()),
            url: Some("   ".into()),
        };
        assert_eq!(validate(input), Err(ValidationError::MissingInput));
    }

    #[test]
    fn well_formed_urls_pass() {
        for url in [
            "https://example.com",
            "http://localhost:5000/api",
            "https://news.example.co.uk/2024/05/story?id=7",
            "http://192.168.0.1/page",
        ] {
            let validated = validate(VerificationInput::from_url(url)).unwrap();
            assert_eq!(validated.url(), Some(url));
        }
    }

    #[test]
    fn empty_url_with_text_is_dropped() {
        let input = VerificationInput::from_text("body").with_url("   ");
        let validated = validate(input).unwrap();
        assert_eq!(validated.url(), None);
    }

    #[test]
    fn length_advisory_only_above_threshold() {
        let cfg = IntakeConfig {
            long_text_threshold: 10,
        };
        let short = validate(VerificationInput::from_text("0123456789")).unwrap();
        assert!(length_advisory(&short, &cfg).is_none());

        let long = validate(VerificationInput::from_text("0123456789a")).unwrap();
        let advisory = length_advisory(&long, &cfg).unwrap();
        assert_eq!(advisory.text_chars, 11);
        assert_eq!(advisory.threshold, 10);
        assert_eq!(advisory.message(), "Long text may take longer to process");
    }

    #[test]
    fn url_only_input_never_advised() {
        let cfg = IntakeConfig {
            long_text_threshold: 1,
        };
        let validated = validate(VerificationInput::from_url("https://example.com")).unwrap();
        assert!(length_advisory(&validated, &cfg).is_none());
    }
}
