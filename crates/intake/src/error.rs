//! Error types produced by the intake crate.
//!
//! The `Display` text of every variant is the message shown to the user, so
//! callers can surface `err.to_string()` directly.
use thiserror::Error;

/// Reasons a [`VerificationInput`](crate::VerificationInput) is refused
/// before any request is built.
///
/// # Examples
///
/// ```rust
/// use intake::ValidationError;
///
/// let err = ValidationError::MissingInput;
/// assert_eq!(err.to_string(), "Please provide either article text or a valid URL");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Both text and URL are empty after trimming.
    #[error("Please provide either article text or a valid URL")]
    MissingInput,
    /// A URL was supplied but is not an absolute http(s) URL with a host.
    ///
    /// Other schemes are refused even when they parse (`ftp://host/x`,
    /// `mailto:`), since the service can only fetch web pages.
    #[error("Please enter a valid URL format (e.g., https://example.com/news)")]
    InvalidUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_message_mentions_example() {
        let msg = ValidationError::InvalidUrl.to_string();
        assert!(msg.starts_with("Please enter a valid URL format"));
        assert!(msg.contains("https://example.com/news"));
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(ValidationError::MissingInput, ValidationError::MissingInput);
        assert_ne!(ValidationError::MissingInput, ValidationError::InvalidUrl);
    }
}
