//! Request payload construction.
//!
//! ```text
//! ValidatedInput { text: Some("..."), url: None }
//!        │
//!        ▼
//! {"text": "..."}          (no "url" key at all)
//! ```
use crate::types::{ValidatedInput, VerificationRequestPayload};

/// Converts validated input into the JSON body for the verification endpoint.
///
/// Pure and total. Only non-empty fields are carried over.
///
/// ```rust
/// use intake::{build, validate, VerificationInput};
///
/// let validated = validate(VerificationInput::from_text("  Some article  ")).unwrap();
/// let payload = build(validated);
/// assert_eq!(payload.text.as_deref(), Some("Some article"));
/// assert!(payload.url.is_none());
/// ```
pub fn build(validated: ValidatedInput) -> VerificationRequestPayload {
    let ValidatedInput { text, url } = validated;
    VerificationRequestPayload {
        text: text.filter(|t| !t.is_empty()),
        url: url.filter(|u| !u.is_empty()),
    }
}
