//! Input and payload types shared by the intake stage.
use serde::{Deserialize, Serialize};

/// Raw content supplied by the user for one verification attempt.
///
/// Both fields are optional and untrimmed. Nothing is guaranteed about them
/// until [`validate`](crate::validate) turns them into a [`ValidatedInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl VerificationInput {
    /// Input carrying only article text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            url: None,
        }
    }

    /// Input carrying only an article URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            text: None,
            url: Some(url.into()),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Trimmed input that passed validation.
///
/// Empty fields are stored as `None` and at least one field is present. The
/// only way to obtain one is through [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub(crate) text: Option<String>,
    pub(crate) url: Option<String>,
}

impl ValidatedInput {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Number of characters in the text field (0 when absent).
    pub fn text_chars(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.chars().count())
    }
}

/// JSON body sent to the verification endpoint.
///
/// Absent fields are omitted from the serialized object rather than sent as
/// `null` or `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Non-blocking notice raised for unusually long article text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthAdvisory {
    pub text_chars: usize,
    pub threshold: usize,
}

impl LengthAdvisory {
    pub fn message(&self) -> &'static str {
        "Long text may take longer to process"
    }
}
