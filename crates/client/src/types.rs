use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Classification returned by the verification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Real,
    Fake,
    Uncertain,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "real",
            Verdict::Fake => "fake",
            Verdict::Uncertain => "uncertain",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success body of `POST /api/verify`.
///
/// `message` is free text and may be absent or `null` on the wire, in which
/// case it is empty here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub result: Verdict,
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl VerificationResult {
    /// Checks that `confidence` is a finite number in `[0, 1]`.
    pub fn check(&self) -> Result<(), String> {
        if self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence) {
            Ok(())
        } else {
            Err(format!(
                "confidence {} is outside [0, 1]",
                self.confidence
            ))
        }
    }
}

/// Error body of a non-2xx response.
///
/// `error` is the canonical field. `detail` is what the older FastAPI backend
/// sends and is read only when `error` is absent or unusable.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn message(&self) -> Option<String> {
        [&self.error, &self.detail]
            .into_iter()
            .flatten()
            .filter_map(|value| value.as_str())
            .map(str::trim)
            .find(|msg| !msg.is_empty())
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_all_verdicts() {
        for (raw, verdict) in [
            ("real", Verdict::Real),
            ("fake", Verdict::Fake),
            ("uncertain", Verdict::Uncertain),
        ] {
            let parsed: VerificationResult = serde_json::from_value(json!({
                "result": raw,
                "confidence": 0.5,
                "message": "ok"
            }))
            .unwrap();
            assert_eq!(parsed.result, verdict);
            assert_eq!(parsed.result.to_string(), raw);
        }
    }

    #[test]
    fn unknown_verdict_fails_to_parse() {
        let parsed = serde_json::from_value::<VerificationResult>(json!({
            "result": "satire",
            "confidence": 0.5,
            "message": ""
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_message_defaults_to_empty() {
        let parsed: VerificationResult =
            serde_json::from_value(json!({ "result": "real", "confidence": 0.8 })).unwrap();
        assert!(parsed.message.is_empty());
    }

    #[test]
    fn null_message_defaults_to_empty() {
        let parsed: VerificationResult = serde_json::from_str(
            r#"{"result":"real","confidence":0.8,"message":null}"#,
        )
        .unwrap();
        assert_eq!(parsed.result, Verdict::Real);
        assert!(parsed.message.is_empty());
    }

    #[test]
    fn confidence_range_is_checked() {
        let mut result = VerificationResult {
            result: Verdict::Real,
            confidence: 1.0,
            message: String::new(),
        };
        assert!(result.check().is_ok());
        result.confidence = 0.0;
        assert!(result.check().is_ok());
        result.confidence = 1.2;
        assert!(result.check().is_err());
        result.confidence = -0.1;
        assert!(result.check().is_err());
        result.confidence = f64::NAN;
        assert!(result.check().is_err());
    }

    #[test]
    fn error_field_preferred_over_detail() {
        let body: ErrorBody =
            serde_json::from_value(json!({ "error": "from error", "detail": "from detail" }))
                .unwrap();
        assert_eq!(body.message().as_deref(), Some("from error"));
    }

    #[test]
    fn detail_used_when_error_missing_or_blank() {
        let body: ErrorBody = serde_json::from_value(json!({ "detail": "legacy" })).unwrap();
        assert_eq!(body.message().as_deref(), Some("legacy"));

        let body: ErrorBody =
            serde_json::from_value(json!({ "error": "  ", "detail": "legacy" })).unwrap();
        assert_eq!(body.message().as_deref(), Some("legacy"));
    }

    #[test]
    fn non_string_detail_is_ignored() {
        let body: ErrorBody =
            serde_json::from_value(json!({ "detail": [{ "loc": ["body"], "msg": "bad" }] }))
                .unwrap();
        assert_eq!(body.message(), None);
    }
}
