use thiserror::Error;

use crate::governor::Interrupted;

/// Fallback message when a rejection carries no readable reason.
pub const GENERIC_REJECTION: &str = "An error occurred during verification";

/// Failures of a single verification call.
///
/// `Display` is meant for logs. Use [`ClientError::user_message`] for the text
/// shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No response arrived before the deadline.
    #[error("request timed out after {after_ms} ms")]
    TimedOut { after_ms: u64 },
    /// The caller tripped the cancel hook.
    #[error("request cancelled")]
    Cancelled,
    /// DNS, connect, TLS or mid-body transport failure.
    #[error("verification service unreachable: {0}")]
    Unreachable(String),
    /// Non-2xx response.
    #[error("verification service rejected the request ({status}): {message}")]
    ServiceRejected { status: u16, message: String },
    /// 2xx response whose body is not a valid verification result.
    #[error("malformed verification response: {0}")]
    MalformedResponse(String),
    /// Endpoint or HTTP client could not be set up.
    #[error("invalid client config: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Single human-readable line describing the failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::TimedOut { .. } => "Request timed out. Please try again.".into(),
            ClientError::Cancelled => "Verification was cancelled.".into(),
            ClientError::Unreachable(_) => {
                "Failed to connect to the verification service. Please try again later.".into()
            }
            ClientError::ServiceRejected { message, .. } => message.clone(),
            ClientError::MalformedResponse(_) => {
                "The verification service returned an unreadable response. Please try again."
                    .into()
            }
            ClientError::InvalidConfig(_) => {
                "The verification service is not configured correctly.".into()
            }
        }
    }
}

impl From<Interrupted> for ClientError {
    fn from(value: Interrupted) -> Self {
        match value {
            Interrupted::TimedOut(after) => ClientError::TimedOut {
                after_ms: after.as_millis() as u64,
            },
            Interrupted::Cancelled => ClientError::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn timeout_message_for_user() {
        let err: ClientError = Interrupted::TimedOut(Duration::from_secs(30)).into();
        assert_eq!(err, ClientError::TimedOut { after_ms: 30_000 });
        assert!(err.user_message().starts_with("Request timed out"));
        assert!(err.to_string().contains("30000 ms"));
    }

    #[test]
    fn rejection_surfaces_service_message() {
        let err = ClientError::ServiceRejected {
            status: 400,
            message: "Could not extract text from the provided URL".into(),
        };
        assert_eq!(
            err.user_message(),
            "Could not extract text from the provided URL"
        );
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn unreachable_hides_transport_detail_from_user() {
        let err = ClientError::Unreachable("tcp connect error: Connection refused".into());
        assert!(!err.user_message().contains("tcp"));
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn cancelled_converts() {
        let err: ClientError = Interrupted::Cancelled.into();
        assert_eq!(err, ClientError::Cancelled);
    }
}
