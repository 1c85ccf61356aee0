use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ClientError;
use crate::governor::DEFAULT_DEADLINE;

/// Where and how the verification endpoint is called.
///
/// # Example
/// ```
/// use client::ClientConfig;
/// use std::time::Duration;
///
/// let cfg = ClientConfig {
///     base_url: "https://truthscan.example.com".into(),
///     timeout: Duration::from_secs(10),
///     ..Default::default()
/// };
/// assert_eq!(
///     cfg.endpoint_url().unwrap().as_str(),
///     "https://truthscan.example.com/api/verify"
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and optional port of the service.
    pub base_url: String,
    /// Path of the verification route, joined onto [`base_url`](Self::base_url).
    pub endpoint_path: String,
    /// Deadline for the whole call, from request start to parsed body.
    #[serde(with = "crate::serde_millis")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            endpoint_path: "/api/verify".into(),
            timeout: DEFAULT_DEADLINE,
        }
    }
}

impl ClientConfig {
    /// Resolve the absolute endpoint URL.
    pub fn endpoint_url(&self) -> Result<Url, ClientError> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidConfig(format!("base_url `{}`: {e}", self.base_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!(
                "base_url `{}` must use http or https",
                self.base_url
            )));
        }
        base.join(&self.endpoint_path).map_err(|e| {
            ClientError::InvalidConfig(format!("endpoint_path `{}`: {e}", self.endpoint_path))
        })
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig("timeout must be > 0".into()));
        }
        self.endpoint_url().map(|_| ())
    }
}
