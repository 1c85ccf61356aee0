use std::time::Instant;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info, warn};

use intake::VerificationRequestPayload;

use crate::config::ClientConfig;
use crate::error::{ClientError, GENERIC_REJECTION};
use crate::governor::{CancelHandle, TimeoutGovernor};
use crate::types::{ErrorBody, VerificationResult};
use crate::VerificationService;

/// reqwest-backed [`VerificationService`].
///
/// One POST per [`submit`](VerificationService::submit), with the whole
/// exchange (connect, send, read body) under the configured deadline.
#[derive(Debug, Clone)]
pub struct HttpVerificationClient {
    http: reqwest::Client,
    endpoint: Url,
    governor: TimeoutGovernor,
}

impl HttpVerificationClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self, ClientError> {
        cfg.validate()?;
        let http = reqwest::Client::builder().build().map_err(|e| {
            ClientError::InvalidConfig(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self::with_http_client(
            http,
            cfg.endpoint_url()?,
            TimeoutGovernor::new(cfg.timeout),
        ))
    }

    /// Reuse an existing reqwest client (shared connection pool).
    pub fn with_http_client(
        http: reqwest::Client,
        endpoint: Url,
        governor: TimeoutGovernor,
    ) -> Self {
        Self {
            http,
            endpoint,
            governor,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn governor(&self) -> &TimeoutGovernor {
        &self.governor
    }

    async fn post(
        &self,
        payload: &VerificationRequestPayload,
    ) -> Result<VerificationResult, ClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Unreachable(format!("failed reading body: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.message())
                .unwrap_or_else(|| GENERIC_REJECTION.to_string());
            return Err(ClientError::ServiceRejected {
                status: status.as_u16(),
                message,
            });
        }

        let result: VerificationResult = serde_json::from_slice(&body)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid JSON response: {e}")))?;
        result.check().map_err(ClientError::MalformedResponse)?;
        Ok(result)
    }
}

#[async_trait]
impl VerificationService for HttpVerificationClient {
    async fn submit(
        &self,
        payload: &VerificationRequestPayload,
        cancel: &CancelHandle,
    ) -> Result<VerificationResult, ClientError> {
        let start = Instant::now();
        debug!(
            endpoint = %self.endpoint,
            has_text = payload.text.is_some(),
            has_url = payload.url.is_some(),
            "verify_request"
        );

        let outcome = match self.governor.run_with_cancel(cancel, self.post(payload)).await {
            Ok(result) => result,
            Err(interrupted) => Err(interrupted.into()),
        };

        let elapsed_ms = start.elapsed().as_millis();
        match &outcome {
            Ok(result) => info!(
                verdict = %result.result,
                confidence = result.confidence,
                elapsed_ms,
                "verify_success"
            ),
            Err(err) => warn!(error = %err, elapsed_ms, "verify_failure"),
        }
        outcome
    }
}
