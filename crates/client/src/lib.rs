//! TruthScan Verification Client
//!
//! Sends one verification request and maps whatever comes back (a verdict,
//! a rejection, garbage, silence) into a typed [`ClientError`] or a
//! [`VerificationResult`].
//!
//! Two pieces:
//!
//! - **[`TimeoutGovernor`]** - races any future against a single deadline
//!   (30 s by default) and an optional [`CancelHandle`]. The loser is dropped.
//! - **[`HttpVerificationClient`]** - the reqwest implementation of
//!   [`VerificationService`], one POST per submission, no retries.
//!
//! ## Wire contract
//!
//! `POST /api/verify` with `{"text"?: string, "url"?: string}`. A 2xx body is
//! `{"result": "real"|"fake"|"uncertain", "confidence": 0..1, "message": string}`.
//! Error bodies carry their message under `error`; the older backend used
//! `detail`, which is still read as a fallback.
//!
//! ## Example
//!
//! ```no_run
//! use client::{CancelHandle, ClientConfig, HttpVerificationClient, VerificationService};
//! use intake::{build, validate, VerificationInput};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = HttpVerificationClient::new(&ClientConfig::default()).unwrap();
//!     let payload = build(validate(VerificationInput::from_text("Some article")).unwrap());
//!     match client.submit(&payload, &CancelHandle::new()).await {
//!         Ok(result) => println!("{} ({:.2})", result.result, result.confidence),
//!         Err(err) => eprintln!("{}", err.user_message()),
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod governor;
pub mod types;

mod http;
mod serde_millis;

use async_trait::async_trait;

use intake::VerificationRequestPayload;

pub use crate::config::ClientConfig;
pub use crate::error::{ClientError, GENERIC_REJECTION};
pub use crate::governor::{CancelHandle, Interrupted, TimeoutGovernor, DEFAULT_DEADLINE};
pub use crate::http::HttpVerificationClient;
pub use crate::types::{Verdict, VerificationResult};

/// Anything that can answer a verification request.
///
/// Implementations must honor `cancel` and must not retry on their own.
#[async_trait]
pub trait VerificationService: Send + Sync {
    async fn submit(
        &self,
        payload: &VerificationRequestPayload,
        cancel: &CancelHandle,
    ) -> Result<VerificationResult, ClientError>;
}
