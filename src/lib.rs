//! Workspace umbrella crate for TruthScan news verification.
//!
//! This crate stitches together intake validation, the deadline-governed
//! verification client and verdict interpretation behind one
//! [`RequestOrchestrator`], so a UI only has to feed it input and render the
//! [`ViewState`] it publishes.
//!
//! ```no_run
//! use std::sync::Arc;
//! use truthscan::{
//!     HttpVerificationClient, RequestOrchestrator, VerificationInput, VerifierConfig, ViewState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = VerifierConfig::load(None)?;
//!     let service = Arc::new(HttpVerificationClient::new(&cfg.client)?);
//!     let orchestrator = RequestOrchestrator::with_intake_config(service, cfg.intake);
//!
//!     let state = orchestrator
//!         .submit(VerificationInput::from_text("Breaking news..."))
//!         .await?;
//!     if let ViewState::Success { presentation, .. } = state {
//!         println!("{} ({}%)", presentation.headline, presentation.confidence_percent);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod orchestrator;

pub use client::{
    CancelHandle, ClientConfig, ClientError, HttpVerificationClient, TimeoutGovernor, Verdict,
    VerificationResult, VerificationService, DEFAULT_DEADLINE, GENERIC_REJECTION,
};
pub use intake::{
    IntakeConfig, LengthAdvisory, ValidatedInput, ValidationError, VerificationInput,
    VerificationRequestPayload,
};
pub use verdict::{
    interpret, ConfidenceBucket, Factor, FactorFlags, FactorNote, Presentation, Tone,
};

pub use crate::config::{ConfigLoadError, VerifierConfig};
pub use crate::orchestrator::{
    ErrorKind, OrchestratorError, RequestOrchestrator, ViewObserver, ViewState,
};
