//! Layered configuration for TruthScan
//!
//! One file holds every knob: intake thresholds, the service endpoint and its
//! deadline, and logging. Values are layered in this order, later wins:
//!
//! 1. built-in defaults
//! 2. a config file (`truthscan.{yaml,toml,json}` in the working directory,
//!    or an explicit path)
//! 3. environment variables prefixed `TRUTHSCAN`, with `__` between levels
//!    (`TRUTHSCAN__CLIENT__TIMEOUT=10000`)
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! log_level: "info"
//! log_json: false
//!
//! intake:
//!   long_text_threshold: 5000
//!
//! client:
//!   base_url: "http://127.0.0.1:5000"
//!   endpoint_path: "/api/verify"
//!   timeout: 30000   # milliseconds
//! ```

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use client::ClientConfig;
use intake::IntakeConfig;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TRUTHSCAN";
/// Base name of the optional config file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "truthscan";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to load config: {0}")]
    Source(#[from] config::ConfigError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Configuration format version
    pub version: String,
    /// `tracing` env-filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Emit logs as JSON lines.
    pub log_json: bool,
    pub intake: IntakeConfig,
    pub client: ClientConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            version: "1.0".into(),
            log_level: "info".into(),
            log_json: false,
            intake: IntakeConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

impl VerifierConfig {
    /// Load from an optional file plus environment overrides.
    ///
    /// With `path = None` a missing `truthscan.*` file is fine. An explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        let builder = Config::builder().add_source(file).add_source(env_source());
        Self::finish(builder.build()?)
    }

    /// Parse YAML text, then apply environment overrides.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let builder = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .add_source(env_source());
        Self::finish(builder.build()?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.intake
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        self.client
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;

        if self.log_level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "log_level must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn finish(raw: Config) -> Result<Self, ConfigLoadError> {
        let cfg: VerifierConfig = raw.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn defaults_are_valid() {
        let cfg = VerifierConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.client.base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.intake.long_text_threshold, 5000);
    }

    #[test]
    fn yaml_overrides_nested_fields() {
        let cfg = VerifierConfig::from_yaml(
            r#"
version: "1"
log_level: "debug"
intake:
  long_text_threshold: 200
client:
  base_url: "https://verify.example.com"
  timeout: 2500
"#,
        )
        .unwrap();

        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.intake.long_text_threshold, 200);
        assert_eq!(cfg.client.timeout, Duration::from_millis(2500));
        assert_eq!(cfg.client.endpoint_path, "/api/verify");
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let err = VerifierConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn invalid_sections_fail_validation() {
        let err = VerifierConfig::from_yaml("intake:\n  long_text_threshold: 0\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));

        let err = VerifierConfig::from_yaml("client:\n  timeout: 0\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(msg) if msg.contains("timeout")));

        let err =
            VerifierConfig::from_yaml("client:\n  base_url: \"ftp://example.com\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "client:\n  base_url: \"http://10.0.0.5:9000\"").unwrap();

        let cfg = VerifierConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.client.base_url, "http://10.0.0.5:9000");
        assert_eq!(
            cfg.client.endpoint_url().unwrap().as_str(),
            "http://10.0.0.5:9000/api/verify"
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            VerifierConfig::load(Some(&missing)),
            Err(ConfigLoadError::Source(_))
        ));
    }
}
