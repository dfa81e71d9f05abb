//! Application configuration
//!
//! Loaded from an optional TOML file. Every section and field has a default,
//! so an empty file (or no file at all) gives a working demo setup.
//!
//! ```toml
//! [server]
//! port = 5000
//!
//! [review]
//! officer_id = "Officer ID: XYZ789"
//!
//! [verifier]
//! suspicion_rate = 0.33
//! seed = 42
//!
//! [audit]
//! sink = "file"
//! path = "ledger.jsonl"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::random::RandomPolicy;
use crate::core::services::intake::DEFAULT_BENEFICIARY;

/// Officer identifier stamped on decisions that do not name one
pub const DEFAULT_OFFICER_ID: &str = "Officer ID: XYZ789";

/// Errors while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or inconsistent
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Intake normalization
    pub intake: IntakeConfig,
    /// Review gate settings
    pub review: ReviewConfig,
    /// Placeholder verifier settings
    pub verifier: VerifierConfig,
    /// Audit trail destination
    pub audit: AuditConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Number of request worker threads
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            workers: 4,
        }
    }
}

/// Intake normalization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Beneficiary used when a record has none
    pub default_beneficiary: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            default_beneficiary: DEFAULT_BENEFICIARY.to_string(),
        }
    }
}

/// Review gate settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Officer stamped on decisions that do not name one
    pub officer_id: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            officer_id: DEFAULT_OFFICER_ID.to_string(),
        }
    }
}

/// Placeholder verifier settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Probability of a Suspicious verdict
    pub suspicion_rate: f64,
    /// Confidence range for Suspicious verdicts
    pub suspicious_confidence: [f64; 2],
    /// Confidence range for Verified verdicts
    pub verified_confidence: [f64; 2],
    /// Fixed RNG seed for reproducible verdicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        let policy = RandomPolicy::default();
        Self {
            suspicion_rate: policy.suspicion_rate,
            suspicious_confidence: policy.suspicious_confidence,
            verified_confidence: policy.verified_confidence,
            seed: None,
        }
    }
}

impl VerifierConfig {
    /// Draw parameters for the random verifier
    #[must_use]
    pub const fn policy(&self) -> RandomPolicy {
        RandomPolicy {
            suspicion_rate: self.suspicion_rate,
            suspicious_confidence: self.suspicious_confidence,
            verified_confidence: self.verified_confidence,
        }
    }
}

/// Where audit records go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditSinkKind {
    /// Log line on the `ledger` target
    #[default]
    Log,
    /// Hash-chained JSON-lines file
    File,
}

impl std::fmt::Display for AuditSinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Log => write!(f, "log"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Audit trail settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Sink kind
    pub sink: AuditSinkKind,
    /// Ledger path, required for the file sink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Deliver records on a worker thread instead of inline
    pub background: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            sink: AuditSinkKind::Log,
            path: None,
            background: true,
        }
    }
}

impl AppConfig {
    /// Load config from a file, or defaults when no path is given
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            return Err(ConfigError::Invalid("server.workers must be at least 1".to_string()));
        }
        if self.review.officer_id.trim().is_empty() {
            return Err(ConfigError::Invalid("review.officer_id cannot be empty".to_string()));
        }
        if self.intake.default_beneficiary.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "intake.default_beneficiary cannot be empty".to_string(),
            ));
        }
        self.verifier
            .policy()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("verifier.{e}")))?;
        if self.audit.sink == AuditSinkKind::File && self.audit.path.is_none() {
            return Err(ConfigError::Invalid(
                "audit.path is required for the file sink".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
