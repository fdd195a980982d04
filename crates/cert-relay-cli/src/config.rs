// crates/cert-relay-cli/src/config.rs
// ============================================================================
// Module: Relay Configuration
// Description: Optional TOML configuration for endpoints and timing.
// Purpose: Validate operator-supplied overrides before any network call.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is optional: with no file, every endpoint is the production
//! default and timing follows the built-in settle delay. A file can override
//! endpoints (mainly for staging), tighten or relax the request timeout, and
//! change the settle delay. Unknown keys and out-of-range values are
//! rejected, never silently ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use cert_relay_clients::VerifyAlgorithm;
use cert_relay_core::DEFAULT_SETTLE_DELAY;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Upper bound on the request timeout.
const MAX_REQUEST_TIMEOUT_MS: u64 = 120_000;

/// Upper bound on the settle delay.
const MAX_SETTLE_DELAY_SECS: u64 = 3_600;

/// Default request timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default settle delay in seconds, shared with the workflow.
const DEFAULT_SETTLE_DELAY_SECS: u64 = DEFAULT_SETTLE_DELAY.as_secs();

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("configuration file could not be read: {0}")]
    Read(String),
    /// The file is not valid TOML or violates the schema.
    #[error("configuration could not be parsed: {0}")]
    Parse(String),
    /// The request timeout is zero or above the hard limit.
    #[error("request_timeout_ms must be between 1 and {MAX_REQUEST_TIMEOUT_MS}, got {value}")]
    InvalidRequestTimeout {
        /// Rejected value.
        value: u64,
    },
    /// The settle delay is above the hard limit.
    #[error("settle_delay_secs must be at most {MAX_SETTLE_DELAY_SECS}, got {value}")]
    InvalidSettleDelay {
        /// Rejected value.
        value: u64,
    },
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Signature algorithm name accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmName {
    /// RSA with SHA-256.
    #[default]
    Rs256,
    /// Ed25519.
    Eddsa,
}

impl From<AlgorithmName> for VerifyAlgorithm {
    fn from(value: AlgorithmName) -> Self {
        match value {
            AlgorithmName::Rs256 => Self::Rs256,
            AlgorithmName::Eddsa => Self::EdDsa,
        }
    }
}

/// Endpoint overrides; unset entries use production defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EndpointConfig {
    /// Certificate-manager base URL override.
    pub certificate_manager_base_url: Option<Url>,
    /// IAM token endpoint override.
    pub iam_token_url: Option<Url>,
    /// Container-service base URL override.
    pub alb_base_url: Option<Url>,
}

/// Timing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TimingConfig {
    /// Per-request timeout for collaborator calls, in milliseconds.
    pub request_timeout_ms: u64,
    /// Delay before the single verification read, in seconds.
    pub settle_delay_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            settle_delay_secs: DEFAULT_SETTLE_DELAY_SECS,
        }
    }
}

/// Signature verification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VerifyConfig {
    /// Accepted signature algorithm.
    pub algorithm: AlgorithmName,
}

/// Top-level relay configuration.
///
/// # Invariants
/// - A default-constructed configuration is always valid.
/// - Loaded configurations are validated before use; callers never see an
///   out-of-range value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RelayConfig {
    /// Endpoint overrides.
    pub endpoints: EndpointConfig,
    /// Timing configuration.
    pub timing: TimingConfig,
    /// Signature verification configuration.
    pub verify: VerifyConfig,
}

impl RelayConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        Self::from_toml(&raw)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for any out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.request_timeout_ms == 0
            || self.timing.request_timeout_ms > MAX_REQUEST_TIMEOUT_MS
        {
            return Err(ConfigError::InvalidRequestTimeout {
                value: self.timing.request_timeout_ms,
            });
        }
        if self.timing.settle_delay_secs > MAX_SETTLE_DELAY_SECS {
            return Err(ConfigError::InvalidSettleDelay {
                value: self.timing.settle_delay_secs,
            });
        }
        Ok(())
    }
}
