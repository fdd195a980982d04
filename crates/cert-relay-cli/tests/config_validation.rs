// crates/cert-relay-cli/tests/config_validation.rs
// ============================================================================
// Module: Configuration Validation Tests
// Description: TOML parsing and range validation for relay configuration.
// Purpose: Verify defaults, strict schema handling, and fail-closed ranges.
// Dependencies: cert-relay-cli, cert-relay-clients, cert-relay-core
// ============================================================================

//! ## Overview
//! Configuration is optional but strict: these tests pin the defaults, the
//! rejection of unknown keys, and the range checks that keep an operator
//! typo from silently disabling timeouts or stretching the settle wait.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Panic-based assertions are permitted in tests."
)]

use cert_relay_cli::ConfigError;
use cert_relay_cli::RelayConfig;
use cert_relay_cli::config::AlgorithmName;
use cert_relay_clients::VerifyAlgorithm;
use cert_relay_core::DEFAULT_SETTLE_DELAY;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn empty_input_yields_the_defaults() {
    let config = RelayConfig::from_toml("").unwrap();
    assert_eq!(config, RelayConfig::default());
    assert_eq!(config.timing.request_timeout_ms, 10_000);
    assert_eq!(config.timing.settle_delay_secs, DEFAULT_SETTLE_DELAY.as_secs());
    assert!(config.endpoints.certificate_manager_base_url.is_none());
    assert_eq!(config.verify.algorithm, AlgorithmName::Rs256);
}

#[test]
fn full_configuration_parses() {
    let config = RelayConfig::from_toml(
        r#"
        [endpoints]
        certificate_manager_base_url = "https://staging.certs.example.test"
        iam_token_url = "https://staging.iam.example.test/identity/token"
        alb_base_url = "https://staging.containers.example.test/global"

        [timing]
        request_timeout_ms = 5000
        settle_delay_secs = 120

        [verify]
        algorithm = "eddsa"
        "#,
    )
    .unwrap();
    assert_eq!(config.timing.request_timeout_ms, 5_000);
    assert_eq!(config.timing.settle_delay_secs, 120);
    assert_eq!(
        config.endpoints.iam_token_url.unwrap().as_str(),
        "https://staging.iam.example.test/identity/token"
    );
    assert_eq!(VerifyAlgorithm::from(config.verify.algorithm), VerifyAlgorithm::EdDsa);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = RelayConfig::from_toml(
        r#"
        [timing]
        request_timeout = 5000
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_request_timeout_is_rejected() {
    let err = RelayConfig::from_toml(
        r#"
        [timing]
        request_timeout_ms = 0
        "#,
    )
    .unwrap_err();
    match err {
        ConfigError::InvalidRequestTimeout {
            value,
        } => assert_eq!(value, 0),
        other => panic!("expected InvalidRequestTimeout, got {other}"),
    }
}

#[test]
fn oversized_request_timeout_is_rejected() {
    let err = RelayConfig::from_toml(
        r#"
        [timing]
        request_timeout_ms = 600000
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRequestTimeout { .. }));
}

#[test]
fn oversized_settle_delay_is_rejected() {
    let err = RelayConfig::from_toml(
        r#"
        [timing]
        settle_delay_secs = 86400
        "#,
    )
    .unwrap_err();
    match err {
        ConfigError::InvalidSettleDelay {
            value,
        } => assert_eq!(value, 86_400),
        other => panic!("expected InvalidSettleDelay, got {other}"),
    }
}

#[test]
fn zero_settle_delay_is_permitted() {
    let config = RelayConfig::from_toml(
        r#"
        [timing]
        settle_delay_secs = 0
        "#,
    )
    .unwrap();
    assert_eq!(config.timing.settle_delay_secs, 0);
}

#[test]
fn invalid_algorithm_name_is_rejected() {
    let err = RelayConfig::from_toml(
        r#"
        [verify]
        algorithm = "hs256"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
