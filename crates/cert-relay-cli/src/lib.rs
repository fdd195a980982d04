// crates/cert-relay-cli/src/lib.rs
// ============================================================================
// Module: Cert Relay CLI Library
// Description: Parameter decoding, configuration, and invocation running.
// Purpose: Keep the binary thin and the invocation path testable.
// Dependencies: cert-relay-core, cert-relay-clients, clap, serde, toml
// ============================================================================

//! ## Overview
//! The binary reads one JSON parameter object, optionally a TOML
//! configuration file, and executes one renewal invocation. Everything the
//! binary does beyond argument parsing lives here so integration tests can
//! drive the full invocation path in-process.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod params;
pub mod runner;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::config::ConfigError;
pub use crate::config::RelayConfig;
pub use crate::params::InvocationParams;
pub use crate::params::ParamsError;
pub use crate::runner::run_invocation;
