// crates/cert-relay-core/src/core/mod.rs
// ============================================================================
// Module: Cert Relay Core Types
// Description: Domain types shared across the renewal workflow.
// Purpose: Group identifier, event, secret, outcome, and response models.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core domain types for one renewal invocation. Everything here is plain
//! data: no I/O, no clocks, no global state.

pub mod event;
pub mod identifiers;
pub mod outcome;
pub mod response;
pub mod secrets;
