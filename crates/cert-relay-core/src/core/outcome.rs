// crates/cert-relay-core/src/core/outcome.rs
// ============================================================================
// Module: Cert Relay Deployment Outcomes
// Description: Update requests, control-plane secret states, and outcomes.
// Purpose: Classify deployment progress into stable terminal states.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! [`SecretUpdateRequest`] is the target state built once an event is
//! confirmed as a renewal. [`SecretState`] is the control-plane vocabulary
//! returned by the verification read, and [`DeploymentOutcome`] is the
//! terminal classification consumed by the notifier and the invocation
//! result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CertificateCrn;
use crate::core::identifiers::ClusterId;
use crate::core::identifiers::SecretName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Control-plane state meaning the secret update has been applied.
pub const APPLIED_SECRET_STATE: &str = "updated";

// ============================================================================
// SECTION: Update Request
// ============================================================================

/// Target state for the ingress secret.
///
/// # Invariants
/// - Built once per invocation, only after the event is confirmed as a
///   renewal; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretUpdateRequest {
    /// Renewed certificate resource reference.
    pub cert_crn: CertificateCrn,
    /// Target cluster identifier.
    pub cluster_id: ClusterId,
    /// Ingress secret name inside the cluster.
    pub secret_name: SecretName,
}

// ============================================================================
// SECTION: Secret State
// ============================================================================

/// Per-secret state reported by the control plane.
///
/// # Invariants
/// - Opaque control-plane vocabulary; only [`APPLIED_SECRET_STATE`] is
///   interpreted, everything else is a non-applied state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretState(String);

impl SecretState {
    /// Wraps a raw control-plane state string.
    #[must_use]
    pub fn new(state: impl Into<String>) -> Self {
        Self(state.into())
    }

    /// Returns true when the state signals an applied update.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.0 == APPLIED_SECRET_STATE
    }

    /// Returns the raw state string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Deployment Outcome
// ============================================================================

/// Terminal status of the secret update.
///
/// # Invariants
/// - Variants are stable for serialization and notification wording.
/// - [`DeploymentOutcome::Accepted`] is transitional: the control plane
///   acknowledged the update but propagation happens out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentOutcome {
    /// Control plane accepted the asynchronous update.
    Accepted,
    /// Control plane rejected the update request.
    Rejected,
    /// Verification read observed the applied state.
    Applied,
    /// Verification read observed a state other than applied.
    NotYetApplied,
    /// Verification read itself failed.
    VerifyFailed,
    /// Verification was skipped because the invocation was cancelled during
    /// the settle wait; the deployment itself was triggered successfully.
    VerificationSkipped,
}

impl DeploymentOutcome {
    /// Returns true when the outcome counts as invocation success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Applied | Self::VerificationSkipped)
    }
}

// ============================================================================
// SECTION: Outcome Notice
// ============================================================================

/// Outcome classification plus human-readable context for the notifier.
///
/// # Invariants
/// - `detail` is user-facing and must never contain tokens, credentials, or
///   key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeNotice {
    /// Terminal outcome being reported.
    pub outcome: DeploymentOutcome,
    /// Target cluster identifier.
    pub cluster_id: ClusterId,
    /// Ingress secret name.
    pub secret_name: SecretName,
    /// Human-readable cause or confirmation.
    pub detail: String,
}

impl OutcomeNotice {
    /// Returns true when the notice reports a successful outcome.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
