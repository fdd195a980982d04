// crates/cert-relay-core/src/interfaces/mod.rs
// ============================================================================
// Module: Cert Relay Collaborator Interfaces
// Description: Traits and error taxonomy for external collaborators.
// Purpose: Decouple the workflow from HTTP implementations; fail closed.
// Dependencies: async-trait, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The workflow talks to five collaborators: a public-key source, a payload
//! verifier, a credential exchanger, the ingress-secret control plane, and
//! an outcome notifier. Each seam is a trait here with its own error type;
//! `cert-relay-clients` provides the HTTP implementations and tests provide
//! counting stubs.
//!
//! Every error is terminal for the current invocation — nothing here is
//! retried. Each error exposes `status()`: the upstream status when one was
//! observed, 500 otherwise. Error messages are user-facing and must never
//! contain tokens, credentials, or key material.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::core::event::EventRecord;
use crate::core::event::NotificationPayload;
use crate::core::event::PublicKeyPem;
use crate::core::identifiers::InstanceCrn;
use crate::core::outcome::OutcomeNotice;
use crate::core::outcome::SecretState;
use crate::core::outcome::SecretUpdateRequest;
use crate::core::response::STATUS_INTERNAL;
use crate::core::secrets::Credential;
use crate::core::secrets::SessionTokens;

// ============================================================================
// SECTION: Key Resolution
// ============================================================================

/// Errors produced while fetching the notification public key.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `body_excerpt` is bounded by the client and safe to surface.
#[derive(Debug, Error)]
pub enum KeyFetchError {
    /// The key endpoint answered with a non-OK status.
    #[error("public key fetch returned status {status}: {body_excerpt}")]
    UpstreamStatus {
        /// Observed upstream status code.
        status: u16,
        /// Bounded excerpt of the response body for diagnostics.
        body_excerpt: String,
    },
    /// The request never produced a usable response.
    #[error("public key fetch failed in transport: {0}")]
    Transport(String),
    /// The 200 response body did not decode to the expected shape.
    #[error("public key response could not be decoded: {0}")]
    InvalidResponse(String),
}

impl KeyFetchError {
    /// Returns the status code to surface for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UpstreamStatus { status, .. } => *status,
            Self::Transport(_) | Self::InvalidResponse(_) => STATUS_INTERNAL,
        }
    }
}

/// Fetches the current signing public key for a service instance.
///
/// Key fetch failure aborts the whole invocation: nothing downstream can be
/// trusted without the key, so implementations must not retry.
#[async_trait]
pub trait PublicKeySource: Send + Sync {
    /// Fetches the instance's current notification public key in PEM format.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFetchError`] on any non-OK status or transport failure.
    async fn fetch_public_key(&self, instance: &InstanceCrn)
    -> Result<PublicKeyPem, KeyFetchError>;
}

// ============================================================================
// SECTION: Payload Verification
// ============================================================================

/// Errors produced while verifying a notification payload.
///
/// # Invariants
/// - A signature fault is a security fault, never a transient error; it is
///   never retried and never downgraded.
/// - Messages never echo payload contents or key material.
#[derive(Debug, Error)]
pub enum InvalidSignatureError {
    /// Signature verification failed: wrong key, tampered payload, or
    /// expired claims.
    #[error("notification signature verification failed")]
    Verification,
    /// The claims decoded but violate the event contract.
    #[error("notification claims rejected: {0}")]
    Claims(String),
}

impl InvalidSignatureError {
    /// Returns the status code to surface for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        STATUS_INTERNAL
    }
}

/// Validates and decodes a notification payload against a public key.
pub trait PayloadVerifier: Send + Sync {
    /// Verifies the payload signature and decodes the embedded event.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSignatureError`] when verification or claim
    /// validation fails.
    fn verify(
        &self,
        payload: &NotificationPayload,
        key: &PublicKeyPem,
    ) -> Result<EventRecord, InvalidSignatureError>;
}

// ============================================================================
// SECTION: Credential Exchange
// ============================================================================

/// Errors produced during the credential-to-token exchange.
///
/// # Invariants
/// - The numeric status distinguishes credential misconfiguration (4xx)
///   from provider outage (5xx).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint answered with a non-success status.
    #[error("token exchange returned status {status}")]
    UpstreamStatus {
        /// Observed upstream status code.
        status: u16,
    },
    /// The request never produced a usable response.
    #[error("token exchange failed in transport: {0}")]
    Transport(String),
    /// The 200 response body did not decode to the expected shape.
    #[error("token response could not be decoded: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    /// Returns the status code to surface for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UpstreamStatus { status } => *status,
            Self::Transport(_) | Self::InvalidResponse(_) => STATUS_INTERNAL,
        }
    }
}

/// Exchanges a long-lived credential for short-lived session tokens.
#[async_trait]
pub trait CredentialExchanger: Send + Sync {
    /// Mints an access/refresh token pair from the credential.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on any non-success status or transport failure.
    async fn exchange(&self, credential: &Credential) -> Result<SessionTokens, AuthError>;
}

// ============================================================================
// SECTION: Secret Control Plane
// ============================================================================

/// Errors produced when the control plane rejects the secret update.
///
/// # Invariants
/// - Terminal for the invocation; retry policy, if any, belongs to the
///   invocation's caller.
#[derive(Debug, Error)]
pub enum DeploymentRejectedError {
    /// The control plane answered with a non-accepted status.
    #[error("alb secret update rejected with status {status}")]
    UpstreamStatus {
        /// Observed upstream status code.
        status: u16,
    },
    /// The request never produced a usable response.
    #[error("alb secret update failed in transport: {0}")]
    Transport(String),
}

impl DeploymentRejectedError {
    /// Returns the status code to surface for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UpstreamStatus { status } => *status,
            Self::Transport(_) => STATUS_INTERNAL,
        }
    }
}

/// Errors produced while confirming the secret update.
///
/// # Invariants
/// - Covers both the failed read and the observed non-applied state; the
///   workflow classifies which one occurred.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The state query answered with a non-OK status.
    #[error("alb secret query returned status {status}")]
    UpstreamStatus {
        /// Observed upstream status code.
        status: u16,
    },
    /// The request never produced a usable response.
    #[error("alb secret query failed in transport: {0}")]
    Transport(String),
    /// The 200 response body did not decode to the expected shape.
    #[error("alb secret query response could not be decoded: {0}")]
    InvalidResponse(String),
    /// The query returned no secret entries to classify.
    #[error("alb secret query returned no secrets")]
    Empty,
    /// The secret settled in a state other than applied.
    #[error("alb secret state is '{state}', expected 'updated'")]
    NotApplied {
        /// Observed control-plane state.
        state: String,
    },
}

impl VerificationError {
    /// Returns the status code to surface for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UpstreamStatus { status } => *status,
            Self::Transport(_) | Self::InvalidResponse(_) | Self::Empty | Self::NotApplied { .. } => {
                STATUS_INTERNAL
            }
        }
    }
}

/// Cluster ingress-secret control plane.
///
/// The update call is asynchronous on the control-plane side: acceptance is
/// acknowledged immediately while propagation to the ingress controller
/// happens out-of-band, so a separate state read confirms the result.
#[async_trait]
pub trait SecretControlPlane: Send + Sync {
    /// Issues the authenticated secret update request.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentRejectedError`] on any non-accepted response.
    async fn apply_update(
        &self,
        tokens: &SessionTokens,
        request: &SecretUpdateRequest,
    ) -> Result<(), DeploymentRejectedError>;

    /// Reads the current per-secret state for the same cluster and secret.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError`] when the query fails or the response
    /// cannot be decoded.
    async fn read_secret_state(
        &self,
        tokens: &SessionTokens,
        request: &SecretUpdateRequest,
    ) -> Result<SecretState, VerificationError>;
}

// ============================================================================
// SECTION: Outcome Notification
// ============================================================================

/// Errors produced while delivering an outcome notification.
///
/// # Invariants
/// - Delivery failure never masks the deployment outcome; it is surfaced as
///   a secondary error only.
#[derive(Debug, Error)]
pub enum NotificationDeliveryError {
    /// The webhook answered with a non-success status.
    #[error("notification delivery returned status {status}")]
    UpstreamStatus {
        /// Observed upstream status code.
        status: u16,
    },
    /// The request never produced a usable response.
    #[error("notification delivery failed in transport: {0}")]
    Transport(String),
}

impl NotificationDeliveryError {
    /// Returns the status code to surface for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UpstreamStatus { status } => *status,
            Self::Transport(_) => STATUS_INTERNAL,
        }
    }
}

/// Delivers terminal outcome reports to an external channel.
#[async_trait]
pub trait OutcomeNotifier: Send + Sync {
    /// Posts exactly one message for the given terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDeliveryError`] when delivery fails.
    async fn notify(&self, notice: &OutcomeNotice) -> Result<(), NotificationDeliveryError>;
}

// ============================================================================
// SECTION: Workflow Error
// ============================================================================

/// Uniform error surfaced by the workflow for any failed step.
///
/// # Invariants
/// - Variants are stable and map one-to-one onto the failing step.
/// - `status()` propagates the upstream status when one was observed and
///   defaults to 500.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Key resolution failed.
    #[error(transparent)]
    KeyFetch(#[from] KeyFetchError),
    /// Signature verification failed.
    #[error(transparent)]
    InvalidSignature(#[from] InvalidSignatureError),
    /// Credential exchange failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The control plane rejected the deployment.
    #[error(transparent)]
    DeploymentRejected(#[from] DeploymentRejectedError),
    /// Deployment verification failed.
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl WorkflowError {
    /// Returns the status code to surface for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::KeyFetch(err) => err.status(),
            Self::InvalidSignature(err) => err.status(),
            Self::Auth(err) => err.status(),
            Self::DeploymentRejected(err) => err.status(),
            Self::Verification(err) => err.status(),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::AuthError;
    use super::KeyFetchError;
    use super::VerificationError;
    use super::WorkflowError;

    #[test]
    fn upstream_statuses_propagate() {
        let err = WorkflowError::from(KeyFetchError::UpstreamStatus {
            status: 404,
            body_excerpt: "not found".to_string(),
        });
        assert_eq!(err.status(), 404);
        let err = WorkflowError::from(AuthError::UpstreamStatus {
            status: 400,
        });
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn transport_and_classification_failures_default_to_500() {
        let err = WorkflowError::from(KeyFetchError::Transport("timed out".to_string()));
        assert_eq!(err.status(), 500);
        let err = WorkflowError::from(VerificationError::NotApplied {
            state: "creating".to_string(),
        });
        assert_eq!(err.status(), 500);
    }
}
