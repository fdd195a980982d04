// crates/cert-relay-core/src/lib.rs
// ============================================================================
// Module: Cert Relay Core
// Description: Domain types, collaborator interfaces, and the renewal workflow.
// Purpose: Define the notification-verification-and-deployment core.
// Dependencies: async-trait, serde, thiserror, tokio, tracing
// ============================================================================

//! ## Overview
//! `cert-relay-core` models one certificate-renewal invocation: a signed
//! notification is verified against a freshly fetched public key, a renewed
//! certificate is pushed into a cluster's ingress secret, the update is
//! confirmed after a settle delay, and the outcome is reported exactly once.
//!
//! The crate is dependency-light by design. Collaborators (key source, token
//! exchange, control plane, notifier) are traits in [`interfaces`]; HTTP
//! implementations live in `cert-relay-clients`.
//!
//! Security posture: notification payloads are untrusted until verified, and
//! credentials, session tokens, and key material must never reach logs or
//! serialized output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::core::event::CertificateEntry;
pub use crate::core::event::EventRecord;
pub use crate::core::event::EventType;
pub use crate::core::event::NotificationPayload;
pub use crate::core::event::PublicKeyPem;
pub use crate::core::identifiers::CertificateCrn;
pub use crate::core::identifiers::ClusterId;
pub use crate::core::identifiers::CrnParseError;
pub use crate::core::identifiers::InstanceCrn;
pub use crate::core::identifiers::SecretName;
pub use crate::core::outcome::DeploymentOutcome;
pub use crate::core::outcome::OutcomeNotice;
pub use crate::core::outcome::SecretState;
pub use crate::core::outcome::SecretUpdateRequest;
pub use crate::core::response::InvocationResponse;
pub use crate::core::response::ResponseBody;
pub use crate::core::response::ResponseHeaders;
pub use crate::core::secrets::Credential;
pub use crate::core::secrets::SessionTokens;
pub use crate::interfaces::AuthError;
pub use crate::interfaces::CredentialExchanger;
pub use crate::interfaces::DeploymentRejectedError;
pub use crate::interfaces::InvalidSignatureError;
pub use crate::interfaces::KeyFetchError;
pub use crate::interfaces::NotificationDeliveryError;
pub use crate::interfaces::OutcomeNotifier;
pub use crate::interfaces::PayloadVerifier;
pub use crate::interfaces::PublicKeySource;
pub use crate::interfaces::SecretControlPlane;
pub use crate::interfaces::VerificationError;
pub use crate::interfaces::WorkflowError;
pub use crate::runtime::cancel::CancelHandle;
pub use crate::runtime::cancel::CancelSignal;
pub use crate::runtime::cancel::cancel_pair;
pub use crate::runtime::workflow::DEFAULT_SETTLE_DELAY;
pub use crate::runtime::workflow::Workflow;
pub use crate::runtime::workflow::WorkflowDisposition;
pub use crate::runtime::workflow::WorkflowInput;
pub use crate::runtime::workflow::WorkflowReport;
