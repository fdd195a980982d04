// crates/cert-relay-clients/src/lib.rs
// ============================================================================
// Module: Cert Relay Clients
// Description: HTTP collaborator implementations for the renewal workflow.
// Purpose: Implement the cert-relay-core interfaces over real endpoints.
// Dependencies: cert-relay-core, jsonwebtoken, reqwest, serde, url
// ============================================================================

//! ## Overview
//! One client per collaborator seam: the certificate-manager public-key
//! endpoint, the JWT notification verifier, the IAM token exchange, the ALB
//! ingress-secret control plane, and the Slack outcome notifier. Every
//! client carries an explicit config struct — base URLs are overridable for
//! tests, timeouts are bounded, and response bodies are size-capped and
//! decoded fail-closed.
//!
//! Security posture: collaborator responses are untrusted; credentials,
//! session tokens, and key material must never appear in errors or logs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod alb;
pub mod certificate_manager;
mod http;
pub mod iam;
pub mod signature;
pub mod slack;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use alb::AlbClient;
pub use alb::AlbConfig;
pub use certificate_manager::CertificateManagerClient;
pub use certificate_manager::CertificateManagerConfig;
pub use iam::IamClient;
pub use iam::IamConfig;
pub use signature::NotificationDecoder;
pub use signature::NotificationDecoderConfig;
pub use signature::VerifyAlgorithm;
pub use slack::SlackConfig;
pub use slack::SlackNotifier;
