// crates/cert-relay-clients/src/signature.rs
// ============================================================================
// Module: Notification Signature Verifier
// Description: JWT decoding against the freshly fetched public key.
// Purpose: Admit only payloads signed by the instance's current key.
// Dependencies: cert-relay-core, jsonwebtoken
// ============================================================================

//! ## Overview
//! The notification payload is a signed JWT whose claims carry the lifecycle
//! event. The decoder pins a single algorithm per deployment, parses the key
//! for that algorithm, and verifies signature and expiry in one step. Claim
//! faults and signature faults are reported distinctly, but both are
//! terminal — a signature fault is a security fault and is never retried.
//!
//! Security posture: error messages never echo payload contents or key
//! material.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use cert_relay_core::EventRecord;
use cert_relay_core::InvalidSignatureError;
use cert_relay_core::NotificationPayload;
use cert_relay_core::PayloadVerifier;
use cert_relay_core::PublicKeyPem;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use jsonwebtoken::errors::ErrorKind;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Signature algorithm the decoder accepts.
///
/// # Invariants
/// - Exactly one algorithm is admitted per decoder; the token's own header
///   never widens the accepted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyAlgorithm {
    /// RSA with SHA-256, the production signing algorithm.
    #[default]
    Rs256,
    /// Ed25519, used where the signing side runs EdDSA.
    EdDsa,
}

impl VerifyAlgorithm {
    /// Maps to the underlying JWT algorithm identifier.
    #[must_use]
    const fn jwt_algorithm(self) -> Algorithm {
        match self {
            Self::Rs256 => Algorithm::RS256,
            Self::EdDsa => Algorithm::EdDSA,
        }
    }
}

/// Configuration for the notification decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationDecoderConfig {
    /// Accepted signature algorithm.
    pub algorithm: VerifyAlgorithm,
}

// ============================================================================
// SECTION: Decoder
// ============================================================================

/// Verifies notification payloads and extracts the embedded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationDecoder {
    /// Decoder configuration.
    config: NotificationDecoderConfig,
}

impl NotificationDecoder {
    /// Creates a decoder with the given configuration.
    #[must_use]
    pub const fn new(config: NotificationDecoderConfig) -> Self {
        Self {
            config,
        }
    }

    /// Parses the PEM key for the configured algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSignatureError::Verification`] when the key does not
    /// parse; an unusable key and a wrong key are indistinguishable to the
    /// caller.
    fn decoding_key(&self, key: &PublicKeyPem) -> Result<DecodingKey, InvalidSignatureError> {
        let parsed = match self.config.algorithm {
            VerifyAlgorithm::Rs256 => DecodingKey::from_rsa_pem(key.as_str().as_bytes()),
            VerifyAlgorithm::EdDsa => DecodingKey::from_ed_pem(key.as_str().as_bytes()),
        };
        parsed.map_err(|_| InvalidSignatureError::Verification)
    }
}

impl PayloadVerifier for NotificationDecoder {
    fn verify(
        &self,
        payload: &NotificationPayload,
        key: &PublicKeyPem,
    ) -> Result<EventRecord, InvalidSignatureError> {
        let decoding_key = self.decoding_key(key)?;
        let mut validation = Validation::new(self.config.algorithm.jwt_algorithm());
        // Expiry is validated when present; the claim itself is optional.
        validation.required_spec_claims = HashSet::new();
        let decoded =
            jsonwebtoken::decode::<EventRecord>(payload.as_str(), &decoding_key, &validation)
                .map_err(|err| match err.kind() {
                    ErrorKind::Json(_) => InvalidSignatureError::Claims(
                        "claims did not match the event contract".to_string(),
                    ),
                    _ => InvalidSignatureError::Verification,
                })?;
        let record = decoded.claims;
        if record.is_renewal() && record.certificates.is_empty() {
            return Err(InvalidSignatureError::Claims(
                "renewal event carries no certificate entries".to_string(),
            ));
        }
        Ok(record)
    }
}
