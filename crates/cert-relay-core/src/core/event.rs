// crates/cert-relay-core/src/core/event.rs
// ============================================================================
// Module: Cert Relay Lifecycle Events
// Description: Notification payloads, verification keys, and decoded events.
// Purpose: Model the certificate-lifecycle event extracted from a signed payload.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! A notification arrives as an opaque signed token ([`NotificationPayload`])
//! and decodes, after signature verification, into an immutable
//! [`EventRecord`]. The verification key ([`PublicKeyPem`]) is fetched fresh
//! for every invocation and discarded afterwards; nothing in this module
//! caches key material.
//!
//! Security posture: payloads are untrusted until verified. The payload and
//! key types deliberately expose no serialization of their raw contents
//! beyond what verification requires.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CertificateCrn;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Wire value of the renewal lifecycle event.
pub const CERT_RENEWED_EVENT: &str = "cert_renewed";

// ============================================================================
// SECTION: Payload and Key Material
// ============================================================================

/// Opaque signed notification token, exactly as received.
///
/// # Invariants
/// - Contents are untrusted until verified against the instance's current
///   public key.
/// - Verified exactly once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct NotificationPayload(String);

impl NotificationPayload {
    /// Wraps a raw signed token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for verification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// PEM-encoded verification key for the current notification signing cycle.
///
/// # Invariants
/// - Fetched fresh per invocation and never cached across invocations, so a
///   rotated key can never be reused.
/// - `Debug` omits the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyPem(String);

impl PublicKeyPem {
    /// Wraps PEM-encoded key material.
    #[must_use]
    pub fn new(pem: impl Into<String>) -> Self {
        Self(pem.into())
    }

    /// Returns the PEM text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PublicKeyPem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PublicKeyPem").field(&"<pem omitted>").finish()
    }
}

// ============================================================================
// SECTION: Decoded Events
// ============================================================================

/// Certificate-lifecycle event type.
///
/// # Invariants
/// - Wire forms round-trip: `cert_renewed` maps to [`EventType::CertRenewed`],
///   everything else is preserved verbatim in [`EventType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// A certificate was renewed and must be redeployed.
    CertRenewed,
    /// Any other lifecycle event; ignored by the deployment path.
    Other(String),
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        if value == CERT_RENEWED_EVENT {
            Self::CertRenewed
        } else {
            Self::Other(value)
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::CertRenewed => CERT_RENEWED_EVENT.to_string(),
            EventType::Other(other) => other,
        }
    }
}

/// Certificate entry carried by a lifecycle event.
///
/// # Invariants
/// - `cert_crn` references the renewed certificate resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateEntry {
    /// Certificate resource reference.
    pub cert_crn: CertificateCrn,
}

/// Decoded certificate-lifecycle event.
///
/// # Invariants
/// - Immutable after decode; produced only by a successful signature check.
/// - For [`EventType::CertRenewed`] events the verifier guarantees at least
///   one certificate entry. Only `certificates[0]` is deployed; callers must
///   pre-split notifications if multi-certificate batching is ever required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Lifecycle event type.
    pub event_type: EventType,
    /// Certificates named by the event, in notification order.
    #[serde(default)]
    pub certificates: Vec<CertificateEntry>,
}

impl EventRecord {
    /// Returns true when the event signals a certificate renewal.
    #[must_use]
    pub fn is_renewal(&self) -> bool {
        self.event_type == EventType::CertRenewed
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::use_debug,
        reason = "Panic-based assertions and debug rendering are permitted in tests."
    )]

    use super::EventRecord;
    use super::EventType;
    use super::PublicKeyPem;

    #[test]
    fn event_type_round_trips_renewal() {
        let decoded: EventType = serde_json::from_str("\"cert_renewed\"").unwrap();
        assert_eq!(decoded, EventType::CertRenewed);
        assert_eq!(serde_json::to_string(&decoded).unwrap(), "\"cert_renewed\"");
    }

    #[test]
    fn event_type_preserves_unknown_values() {
        let decoded: EventType = serde_json::from_str("\"cert_about_to_expire\"").unwrap();
        assert_eq!(decoded, EventType::Other("cert_about_to_expire".to_string()));
        assert_eq!(serde_json::to_string(&decoded).unwrap(), "\"cert_about_to_expire\"");
    }

    #[test]
    fn event_record_defaults_missing_certificates() {
        let record: EventRecord =
            serde_json::from_str("{\"event_type\":\"cert_about_to_expire\"}").unwrap();
        assert!(!record.is_renewal());
        assert!(record.certificates.is_empty());
    }

    #[test]
    fn public_key_debug_omits_material() {
        let key = PublicKeyPem::new("-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("BEGIN PUBLIC KEY"));
    }
}
