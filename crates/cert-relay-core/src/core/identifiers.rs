// crates/cert-relay-core/src/core/identifiers.rs
// ============================================================================
// Module: Cert Relay Identifiers
// Description: Canonical identifiers for instances, certificates, and targets.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout Cert Relay. Cloud
//! resource names (CRNs) are colon-delimited; [`InstanceCrn`] validates the
//! segment structure at construction and exposes the embedded region token.
//! Cluster and secret identifiers are opaque.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Leading segment every CRN must carry.
const CRN_SCHEME: &str = "crn";

/// Zero-based index of the region segment inside a CRN.
const CRN_REGION_SEGMENT: usize = 5;

/// Minimum number of colon-delimited segments in a well-formed CRN.
const CRN_MIN_SEGMENTS: usize = 8;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors produced when parsing a CRN.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages never echo more than the malformed structure; CRNs themselves
///   are not secret but errors stay terse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrnParseError {
    /// The value does not start with the `crn` scheme segment.
    #[error("crn must start with the 'crn:' scheme")]
    MissingScheme,
    /// The value has fewer segments than a CRN requires.
    #[error("crn has {found} segments, expected at least {expected}")]
    TooFewSegments {
        /// Number of segments found.
        found: usize,
        /// Minimum number of segments required.
        expected: usize,
    },
    /// The region segment is empty.
    #[error("crn region segment is empty")]
    EmptyRegion,
}

// ============================================================================
// SECTION: Instance CRN
// ============================================================================

/// Certificate-manager service instance reference.
///
/// # Invariants
/// - Starts with the `crn:` scheme and has at least eight segments.
/// - The region segment (index 5) is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InstanceCrn(String);

impl InstanceCrn {
    /// Parses and validates an instance CRN.
    ///
    /// # Errors
    ///
    /// Returns [`CrnParseError`] when the segment structure is malformed.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CrnParseError> {
        let raw = raw.into();
        let segments: Vec<&str> = raw.split(':').collect();
        if segments.first().copied() != Some(CRN_SCHEME) {
            return Err(CrnParseError::MissingScheme);
        }
        if segments.len() < CRN_MIN_SEGMENTS {
            return Err(CrnParseError::TooFewSegments {
                found: segments.len(),
                expected: CRN_MIN_SEGMENTS,
            });
        }
        if segments[CRN_REGION_SEGMENT].is_empty() {
            return Err(CrnParseError::EmptyRegion);
        }
        Ok(Self(raw))
    }

    /// Returns the region token embedded in the CRN.
    #[must_use]
    pub fn region(&self) -> &str {
        // Parse validated the segment count and non-empty region.
        self.0.split(':').nth(CRN_REGION_SEGMENT).unwrap_or_default()
    }

    /// Returns the CRN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceCrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Certificate CRN
// ============================================================================

/// Certificate resource reference carried inside a notification.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this
///   type. The issuing service owns the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateCrn(String);

impl CertificateCrn {
    /// Creates a new certificate reference.
    #[must_use]
    pub fn new(crn: impl Into<String>) -> Self {
        Self(crn.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateCrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Deployment Target Identifiers
// ============================================================================

/// Cluster identifier for the deployment target.
///
/// # Invariants
/// - Opaque UTF-8 string supplied by caller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(String);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ingress secret name inside the target cluster.
///
/// # Invariants
/// - Opaque UTF-8 string supplied by caller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretName(String);

impl SecretName {
    /// Creates a new secret name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Panic-based assertions are permitted in tests.")]

    use super::CrnParseError;
    use super::InstanceCrn;

    /// Well-formed instance CRN used across tests.
    const SAMPLE_CRN: &str =
        "crn:v1:bluemix:public:cloudcerts:us-south:a/0123456789:abcd-ef01-2345::";

    #[test]
    fn parse_extracts_region_segment() {
        let crn = InstanceCrn::parse(SAMPLE_CRN).unwrap();
        assert_eq!(crn.region(), "us-south");
        assert_eq!(crn.as_str(), SAMPLE_CRN);
    }

    #[test]
    fn parse_rejects_missing_scheme() {
        let err = InstanceCrn::parse("urn:v1:bluemix:public:cloudcerts:us-south:a/1:i::");
        assert_eq!(err, Err(CrnParseError::MissingScheme));
    }

    #[test]
    fn parse_rejects_short_crn() {
        let err = InstanceCrn::parse("crn:v1:bluemix");
        assert_eq!(
            err,
            Err(CrnParseError::TooFewSegments {
                found: 3,
                expected: 8,
            })
        );
    }

    #[test]
    fn parse_rejects_empty_region() {
        let err = InstanceCrn::parse("crn:v1:bluemix:public:cloudcerts::a/1:i::");
        assert_eq!(err, Err(CrnParseError::EmptyRegion));
    }
}
