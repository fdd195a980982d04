// crates/cert-relay-core/src/core/secrets.rs
// ============================================================================
// Module: Cert Relay Secret Material
// Description: Long-lived credentials and short-lived session tokens.
// Purpose: Keep secret material out of logs, serialization, and persistence.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`Credential`] is the long-lived API key supplied by caller configuration;
//! [`SessionTokens`] is the short-lived access/refresh pair minted from it.
//! Both types live only in the current invocation's memory: they implement
//! `Deserialize` where input demands it but never `Serialize`, and their
//! `Debug` output is redacted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;

// ============================================================================
// SECTION: Credential
// ============================================================================

/// Long-lived API credential.
///
/// # Invariants
/// - Never logged, never serialized, never persisted.
/// - Scoped to caller configuration; exchanged for session tokens once per
///   invocation.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw API key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Exposes the secret for the token exchange request body.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

// ============================================================================
// SECTION: Session Tokens
// ============================================================================

/// Short-lived access/refresh token pair.
///
/// # Invariants
/// - Minted by the credential exchanger; scoped to one invocation.
/// - Never written to persistent storage or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionTokens {
    /// Bearer token for control-plane requests.
    access_token: String,
    /// Refresh token forwarded alongside the bearer token.
    refresh_token: String,
}

impl SessionTokens {
    /// Builds a token pair from a successful exchange.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Exposes the access token for request headers.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Exposes the refresh token for request headers.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::use_debug,
        reason = "Debug rendering is the behavior under test."
    )]

    use super::Credential;
    use super::SessionTokens;

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("super-secret-key");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn session_tokens_debug_is_redacted() {
        let tokens = SessionTokens::new("access-abc", "refresh-def");
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("access-abc"));
        assert!(!rendered.contains("refresh-def"));
    }
}
