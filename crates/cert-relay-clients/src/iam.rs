// crates/cert-relay-clients/src/iam.rs
// ============================================================================
// Module: IAM Token Exchange Client
// Description: API-key grant against the identity token endpoint.
// Purpose: Mint the access/refresh pair used for control-plane calls.
// Dependencies: cert-relay-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! The exchange is a single form POST with the API-key grant type. A
//! non-success status is surfaced with its upstream code so the caller can
//! tell credential misconfiguration (4xx) from provider outage (5xx).
//!
//! Security posture: the credential travels only in the form body; neither
//! the credential nor the minted tokens ever reach errors or logs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use cert_relay_core::AuthError;
use cert_relay_core::Credential;
use cert_relay_core::CredentialExchanger;
use cert_relay_core::SessionTokens;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use crate::http::DEFAULT_TIMEOUT_MS;
use crate::http::build_client;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Production identity token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// OAuth grant type for API-key exchange.
const APIKEY_GRANT: &str = "urn:ibm:params:oauth:grant-type:apikey";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the IAM client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamConfig {
    /// Token endpoint URL.
    pub token_url: Url,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for IamConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Parses the compile-time default token endpoint.
#[allow(clippy::unwrap_used, reason = "The endpoint literal is a valid URL.")]
fn default_token_url() -> Url {
    Url::parse(DEFAULT_TOKEN_URL).unwrap()
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Successful token-exchange response body.
#[derive(Deserialize)]
struct TokenResponse {
    /// Bearer token for control-plane requests.
    access_token: String,
    /// Refresh token forwarded alongside the bearer token.
    refresh_token: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Token exchanger over the identity endpoint.
pub struct IamClient {
    /// Client configuration.
    config: IamConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl IamClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the HTTP client cannot be created.
    pub fn new(config: IamConfig) -> Result<Self, AuthError> {
        let client = build_client(config.timeout_ms)
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }
}

#[async_trait]
impl CredentialExchanger for IamClient {
    async fn exchange(&self, credential: &Credential) -> Result<SessionTokens, AuthError> {
        tracing::debug!("exchanging credential for session tokens");
        let response = self
            .client
            .post(self.config.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", APIKEY_GRANT), ("apikey", credential.expose())])
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        let decoded: TokenResponse = response
            .json()
            .await
            .map_err(|err| AuthError::InvalidResponse(err.to_string()))?;
        Ok(SessionTokens::new(decoded.access_token, decoded.refresh_token))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
