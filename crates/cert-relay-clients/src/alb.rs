// crates/cert-relay-clients/src/alb.rs
// ============================================================================
// Module: ALB Ingress-Secret Client
// Description: Secret update and state read against the container service.
// Purpose: Push the renewed certificate into the cluster and confirm it.
// Dependencies: cert-relay-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! Two calls against the same `v1/alb/albsecrets` resource: an authenticated
//! PUT that asks the control plane to roll the ingress secret onto the
//! renewed certificate, and an authenticated GET that reads the per-secret
//! state afterwards. The PUT is accepted asynchronously; acceptance says
//! nothing about propagation, which is why the state read exists at all.
//!
//! Both calls carry the bearer token plus the refresh token in a dedicated
//! header, matching what the control plane requires for secret mutations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use cert_relay_core::DeploymentRejectedError;
use cert_relay_core::SecretControlPlane;
use cert_relay_core::SecretState;
use cert_relay_core::SecretUpdateRequest;
use cert_relay_core::SessionTokens;
use cert_relay_core::VerificationError;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::http::DEFAULT_TIMEOUT_MS;
use crate::http::build_client;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Production container-service endpoint.
pub const DEFAULT_ALB_BASE_URL: &str = "https://containers.cloud.ibm.com/global";

/// Resource path for ingress secret operations.
const ALB_SECRETS_PATH: &str = "v1/alb/albsecrets";

/// Header carrying the refresh token alongside the bearer token.
const REFRESH_TOKEN_HEADER: &str = "x-auth-refresh-token";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the ALB client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbConfig {
    /// Container-service base URL.
    pub base_url: Url,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for AlbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Parses the compile-time default base URL.
#[allow(clippy::unwrap_used, reason = "The endpoint literal is a valid URL.")]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_ALB_BASE_URL).unwrap()
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// PUT body for the secret update.
#[derive(Serialize)]
struct AlbSecretBody<'a> {
    /// Renewed certificate resource reference.
    #[serde(rename = "certCrn")]
    cert_crn: &'a str,
    /// Target cluster identifier.
    #[serde(rename = "clusterID")]
    cluster_id: &'a str,
    /// Ingress secret name inside the cluster.
    #[serde(rename = "secretName")]
    secret_name: &'a str,
}

/// Per-secret entry in the state response.
#[derive(Deserialize)]
struct AlbSecretEntry {
    /// Control-plane state of the secret.
    state: String,
}

/// Response body of the state query.
#[derive(Deserialize)]
struct AlbSecretsResponse {
    /// Secret entries matching the query.
    #[serde(rename = "albSecrets", default)]
    alb_secrets: Vec<AlbSecretEntry>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Ingress-secret control-plane client.
pub struct AlbClient {
    /// Client configuration.
    config: AlbConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl AlbClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentRejectedError`] when the HTTP client cannot be
    /// created.
    pub fn new(config: AlbConfig) -> Result<Self, DeploymentRejectedError> {
        let client = build_client(config.timeout_ms)
            .map_err(|err| DeploymentRejectedError::Transport(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Builds the secrets resource URL.
    fn secrets_url(&self) -> Result<Url, url::ParseError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{ALB_SECRETS_PATH}"))
    }

    /// Builds the authentication headers both calls require.
    fn auth_headers(tokens: &SessionTokens) -> Result<HeaderMap, reqwest::header::InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", tokens.access_token()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        let mut refresh = HeaderValue::from_str(&format!("Bearer {}", tokens.refresh_token()))?;
        refresh.set_sensitive(true);
        headers.insert(HeaderName::from_static(REFRESH_TOKEN_HEADER), refresh);
        Ok(headers)
    }
}

#[async_trait]
impl SecretControlPlane for AlbClient {
    async fn apply_update(
        &self,
        tokens: &SessionTokens,
        request: &SecretUpdateRequest,
    ) -> Result<(), DeploymentRejectedError> {
        let url = self
            .secrets_url()
            .map_err(|err| DeploymentRejectedError::Transport(err.to_string()))?;
        let headers = Self::auth_headers(tokens)
            .map_err(|err| DeploymentRejectedError::Transport(err.to_string()))?;
        let body = AlbSecretBody {
            cert_crn: request.cert_crn.as_str(),
            cluster_id: request.cluster_id.as_str(),
            secret_name: request.secret_name.as_str(),
        };
        tracing::info!(
            cluster_id = request.cluster_id.as_str(),
            secret_name = request.secret_name.as_str(),
            "requesting ingress secret update"
        );
        let response = self
            .client
            .put(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|err| DeploymentRejectedError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeploymentRejectedError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn read_secret_state(
        &self,
        tokens: &SessionTokens,
        request: &SecretUpdateRequest,
    ) -> Result<SecretState, VerificationError> {
        let url =
            self.secrets_url().map_err(|err| VerificationError::Transport(err.to_string()))?;
        let headers = Self::auth_headers(tokens)
            .map_err(|err| VerificationError::Transport(err.to_string()))?;
        tracing::debug!(
            cluster_id = request.cluster_id.as_str(),
            secret_name = request.secret_name.as_str(),
            "reading ingress secret state"
        );
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|err| VerificationError::Transport(err.to_string()))?;
        let status = response.status();
        if status.as_u16() != 200 {
            return Err(VerificationError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        let decoded: AlbSecretsResponse = response
            .json()
            .await
            .map_err(|err| VerificationError::InvalidResponse(err.to_string()))?;
        let first = decoded.alb_secrets.into_iter().next().ok_or(VerificationError::Empty)?;
        Ok(SecretState::new(first.state))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Panic-based assertions are permitted in tests.")]

    use cert_relay_core::SessionTokens;

    use super::AlbClient;
    use super::AlbConfig;

    #[test]
    fn default_config_targets_the_global_endpoint() {
        let config = AlbConfig::default();
        assert_eq!(config.base_url.as_str(), "https://containers.cloud.ibm.com/global");
    }

    #[test]
    fn auth_headers_carry_both_tokens_as_bearers() {
        let tokens = SessionTokens::new("access-abc", "refresh-def");
        let headers = AlbClient::auth_headers(&tokens).unwrap();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer access-abc");
        assert_eq!(headers.get("x-auth-refresh-token").unwrap(), "Bearer refresh-def");
    }
}
