// crates/cert-relay-clients/src/certificate_manager.rs
// ============================================================================
// Module: Certificate Manager Client
// Description: Public-key resolver for the notification signing cycle.
// Purpose: Fetch the instance's current PEM key, fresh for every invocation.
// Dependencies: cert-relay-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! The certificate manager exposes a per-region public-key endpoint. The
//! client derives the region from the instance CRN, issues one GET with
//! caching disabled, and accepts only a definitive 200 with a `{publicKey}`
//! body. Any other status, transport failure, or undecodable body aborts
//! the invocation — nothing downstream can be trusted without the key, so
//! there is no retry.
//!
//! Keys are returned to the caller and never cached here; a rotated key is
//! picked up by the next invocation automatically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use cert_relay_core::InstanceCrn;
use cert_relay_core::KeyFetchError;
use cert_relay_core::PublicKeyPem;
use cert_relay_core::PublicKeySource;
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use url::Url;

use crate::http::DEFAULT_MAX_RESPONSE_BYTES;
use crate::http::DEFAULT_TIMEOUT_MS;
use crate::http::build_client;
use crate::http::excerpt;
use crate::http::read_body_limited;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host suffix appended to the region token for the production endpoint.
pub const DEFAULT_HOST_SUFFIX: &str = "certificate-manager.cloud.ibm.com";

/// Key format requested from the endpoint.
const KEY_FORMAT_QUERY: &str = "keyFormat=pem";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the certificate-manager client.
///
/// # Invariants
/// - When `base_url` is `None`, the endpoint host is derived from the
///   instance CRN's region and `host_suffix`.
/// - `timeout_ms` applies to the full request lifecycle.
/// - `max_response_bytes` is a hard cap on the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateManagerConfig {
    /// Endpoint override; production derives the host per region.
    pub base_url: Option<Url>,
    /// Host suffix for region-derived endpoints.
    pub host_suffix: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
}

impl Default for CertificateManagerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            host_suffix: DEFAULT_HOST_SUFFIX.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Response body of the public-key endpoint.
#[derive(Debug, Deserialize)]
struct PublicKeyResponse {
    /// PEM-encoded public key material.
    #[serde(rename = "publicKey")]
    public_key: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Public-key resolver over the certificate-manager notification endpoint.
pub struct CertificateManagerClient {
    /// Client configuration.
    config: CertificateManagerConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl CertificateManagerClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFetchError`] when the HTTP client cannot be created.
    pub fn new(config: CertificateManagerConfig) -> Result<Self, KeyFetchError> {
        let client = build_client(config.timeout_ms)
            .map_err(|err| KeyFetchError::Transport(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Builds the per-instance public-key URL.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFetchError`] when the URL cannot be constructed.
    fn key_url(&self, instance: &InstanceCrn) -> Result<Url, KeyFetchError> {
        let base = match &self.config.base_url {
            Some(base) => base.as_str().trim_end_matches('/').to_string(),
            None => format!("https://{}.{}", instance.region(), self.config.host_suffix),
        };
        let encoded: String = url::form_urlencoded::byte_serialize(instance.as_str().as_bytes())
            .collect();
        let raw = format!(
            "{base}/api/v1/instances/{encoded}/notifications/publicKey?{KEY_FORMAT_QUERY}"
        );
        Url::parse(&raw).map_err(|err| KeyFetchError::Transport(err.to_string()))
    }
}

#[async_trait]
impl PublicKeySource for CertificateManagerClient {
    async fn fetch_public_key(
        &self,
        instance: &InstanceCrn,
    ) -> Result<PublicKeyPem, KeyFetchError> {
        let url = self.key_url(instance)?;
        tracing::debug!(region = instance.region(), "fetching notification public key");
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|err| KeyFetchError::Transport(err.to_string()))?;
        let status = response.status();
        let body = read_body_limited(response, self.config.max_response_bytes)
            .await
            .map_err(|err| KeyFetchError::Transport(err.to_string()))?;
        if status.as_u16() != 200 {
            return Err(KeyFetchError::UpstreamStatus {
                status: status.as_u16(),
                body_excerpt: excerpt(&body),
            });
        }
        let decoded: PublicKeyResponse = serde_json::from_slice(&body)
            .map_err(|err| KeyFetchError::InvalidResponse(err.to_string()))?;
        Ok(PublicKeyPem::new(decoded.public_key))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Panic-based assertions are permitted in tests.")]

    use cert_relay_core::InstanceCrn;
    use url::Url;

    use super::CertificateManagerClient;
    use super::CertificateManagerConfig;

    /// Sample instance CRN with a distinctive region.
    const SAMPLE_CRN: &str = "crn:v1:bluemix:public:cloudcerts:eu-de:a/42:instance-7::";

    #[test]
    fn region_derived_url_encodes_the_crn() {
        let client = CertificateManagerClient::new(CertificateManagerConfig::default()).unwrap();
        let instance = InstanceCrn::parse(SAMPLE_CRN).unwrap();
        let url = client.key_url(&instance).unwrap();
        assert_eq!(url.host_str(), Some("eu-de.certificate-manager.cloud.ibm.com"));
        assert!(url.path().starts_with("/api/v1/instances/crn%3Av1%3A"));
        assert_eq!(url.query(), Some("keyFormat=pem"));
        assert!(!url.path().contains("a/42"));
    }

    #[test]
    fn base_url_override_wins_over_region_derivation() {
        let config = CertificateManagerConfig {
            base_url: Some(Url::parse("http://127.0.0.1:9000/").unwrap()),
            ..CertificateManagerConfig::default()
        };
        let client = CertificateManagerClient::new(config).unwrap();
        let instance = InstanceCrn::parse(SAMPLE_CRN).unwrap();
        let url = client.key_url(&instance).unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(9000));
    }
}
