// crates/cert-relay-clients/tests/key_fetch.rs
// ============================================================================
// Module: Key Fetch Tests
// Description: Certificate-manager client tests against a stub endpoint.
// Purpose: Verify wire shape, strict status handling, and size limits.
// Dependencies: cert-relay-clients, cert-relay-core, tiny_http, tokio
// ============================================================================

//! ## Overview
//! The public-key endpoint is the first collaborator in every invocation:
//! these tests pin the exact request shape (encoded CRN, PEM query, caching
//! disabled) and the fail-closed handling of every non-200 answer.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Panic-based assertions are permitted in tests."
)]

mod common;

use cert_relay_clients::CertificateManagerClient;
use cert_relay_clients::CertificateManagerConfig;
use cert_relay_core::InstanceCrn;
use cert_relay_core::KeyFetchError;
use cert_relay_core::PublicKeySource;
use url::Url;

use crate::common::StubResponse;
use crate::common::serve;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Sample instance CRN used across tests.
const SAMPLE_CRN: &str = "crn:v1:bluemix:public:cloudcerts:us-south:a/42:instance-7::";

/// Builds a client targeting the stub server.
fn client(base_url: &str) -> CertificateManagerClient {
    client_with_limit(base_url, 64 * 1024)
}

/// Builds a client with a custom response size cap.
fn client_with_limit(base_url: &str, max_response_bytes: usize) -> CertificateManagerClient {
    CertificateManagerClient::new(CertificateManagerConfig {
        base_url: Some(Url::parse(base_url).unwrap()),
        max_response_bytes,
        ..CertificateManagerConfig::default()
    })
    .unwrap()
}

/// Parses the sample CRN.
fn instance() -> InstanceCrn {
    InstanceCrn::parse(SAMPLE_CRN).unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test]
async fn fetch_sends_encoded_crn_with_caching_disabled() {
    let (base_url, requests) =
        serve(vec![StubResponse::json(200, r#"{"publicKey":"-----BEGIN PUBLIC KEY-----"}"#)]);
    let key = client(&base_url).fetch_public_key(&instance()).await.unwrap();
    assert_eq!(key.as_str(), "-----BEGIN PUBLIC KEY-----");
    let request = requests.recv().unwrap();
    assert_eq!(request.method, "GET");
    assert!(request.url.starts_with("/api/v1/instances/crn%3Av1%3A"));
    assert!(request.url.contains("instance-7"));
    assert!(request.url.ends_with("/notifications/publicKey?keyFormat=pem"));
    assert_eq!(request.header("cache-control"), Some("no-cache"));
}

#[tokio::test]
async fn non_ok_status_is_surfaced_with_body_excerpt() {
    let (base_url, _requests) =
        serve(vec![StubResponse::json(404, r#"{"message":"instance not found"}"#)]);
    let err = client(&base_url).fetch_public_key(&instance()).await.unwrap_err();
    match err {
        KeyFetchError::UpstreamStatus {
            status,
            body_excerpt,
        } => {
            assert_eq!(status, 404);
            assert!(body_excerpt.contains("instance not found"));
        }
        other => panic!("expected UpstreamStatus, got {other}"),
    }
}

#[tokio::test]
async fn undecodable_ok_body_fails_closed() {
    let (base_url, _requests) = serve(vec![StubResponse::json(200, r#"{"unexpected":true}"#)]);
    let err = client(&base_url).fetch_public_key(&instance()).await.unwrap_err();
    assert!(matches!(err, KeyFetchError::InvalidResponse(_)));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let huge = format!(r#"{{"publicKey":"{}"}}"#, "k".repeat(4_096));
    let (base_url, _requests) = serve(vec![StubResponse::json(200, huge)]);
    let err = client_with_limit(&base_url, 512).fetch_public_key(&instance()).await.unwrap_err();
    match err {
        KeyFetchError::Transport(detail) => assert!(detail.contains("size limit")),
        other => panic!("expected Transport, got {other}"),
    }
}
