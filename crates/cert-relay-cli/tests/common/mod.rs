// crates/cert-relay-cli/tests/common/mod.rs
// ============================================================================
// Module: CLI Test Helpers
// Description: Stub endpoints and in-process token signing for CLI tests.
// Purpose: Drive full invocations against scripted collaborator behavior.
// Dependencies: ed25519-dalek, jsonwebtoken, tiny_http
// ============================================================================

//! ## Overview
//! End-to-end tests stand up one stub server per collaborator endpoint and
//! sign notification tokens with an in-process Ed25519 key, so the whole
//! invocation path runs without touching the network beyond loopback.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    dead_code,
    reason = "Test-only helpers; not every test file uses every helper."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::thread;

use ed25519_dalek::SigningKey;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use ed25519_dalek::pkcs8::EncodePublicKey;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Stub Server
// ============================================================================

/// One request observed by a stub endpoint.
pub struct CapturedRequest {
    /// HTTP method as sent.
    pub method: String,
    /// Request path and query.
    pub url: String,
    /// Request body as UTF-8.
    pub body: String,
}

/// Starts a stub endpoint answering the scripted `(status, body)` pairs in
/// order; returns the base URL and the channel of captured requests.
pub fn serve(responses: Vec<(u16, String)>) -> (String, Receiver<CapturedRequest>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", server.server_addr());
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for (status, body) in responses {
            let mut request = server.recv().unwrap();
            let mut captured_body = String::new();
            request.as_reader().read_to_string(&mut captured_body).unwrap();
            sender
                .send(CapturedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body: captured_body,
                })
                .unwrap();
            request.respond(Response::from_string(body).with_status_code(status)).unwrap();
        }
    });
    (base_url, receiver)
}

/// Drains every captured request after the invocation completed.
pub fn drain(requests: &Receiver<CapturedRequest>) -> Vec<CapturedRequest> {
    requests.try_iter().collect()
}

// ============================================================================
// SECTION: Token Signing
// ============================================================================

/// Expiry far enough in the future for any test run.
pub const FUTURE_EXP: u64 = 4_102_444_800;

/// In-process Ed25519 signing pair.
pub struct TestKeyPair {
    /// Encoding key for token signing.
    encoding: EncodingKey,
    /// PEM-encoded public half, as the key endpoint would serve it.
    pub public_pem: String,
}

/// Derives a deterministic key pair from a seed byte.
pub fn key_pair(seed: u8) -> TestKeyPair {
    let signing_key = SigningKey::from_bytes(&[seed; 32]);
    let der = signing_key.to_pkcs8_der().unwrap();
    let encoding = EncodingKey::from_ed_der(der.as_bytes());
    let public_pem = signing_key.verifying_key().to_public_key_pem(LineEnding::LF).unwrap();
    TestKeyPair {
        encoding,
        public_pem,
    }
}

/// Signs arbitrary claims as an EdDSA token.
pub fn sign(claims: &serde_json::Value, pair: &TestKeyPair) -> String {
    let header = Header::new(Algorithm::EdDSA);
    jsonwebtoken::encode(&header, claims, &pair.encoding).unwrap()
}

/// Renders a PEM key as the key endpoint's JSON response body.
pub fn public_key_body(pair: &TestKeyPair) -> String {
    serde_json::json!({ "publicKey": pair.public_pem }).to_string()
}
