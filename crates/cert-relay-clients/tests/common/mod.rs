// crates/cert-relay-clients/tests/common/mod.rs
// ============================================================================
// Module: Client Test Helpers
// Description: Local stub server capturing requests for client tests.
// Purpose: Exercise each HTTP client against scripted endpoint behavior.
// Dependencies: tiny_http
// ============================================================================

//! ## Overview
//! A tiny blocking server on an ephemeral port: it answers a scripted list
//! of responses in order and reports every request it saw — method, path,
//! headers, and body — back over a channel so tests can assert on the
//! outbound wire shape.

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

use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One request observed by the stub server.
pub struct CapturedRequest {
    /// HTTP method as sent.
    pub method: String,
    /// Request path and query.
    pub url: String,
    /// Header name/value pairs, names lowercased.
    pub headers: Vec<(String, String)>,
    /// Request body as UTF-8.
    pub body: String,
}

impl CapturedRequest {
    /// Returns the value of the named header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers.iter().find(|(key, _)| *key == wanted).map(|(_, value)| value.as_str())
    }
}

/// One scripted response the stub server sends.
pub struct StubResponse {
    /// Status code to answer with.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl StubResponse {
    /// Builds a JSON response with the given status.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Starts a stub server answering the scripted responses in order.
///
/// Returns the base URL and the channel of captured requests. The server
/// thread exits after the last scripted response.
pub fn serve(responses: Vec<StubResponse>) -> (String, Receiver<CapturedRequest>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", server.server_addr());
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for scripted in responses {
            let mut request = server.recv().unwrap();
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body).unwrap();
            let captured = CapturedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                headers: request
                    .headers()
                    .iter()
                    .map(|header| {
                        (
                            header.field.as_str().as_str().to_ascii_lowercase(),
                            header.value.as_str().to_string(),
                        )
                    })
                    .collect(),
                body,
            };
            sender.send(captured).unwrap();
            let content_type =
                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
            let response = Response::from_string(scripted.body)
                .with_status_code(scripted.status)
                .with_header(content_type);
            request.respond(response).unwrap();
        }
    });
    (base_url, receiver)
}
