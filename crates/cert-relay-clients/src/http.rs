// crates/cert-relay-clients/src/http.rs
// ============================================================================
// Module: Shared HTTP Plumbing
// Description: Client construction and bounded response reading.
// Purpose: Keep timeout, redirect, and size-limit policy uniform per client.
// Dependencies: reqwest
// ============================================================================

//! ## Overview
//! Every collaborator client is built the same way: explicit timeout, no
//! redirects, and a hard cap on response body size so a hostile or broken
//! endpoint cannot exhaust memory. Body reads stream chunk-by-chunk and
//! fail closed when the cap is exceeded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request timeout in milliseconds for collaborator calls.
pub(crate) const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default hard cap on collaborator response bodies, in bytes.
pub(crate) const DEFAULT_MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Length cap for body excerpts embedded in error messages.
const EXCERPT_BYTES: usize = 256;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while reading a size-capped response body.
#[derive(Debug, Error)]
pub(crate) enum BodyError {
    /// Transport failure mid-read.
    #[error("body read failed: {0}")]
    Transport(String),
    /// The body exceeded the configured cap.
    #[error("response body exceeds size limit ({actual} > {limit})")]
    TooLarge {
        /// Bytes observed before aborting.
        actual: usize,
        /// Configured cap in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Client Construction
// ============================================================================

/// Builds a collaborator HTTP client with uniform policy.
///
/// # Errors
///
/// Returns the underlying builder error when the client cannot be created.
pub(crate) fn build_client(timeout_ms: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .redirect(Policy::none())
        .build()
}

// ============================================================================
// SECTION: Bounded Body Reading
// ============================================================================

/// Reads a response body while enforcing a hard byte limit.
///
/// # Errors
///
/// Returns [`BodyError`] on transport failure or when the limit is exceeded.
pub(crate) async fn read_body_limited(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, BodyError> {
    let mut body = Vec::new();
    let mut total: usize = 0;
    while let Some(chunk) =
        response.chunk().await.map_err(|err| BodyError::Transport(err.to_string()))?
    {
        let next_total = total.checked_add(chunk.len()).ok_or(BodyError::TooLarge {
            actual: usize::MAX,
            limit,
        })?;
        if next_total > limit {
            return Err(BodyError::TooLarge {
                actual: next_total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
        total = next_total;
    }
    Ok(body)
}

/// Returns a bounded, lossy excerpt of a response body for diagnostics.
pub(crate) fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.len() <= EXCERPT_BYTES {
        return trimmed.to_string();
    }
    let mut cut = EXCERPT_BYTES;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    trimmed[.. cut].to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::excerpt;

    #[test]
    fn excerpt_trims_and_bounds() {
        assert_eq!(excerpt(b"  hello  "), "hello");
        let long = "a".repeat(1_000);
        assert_eq!(excerpt(long.as_bytes()).len(), 256);
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let text = "é".repeat(300);
        let cut = excerpt(text.as_bytes());
        assert!(cut.len() <= 256);
        assert!(cut.chars().all(|c| c == 'é'));
    }
}
