// crates/cert-relay-core/src/core/response.rs
// ============================================================================
// Module: Cert Relay Invocation Response
// Description: Uniform structured response for the invocation caller.
// Purpose: Map workflow terminal states onto one stable output shape.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every invocation, success or failure, produces one
//! [`InvocationResponse`]: a status code, a content-type header marker, and
//! an empty body on success or a `{message}` body on failure. Failure
//! messages are human-readable causes and never include internal detail.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status code for success and benign non-renewal events.
pub const STATUS_OK: u16 = 200;

/// Default status code when no upstream status was observed.
pub const STATUS_INTERNAL: u16 = 500;

// ============================================================================
// SECTION: Response Shape
// ============================================================================

/// Response headers attached to every invocation result.
///
/// # Invariants
/// - Always carries the JSON content-type marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeaders {
    /// Content-type marker for the structured body.
    #[serde(rename = "Content-Type")]
    pub content_type: String,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        Self {
            content_type: "application/json".to_string(),
        }
    }
}

/// Response body: empty on success, a message on failure.
///
/// # Invariants
/// - Serializes as `{}` for [`ResponseBody::Empty`] and `{"message": ...}`
///   for [`ResponseBody::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Failure body with a human-readable cause.
    Failure {
        /// Human-readable cause of the failure.
        message: String,
    },
    /// Empty success body.
    Empty {},
}

/// Structured invocation response.
///
/// # Invariants
/// - `status_code` is 200 exactly when the body is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// HTTP-style status code for the invocation result.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Response headers.
    pub headers: ResponseHeaders,
    /// Structured response body.
    pub body: ResponseBody,
}

impl InvocationResponse {
    /// Builds the uniform success response.
    #[must_use]
    pub fn success() -> Self {
        Self {
            status_code: STATUS_OK,
            headers: ResponseHeaders::default(),
            body: ResponseBody::Empty {},
        }
    }

    /// Builds the uniform failure response for a given status and cause.
    #[must_use]
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: ResponseHeaders::default(),
            body: ResponseBody::Failure {
                message: message.into(),
            },
        }
    }

    /// Returns true when the response reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code < 400
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Panic-based assertions are permitted in tests.")]

    use super::InvocationResponse;

    #[test]
    fn success_serializes_with_empty_body() {
        let rendered = serde_json::to_value(InvocationResponse::success()).unwrap();
        assert_eq!(rendered["statusCode"], 200);
        assert_eq!(rendered["headers"]["Content-Type"], "application/json");
        assert_eq!(rendered["body"], serde_json::json!({}));
    }

    #[test]
    fn failure_serializes_with_message_body() {
        let rendered =
            serde_json::to_value(InvocationResponse::failure(502, "upstream unavailable")).unwrap();
        assert_eq!(rendered["statusCode"], 502);
        assert_eq!(rendered["body"]["message"], "upstream unavailable");
    }

    #[test]
    fn status_below_400_is_success() {
        assert!(InvocationResponse::success().is_success());
        assert!(!InvocationResponse::failure(500, "boom").is_success());
    }
}
