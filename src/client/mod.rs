//! HTTP transport capability used to dispatch signed requests.
//!
//! [`SignedRequest`](crate::SignedRequest) never talks to an HTTP library
//! directly. It hands a fully signed [`TransportRequest`] to an
//! [`HttpTransport`] and gets back either the parsed JSON body or an error.

pub mod http;

#[cfg(any(test, feature = "test-seams"))]
mod mock;

#[cfg(any(test, feature = "test-seams"))]
pub use mock::MockTransport;

use crate::DuoAuthError;
use serde_json::Value;

/// A signed request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Lowercase HTTP verb (`get`, `post`, ...).
    pub verb: String,

    /// Full URL without query string: `https://{hostname}{path}`.
    pub url: String,

    /// Sorted, percent-encoded parameters. This is byte-for-byte the string
    /// that was signed.
    pub encoded_params: String,

    /// Basic-auth username (integration key).
    pub username: String,

    /// Basic-auth password (hex signature).
    pub password: String,
}

impl TransportRequest {
    /// Whether the parameters travel in a form body rather than the query.
    pub fn params_in_body(&self) -> bool {
        matches!(self.verb.as_str(), "post" | "put" | "patch")
    }

    /// URL with the encoded parameters appended as the query string, if any.
    pub fn url_with_query(&self) -> String {
        if self.encoded_params.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.encoded_params)
        }
    }
}

/// Capability to issue one authenticated HTTP request.
///
/// Implementations own connection handling, TLS and timeouts. Any failure,
/// including a non-success status or a body that is not JSON, is reported
/// as an `Err`.
pub trait HttpTransport: Send + Sync {
    /// Dispatch the request and return the parsed JSON response body.
    fn execute(&self, request: &TransportRequest) -> Result<Value, DuoAuthError>;
}
