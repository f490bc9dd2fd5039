//! duoauth error types.

use thiserror::Error;

/// Errors that can occur while configuring or dispatching a signed request.
#[derive(Debug, Error)]
pub enum DuoAuthError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Connection or I/O failure while talking to the API host.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API host answered with a non-success status code.
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// Raw response body, usually a JSON error document.
        body: String,
    },

    /// Response body could not be parsed.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// The transport cannot issue requests with this verb.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = DuoAuthError::HttpStatus {
            status: 401,
            body: r#"{"code":40103,"stat":"FAIL"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"HTTP status 401: {"code":40103,"stat":"FAIL"}"#
        );
    }

    #[test]
    fn test_transport_display() {
        let err = DuoAuthError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }
}
