//! Reqwest-based HTTP transport for Duo APIs.
//!
//! This module handles the raw HTTP exchange. It places the signed
//! parameter string in the query or form body and attaches Basic
//! credentials. The response body is decoded as JSON.

use super::{HttpTransport, TransportRequest};
use crate::config::DuoConfig;
use crate::DuoAuthError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport using the timeout and User-Agent from config.
    pub fn new(config: &DuoConfig) -> Result<Self, DuoAuthError> {
        let timeout = config.timeout();
        let client = build_client(timeout)?;

        Ok(Self {
            client,
            user_agent: build_user_agent(config),
            timeout,
        })
    }

    /// Set request timeout.
    pub fn try_with_timeout(mut self, timeout: Duration) -> Result<Self, DuoAuthError> {
        self.timeout = timeout;
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the User-Agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Map the lowercase verb to a request builder with parameters attached.
    fn prepare(&self, request: &TransportRequest) -> Result<RequestBuilder, DuoAuthError> {
        let method = match request.verb.as_str() {
            "get" => Method::GET,
            "post" => Method::POST,
            "put" => Method::PUT,
            "patch" => Method::PATCH,
            "delete" => Method::DELETE,
            "head" => Method::HEAD,
            "options" => Method::OPTIONS,
            other => return Err(DuoAuthError::UnsupportedMethod(other.to_string())),
        };

        let builder = if request.params_in_body() {
            self.client
                .request(method, &request.url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(request.encoded_params.clone())
        } else {
            self.client.request(method, request.url_with_query())
        };

        Ok(builder
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .basic_auth(&request.username, Some(&request.password)))
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &TransportRequest) -> Result<Value, DuoAuthError> {
        let response = self
            .prepare(request)?
            .send()
            .map_err(|e| DuoAuthError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| DuoAuthError::Transport(format!("Failed to read body: {}", e)))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Duo API responded");

        if !status.is_success() {
            return Err(DuoAuthError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        parse_json_body(&body)
    }
}

fn build_client(timeout: Duration) -> Result<Client, DuoAuthError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DuoAuthError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// Parse a response body as JSON. A blank body (e.g. from HEAD) is `null`.
pub fn parse_json_body(body: &[u8]) -> Result<Value, DuoAuthError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| DuoAuthError::ProtocolError(format!("Invalid JSON body: {}", e)))
}

/// Build a User-Agent string from config.
///
/// Format: `<product> duoauth/<version>`
/// Example: `myapp/1.0.0 duoauth/0.1.0`
pub fn build_user_agent(config: &DuoConfig) -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{} duoauth/{}", config.user_agent_product, version)
}
