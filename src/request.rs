//! Signed request builder and dispatcher - the main public API for duoauth.
//!
//! A `SignedRequest` collects the target and credentials through chained
//! setters, signs the request on every send, and records failures in a
//! cumulative error log instead of returning them.

use crate::client::{HttpTransport, TransportRequest};
use crate::config::DuoConfig;
use crate::crypto::canonical::{build_canonical_string_encoded, encode_params};
use crate::crypto::signature::hmac_sha1_hex;
use crate::DuoAuthError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Format suffix appended by [`SignedRequest::set_path`] when none is given.
const DEFAULT_FORMAT_SUFFIX: &str = ".json";

/// Method used until [`SignedRequest::set_method`] is called.
const DEFAULT_METHOD: &str = "get";

/// One authenticated Duo API call, reusable across sends.
///
/// Nothing is validated before dispatch. Unset values are empty strings and
/// the method defaults to `GET`; a bad configuration shows up as a transport
/// or authentication failure in [`errors`](Self::errors).
pub struct SignedRequest {
    transport: Arc<dyn HttpTransport>,
    hostname: String,
    path: String,
    method: String,
    params: BTreeMap<String, String>,
    integration_key: String,
    secret_key: String,
    errors: Vec<String>,
}

impl SignedRequest {
    /// Create an empty request that dispatches through `transport`.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            hostname: String::new(),
            path: String::new(),
            method: DEFAULT_METHOD.to_string(),
            params: BTreeMap::new(),
            integration_key: String::new(),
            secret_key: String::new(),
            errors: Vec::new(),
        }
    }

    /// Create a request seeded with hostname and keys from a validated config.
    pub fn from_config(
        config: &DuoConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, DuoAuthError> {
        config.validate()?;

        let mut request = Self::new(transport);
        request
            .set_hostname(config.hostname.as_str())
            .set_integration_key(config.integration_key.as_str())
            .set_secret_key(config.secret_key.as_str());
        Ok(request)
    }

    /// Set the API hostname (no scheme).
    pub fn set_hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = hostname.into();
        self
    }

    /// Set the resource path, adding a response format suffix.
    ///
    /// With a non-empty `format` the path becomes `path.format`, even if it
    /// already carries an extension. Without one, `.json` is appended unless
    /// `.json` already occurs in the path after its first character.
    pub fn set_path(&mut self, path: impl Into<String>, format: Option<&str>) -> &mut Self {
        let mut path = path.into();
        match format.filter(|f| !f.is_empty()) {
            Some(format) => {
                path.push('.');
                path.push_str(format);
            }
            // A match at offset 0 does not count as already suffixed.
            None => match path.find(DEFAULT_FORMAT_SUFFIX) {
                Some(pos) if pos > 0 => {}
                _ => path.push_str(DEFAULT_FORMAT_SUFFIX),
            },
        }
        self.path = path;
        self
    }

    /// Set the HTTP method. Case is ignored.
    pub fn set_method(&mut self, method: &str) -> &mut Self {
        self.method = method.to_lowercase();
        self
    }

    /// Replace all request parameters.
    pub fn set_params<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Set the integration key (Basic-auth username).
    pub fn set_integration_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.integration_key = key.into();
        self
    }

    /// Set the secret key used to sign requests.
    pub fn set_secret_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.secret_key = key.into();
        self
    }

    /// Replace the transport used for dispatch.
    pub fn set_transport(&mut self, transport: Arc<dyn HttpTransport>) -> &mut Self {
        self.transport = transport;
        self
    }

    /// API hostname.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Resource path including its format suffix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method, uppercase.
    pub fn method(&self) -> String {
        self.method.to_uppercase()
    }

    /// HTTP method as handed to the transport, lowercase.
    pub fn transport_verb(&self) -> &str {
        &self.method
    }

    /// Request parameters, ordered by key.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Integration key.
    pub fn integration_key(&self) -> &str {
        &self.integration_key
    }

    /// Secret key.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Transport used for dispatch.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Messages from every failed [`send`](Self::send), oldest first.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Empty the error log.
    pub fn clear_errors(&mut self) -> &mut Self {
        self.errors.clear();
        self
    }

    /// Signature the next send would carry.
    pub fn signature(&self) -> String {
        self.sign(&encode_params(&self.params))
    }

    /// Sign and dispatch, returning the parsed response body.
    ///
    /// On failure the error message is appended to [`errors`](Self::errors)
    /// and `None` is returned. Nothing else about the request changes, so it
    /// can be sent again as is.
    pub fn send(&mut self) -> Option<Value> {
        match self.try_send() {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(
                    hostname = %self.hostname,
                    path = %self.path,
                    error = %e,
                    "Signed request failed"
                );
                self.errors.push(e.to_string());
                None
            }
        }
    }

    /// Sign and dispatch, returning the error instead of logging it.
    pub fn try_send(&self) -> Result<Value, DuoAuthError> {
        let request = self.build_transport_request();

        debug!(
            method = %self.method(),
            hostname = %self.hostname,
            path = %self.path,
            "Dispatching signed request"
        );

        self.transport.execute(&request)
    }

    /// Assemble the wire request. The parameter string is encoded once and
    /// shared by the signature and the transport.
    fn build_transport_request(&self) -> TransportRequest {
        let encoded_params = encode_params(&self.params);
        let signature = self.sign(&encoded_params);

        TransportRequest {
            verb: self.method.clone(),
            url: format!("https://{}{}", self.hostname, self.path),
            encoded_params,
            username: self.integration_key.clone(),
            password: signature,
        }
    }

    fn sign(&self, encoded_params: &str) -> String {
        let canonical = build_canonical_string_encoded(
            &self.method,
            &self.hostname,
            &self.path,
            encoded_params,
        );
        hmac_sha1_hex(self.secret_key.as_bytes(), canonical.as_bytes())
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRequest")
            .field("hostname", &self.hostname)
            .field("path", &self.path)
            .field("method", &self.method())
            .field("params", &self.params)
            .field("integration_key", &self.integration_key)
            .field("secret_key", &"<redacted>")
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
