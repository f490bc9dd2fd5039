//! # duoauth
//!
//! **Signed requests for the Duo Security Admin and Auth APIs.**
//!
//! Duo authenticates every API call with HTTP Basic credentials whose
//! password is an HMAC-SHA1 signature over a canonical description of the
//! request. duoauth builds that canonical string, signs it, and dispatches
//! the call through a pluggable HTTP transport.
//!
//! ## Features
//!
//! - **Deterministic canonicalization**: parameters sorted by key and
//!   percent-encoded once, so the signed bytes are the sent bytes
//! - **Pluggable transport**: any [`HttpTransport`] works; a blocking
//!   reqwest implementation is included
//! - **No panics across `send`**: failures become `None` plus an entry in
//!   a cumulative error log
//!
//! ## Quickstart
//!
//! ```no_run
//! use duoauth::{DuoConfig, ReqwestTransport, SignedRequest};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), duoauth::DuoAuthError> {
//!     let config = DuoConfig::new(
//!         "api-1234abcd.duosecurity.com",
//!         "DIXXXXXXXXXXXXXXXXXX",
//!         "your-secret-key",
//!     );
//!
//!     let transport = Arc::new(ReqwestTransport::new(&config)?);
//!     let mut request = SignedRequest::from_config(&config, transport)?;
//!     request
//!         .set_path("/admin/v1/users", None)
//!         .set_params([("username", "alice")]);
//!
//!     match request.send() {
//!         Some(body) => println!("{}", body),
//!         None => eprintln!("request failed: {:?}", request.errors()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Signing scheme
//!
//! ```text
//! signature = hex(HMAC-SHA1(secret_key, "METHOD\nhostname\npath\nsorted-params"))
//! Authorization: Basic base64(integration_key ":" signature)
//! ```
//!
//! See [`crypto::canonical`] for the exact parameter encoding.

#![deny(missing_docs)]

// Core modules
pub mod config;
pub mod errors;

// Crypto layer
pub mod crypto;

// Client layer
pub mod client;

// Request builder (main public API)
pub mod request;

// Re-exports for public API
pub use client::http::ReqwestTransport;
pub use client::{HttpTransport, TransportRequest};
pub use config::DuoConfig;
pub use errors::DuoAuthError;
pub use request::SignedRequest;

#[cfg(any(test, feature = "test-seams"))]
pub use client::MockTransport;
