//! Cryptographic primitives for request signing.

pub mod canonical;
pub mod signature;

pub use canonical::{build_canonical_string, encode_params};
pub use signature::{hmac_sha1_hex, sign_request};
