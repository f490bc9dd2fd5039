//! HMAC-SHA1 request signatures.

use crate::crypto::canonical::build_canonical_string;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;

type HmacSha1 = Hmac<Sha1>;

/// Compute HMAC-SHA1 of `message` keyed by `key`, hex-encoded (lowercase).
pub fn hmac_sha1_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Sign a request with the caller's secret key.
///
/// The signature is the hex HMAC-SHA1 of the canonical string (see
/// [`build_canonical_string`]). An empty secret still produces a signature;
/// the server will reject it.
pub fn sign_request(
    secret_key: &str,
    method: &str,
    hostname: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let canonical = build_canonical_string(method, hostname, path, params);
    hmac_sha1_hex(secret_key.as_bytes(), canonical.as_bytes())
}
