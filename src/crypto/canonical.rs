//! Canonical request string construction for Duo request signing.
//!
//! The canonical string is four newline-separated lines:
//! ```text
//! GET
//! api-1234abcd.duosecurity.com
//! /admin/v1/users.json
//! realname=A%20B&username=alice
//! ```
//!
//! The last line is the sorted, percent-encoded parameter string. It may be
//! empty. The transport sends this exact string as the query or form body.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Characters left unescaped in parameter keys and values.
///
/// Only RFC 3986 unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through.
/// Space becomes `%20`, never `+`.
const PARAM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single parameter key or value.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, PARAM_ENCODE_SET).to_string()
}

/// Encode parameters as `key=value&key=value`, ordered by key.
///
/// `BTreeMap` iterates in ascending byte order of the keys, which is the
/// ordering the server uses when it rebuilds the string.
pub fn encode_params(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical string that gets signed.
///
/// # Arguments
/// * `method` - HTTP method in any case; emitted uppercase
/// * `hostname` - API hostname, no scheme
/// * `path` - Request path including the format suffix
/// * `params` - Request parameters
pub fn build_canonical_string(
    method: &str,
    hostname: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    build_canonical_string_encoded(method, hostname, path, &encode_params(params))
}

/// Build the canonical string from an already encoded parameter string.
pub fn build_canonical_string_encoded(
    method: &str,
    hostname: &str,
    path: &str,
    encoded_params: &str,
) -> String {
    // No trailing newline, even when the parameter line is empty.
    format!(
        "{}\n{}\n{}\n{}",
        method.to_uppercase(),
        hostname,
        path,
        encoded_params
    )
}
