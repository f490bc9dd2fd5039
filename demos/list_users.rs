//! List Admin API users matching a username.
//!
//! This example shows the full workflow: configure, sign, dispatch, and
//! inspect the error log when the call fails.
//!
//! # Running
//!
//! ```bash
//! export DUO_HOST="api-1234abcd.duosecurity.com"
//! export DUO_IKEY="DIXXXXXXXXXXXXXXXXXX"
//! export DUO_SKEY="your-secret-key"
//! cargo run --example list_users -- alice
//! ```

use duoauth::{DuoConfig, ReqwestTransport, SignedRequest};
use std::sync::Arc;

fn main() {
    let config = DuoConfig::new(
        std::env::var("DUO_HOST").unwrap_or_default(),
        std::env::var("DUO_IKEY").unwrap_or_default(),
        std::env::var("DUO_SKEY").unwrap_or_default(),
    );
    let username = std::env::args().nth(1).unwrap_or_else(|| "alice".to_string());

    let transport = match ReqwestTransport::new(&config) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            eprintln!("Transport error: {}", e);
            std::process::exit(1);
        }
    };

    let mut request = match SignedRequest::from_config(&config, transport) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    request
        .set_path("/admin/v1/users", None)
        .set_method("GET")
        .set_params([("username", username.as_str())]);

    match request.send() {
        Some(body) => println!("{:#}", body),
        None => {
            for error in request.errors() {
                eprintln!("Request failed: {}", error);
            }
            std::process::exit(1);
        }
    }
}
