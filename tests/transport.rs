//! ReqwestTransport against a one-shot loopback HTTP server.

use base64::{engine::general_purpose::STANDARD, Engine};
use duoauth::{DuoAuthError, DuoConfig, HttpTransport, ReqwestTransport, TransportRequest};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

const IKEY: &str = "DIXXXXXXXXXXXXXXXXXX";
const SIG: &str = "bfca5031ede3d29a6a3b4c20b1a6c83a35aba712";

/// Serve one connection with a canned response and hand back the raw request.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let raw = read_request(&mut stream);
        tx.send(raw).unwrap();

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (format!("http://{}", addr), rx)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).into_owned();
            let body_len = header(&head, "content-length")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

/// Case-insensitive header lookup in a raw request head.
fn header(raw: &str, name: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().to_string())
    })
}

fn transport() -> ReqwestTransport {
    let config = DuoConfig::new("api-1234.duosecurity.com", IKEY, "s3cr3t");
    ReqwestTransport::new(&config).unwrap()
}

fn request(verb: &str, base: &str) -> TransportRequest {
    TransportRequest {
        verb: verb.to_string(),
        url: format!("{}/admin/v1/users.json", base),
        encoded_params: "realname=A%20B".to_string(),
        username: IKEY.to_string(),
        password: SIG.to_string(),
    }
}

fn expected_authorization() -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", IKEY, SIG)))
}

#[test]
fn get_sends_signed_query() {
    let (base, rx) = serve_once("HTTP/1.1 200 OK", r#"{"stat":"OK","response":[]}"#);

    let body = transport().execute(&request("get", &base)).unwrap();
    assert_eq!(body["stat"], "OK");

    let raw = rx.recv().unwrap();
    assert!(raw.starts_with("GET /admin/v1/users.json?realname=A%20B HTTP/1.1\r\n"));
    assert_eq!(header(&raw, "authorization"), Some(expected_authorization()));
    assert!(header(&raw, "user-agent").unwrap().contains("duoauth/"));
}

#[test]
fn post_sends_signed_form_body() {
    let (base, rx) = serve_once("HTTP/1.1 200 OK", r#"{"stat":"OK"}"#);

    transport().execute(&request("post", &base)).unwrap();

    let raw = rx.recv().unwrap();
    assert!(raw.starts_with("POST /admin/v1/users.json HTTP/1.1\r\n"));
    assert_eq!(
        header(&raw, "content-type").as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(header(&raw, "authorization"), Some(expected_authorization()));
    assert!(raw.ends_with("\r\n\r\nrealname=A%20B"));
}

#[test]
fn non_success_status_is_an_error() {
    let (base, _rx) = serve_once(
        "HTTP/1.1 401 Unauthorized",
        r#"{"code":40103,"stat":"FAIL"}"#,
    );

    let result = transport().execute(&request("get", &base));
    match result {
        Err(DuoAuthError::HttpStatus { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("40103"));
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[test]
fn non_json_body_is_a_protocol_error() {
    let (base, _rx) = serve_once("HTTP/1.1 200 OK", "<html>oops</html>");

    let result = transport().execute(&request("get", &base));
    assert!(matches!(result, Err(DuoAuthError::ProtocolError(_))));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let result = transport().execute(&request("get", &format!("http://127.0.0.1:{}", port)));
    assert!(matches!(result, Err(DuoAuthError::Transport(_))));
}
