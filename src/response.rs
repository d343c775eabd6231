//! Serialises an `Outcome` to bytes and writes it. Every path through
//! `write_response` ends with the connection shut down — a write failure is
//! logged, never propagated, because the client is already gone by the time
//! one happens.

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::ErrorKind;
use crate::resolver::ResolvedFile;

const SERVER_TAG: &str = "statichttpd";

/// A successful resolution, with or without a body attached. `body` is
/// `None` for HEAD — `resolved.length` still carries the true file length
/// for the `Content-Length` header.
pub struct Success {
    pub resolved: ResolvedFile,
    pub body: Option<Vec<u8>>,
}

pub enum Outcome {
    Success(Success),
    Failure(ErrorKind),
}

fn status_parts(outcome: &Outcome) -> (u16, &'static str) {
    match outcome {
        Outcome::Success(_) => (200, "OK"),
        Outcome::Failure(kind) => (kind.status_code(), kind.reason_phrase()),
    }
}

/// Builds the full response bytes: status line, headers in the order
/// `SPEC_FULL.md` §4.4 specifies, the blank line, and the body if any.
fn build(outcome: &Outcome) -> Vec<u8> {
    let (code, reason) = status_parts(outcome);
    let date = httpdate::fmt_http_date(std::time::SystemTime::now());

    let mut head = format!("HTTP/1.0 {code} {reason}\r\n");
    head.push_str(&format!("Date: {date}\r\n"));
    head.push_str(&format!("Server: {SERVER_TAG}\r\n"));

    let body: &[u8] = match outcome {
        Outcome::Success(success) => {
            head.push_str(&format!("Content-Length: {}\r\n", success.resolved.length));
            head.push_str("Connection: close\r\n");
            head.push_str(&format!("Content-Type: {}\r\n", success.resolved.mime_type));
            success.body.as_deref().unwrap_or(&[])
        }
        Outcome::Failure(_) => {
            head.push_str("Connection: close\r\n");
            &[]
        }
    };

    head.push_str("\r\n");

    let mut out = head.into_bytes();
    out.extend_from_slice(body);
    out
}

/// Writes `outcome` to `stream` and unconditionally shuts it down
/// afterwards. Returns the status code sent, for the worker's logging.
pub async fn write_response(stream: &mut TcpStream, outcome: Outcome) -> u16 {
    let (code, _) = status_parts(&outcome);
    let bytes = build(&outcome);

    if let Err(e) = stream.write_all(&bytes).await {
        log::warn!("response write failed: {e}");
    } else if let Err(e) = stream.flush().await {
        log::warn!("response flush failed: {e}");
    }

    if let Err(e) = stream.shutdown().await {
        log::warn!("connection shutdown failed: {e}");
    }

    code
}
