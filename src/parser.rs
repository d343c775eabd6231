//! Parses the request line out of the raw bytes the reader already framed.
//! Everything past the first line is framing only, not grammar this parser
//! understands — header lines are discarded here (see `SPEC_FULL.md` §4.3).

use percent_encoding::percent_decode_str;

use crate::error::ErrorKind;

/// The two protocol tokens this server accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http10,
    Http11,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http10 => "HTTP/1.0",
            Protocol::Http11 => "HTTP/1.1",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "HTTP/1.0" => Some(Protocol::Http10),
            "HTTP/1.1" => Some(Protocol::Http11),
            _ => None,
        }
    }
}

/// The parsed request line. `method` is the raw token, uppercased or not —
/// validating it against GET/HEAD is the worker's job, not the parser's.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub protocol: Protocol,
}

/// Parses `raw`, the full decoded buffer the reader returned. Splits on
/// CRLF, trims and drops empty lines, and only looks at the first
/// surviving line.
pub fn parse(raw: &str) -> Result<Request, ErrorKind> {
    let mut lines = raw.split("\r\n").map(str::trim).filter(|line| !line.is_empty());

    let request_line = lines.next().ok_or(ErrorKind::BadRequest)?;
    let mut tokens = request_line.split_whitespace();

    let method = tokens.next().ok_or(ErrorKind::BadRequest)?;
    let target = tokens.next().ok_or(ErrorKind::BadRequest)?;
    let protocol_token = tokens.next().ok_or(ErrorKind::BadRequest)?;

    if tokens.next().is_some() {
        return Err(ErrorKind::BadRequest);
    }

    let protocol = Protocol::parse(protocol_token).ok_or(ErrorKind::HTTPVersionNotSupported)?;
    let path = decode_path(target)?;

    Ok(Request {
        method: method.to_string(),
        path,
        protocol,
    })
}

/// Strips the query string, then percent-decodes what remains, in that
/// order — a `?` inside a percent-escape is not special, only a literal one
/// in the raw target is.
fn decode_path(target: &str) -> Result<String, ErrorKind> {
    let path_only = target.split('?').next().unwrap_or("");
    percent_decode_str(path_only)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .map_err(|_| ErrorKind::BadRequest)
}
