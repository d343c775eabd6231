//! The error-kind vocabulary the rest of the crate speaks. A worker converts
//! every one of these into a response via [`crate::response::write_response`]
//! and never lets them escape its per-connection frame.

use thiserror::Error;

/// The seven failure kinds a request can hit. Every fallible path in the
/// crate ultimately produces one of these, never a bare `io::Error`.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("malformed request line")]
    BadRequest,
    #[error("extension not permitted")]
    Forbidden,
    #[error("path does not resolve to a file")]
    NotFound,
    #[error("method not GET or HEAD")]
    MethodNotAllowed,
    #[error("read deadline exceeded")]
    RequestTimeout,
    #[error("internal failure: {0}")]
    InternalServerError(String),
    #[error("unsupported protocol token")]
    HTTPVersionNotSupported,
}

impl ErrorKind {
    /// Numeric HTTP status code for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::RequestTimeout => 408,
            ErrorKind::InternalServerError(_) => 500,
            ErrorKind::HTTPVersionNotSupported => 505,
        }
    }

    /// Reason phrase that accompanies the status code on the status line.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::MethodNotAllowed => "Method Not Allowed",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::InternalServerError(_) => "Internal Server Error",
            ErrorKind::HTTPVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        ErrorKind::InternalServerError(reason.into())
    }
}
