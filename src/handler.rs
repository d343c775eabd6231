//! GET and HEAD, built directly on the resolver and the response writer.
//! Method validation already happened in the worker by the time either of
//! these runs.

use std::path::Path;

use crate::error::ErrorKind;
use crate::resolver;
use crate::response::{Outcome, Success};

/// The two methods this server understands. Anything else is
/// `ErrorKind::MethodNotAllowed` before it ever reaches this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

impl Method {
    /// Parses the worker's uppercased method token, or `None` for anything
    /// that isn't GET/HEAD.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "HEAD" => Some(Method::Head),
            _ => None,
        }
    }
}

/// Resolves `path` under `root` and builds the outcome for `method`. A
/// resolver failure propagates as-is; a GET whose file vanished after a
/// successful resolve becomes `InternalServerError`.
pub async fn dispatch(root: &Path, method: Method, path: &str) -> Outcome {
    let resolved = match resolver::resolve(root, path).await {
        Ok(resolved) => resolved,
        Err(kind) => return Outcome::Failure(kind),
    };

    match method {
        Method::Head => Outcome::Success(Success {
            resolved,
            body: None,
        }),
        Method::Get => match tokio::fs::read(&resolved.path).await {
            Ok(content) => Outcome::Success(Success {
                resolved,
                body: Some(content),
            }),
            Err(_) => Outcome::Failure(ErrorKind::internal(
                "file vanished after successful resolution",
            )),
        },
    }
}
