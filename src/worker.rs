//! A worker is a long-running task that serially drains the shared queue:
//! dequeue → read → parse → validate method → dispatch → respond, closing
//! the connection on every path before it asks for the next item. Workers
//! never register a signal handler of their own — the shutdown sentinel on
//! the queue is the only thing that terminates one (see `SPEC_FULL.md` §5).

use std::sync::Arc;

use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::error::ErrorKind;
use crate::handler::{self, Method};
use crate::parser;
use crate::queue::{Receiver, WorkItem};
use crate::reader::{self, ReadOutcome};
use crate::response::{self, Outcome};

pub struct Worker {
    id: usize,
    config: Arc<ServerConfig>,
    receiver: Receiver,
}

impl Worker {
    pub fn new(id: usize, config: Arc<ServerConfig>, receiver: Receiver) -> Self {
        Worker { id, config, receiver }
    }

    /// Runs until the queue yields the shutdown sentinel or is closed.
    pub async fn run(self) {
        log::debug!("worker {} started", self.id);
        loop {
            match self.receiver.recv().await {
                None | Some(WorkItem::Shutdown) => break,
                Some(WorkItem::Connection(mut stream)) => {
                    self.serve(&mut stream).await;
                }
            }
        }
        log::debug!("worker {} stopped", self.id);
    }

    /// Services exactly one connection, end to end, and guarantees it is
    /// closed by the time this returns.
    async fn serve(&self, stream: &mut TcpStream) {
        let raw = match reader::read_request(stream, self.config.read_timeout, self.config.buffer_ceiling).await {
            Ok(ReadOutcome::Request(raw)) => raw,
            Ok(ReadOutcome::NoRequest) => return,
            Err(kind) => {
                log::warn!("worker {} failed before parsing: {kind}", self.id);
                self.respond(stream, "-", "-", Outcome::Failure(kind)).await;
                return;
            }
        };

        let (method_label, path_label, outcome) = self.handle(&raw).await;
        self.respond(stream, &method_label, &path_label, outcome).await;
    }

    async fn handle(&self, raw: &str) -> (String, String, Outcome) {
        let request = match parser::parse(raw) {
            Ok(request) => request,
            Err(kind) => return ("-".to_string(), "-".to_string(), Outcome::Failure(kind)),
        };

        let method_label = request.method.clone();
        let path_label = request.path.clone();

        let method = match Method::parse(&request.method) {
            Some(method) => method,
            None => {
                return (
                    method_label,
                    path_label,
                    Outcome::Failure(ErrorKind::MethodNotAllowed),
                )
            }
        };

        let outcome = handler::dispatch(&self.config.document_root, method, &request.path).await;
        (method_label, path_label, outcome)
    }

    async fn respond(&self, stream: &mut TcpStream, method: &str, path: &str, outcome: Outcome) {
        let is_failure = matches!(outcome, Outcome::Failure(_));
        let status = response::write_response(stream, outcome).await;
        if is_failure {
            log::warn!("worker {} {} {} -> {}", self.id, method, path, status);
        } else {
            log::debug!("worker {} {} {} -> {}", self.id, method, path, status);
        }
    }
}
