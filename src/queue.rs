//! The work queue: a single producer (the dispatcher) and many consumers
//! (the workers), each item delivered exactly once. `tokio::sync::mpsc` only
//! gives us one consumer directly, so the receiving half is wrapped in an
//! `Arc<Mutex<_>>` shared across workers — the standard way to turn an MPSC
//! channel into an MPMC one under tokio.

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};

/// An item taken off the queue: either a connection to serve, or the
/// sentinel instructing the worker that took it to terminate.
pub enum WorkItem {
    Connection(TcpStream),
    Shutdown,
}

#[derive(Clone)]
pub struct Sender(mpsc::UnboundedSender<WorkItem>);

impl Sender {
    /// Enqueues `item`. Fails only if every receiver has already been
    /// dropped, which does not happen while any worker is alive.
    pub fn send(&self, item: WorkItem) -> Result<(), WorkItem> {
        self.0.send(item).map_err(|e| e.0)
    }
}

#[derive(Clone)]
pub struct Receiver(Arc<Mutex<mpsc::UnboundedReceiver<WorkItem>>>);

impl Receiver {
    /// Dequeues the next item. Any worker may call this concurrently; the
    /// internal mutex serialises access so each item still goes to exactly
    /// one caller.
    pub async fn recv(&self) -> Option<WorkItem> {
        self.0.lock().await.recv().await
    }
}

/// Builds a fresh queue. The dispatcher keeps the `Sender`; each worker
/// gets a clone of the `Receiver`.
pub fn channel() -> (Sender, Receiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Sender(tx), Receiver(Arc::new(Mutex::new(rx))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_items_in_fifo_order_and_shutdown_terminates() {
        let (tx, rx) = channel();
        tx.send(WorkItem::Shutdown).ok();

        match rx.recv().await {
            Some(WorkItem::Shutdown) => {}
            _ => panic!("expected the shutdown sentinel"),
        }
    }

    #[tokio::test]
    async fn multiple_receiver_clones_each_get_distinct_items() {
        let (tx, rx) = channel();
        let rx2 = rx.clone();

        tx.send(WorkItem::Shutdown).ok();
        tx.send(WorkItem::Shutdown).ok();

        let a = rx.recv().await;
        let b = rx2.recv().await;
        assert!(a.is_some());
        assert!(b.is_some());
    }
}
