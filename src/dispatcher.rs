//! The dispatcher owns the listening socket and the producer side of the
//! work queue. It is the only task that observes interrupt signals; workers
//! never do (see `SPEC_FULL.md` §4.7 and §5).

use std::net::ToSocketAddrs;
use std::sync::Arc;

use tokio::net::TcpSocket;
use tokio::signal;

use crate::config::ServerConfig;
use crate::queue::{self, WorkItem};
use crate::worker::Worker;

/// Runs the dispatcher to completion using the process's interrupt signals
/// (SIGINT/Ctrl+C, SIGTERM) as the DRAINING trigger.
pub async fn run(config: Arc<ServerConfig>) -> std::io::Result<()> {
    run_until(config, shutdown_signal()).await
}

/// Runs the dispatcher to completion: binds, spawns the worker pool,
/// accepts connections until `shutdown` resolves, then drains and shuts
/// down. Returns once every worker has terminated and the listening socket
/// is closed. Parameterising the trigger (rather than always waiting on
/// process signals) is what lets tests exercise DRAINING/STOPPED without
/// sending a real signal to the test process.
pub async fn run_until(
    config: Arc<ServerConfig>,
    shutdown: impl std::future::Future<Output = ()>,
) -> std::io::Result<()> {
    // INIT
    let addr = config
        .bind_address()
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "unresolvable bind address"))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    // Backlog = worker count, per the original's `serversocket.listen(config.workers)`.
    let listener = socket.listen(config.worker_count as u32)?;
    log::info!(
        "listening on {} (root {:?}, {} workers)",
        config.bind_address(),
        config.document_root,
        config.worker_count
    );

    let (sender, receiver) = queue::channel();
    let mut worker_handles = Vec::with_capacity(config.worker_count);
    for id in 0..config.worker_count {
        let worker = Worker::new(id, config.clone(), receiver.clone());
        worker_handles.push(tokio::spawn(worker.run()));
    }

    // RUNNING
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _peer)) => {
                        if let Err(WorkItem::Connection(stream)) =
                            sender.send(WorkItem::Connection(stream))
                        {
                            log::warn!("queue closed, dropping an accepted connection");
                            drop(stream);
                        }
                    }
                    Err(e) => log::warn!("accept failed: {e}"),
                }
            }
            _ = &mut shutdown => {
                log::info!("interrupt received, draining");
                break;
            }
        }
    }

    // DRAINING
    drop(listener);
    for _ in 0..config.worker_count {
        let _ = sender.send(WorkItem::Shutdown);
    }
    for handle in worker_handles {
        let _ = handle.await;
    }

    // STOPPED
    log::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
