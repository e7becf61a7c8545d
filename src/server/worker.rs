// Worker supervisor module
// Spawns the worker pool and runs each worker's accept loop

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::listener::create_reusable_listener;
use crate::config::AppState;
use crate::logger;

/// Spawn `workers` independent worker threads and wait for them.
///
/// Each worker owns a single-threaded runtime and its own listener on the
/// shared address. There is no retry and no shutdown handling: a bind or
/// spawn failure is fatal, and the lifecycle otherwise ends with process
/// termination.
pub fn run_workers(addr: SocketAddr, state: &Arc<AppState>, workers: usize) -> io::Result<()> {
    let mut handles = Vec::with_capacity(workers);

    for id in 0..workers {
        let state = Arc::clone(state);
        let handle = std::thread::Builder::new()
            .name(format!("worker-{id}"))
            .spawn(move || worker_main(id, addr, &state))?;
        handles.push(handle);
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "worker thread panicked"))??;
    }

    Ok(())
}

/// Worker entry point: build the runtime, bind the listener, serve forever.
///
/// A `LocalSet` carries the per-connection tasks; connections on one worker
/// make progress independently of each other without any shared state.
fn worker_main(id: usize, addr: SocketAddr, state: &Arc<AppState>) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let local = tokio::task::LocalSet::new();
    runtime.block_on(local.run_until(async {
        let listener = create_reusable_listener(addr)?;
        logger::log_worker_listening(id, &addr);
        accept_loop(&listener, state).await
    }))
}

/// Accept connections until the process terminates.
///
/// An accept error affects a single connection attempt; log it and keep
/// going.
async fn accept_loop(listener: &TcpListener, state: &Arc<AppState>) -> io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, state),
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}
