// Connection handling module
// Serves a single accepted TCP connection

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve an accepted connection on a local task.
///
/// The connection runs concurrently with every other connection on the same
/// worker; a request that suspends (awaiting its body) blocks only its own
/// invocation.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
) {
    if state.access_log_enabled() {
        logger::log_connection_accepted(&peer_addr);
    }

    let state = Arc::clone(state);
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, peer_addr, &state).await }
            }),
        );

        // Malformed request lines, resets and body-read errors land here;
        // they terminate this connection only, with no handler-level
        // response.
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
