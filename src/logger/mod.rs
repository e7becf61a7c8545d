//! Logger module
//!
//! The fixture's diagnostic stream: server lifecycle logging, per-request
//! diagnostics (the point of the fixture) and access logging, written to
//! stdout/stderr or files.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use hyper::{HeaderMap, Method, Uri, Version};

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Fixture server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Workers: {}", config.server.workers));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_worker_listening(id: usize, addr: &SocketAddr) {
    write_info(&format!("[Worker {id}] Listening on {addr}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    write_info(&format!("[Request] {method} {uri} {version:?}"));
}

/// Default-route diagnostics: the request line plus the full header map.
pub fn log_fallback_request(method: &Method, path: &str, headers: &HeaderMap) {
    write_info(&format!("{method} {path}"));
    for (name, value) in headers {
        write_info(&format!(
            "  {name}: {}",
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
}

/// `/json` diagnostics: the request body, decoded as text.
pub fn log_sink_body(body: &str) {
    write_info(body);
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
