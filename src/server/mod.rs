// Server module entry point
// Worker pool, per-worker listeners and connection serving

pub mod connection;
pub mod listener;
pub mod worker;

// Re-export the supervisor entry point
pub use worker::run_workers;
