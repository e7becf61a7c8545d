// Application state module
// Runtime state shared by every connection on a worker

use super::types::Config;

/// Application state
///
/// Immutable after startup. Workers and requests share nothing mutable, so
/// repeating a request can never observe accumulated state.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Access-log toggle, consulted on every request
    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
