//! HTTP response building module
//!
//! Builders for the fixture's response shapes, decoupled from routing.

pub mod response;

// Re-export response builders
pub use response::{build_fallback_response, build_header_echo_response, build_json_response};
