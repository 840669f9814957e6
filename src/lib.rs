//! CORS Relay
//!
//! A small forwarding relay: every inbound request is sent to one fixed
//! upstream endpoint, upstream redirects are followed by the relay itself
//! (bounded), and every response back to the caller carries permissive
//! cross-origin headers.

pub mod config;
pub mod http;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use relay::RelayError;
