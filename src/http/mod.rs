//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, OPTIONS short-circuit, body buffering)
//!     → relay subsystem (redirect-following resolution)
//!     → response.rs (success/failure envelope)
//!     → cors.rs (fixed permissive headers on every response)
//!     → send to client
//! ```

pub mod cors;
pub mod response;
pub mod server;

pub use server::HttpServer;
