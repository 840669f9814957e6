//! Upstream relay subsystem.
//!
//! # Data Flow
//! ```text
//! buffered inbound request
//!     → forward.rs (build target URL from upstream + inbound query)
//!     → forward.rs (outbound attempt, redirects disabled)
//!     → 3xx + Location? follow manually, bounded, per-code method rule
//!     → terminal response body
//!     → error.rs taxonomy on any failure
//! ```

pub mod error;
pub mod forward;

pub use error::RelayError;
