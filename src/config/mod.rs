//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment variables
//!     → main.rs (clap parse)
//!     → schema.rs (RelayConfig)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Listen port and redirect cap have defaults; the upstream URL does not

pub mod schema;
pub mod validation;

pub use schema::RelayConfig;
pub use validation::{validate_config, ValidationError};
