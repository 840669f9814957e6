//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde/clap handle syntactic)
//! - Check the upstream URL is absolute and uses a supported scheme
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use crate::config::schema::RelayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug)]
pub enum ValidationError {
    InvalidUpstreamUrl(String),
    UnsupportedUpstreamScheme(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidUpstreamUrl(e) => {
                write!(f, "upstream_url is not an absolute URL: {}", e)
            }
            ValidationError::UnsupportedUpstreamScheme(scheme) => {
                write!(f, "upstream_url scheme must be http or https, got '{}'", scheme)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration before it is used to serve traffic.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.upstream() {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedUpstreamScheme(
                    url.scheme().to_string(),
                ));
            }
        }
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl(e.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
