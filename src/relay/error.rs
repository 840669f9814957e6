//! Relay error taxonomy.
//!
//! Every variant is terminal for the current inbound request and is
//! converted at the HTTP boundary into the uniform 500 failure envelope.
//! Nothing here triggers a retry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The redirect chain exceeded the configured bound.
    #[error("too many redirects (limit {limit})")]
    TooManyRedirects { limit: u32 },

    /// Network, DNS, or TLS failure while contacting the upstream.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream URL or a redirect Location could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
