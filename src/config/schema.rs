//! Configuration schema definitions.
//!
//! All types derive Serde traits so the config can also be embedded in
//! larger deployment manifests; at runtime the values come from the CLI
//! and environment (see `main.rs`).

use serde::{Deserialize, Serialize};
use url::Url;

/// Process-wide relay configuration.
///
/// Set once at startup and never mutated; shared via `Arc` with every
/// in-flight request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Absolute URL of the fixed upstream endpoint. Every inbound request
    /// is forwarded here regardless of its own path.
    pub upstream_url: String,

    /// Port the inbound listener binds on.
    pub listen_port: u16,

    /// Maximum number of upstream redirects followed for one request.
    pub max_redirects: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_url: "http://127.0.0.1:9000/".to_string(),
            listen_port: 8080,
            max_redirects: 5,
        }
    }
}

impl RelayConfig {
    /// Parse the configured upstream as a URL.
    pub fn upstream(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.upstream_url)
    }
}
