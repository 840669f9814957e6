//! CORS relay entry point.
//!
//! ```text
//!                    ┌──────────────────────────────────────────┐
//!                    │                CORS RELAY                 │
//!                    │                                           │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌─────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│  relay  │──▶│ outbound│──┼──▶ Upstream
//!                    │  │ server │   │ forward │   │  client │  │    (follows 3xx
//!                    │  └────────┘   └─────────┘   └─────────┘  │     itself)
//!                    │       │                                   │
//!   Client Response  │       ▼                                   │
//!   ◀────────────────┼── envelope (200 body / 500 json) + CORS   │
//!                    └──────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cors_relay::config::{validate_config, RelayConfig};
use cors_relay::http::HttpServer;

/// Forward every request to a fixed upstream and answer with permissive
/// CORS headers.
#[derive(Parser)]
#[command(name = "cors-relay")]
struct Cli {
    /// Absolute URL of the upstream endpoint all requests forward to.
    #[arg(long, env = "RELAY_UPSTREAM_URL")]
    upstream_url: String,

    /// Port the relay listens on.
    #[arg(long, env = "RELAY_PORT", default_value_t = 8080)]
    port: u16,

    /// Maximum upstream redirects followed per request.
    #[arg(long, env = "RELAY_MAX_REDIRECTS", default_value_t = 5)]
    max_redirects: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cors_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = RelayConfig {
        upstream_url: cli.upstream_url,
        listen_port: cli.port,
        max_redirects: cli.max_redirects,
    };

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "Invalid configuration");
        }
        return Err("configuration validation failed".into());
    }

    tracing::info!(
        upstream = %config.upstream_url,
        port = config.listen_port,
        max_redirects = config.max_redirects,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(("0.0.0.0", config.listen_port)).await?;
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
