//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all relay handler
//! - Wire up middleware (tracing)
//! - Short-circuit OPTIONS preflight before any body read
//! - Buffer the inbound body and hand off to the relay loop
//! - Map every outcome to exactly one response envelope
//!
//! # Design Decisions
//! - One outbound client, created once; redirects disabled so the relay
//!   loop owns the hop semantics
//! - No request or upstream timeout: a hung upstream hangs its inbound
//!   request (known limitation, documented in the config docs)

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{Method, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::RelayConfig;
use crate::http::response;
use crate::relay::forward;
use crate::relay::RelayError;

/// Application state injected into handlers.
///
/// Nothing here is mutable: concurrent inbound requests share only the
/// config and the outbound client's connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub upstream: Url,
    pub client: reqwest::Client,
}

/// HTTP server for the CORS relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new server from validated configuration.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let upstream = config.upstream()?;

        // The relay follows redirects itself; the client must not. Proxy
        // environment variables are ignored: the upstream is contacted
        // directly, scheme selecting plain or TLS transport.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()?;

        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            upstream,
            client,
        };

        let router = Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream_url,
            max_redirects = self.config.max_redirects,
            "CORS relay starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every method, every path.
async fn relay_handler(State(state): State<AppState>, request: Request) -> Response<Body> {
    // 1. Preflight short-circuits before the body is touched.
    if request.method() == Method::OPTIONS {
        return response::preflight();
    }

    let method = request.method().clone();
    let query = request.uri().query().map(str::to_owned);

    tracing::debug!(method = %method, path = request.uri().path(), "Relaying request");

    // 2. Buffer the whole inbound body; the relay does not stream.
    let body = match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read inbound body");
            return response::failure(&e.to_string());
        }
    };

    // 3. Overlay the inbound query onto the fixed upstream URL.
    let target = forward::build_target_url(&state.upstream, query.as_deref());

    // 4. Resolve through the redirect chain and wrap the outcome.
    match forward::resolve(&state.client, &state.config, method, target, body).await {
        Ok(upstream_body) => response::success(upstream_body),
        Err(e) => {
            tracing::error!(error = %e, "Relay failed");
            response::failure(&e.to_string())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
