//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Snapshot the deployment state once per request at dispatch time
//! - Wire tracing middleware
//! - Announce the effective configuration at startup

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::HarnessConfig;
use crate::deploy::DeployClock;
use crate::http::forward::forward;
use crate::observability::metrics;
use crate::routing::decide;

/// Application state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HarnessConfig>,
    pub clock: DeployClock,
    pub client: Client<HttpConnector, Body>,
}

/// The inbound proxy server.
pub struct HttpServer {
    router: Router,
    config: Arc<HarnessConfig>,
}

impl HttpServer {
    /// Create a new server over the given configuration and clock.
    pub fn new(config: Arc<HarnessConfig>, clock: DeployClock) -> Self {
        // Idle pooling is disabled so every request opens a fresh
        // upstream connection; reuse would entangle pool selection
        // across requests and mask the skew being reproduced.
        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(HttpConnector::new());

        let state = AppState {
            config: config.clone(),
            clock,
            client,
        };

        let router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let Self { router, config } = self;
        let addr = listener.local_addr()?;

        tracing::info!(
            address = %addr,
            pool_a_port = config.pool_a_port,
            pool_b_port = config.pool_b_port,
            deploy_delay_secs = config.deploy_delay_secs,
            build_id_headers = config.build_id_headers,
            "proxy listening, pre-deploy default is Pool A"
        );
        if let Some(poison) = &config.poison {
            tracing::info!(
                post_deploy_chunk = %poison.post_deploy_chunk,
                pre_deploy_chunk = %poison.pre_deploy_chunk,
                "poison mapping configured, activates at deployment"
            );
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("proxy stopped");
        Ok(())
    }
}

/// Main proxy handler: snapshot deployment state, decide the target
/// pool, forward, record metrics.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();

    // One snapshot per request; not re-read mid-request.
    let deploy_state = state.clock.state();

    let raw_path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let decision = decide(&raw_path, deploy_state, state.config.poison.as_ref());
    let addr = state.config.pool_addr(decision.target);

    tracing::debug!(
        method = %request.method(),
        path = %raw_path,
        deploy_state = ?deploy_state,
        pool = decision.target.label(),
        outbound_path = %decision.path,
        "proxying request"
    );

    let response = forward(
        &state.client,
        &addr,
        &decision,
        request,
        state.config.build_id_headers,
    )
    .await;

    metrics::record_request(decision.target, response.status(), start);
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
