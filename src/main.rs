//! skewproxy — version-skew reverse proxy harness.
//!
//! ```text
//!                    ┌──────────────────────────────────────────┐
//!                    │                 SKEWPROXY                 │
//!                    │                                           │
//!   Client ──────────┼─▶ listener ─▶ router ──┬──▶ forwarder ───┼──▶ Pool A (:3001, pre-deploy build)
//!                    │       (deploy clock)   └──▶ forwarder ───┼──▶ Pool B (:3002, post-deploy build)
//!                    │                                           │
//!                    └──────────────────────────────────────────┘
//!
//!   t < delay : every request → Pool A
//!   t ≥ delay : default → Pool B; poisoned chunk URL (if configured)
//!               → Pool A's stale bytes under Pool B's URL
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use skewproxy::config::Args;
use skewproxy::deploy::DeployClock;
use skewproxy::http::HttpServer;
use skewproxy::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let config = Arc::new(Args::parse().into_config()?);

    if config.metrics.enabled {
        match config.metrics.bind_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                address = %config.metrics.bind_address,
                "invalid metrics bind address, metrics disabled"
            ),
        }
    }

    let listener = TcpListener::bind(("0.0.0.0", config.listen_port)).await?;

    // Listener readiness and the timer task are independent; at zero
    // delay the first request may still observe PreDeploy.
    let clock = DeployClock::new();
    clock.schedule(config.clone());

    let server = HttpServer::new(config, clock);
    server.run(listener).await?;

    Ok(())
}
