//! Stand-in backend pool for demoing the harness without two real builds.
//!
//! Serves every path with a body naming the pool and echoing the path it
//! received, so poisoned rewrites are visible from the response alone:
//!
//! ```text
//! skewproxy &  mock-pool --port 3001 --name pool-a &  mock-pool --port 3002 --name pool-b
//! curl -i localhost:3000/_next/static/chunks/b1.js
//! ```

use std::net::SocketAddr;

use axum::{extract::Request, routing::any, Router};
use clap::Parser;

#[derive(Parser)]
#[command(name = "mock-pool", about = "Fixed-identity mock backend pool")]
struct Args {
    #[arg(long, default_value_t = 3001)]
    port: u16,

    #[arg(long, default_value = "pool-a")]
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let name = args.name.clone();

    let app = Router::new()
        .route("/", any(handler))
        .route("/{*path}", any(handler))
        .with_state(name);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("{} listening on http://{}", args.name, addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn handler(
    axum::extract::State(name): axum::extract::State<String>,
    request: Request,
) -> String {
    format!("{} {}", name, request.uri().path())
}
