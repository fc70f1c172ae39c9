//! Upstream-failure behavior: a dead pool must surface as a single 502
//! with a diagnostic body, never a hung connection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use skewproxy::config::HarnessConfig;
use skewproxy::deploy::{DeployClock, DeploymentState};
use skewproxy::http::HttpServer;

mod common;

async fn start_proxy(proxy_addr: SocketAddr, config: HarnessConfig) -> DeployClock {
    let config = Arc::new(config);
    let clock = DeployClock::new();
    let listener = tokio::net::TcpListener::bind(proxy_addr).await.unwrap();
    clock.schedule(config.clone());
    let server = HttpServer::new(config, clock.clone());
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    clock
}

#[tokio::test]
async fn dead_pool_b_yields_gateway_error() {
    let pool_a: SocketAddr = "127.0.0.1:28441".parse().unwrap();
    let proxy: SocketAddr = "127.0.0.1:28443".parse().unwrap();

    common::start_pool(pool_a, "pool-a").await;
    // Pool B's port (28442) is deliberately not listening.

    let config = HarnessConfig {
        pool_a_port: pool_a.port(),
        pool_b_port: 28442,
        deploy_delay_secs: 0,
        ..Default::default()
    };
    let clock = start_proxy(proxy, config).await;

    // Zero delay fires on the next scheduling opportunity.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(clock.state(), DeploymentState::PostDeploy);

    let client = common::fresh_client();
    let res = tokio::time::timeout(
        Duration::from_secs(5),
        client.get(format!("http://{}/y", proxy)).send(),
    )
    .await
    .expect("proxy left the connection hanging")
    .unwrap();

    assert_eq!(res.status(), 502);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("Proxy error: "), "body was: {}", body);
}

#[tokio::test]
async fn failed_request_does_not_affect_later_requests() {
    let pool_a: SocketAddr = "127.0.0.1:28451".parse().unwrap();
    let proxy: SocketAddr = "127.0.0.1:28453".parse().unwrap();

    // Pre-deploy, but Pool A is down at first.
    let config = HarnessConfig {
        pool_a_port: pool_a.port(),
        pool_b_port: 28452,
        deploy_delay_secs: 60,
        ..Default::default()
    };
    start_proxy(proxy, config).await;

    let client = common::fresh_client();
    let res = client
        .get(format!("http://{}/x", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    // Bring Pool A up; the earlier failure must not poison the process.
    common::start_pool(pool_a, "pool-a").await;
    let res = client
        .get(format!("http://{}/x", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "pool-a /x");
}
