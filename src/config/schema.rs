//! Configuration schema definitions.
//!
//! All types derive Serde traits so the same structure can be loaded
//! from a TOML file via the `--config` flag.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::routing::{PoisonMapping, Pool};

/// Root configuration for the skew harness.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Inbound listener port.
    pub listen_port: u16,

    /// Pool A (pre-deploy build) port on localhost.
    pub pool_a_port: u16,

    /// Pool B (post-deploy build) port on localhost.
    pub pool_b_port: u16,

    /// Seconds until the deployment transition fires.
    pub deploy_delay_secs: u64,

    /// Optional poisoned chunk mapping. Active only when both chunk
    /// names were supplied.
    pub poison: Option<PoisonMapping>,

    /// Stamp responses with an `x-build-id` header naming the pool
    /// that answered.
    pub build_id_headers: bool,

    /// Observability settings.
    pub metrics: MetricsConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            listen_port: 3000,
            pool_a_port: 3001,
            pool_b_port: 3002,
            deploy_delay_secs: 20,
            poison: None,
            build_id_headers: false,
            metrics: MetricsConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Socket authority for a pool. Both pools are local builds, so the
    /// host is fixed to loopback.
    pub fn pool_addr(&self, pool: Pool) -> String {
        let port = match pool {
            Pool::A => self.pool_a_port,
            Pool::B => self.pool_b_port,
        };
        format!("127.0.0.1:{}", port)
    }

    /// Delay before the deployment transition fires.
    pub fn deploy_delay(&self) -> Duration {
        Duration::from_secs(self.deploy_delay_secs)
    }
}

/// Metrics exposition configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus metrics endpoint.
    pub enabled: bool,

    /// Metrics endpoint bind address.
    pub bind_address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: "127.0.0.1:9090".to_string(),
        }
    }
}
