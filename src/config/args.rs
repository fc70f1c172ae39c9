//! Command-line argument handling.
//!
//! # Responsibilities
//! - Parse the positional harness arguments (ports, delay, chunk names)
//! - Fall back to documented defaults on non-numeric values
//! - Build the poison mapping only when both chunk names are present
//!
//! # Design Decisions
//! - Numeric positionals are captured as raw strings and parsed
//!   leniently: a bad value logs a warning and uses the default rather
//!   than aborting startup
//! - An empty chunk name counts as "not supplied"

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::config::loader;
use crate::config::schema::{HarnessConfig, MetricsConfig};
use crate::config::ConfigError;
use crate::routing::PoisonMapping;

/// Version-skew reverse proxy harness.
///
/// Fronts two backend pools and switches default routing from Pool A to
/// Pool B after the deployment delay, optionally poisoning one chunk URL.
#[derive(Parser, Debug, Default)]
#[command(name = "skewproxy")]
pub struct Args {
    /// Pool A (pre-deploy build) port [default: 3001]
    pub pool_a_port: Option<String>,

    /// Pool B (post-deploy build) port [default: 3002]
    pub pool_b_port: Option<String>,

    /// Seconds until the deployment transition fires [default: 20]
    pub deploy_delay_secs: Option<String>,

    /// Post-deploy chunk filename to poison (served from Pool A)
    pub poison_post_chunk: Option<String>,

    /// Pre-deploy chunk filename whose bytes answer the poisoned URL
    pub poison_pre_chunk: Option<String>,

    /// Stamp responses with an x-build-id header naming the answering pool
    #[arg(long)]
    pub build_id_headers: bool,

    /// Inbound listener port
    #[arg(long, default_value_t = 3000)]
    pub listen_port: u16,

    /// Load the full configuration from a TOML file instead of the
    /// positional arguments
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Build the harness configuration. A `--config` file, when given,
    /// is the sole configuration source.
    pub fn into_config(self) -> Result<HarnessConfig, ConfigError> {
        if let Some(path) = &self.config {
            return loader::load_config(path);
        }

        let defaults = HarnessConfig::default();
        Ok(HarnessConfig {
            listen_port: self.listen_port,
            pool_a_port: parse_or(self.pool_a_port, defaults.pool_a_port, "pool_a_port"),
            pool_b_port: parse_or(self.pool_b_port, defaults.pool_b_port, "pool_b_port"),
            deploy_delay_secs: parse_or(
                self.deploy_delay_secs,
                defaults.deploy_delay_secs,
                "deploy_delay_secs",
            ),
            poison: poison_mapping(self.poison_post_chunk, self.poison_pre_chunk),
            build_id_headers: self.build_id_headers,
            metrics: MetricsConfig::default(),
        })
    }
}

/// Lenient numeric parse: missing or malformed values use the default.
fn parse_or<T: FromStr + Copy + std::fmt::Display>(
    value: Option<String>,
    default: T,
    field: &'static str,
) -> T {
    match value {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(field, value = %raw, default = %default, "non-numeric argument, using default");
            default
        }),
    }
}

/// Poisoning activates only when both chunk names are supplied and
/// non-empty.
fn poison_mapping(post: Option<String>, pre: Option<String>) -> Option<PoisonMapping> {
    match (post, pre) {
        (Some(post), Some(pre)) if !post.is_empty() && !pre.is_empty() => Some(PoisonMapping {
            post_deploy_chunk: post,
            pre_deploy_chunk: pre,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_args() {
        let config = Args::default().into_config().unwrap();
        assert_eq!(config.pool_a_port, 3001);
        assert_eq!(config.pool_b_port, 3002);
        assert_eq!(config.deploy_delay_secs, 20);
        assert!(config.poison.is_none());
        assert!(!config.build_id_headers);
    }

    #[test]
    fn numeric_args_are_parsed() {
        let args = Args::try_parse_from([
            "skewproxy",
            "4001",
            "4002",
            "5",
            "b1.js",
            "a1.js",
            "--build-id-headers",
        ])
        .unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.pool_a_port, 4001);
        assert_eq!(config.pool_b_port, 4002);
        assert_eq!(config.deploy_delay_secs, 5);
        assert!(config.build_id_headers);
        let poison = config.poison.unwrap();
        assert_eq!(poison.post_deploy_chunk, "b1.js");
        assert_eq!(poison.pre_deploy_chunk, "a1.js");
    }

    #[test]
    fn non_numeric_args_fall_back_to_defaults() {
        let args = Args {
            pool_a_port: Some("not-a-port".into()),
            pool_b_port: Some("".into()),
            deploy_delay_secs: Some("soon".into()),
            ..Default::default()
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.pool_a_port, 3001);
        assert_eq!(config.pool_b_port, 3002);
        assert_eq!(config.deploy_delay_secs, 20);
    }

    #[test]
    fn poison_requires_both_chunk_names() {
        let only_post = Args {
            poison_post_chunk: Some("b1.js".into()),
            ..Default::default()
        };
        assert!(only_post.into_config().unwrap().poison.is_none());

        let empty_pre = Args {
            poison_post_chunk: Some("b1.js".into()),
            poison_pre_chunk: Some("".into()),
            ..Default::default()
        };
        assert!(empty_pre.into_config().unwrap().poison.is_none());
    }
}
