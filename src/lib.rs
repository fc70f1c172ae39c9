//! Version-Skew Reverse Proxy Harness
//!
//! Fronts two backend pools (Pool A = pre-deploy build, Pool B =
//! post-deploy build) and reproduces the mid-session "version skew"
//! failure class of rolling deployments: all traffic goes to Pool A
//! until a one-shot deployment timer fires, then default routing flips
//! to Pool B. Optionally one asset-chunk URL is poisoned so that a
//! request for Pool B's chunk is silently answered with Pool A's stale
//! bytes, and each response can be stamped with an `x-build-id` header
//! naming the pool that actually answered.

pub mod config;
pub mod deploy;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::HarnessConfig;
pub use deploy::{DeployClock, DeploymentState};
pub use http::HttpServer;
