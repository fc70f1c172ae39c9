//! Routing decision logic.
//!
//! # Responsibilities
//! - Route every pre-deploy request to Pool A with the path unchanged
//! - Route post-deploy requests to Pool B by default
//! - Rewrite the poisoned chunk URL back to Pool A's stale chunk
//!
//! # Design Decisions
//! - Strict string-prefix matching; no wildcards, no regex
//! - The rewrite substitutes the matched prefix only, preserving any
//!   suffix (`.map`, query strings) verbatim

use serde::{Deserialize, Serialize};

use crate::deploy::DeploymentState;

/// Path prefix under which build chunks are served.
pub const CHUNK_PREFIX: &str = "/_next/static/chunks/";

/// One of the two backend pools the proxy fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    /// Pre-deployment build.
    A,
    /// Post-deployment build.
    B,
}

impl Pool {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Pool::A => "a",
            Pool::B => "b",
        }
    }
}

/// Poisoned chunk mapping: requests for Pool B's chunk URL are answered
/// with Pool A's bytes for `pre_deploy_chunk`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoisonMapping {
    /// Chunk filename the post-deploy build serves and the client asks for.
    pub post_deploy_chunk: String,

    /// Chunk filename from the pre-deploy build that answers instead.
    pub pre_deploy_chunk: String,
}

/// Where to send one request, computed fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub target: Pool,
    pub path: String,
}

/// Map a raw request path and the current deployment state to a
/// routing decision. Total over its inputs; no error conditions.
pub fn decide(
    path: &str,
    state: DeploymentState,
    poison: Option<&PoisonMapping>,
) -> RoutingDecision {
    // Before the deploy completes every request is answered by the old build.
    if state == DeploymentState::PreDeploy {
        return RoutingDecision {
            target: Pool::A,
            path: path.to_string(),
        };
    }

    // After the deploy everything comes from Pool B, except the poisoned
    // chunk URL: the client runs build B's code and asks for build B's
    // chunk, but we answer with build A's stale bytes to force the same
    // module mismatch a real stale bundle would cause.
    if let Some(poison) = poison {
        let poisoned_prefix = format!("{}{}", CHUNK_PREFIX, poison.post_deploy_chunk);
        if let Some(suffix) = path.strip_prefix(&poisoned_prefix) {
            return RoutingDecision {
                target: Pool::A,
                path: format!("{}{}{}", CHUNK_PREFIX, poison.pre_deploy_chunk, suffix),
            };
        }
    }

    RoutingDecision {
        target: Pool::B,
        path: path.to_string(),
    }
}
