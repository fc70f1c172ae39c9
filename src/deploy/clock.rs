//! One-shot deployment clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::HarnessConfig;

/// Which side of the deployment transition the process is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    /// Before the transition: all traffic goes to Pool A.
    PreDeploy,
    /// After the transition: default routing targets Pool B.
    PostDeploy,
}

/// Process-wide deployment state holder.
///
/// Cheap to clone (Arc inside). The timer task spawned by [`schedule`]
/// is the only writer; request handlers read a snapshot per request.
///
/// [`schedule`]: DeployClock::schedule
#[derive(Clone, Default)]
pub struct DeployClock {
    deployed: Arc<AtomicBool>,
}

impl DeployClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current deployment state.
    pub fn state(&self) -> DeploymentState {
        if self.deployed.load(Ordering::Acquire) {
            DeploymentState::PostDeploy
        } else {
            DeploymentState::PreDeploy
        }
    }

    /// Start the one-shot deployment timer. Called exactly once at
    /// process start; the timer always fires unless the process exits
    /// first.
    pub fn schedule(&self, config: Arc<HarnessConfig>) {
        let deployed = Arc::clone(&self.deployed);
        tokio::spawn(async move {
            tokio::time::sleep(config.deploy_delay()).await;
            deployed.store(true, Ordering::Release);
            tracing::info!(
                pool_b_port = config.pool_b_port,
                "deployment complete, default routing now targets Pool B"
            );
            if let Some(poison) = &config.poison {
                tracing::info!(
                    post_deploy_chunk = %poison.post_deploy_chunk,
                    pre_deploy_chunk = %poison.pre_deploy_chunk,
                    "poison active: Pool B chunk now served from Pool A bytes"
                );
            }
        });
    }
}
