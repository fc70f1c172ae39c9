//! Deployment state subsystem.
//!
//! # State Transitions
//! ```text
//! PreDeploy → PostDeploy: one-shot timer fires after deploy_delay_secs
//! ```
//! The transition is monotonic and happens exactly once per process;
//! there is no reverse edge and no cancellation path.
//!
//! # Design Decisions
//! - Single atomic cell, single writer (the timer task), many readers
//! - No pub/sub: there is exactly one transition and no subscriber
//!   needs historical events
//! - At zero delay the transition fires on the next scheduling
//!   opportunity; the race against listener readiness is an accepted
//!   property of the harness

pub mod clock;

pub use clock::{DeployClock, DeploymentState};
