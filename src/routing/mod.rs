//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path (raw, query string included)
//!     + DeploymentState snapshot
//!     + optional PoisonMapping
//!     → router.rs decide()
//!     → RoutingDecision { target pool, outbound path }
//! ```
//!
//! # Design Decisions
//! - Pure function, no I/O: deterministic given its inputs
//! - Literal string-prefix matching on the raw path, never structured
//!   URL parsing, so edge cases like double slashes or encoded
//!   characters pass through exactly as received
//! - Decisions are ephemeral per-request values, never cached

pub mod router;

pub use router::{decide, PoisonMapping, Pool, RoutingDecision, CHUNK_PREFIX};
