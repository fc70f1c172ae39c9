//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (positional args + flags)
//!     → args.rs (lenient parse, defaults on bad numerics)
//!     → HarnessConfig (immutable)
//!     → shared via Arc to all subsystems
//!
//! Alternatively, with --config:
//!     TOML file
//!     → loader.rs (parse & deserialize)
//!     → HarnessConfig
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; no reload path
//! - Non-numeric port/delay arguments fall back to documented defaults
//!   instead of failing startup (the harness prioritizes always starting)
//! - An explicit --config file is operator intent, so errors there are
//!   fatal at startup

pub mod args;
pub mod loader;
pub mod schema;

pub use args::Args;
pub use loader::ConfigError;
pub use schema::{HarnessConfig, MetricsConfig};
