//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one task per request)
//!     → routing layer decides pool + outbound path
//!     → forward.rs (stream request to pool, stream response back)
//!     → Send to client
//! ```

pub mod forward;
pub mod server;

pub use forward::{BUILD_ID_HEADER, BUILD_ID_POOL_A, BUILD_ID_POOL_B};
pub use server::HttpServer;
