//! Cube Timer - scramble service and terminal timer
//!
//! Serves WCA-style scrambles over HTTP and drives a spacebar timer in the
//! terminal.
//!
//! # Architecture
//!
//! - **Config**: TOML service configuration with env overrides
//! - **API**: axum routes for single and batch scrambles
//! - **CORS**: origin allowlist for browser callers
//! - **TUI**: stopwatch, scramble client and cube net rendering
//!
//! # Example
//!
//! ```no_run
//! use cube_timer::{AppState, ServiceConfig, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let app = router(AppState::new(config));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod cors;
mod error;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServiceConfig};

// Crate-level exports - HTTP API
pub use api::{
    AppState, HealthResponse, ScrambleBatchResponse, ScrambleQuery, ScrambleResponse,
    parse_bounded, router,
};

// Crate-level exports - Errors
pub use error::{ApiError, ErrorBody};
