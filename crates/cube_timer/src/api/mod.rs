//! HTTP API for scramble generation.
//!
//! Routes:
//!
//! - `GET /api/scramble?length=N` - one scramble
//! - `GET /api/scrambles?count=C&length=N` - a batch of scrambles
//! - `GET /health` - liveness and a generation counter
//!
//! Query parameters are validated here; the generator only ever sees a
//! length inside the configured range.

mod handlers;
mod validation;

pub use handlers::{HealthResponse, ScrambleBatchResponse, ScrambleResponse};
pub use validation::{ScrambleQuery, parse_bounded};

use crate::config::ServiceConfig;
use crate::cors;
use axum::Router;
use axum::extract::Request;
use axum::middleware;
use axum::response::Response;
use axum::routing::get;
use cube_scramble::ScrambleGenerator;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tower::ServiceBuilder;
use tracing::{info, instrument};

/// Shared state for every request.
///
/// Cloning is cheap; the config and counter are reference-counted and the
/// generator holds configuration only.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<ServiceConfig>,
    generator: ScrambleGenerator,
    generated: Arc<AtomicU64>,
}

impl AppState {
    /// Creates state from a validated config.
    #[instrument(skip(config))]
    pub fn new(config: ServiceConfig) -> Self {
        let generator = config.generator();
        info!(
            repeat_axis_acceptance = *generator.repeat_axis_acceptance(),
            "Creating scramble service state"
        );
        Self {
            config: Arc::new(config),
            generator,
            generated: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the service config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the scramble generator.
    pub fn generator(&self) -> &ScrambleGenerator {
        &self.generator
    }

    /// Returns the number of scrambles generated since startup.
    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    fn record_generated(&self, count: u64) {
        self.generated.fetch_add(count, Ordering::Relaxed);
    }
}

/// Builds the application router with CORS and request logging.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scramble", get(handlers::scramble))
        .route("/api/scrambles", get(handlers::scramble_batch))
        .route("/health", get(handlers::health))
        .layer(cors::cors_layer(state.config()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cors::reject_foreign_origin,
        ))
        .layer(
            ServiceBuilder::new()
                .map_request(|req: Request| {
                    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                    req
                })
                .map_response(|res: Response| {
                    info!(status = %res.status(), "Response sent");
                    res
                }),
        )
        .with_state(state)
}
