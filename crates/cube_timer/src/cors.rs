//! Origin allowlist for browser callers.
//!
//! Two layers cooperate. [`reject_foreign_origin`] runs first and answers a
//! disallowed `Origin` with a JSON 403. [`cors_layer`] then handles preflight
//! requests and tags responses for the allowed origins. Requests without an
//! `Origin` header (curl, other services) pass both.

use crate::api::AppState;
use crate::config::ServiceConfig;
use crate::error::ApiError;
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, instrument, warn};

/// Builds the CORS layer for the configured origins.
///
/// Entries that are not concrete origins (the `*` wildcard, values that are
/// not valid header text) are skipped with a warning.
#[instrument(skip(config))]
pub fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                warn!("Ignoring wildcard in allowed_origins");
                return None;
            }
            HeaderValue::from_str(origin)
                .map_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid origin"))
                .ok()
        })
        .collect();
    debug!(origins = origins.len(), "Building CORS layer");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Middleware rejecting browser requests from origins outside the allowlist.
#[instrument(skip_all, fields(method = %request.method(), uri = %request.uri()))]
pub async fn reject_foreign_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    match origin {
        Some(origin) if !state.config().allows_origin(&origin) => {
            ApiError::ForbiddenOrigin { origin }.into_response()
        }
        _ => next.run(request).await,
    }
}
