//! Request handlers for the scramble API.

use super::AppState;
use super::validation::ScrambleQuery;
use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use cube_scramble::{RngEntropy, Scramble};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const SUCCESS_MESSAGE: &str = "Scramble generated successfully.";

/// Response for a single scramble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrambleResponse {
    /// The scramble, space-separated.
    pub scramble: Scramble,
    /// Number of moves in the scramble.
    pub length: usize,
    /// Confirmation message.
    pub message: String,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
}

/// Response for a batch of scrambles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrambleBatchResponse {
    /// The scrambles, each space-separated.
    pub scrambles: Vec<Scramble>,
    /// Number of scrambles.
    pub count: usize,
    /// Number of moves in each scramble.
    pub length: usize,
    /// Confirmation message.
    pub message: String,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
}

/// Response for the health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Scrambles generated since startup.
    pub scrambles_generated: u64,
}

/// `GET /api/scramble?length=N`
#[instrument(skip(state))]
pub async fn scramble(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ScrambleResponse>, ApiError> {
    let Query(pairs) = query?;
    let query = ScrambleQuery::from_pairs(pairs);
    let config = state.config();
    let length = query.length(*config.default_length(), config.length_range())?;

    let entropy = RngEntropy::from_os()?;
    let scramble = state.generator().generate(length, entropy);
    state.record_generated(1);

    info!(length, scramble = %scramble, "Scramble generated");
    Ok(Json(ScrambleResponse {
        scramble,
        length,
        message: SUCCESS_MESSAGE.to_string(),
        timestamp: Utc::now(),
    }))
}

/// `GET /api/scrambles?count=C&length=N`
#[instrument(skip(state))]
pub async fn scramble_batch(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ScrambleBatchResponse>, ApiError> {
    let Query(pairs) = query?;
    let query = ScrambleQuery::from_pairs(pairs);
    let config = state.config();
    let count = query.count(1, config.count_range())?;
    let length = query.length(*config.default_length(), config.length_range())?;

    let entropy = RngEntropy::from_os()?;
    let scrambles = state.generator().generate_batch(count, length, entropy);
    state.record_generated(count as u64);

    info!(count, length, "Scramble batch generated");
    Ok(Json(ScrambleBatchResponse {
        scrambles,
        count,
        length,
        message: format!("{} scrambles generated successfully.", count),
        timestamp: Utc::now(),
    }))
}

/// `GET /health`
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        scrambles_generated: state.generated(),
    })
}
