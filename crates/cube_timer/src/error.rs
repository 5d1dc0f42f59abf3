//! API error types and their HTTP responses.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cube_scramble::EntropyError;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Error raised at the HTTP boundary.
#[derive(Debug, Clone, Display, Error)]
pub enum ApiError {
    /// A query parameter is malformed or outside its accepted range.
    #[display("{} must be an integer between {} and {}", parameter, min, max)]
    InvalidParameter {
        /// Parameter name.
        parameter: &'static str,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// The query string could not be decoded at all.
    #[display("Malformed query string: {}", detail)]
    MalformedQuery {
        /// Decoder message.
        detail: String,
    },

    /// Generation failed inside the service.
    #[display("{}: {}", message, detail)]
    Internal {
        /// Generic failure message.
        message: String,
        /// Diagnostic detail.
        detail: String,
    },

    /// The request came from a browser origin outside the allowlist.
    #[display("Origin not allowed: {}", origin)]
    ForbiddenOrigin {
        /// Rejected origin.
        origin: String,
    },
}

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter { .. } | ApiError::MalformedQuery { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ForbiddenOrigin { .. } => StatusCode::FORBIDDEN,
        }
    }

    /// Builds the JSON body for this error.
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::InvalidParameter {
                parameter,
                min,
                max,
            } => ErrorBody {
                message: format!("Invalid parameter '{}'.", parameter),
                error: self.to_string(),
                parameter: Some(parameter.to_string()),
                min: Some(*min),
                max: Some(*max),
            },
            ApiError::MalformedQuery { detail } => ErrorBody {
                message: "Invalid query string.".to_string(),
                error: detail.clone(),
                parameter: None,
                min: None,
                max: None,
            },
            ApiError::Internal { message, detail } => ErrorBody {
                message: message.clone(),
                error: detail.clone(),
                parameter: None,
                min: None,
                max: None,
            },
            ApiError::ForbiddenOrigin { origin } => ErrorBody {
                message: "The CORS policy for this site does not allow access from the specified Origin."
                    .to_string(),
                error: origin.clone(),
                parameter: None,
                min: None,
                max: None,
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedQuery {
            detail: rejection.body_text(),
        }
    }
}

impl From<EntropyError> for ApiError {
    fn from(err: EntropyError) -> Self {
        ApiError::Internal {
            message: "Failed to generate scramble.".to_string(),
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, status = %status, "Request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

/// JSON payload for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable summary.
    #[serde(default)]
    pub message: String,
    /// Detail: the accepted range, the rejected origin, or diagnostic text.
    #[serde(default)]
    pub error: String,
    /// Name of the invalid parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Smallest accepted value for `parameter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    /// Largest accepted value for `parameter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_parts(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body");
        (status, serde_json::from_slice(&bytes).expect("JSON body"))
    }

    #[tokio::test]
    async fn entropy_failure_is_internal_error() {
        let err: ApiError = EntropyError::new("OS entropy pool unavailable").into();
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Failed to generate scramble.");
        assert!(body.error.contains("OS entropy pool unavailable"));
        assert_eq!(body.parameter, None);
    }

    #[tokio::test]
    async fn invalid_parameter_names_range() {
        let err = ApiError::InvalidParameter {
            parameter: "count",
            min: 1,
            max: 50,
        };
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Invalid parameter 'count'.");
        assert_eq!(body.error, "count must be an integer between 1 and 50");
        assert_eq!((body.min, body.max), (Some(1), Some(50)));
    }
}
