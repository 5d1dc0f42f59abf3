//! Scramble sources for the timer: the HTTP service or in-process generation.

use crate::api::ScrambleResponse;
use crate::error::ErrorBody;
use cube_scramble::{RngEntropy, ScrambleGenerator};
use derive_more::{Display, Error};
use derive_new::new;
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

/// HTTP client for the scramble service.
#[derive(Debug, Clone, new)]
pub struct ScrambleClient {
    base_url: String,
    length: usize,
    #[new(default)]
    client: reqwest::Client,
}

impl ScrambleClient {
    /// Requests one scramble from `GET /api/scramble`.
    #[instrument(skip(self), fields(base_url = %self.base_url, length = self.length))]
    pub async fn fetch(&self) -> Result<String, ClientError> {
        let url = format!(
            "{}/api/scramble?length={}",
            self.base_url.trim_end_matches('/'),
            self.length
        );
        debug!(url = %url, "Requesting scramble");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!(status = %status, message = %message, "Scramble request rejected");
            return Err(ClientError::new(message));
        }

        let payload: ScrambleResponse = response
            .json()
            .await
            .map_err(|e| ClientError::new(format!("Invalid scramble response: {}", e)))?;
        Ok(payload.scramble.to_string())
    }
}

/// Where the timer gets its scrambles from.
#[derive(Debug, Clone)]
pub enum ScrambleSource {
    /// Fetch from a running scramble service.
    Remote(ScrambleClient),
    /// Generate in-process.
    Local {
        /// Generator to use.
        generator: ScrambleGenerator,
        /// Moves per scramble.
        length: usize,
    },
}

impl ScrambleSource {
    /// Produces the next scramble as notation text.
    #[instrument(skip(self))]
    pub async fn next_scramble(&self) -> Result<String, ClientError> {
        match self {
            ScrambleSource::Remote(client) => client.fetch().await,
            ScrambleSource::Local { generator, length } => {
                let entropy = RngEntropy::from_os()
                    .map_err(|e| ClientError::new(format!("Entropy unavailable: {}", e)))?;
                Ok(generator.generate(*length, entropy).to_string())
            }
        }
    }
}

/// Picks the most specific message from an error response.
///
/// Prefers the JSON `message`, then `error`, then the status reason, then a
/// generic status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = format!("HTTP error! Status: {}", status.as_u16());
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        Ok(_) => fallback,
        Err(_) => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or(fallback),
    }
}

/// Scramble fetch error.
#[derive(Debug, Clone, Display, Error)]
#[display("Client error: {} at {}:{}", message, file, line)]
pub struct ClientError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
