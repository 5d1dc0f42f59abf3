//! Scramble service configuration.

use cube_scramble::{DEFAULT_REPEAT_AXIS_ACCEPTANCE, ScrambleGenerator};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Configuration for the scramble HTTP service.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct ServiceConfig {
    /// Host to bind to.
    host: String,

    /// Port to bind to.
    port: u16,

    /// Browser origins allowed to call the API.
    allowed_origins: Vec<String>,

    /// Scramble length used when a request omits `length`.
    default_length: usize,

    /// Smallest accepted scramble length.
    min_length: usize,

    /// Largest accepted scramble length.
    max_length: usize,

    /// Largest accepted batch size.
    max_count: usize,

    /// Probability of keeping an axis draw that repeats the previous axis.
    repeat_axis_acceptance: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origins: vec![
                "http://localhost:1234".to_string(),
                "http://localhost:8080".to_string(),
            ],
            default_length: 20,
            min_length: 1,
            max_length: 100,
            max_count: 50,
            repeat_axis_acceptance: DEFAULT_REPEAT_AXIS_ACCEPTANCE,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the length and count bounds are consistent.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::new("min_length must be at least 1"));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::new(format!(
                "min_length ({}) exceeds max_length ({})",
                self.min_length, self.max_length
            )));
        }
        if !self.length_range().contains(&self.default_length) {
            return Err(ConfigError::new(format!(
                "default_length ({}) is outside {}..={}",
                self.default_length, self.min_length, self.max_length
            )));
        }
        if self.max_count == 0 {
            return Err(ConfigError::new("max_count must be at least 1"));
        }
        if let Some(origin) = self
            .allowed_origins
            .iter()
            .find(|origin| origin.as_str() == "*" || origin.trim().is_empty())
        {
            return Err(ConfigError::new(format!(
                "allowed_origins entry {:?} is not a concrete origin",
                origin
            )));
        }
        if !(0.0..=1.0).contains(&self.repeat_axis_acceptance) {
            return Err(ConfigError::new(format!(
                "repeat_axis_acceptance ({}) must be within 0.0..=1.0",
                self.repeat_axis_acceptance
            )));
        }
        Ok(())
    }

    /// Overrides the port from a raw value such as the `PORT` variable.
    ///
    /// Unparseable values are ignored with a warning.
    #[instrument(skip(self))]
    pub fn override_port(self, raw: Option<String>) -> Self {
        match raw.as_deref().map(str::parse::<u16>) {
            Some(Ok(port)) => {
                debug!(port, "Port overridden");
                self.with_port(port)
            }
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring invalid port override");
                self
            }
            None => self,
        }
    }

    /// Accepted scramble lengths.
    pub fn length_range(&self) -> RangeInclusive<usize> {
        self.min_length..=self.max_length
    }

    /// Accepted batch sizes.
    pub fn count_range(&self) -> RangeInclusive<usize> {
        1..=self.max_count
    }

    /// Returns `true` if browsers from `origin` may call the API.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Builds the scramble generator described by this config.
    pub fn generator(&self) -> ScrambleGenerator {
        ScrambleGenerator::new(self.repeat_axis_acceptance)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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
