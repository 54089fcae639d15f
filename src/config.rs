//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the matching engine, supporting TOML files
//! and environment variable overrides with validation and type-safe access.
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (`LEGAL_MATCH_*`)
//! 2. Configuration file (TOML)
//! 3. Default values
//!
//! The scoring policy itself (combination weights, confidence threshold) is
//! deliberately *not* configurable; those are fixed policy constants in
//! `ranking` and `classifier`.
//!
//! ## Usage
//! ```rust,no_run
//! use legal_match::config::Config;
//!
//! let config = Config::from_file("config.toml").unwrap();
//! println!("Candidate store: {:?}", config.storage.db_path);
//! ```

use crate::errors::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine behavior
    pub engine: EngineConfig,
    /// Candidate storage settings
    pub storage: StorageConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Engine behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of candidates returned when the request does not specify one
    pub default_top_n: usize,
    /// Maximum accepted query length in characters
    pub max_query_length: usize,
}

/// Candidate storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Embedded database path
    pub db_path: PathBuf,
    /// Serve from the built-in candidate set when the store is unreachable
    /// or empty, instead of failing the request
    pub use_fallback: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_top_n: 3,
            max_query_length: 2000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/candidates.db"),
            use_fallback: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| MatchError::Config {
                message: format!("Failed to read config file {:?}: {}", path, e),
            })?;
            toml::from_str(&content).map_err(|e| MatchError::Config {
                message: format!("Failed to parse config file {:?}: {}", path, e),
            })?
        } else {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(db_path) = std::env::var("LEGAL_MATCH_DB_PATH") {
            self.storage.db_path = PathBuf::from(db_path);
        }
        if let Ok(level) = std::env::var("LEGAL_MATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(top_n) = std::env::var("LEGAL_MATCH_TOP_N") {
            self.engine.default_top_n = top_n.parse().map_err(|_| MatchError::Config {
                message: "Invalid count in LEGAL_MATCH_TOP_N".to_string(),
            })?;
        }
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.engine.default_top_n == 0 {
            return Err(MatchError::ValidationFailed {
                field: "engine.default_top_n".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }

        if self.engine.max_query_length == 0 {
            return Err(MatchError::ValidationFailed {
                field: "engine.max_query_length".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }

        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(MatchError::ValidationFailed {
                field: "logging.level".to_string(),
                reason: format!(
                    "unknown level '{}', expected one of {:?}",
                    self.logging.level, LEVELS
                ),
            });
        }

        Ok(())
    }
}
