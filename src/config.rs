//! Configuration management for the ballot engine
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Election-facing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// Title carried with every assembled ballot
    pub title: String,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            title: "Voting System".to_string(),
        }
    }
}

/// Logging configuration, consumed by [`crate::init_with`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level for the engine's own log target
    pub level: String,
    /// Output format: "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub election: ElectionConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let election = ElectionConfig {
            title: std::env::var("ELECTION_TITLE")
                .unwrap_or_else(|_| ElectionConfig::default().title),
        };

        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: std::env::var("LOG_LEVEL").unwrap_or(defaults.level),
            format: std::env::var("LOG_FORMAT").unwrap_or(defaults.format),
        };

        Ok(Self { election, logging })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            election: ElectionConfig {
                title: "Test Election".to_string(),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
