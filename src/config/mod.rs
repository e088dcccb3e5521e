//! Configuration management for Delinkify
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use delinkify::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Working directory: {}", config.tmp_dir.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `DELINKIFY__<section>__<key>`
//!
//! Examples:
//! - `DELINKIFY__TMP_DIR=/var/tmp/delinkify`
//! - `DELINKIFY__EXTRACTOR__MAX_FILESIZE=50MB`
//! - `DELINKIFY__EXTRACTOR__BINARY=/usr/local/bin/yt-dlp`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/delinkify.toml`.
//! This can be overridden using the `DELINKIFY_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{Config, DeliveryConfig, ExtractorConfig, HandlerSettings};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`DELINKIFY__*`)
    /// 2. TOML file (default: `config/delinkify.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation
    /// fails (unknown handler references, zero limits, etc.)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
tmp_dir = "/var/tmp/delinkify"

[extractor]
binary = "yt-dlp"
max_filesize = "35MB"
user_agent = "test-agent/1.0"

[handlers.instagram_single]
weight = 500

[delivery]
channel_capacity = 8
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.extractor.user_agent, "test-agent/1.0");
        assert_eq!(config.handler_weight("instagram_single"), Some(500));
    }

    #[test]
    fn test_validation_catches_unknown_handler() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[handlers.instagram_carousel]
weight = 400
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::UnknownHandler { .. })
        ));
    }
}
