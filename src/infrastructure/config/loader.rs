use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project-local configuration and data
pub const CONFIG_DIR: &str = ".bluecarbon";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid {0} timeout: must be greater than 0 ms")]
    InvalidTimeout(&'static str),

    #[error("At least one inference model must be configured")]
    NoModels,

    #[error("Invalid threshold {name}: {value}. Must be within [0, 1]")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .bluecarbon/config.yaml (project config, created by init)
    /// 3. .bluecarbon/local.yaml (project local overrides, optional)
    /// 4. Environment variables (BLUECARBON_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Same as [`Self::load`], rooted at `root` instead of the working directory.
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("BLUECARBON_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        if config.inference.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout("inference"));
        }

        if config.inference.models.is_empty() {
            return Err(ConfigError::NoModels);
        }

        let mut seen = HashSet::new();
        for model in &config.inference.models {
            if model.id.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "Model id cannot be empty".to_string(),
                ));
            }
            if model.endpoint.is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "Model '{}' endpoint cannot be empty",
                    model.id
                )));
            }
            if !seen.insert(model.id.as_str()) {
                return Err(ConfigError::ValidationFailed(format!(
                    "Duplicate model id '{}'",
                    model.id
                )));
            }
        }

        if config.compliance.endpoint.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Compliance endpoint cannot be empty".to_string(),
            ));
        }
        if config.compliance.methodology.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Compliance methodology cannot be empty".to_string(),
            ));
        }
        if config.compliance.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout("compliance"));
        }

        let thresholds = [
            (
                "min_compliance_score",
                config.verification.min_compliance_score,
            ),
            ("min_confidence", config.verification.min_confidence),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        Ok(())
    }
}
