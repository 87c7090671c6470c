use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::Strategy;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Invalid default_strategy: {0}. Must be one of: smart_balance, fastest_wins, high_impact, deadline_driven"
    )]
    InvalidStrategy(String),

    #[error("Invalid suggestion_limit: {0}. Must be at least 1")]
    InvalidSuggestionLimit(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Server host cannot be empty")]
    EmptyHost,

    #[error("Invalid server port: {0}. Cannot be 0")]
    InvalidPort(u16),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .taskrank/config.yaml (project config)
    /// 3. .taskrank/local.yaml (project local overrides, optional)
    /// 4. Environment variables (TASKRANK_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment overrides still apply on top of the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TASKRANK_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".taskrank/config.yaml"))
            .merge(Yaml::file(".taskrank/local.yaml"))
            .merge(Env::prefixed("TASKRANK_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if Strategy::from_str(&config.default_strategy).is_none() {
            return Err(ConfigError::InvalidStrategy(
                config.default_strategy.clone(),
            ));
        }

        if config.suggestion_limit == 0 {
            return Err(ConfigError::InvalidSuggestionLimit(config.suggestion_limit));
        }

        if config.server.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}
