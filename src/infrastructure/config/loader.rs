//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown rotation policy
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    /// Probability or cap outside `[0, 1]`
    #[error("Invalid {name}: {value}. Must be within [0, 1]")]
    OutOfUnitRange {
        /// Scoring setting name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Jitter amplitude below zero
    #[error("Invalid {name}: {value}. Must be non-negative")]
    NegativeJitter {
        /// Scoring setting name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Patterns path set but blank
    #[error("Patterns path cannot be empty")]
    EmptyPatternsPath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .loginprobe/config.yaml (project config)
    /// 3. .loginprobe/local.yaml (project local overrides, optional)
    /// 4. Environment variables (LOGINPROBE_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base_figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load the standard hierarchy, then merge an explicit file on top
    pub fn load_with_override(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::base_figment()
            .merge(Yaml::file(path))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base_figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".loginprobe/config.yaml"))
            .merge(Yaml::file(".loginprobe/local.yaml"))
            .merge(Env::prefixed("LOGINPROBE_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        // Validate scoring config
        let scoring = &config.scoring;
        for (name, value) in [
            ("overall_baseline", scoring.overall_baseline),
            ("username_cap", scoring.username_cap),
            ("password_cap", scoring.password_cap),
            ("submit_cap", scoring.submit_cap),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }

        for (name, value) in [
            ("overall_jitter", scoring.overall_jitter),
            ("field_jitter", scoring.field_jitter),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeJitter { name, value });
            }
        }

        if config
            .patterns_path
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(ConfigError::EmptyPatternsPath);
        }

        Ok(())
    }
}
