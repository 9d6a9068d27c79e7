//! Application configuration.

use serde::{Deserialize, Serialize};

/// Main configuration structure for loginprobe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Knowledge base file (YAML or JSON); the built-in registry when absent
    #[serde(default)]
    pub patterns_path: Option<String>,

    /// Reject unparsable URLs instead of falling back to the generic pattern
    #[serde(default)]
    pub strict_urls: bool,

    /// Confidence estimation parameters
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Simulated analysis latency
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Confidence estimation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Center of the overall confidence band
    #[serde(default = "default_overall_baseline")]
    pub overall_baseline: f64,

    /// Full width of the overall confidence band
    #[serde(default = "default_overall_jitter")]
    pub overall_jitter: f64,

    /// Full width of the per-field perturbation
    #[serde(default = "default_field_jitter")]
    pub field_jitter: f64,

    /// Maximum username confidence
    #[serde(default = "default_username_cap")]
    pub username_cap: f64,

    /// Maximum password confidence
    #[serde(default = "default_password_cap")]
    pub password_cap: f64,

    /// Maximum submit confidence
    #[serde(default = "default_submit_cap")]
    pub submit_cap: f64,
}

const fn default_overall_baseline() -> f64 {
    0.825
}

const fn default_overall_jitter() -> f64 {
    0.25
}

const fn default_field_jitter() -> f64 {
    0.10
}

const fn default_username_cap() -> f64 {
    0.98
}

const fn default_password_cap() -> f64 {
    0.99
}

const fn default_submit_cap() -> f64 {
    0.95
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            overall_baseline: default_overall_baseline(),
            overall_jitter: default_overall_jitter(),
            field_jitter: default_field_jitter(),
            username_cap: default_username_cap(),
            password_cap: default_password_cap(),
            submit_cap: default_submit_cap(),
        }
    }
}

/// Artificial delay before a result is produced.
///
/// No page is fetched while waiting; the delay only paces interactive front ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LatencyConfig {
    /// Fixed part of the delay in milliseconds
    #[serde(default)]
    pub base_ms: u64,

    /// Random extra delay of up to this many milliseconds
    #[serde(default)]
    pub jitter_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when absent
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
