//! Configuration loading, validation, and environment variable interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fill_chart::config::load_config;
//!
//! // Load from the default path (fill-chart.yaml), falling back to defaults.
//! let config = load_config(None)?;
//!
//! // Load from a custom path; the file must exist.
//! let config = load_config(Some("custom/fill-chart.yaml"))?;
//! ```

mod chart;
mod data;
mod observability;
mod replay;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use chart::ChartConfig;
pub use data::{DataConfig, FillsConfig, RangeConfig};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use replay::{RenderMode, ReplayConfig};

/// Path used when no config file is named explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "fill-chart.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Live replay or static render.
    #[serde(default)]
    pub mode: RenderMode,
    /// Candle day-file location.
    #[serde(default)]
    pub data: DataConfig,
    /// Date range to load.
    #[serde(default)]
    pub range: RangeConfig,
    /// Fill log.
    #[serde(default)]
    pub fills: FillsConfig,
    /// Replay pacing.
    #[serde(default)]
    pub replay: ReplayConfig,
    /// Chart surface options.
    #[serde(default)]
    pub chart: ChartConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// With `None`, reads [`DEFAULT_CONFIG_PATH`] and falls back to defaults when
/// that file does not exist. An explicitly named file must exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let explicit = path.is_some();
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    if !explicit && !Path::new(path).exists() {
        info!(path, "No config file found, using defaults");
        let config = Config::default();
        validate_config(&config)?;
        return Ok(config);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.range.start_date > config.range.end_date {
        return Err(ConfigError::ValidationError(format!(
            "range.start_date ({}) must not be after range.end_date ({})",
            config.range.start_date, config.range.end_date
        )));
    }

    if config.data.symbol.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "data.symbol must not be empty".to_string(),
        ));
    }

    if config.replay.step_delay_ms == 0 {
        return Err(ConfigError::ValidationError(
            "replay.step_delay_ms must be positive".to_string(),
        ));
    }

    let valid_formats = ["pretty", "compact", "json"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
