//! Configuration management for the car price estimator

use crate::error::EstimatorError;
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Log output format
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub dataset: DatasetConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Regression model configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX model artifact
    pub path: PathBuf,
    /// Number of threads for ONNX inference (default: 1)
    pub onnx_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/car_price_model.onnx"),
            onnx_threads: 1,
        }
    }
}

/// Dataset view configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the CSV dataset
    pub path: PathBuf,
    /// Number of records shown in the table preview
    pub preview_rows: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("CarPrice.csv"),
            preview_rows: 10,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency marker placed before formatted prices
    pub currency_prefix: String,
    /// Image shown on the home view
    pub home_image: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_prefix: "Rp".to_string(),
            home_image: PathBuf::from("car.jpg"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, falling back to defaults when absent
    pub fn load() -> Result<Self, EstimatorError> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path
    ///
    /// A missing file is not an error; every key has a default.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, EstimatorError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .build()
            .map_err(|e| EstimatorError::Config(format!("failed to build configuration: {e}")))?;

        let config: AppConfig = config.try_deserialize().map_err(|e| {
            EstimatorError::Config(format!("failed to deserialize configuration: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EstimatorError> {
        if self.model.onnx_threads == 0 {
            return Err(EstimatorError::Config(
                "model.onnx_threads must be at least 1".to_string(),
            ));
        }
        if self.display.currency_prefix.trim().is_empty() {
            return Err(EstimatorError::Config(
                "display.currency_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
