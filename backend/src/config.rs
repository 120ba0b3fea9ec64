//! Configuration management for the weather classification service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WCS_ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact locations
    pub models: ModelsConfig,

    /// Upload limits
    pub upload: UploadConfig,

    /// Log output
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    /// Directory holding both artifacts
    pub dir: PathBuf,

    /// Image classifier file name (ONNX)
    pub cnn_file: String,

    /// Tabular classifier file name (ONNX)
    pub tabular_file: String,

    /// Refuse to start unless both models load
    pub require_all: bool,
}

impl ModelsConfig {
    pub fn cnn_path(&self) -> PathBuf {
        self.dir.join(&self.cnn_file)
    }

    pub fn tabular_path(&self) -> PathBuf {
        self.dir.join(&self.tabular_file)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Maximum accepted request body in bytes
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WCS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("models.dir", "models")?
            .set_default("models.cnn_file", "cnn_model.onnx")?
            .set_default("models.tabular_file", "tabular_model.onnx")?
            .set_default("models.require_all", false)?
            .set_default("upload.max_bytes", 10 * 1024 * 1024)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WCS_ prefix)
            .add_source(
                Environment::with_prefix("WCS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            cnn_file: "cnn_model.onnx".to_string(),
            tabular_file: "tabular_model.onnx".to_string(),
            require_all: false,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            models: ModelsConfig::default(),
            upload: UploadConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
