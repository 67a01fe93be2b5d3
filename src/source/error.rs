//! Error types for config-file decoding.

use thiserror::Error;

/// Error type for the format-parser boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested format (or file extension) is not recognized.
    #[error("Unsupported config format '{0}'")]
    UnsupportedFormat(String),

    /// Failed to read from the underlying source.
    #[error("Failed to read config source: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode YAML.
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failed to decode JSON.
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to decode TOML.
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to parse a dotenv-style env file.
    #[error("Failed to parse env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}
