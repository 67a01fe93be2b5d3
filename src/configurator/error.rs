//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::binding::BindError;
use crate::source::SourceError;

/// Error type for [`Configurator`](super::Configurator) operations.
///
/// Covers file location, decoding, and the resolution pass.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to open the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// None of the explicitly configured files exist.
    #[error("No config file found at any configured path")]
    NoConfigFile,

    /// Failed to detect the format or decode the file.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The resolution pass failed.
    #[error(transparent)]
    Bind(#[from] BindError),
}
