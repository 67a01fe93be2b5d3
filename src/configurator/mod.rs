//! Builder-style configuration loading.
//!
//! This module provides:
//! - The [`Configurator`] builder: format, explicit files, search paths,
//!   file name, and environment prefix
//! - Usage text generation ([`usage`])
//!
//! # Priority
//!
//! [`Configurator::load`] decodes the first config file found (if any)
//! into the target object, then runs the binding engine's resolution
//! pass over it. Environment variables therefore override file-sourced
//! values, and declared defaults fill only the fields neither source
//! supplied.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::binding::{EnvSchema, resolve};
use crate::source::Format;

mod error;
mod usage;


pub use error::ConfigError;
pub use usage::usage;

/// Default base name for config files located via search paths.
const DEFAULT_FILE_NAME: &str = "config";

/// Locates, decodes, and resolves configuration objects.
///
/// # Example
///
/// ```no_run
/// use envbind::{Configurator, Format};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     host: String,
///     port: u16,
/// }
///
/// envbind::env_schema!(AppConfig {
///     host: value(env = "HOST"),
///     port: value(env = "PORT", default = "8080"),
/// });
///
/// let config: AppConfig = Configurator::new()
///     .with_format(Format::Yaml)
///     .with_search_path("./config")
///     .with_env_prefix("APP_")
///     .load()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Configurator {
    format: Option<Format>,
    files: Vec<PathBuf>,
    search_paths: Vec<PathBuf>,
    file_name: String,
    env_prefix: String,
}

impl Default for Configurator {
    fn default() -> Self {
        let mut search_paths = vec![PathBuf::from("."), PathBuf::from("./config")];
        if let Some(dir) = dirs::config_dir() {
            search_paths.push(dir);
        }
        Self {
            format: None,
            files: Vec::new(),
            search_paths,
            file_name: DEFAULT_FILE_NAME.to_owned(),
            env_prefix: String::new(),
        }
    }
}

impl Configurator {
    /// Creates a configurator with the default search paths (current
    /// directory, `./config`, and the platform config directory), no
    /// explicit files, and no environment prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configurator fixed to one format.
    #[must_use]
    pub fn for_format(format: Format) -> Self {
        Self::new().with_format(format)
    }

    /// Fixes the config file format instead of detecting it from the
    /// file extension. Also restricts search-path probing to this
    /// format's extensions.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Adds an explicit config file candidate. When any explicit files
    /// are configured, search paths are ignored and the first existing
    /// candidate is used; if none exists, loading fails.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Appends a directory to the search paths probed for
    /// `<file_name>.<extension>`. Directories are probed in insertion
    /// order, defaults first.
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Overrides the base file name probed in search paths
    /// (default: `config`).
    #[must_use]
    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_owned();
        self
    }

    /// Sets the prefix prepended to every candidate environment name
    /// during resolution.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_owned();
        self
    }

    /// Loads a configuration object: decodes the first config file found
    /// (if any), then resolves environment variables over it.
    ///
    /// When no file is found via search paths, loading proceeds with a
    /// default-constructed object and resolution alone; when explicit
    /// files were configured and none exists, loading fails instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or if the
    /// resolution pass fails.
    pub fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default + EnvSchema,
    {
        let mut target = match self.locate()? {
            Some(path) => self.parse_file(&path)?,
            None => T::default(),
        };
        resolve(&mut target, &self.env_prefix)?;
        Ok(target)
    }

    /// Loads a configuration object from one specific file, then
    /// resolves environment variables over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or if the
    /// resolution pass fails.
    pub fn load_from<T>(&self, path: &Path) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default + EnvSchema,
    {
        let mut target: T = self.parse_file(path)?;
        resolve(&mut target, &self.env_prefix)?;
        Ok(target)
    }

    /// Picks the config file for [`Configurator::load`].
    fn locate(&self) -> Result<Option<PathBuf>, ConfigError> {
        if !self.files.is_empty() {
            return self
                .files
                .iter()
                .find(|path| path.is_file())
                .cloned()
                .map(Some)
                .ok_or(ConfigError::NoConfigFile);
        }

        let formats = match self.format {
            Some(format) => vec![format],
            None => vec![Format::Yaml, Format::Json, Format::Toml, Format::Env],
        };
        for dir in &self.search_paths {
            for format in &formats {
                for extension in format.extensions() {
                    let candidate = dir.join(format!("{}.{extension}", self.file_name));
                    if candidate.is_file() {
                        tracing::debug!("Using config file '{}'", candidate.display());
                        return Ok(Some(candidate));
                    }
                }
            }
        }
        Ok(None)
    }

    fn parse_file<T>(&self, path: &Path) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        let format = match self.format {
            Some(format) => format,
            None => Format::from_path(path)?,
        };
        let file = File::open(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(format.parse(file)?)
    }
}
