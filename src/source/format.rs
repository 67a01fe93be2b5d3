//! Config file formats and their decoding.
//!
//! Decoding is thin delegation: each format hands the stream to its
//! serde decoder. The [`Format::Env`] variant is the exception — it
//! ingests variables into the process environment instead of producing
//! a value (see [`dotenv`](super::dotenv)).

use std::ffi::OsStr;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::dotenv;
use super::error::SourceError;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML documents (`.yaml`, `.yml`)
    Yaml,
    /// JSON documents (`.json`)
    Json,
    /// TOML documents (`.toml`)
    Toml,
    /// Dotenv-style env files (`.env`)
    Env,
}

impl Format {
    /// Resolves a format from its name or file extension, with or
    /// without a leading dot.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnsupportedFormat`] for anything else.
    pub fn from_name(name: &str) -> Result<Self, SourceError> {
        match name.trim_start_matches('.') {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "env" => Ok(Self::Env),
            other => Err(SourceError::UnsupportedFormat(other.to_owned())),
        }
    }

    /// Resolves a format from a file path's extension.
    ///
    /// Extension-less dotfiles such as `.env` are resolved from the full
    /// file name.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnsupportedFormat`] if the extension is
    /// missing or not recognized.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let name = path
            .extension()
            .or_else(|| path.file_name())
            .and_then(OsStr::to_str);
        match name {
            Some(name) => Self::from_name(name),
            None => Err(SourceError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    /// File extensions conventionally used for this format.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["yaml", "yml"],
            Self::Json => &["json"],
            Self::Toml => &["toml"],
            Self::Env => &["env"],
        }
    }

    /// Decodes a configuration object from a reader.
    ///
    /// For [`Format::Env`] the variables are written into the process
    /// environment and a default-constructed object is returned; the
    /// caller's subsequent resolution pass observes the ingested
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be read or decoded.
    pub fn parse<T>(self, mut reader: impl io::Read) -> Result<T, SourceError>
    where
        T: DeserializeOwned + Default,
    {
        match self {
            Self::Yaml => Ok(serde_yaml::from_reader(reader)?),
            Self::Json => Ok(serde_json::from_reader(io::BufReader::new(reader))?),
            Self::Toml => {
                // The TOML decoder wants the whole document as a string.
                let mut content = String::new();
                reader.read_to_string(&mut content)?;
                Ok(toml::from_str(&content)?)
            }
            Self::Env => {
                dotenv::ingest(reader)?;
                Ok(T::default())
            }
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Env => "env",
        };
        f.write_str(name)
    }
}
