//! envbind: typed configuration binding.
//!
//! A library for binding environment variables and config files onto
//! strongly-typed, possibly nested configuration structs, with defaults,
//! required-field enforcement, and recursive value coercion across
//! scalars, durations, timestamps, sequences, and maps.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use envbind::{Environment, env_schema, resolve_with};
//!
//! #[derive(Debug, Default)]
//! struct ServerConfig {
//!     host: String,
//!     port: u16,
//!     timeout: Duration,
//!     tags: Vec<String>,
//! }
//!
//! env_schema!(ServerConfig {
//!     host: value(env = "HOST", default = "localhost", describe = "bind host"),
//!     port: value(env = "PORT", default = "8080", describe = "bind port"),
//!     timeout: value(env = "TIMEOUT", default = "30s"),
//!     tags: value(env = "TAGS"),
//! });
//!
//! let env = Environment::from_iter([("APP_PORT", "9000"), ("APP_TAGS", "a,b")]);
//! let mut config = ServerConfig::default();
//! resolve_with(&mut config, "APP_", &env).unwrap();
//!
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 9000);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.tags, ["a", "b"]);
//! ```
//!
//! File-backed loading goes through [`Configurator`], which decodes a
//! YAML/JSON/TOML/env file first and then runs the same resolution pass,
//! so environment variables override file-sourced values.

pub mod binding;
pub mod configurator;
pub mod source;

pub use binding::{
    BindError, Binding, BoxError, CoerceError, DEFAULT_SEPARATOR, EnvSchema, EnvValue,
    Environment, ParseOpts, SetValue, resolve, resolve_with,
};
pub use configurator::{ConfigError, Configurator, usage};
pub use source::{Format, SourceError};
