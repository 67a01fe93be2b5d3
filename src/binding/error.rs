//! Error types for value coercion and resolution passes.

use thiserror::Error;

/// Error type for coercing one raw string into one typed value.
///
/// Produced by [`EnvValue::parse_env`](super::EnvValue::parse_env)
/// implementations. The resolution driver wraps these with the name of
/// the failing field, so the variants here only describe the value.
#[derive(Debug, Error)]
pub enum CoerceError {
    /// The raw value is not a recognized boolean literal.
    #[error("Invalid boolean literal '{0}'")]
    InvalidBool(String),

    /// The raw value is not a valid integer literal for the target width.
    ///
    /// Covers malformed literals and overflow alike.
    #[error("Invalid integer literal '{raw}': {source}")]
    InvalidInt {
        /// The offending raw value
        raw: String,
        /// Underlying parse error
        #[source]
        source: std::num::ParseIntError,
    },

    /// The raw value is not a valid floating-point literal.
    #[error("Invalid float literal '{raw}': {source}")]
    InvalidFloat {
        /// The offending raw value
        raw: String,
        /// Underlying parse error
        #[source]
        source: std::num::ParseFloatError,
    },

    /// The raw value is not a valid duration literal.
    ///
    /// Duration fields require an explicit unit (`"5s"`, `"10m"`);
    /// a bare number is rejected rather than guessed at.
    #[error("Invalid duration '{raw}': {source}")]
    InvalidDuration {
        /// The offending raw value
        raw: String,
        /// Underlying parse error
        #[source]
        source: humantime::DurationError,
    },

    /// The raw value does not match the timestamp layout.
    #[error("Invalid timestamp '{raw}': {source}")]
    InvalidTimestamp {
        /// The offending raw value
        raw: String,
        /// Underlying parse error
        #[source]
        source: chrono::ParseError,
    },

    /// A mapping pair-token has no `:` between key and value.
    #[error("Map entry '{0}' is missing a ':' separator")]
    InvalidMapEntry(String),

    /// Error returned by a caller-supplied [`SetValue`](super::SetValue)
    /// implementation, passed through verbatim.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for a resolution pass over a configuration object.
///
/// The pass aborts at the first failing field; there is no partial
/// success or best-effort mode.
#[derive(Debug, Error)]
pub enum BindError {
    /// A required field resolved no value and its slot is still in the
    /// zero state.
    ///
    /// Note that a required field does not fall back to its declared
    /// default; the required check runs first.
    #[error("Missing required field: {field}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
    },

    /// A resolved raw value could not be coerced into the field's type.
    #[error("Failed to coerce field '{field}' from value '{raw}': {source}")]
    Coercion {
        /// Name of the failing field
        field: &'static str,
        /// The raw value that failed to coerce
        raw: String,
        /// Underlying coercion error
        #[source]
        source: CoerceError,
    },
}
