//! Value coercion: converting raw strings into typed field values.
//!
//! [`EnvValue`] is implemented for every type a configuration field may
//! have. Composite implementations (`Vec`, maps, `Option`) recurse into
//! their element types with the same parse options, so arbitrarily nested
//! shapes (sequences of sequences, maps of sequences) coerce correctly.
//!
//! Each implementation also answers the zero-state question for its type
//! via [`EnvValue::is_zero`]. The zero state does double duty during
//! resolution: it gates both default application and required-field
//! enforcement, which means a field explicitly initialized to its type's
//! zero value is indistinguishable from one that was never set.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::error::CoerceError;

/// Separator used to split composite raw values unless a field declares
/// its own, and to split candidate environment-name lists always.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Default layout for naive (offset-free) datetime fields.
pub const DEFAULT_DATETIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Default layout for date-only fields.
pub const DEFAULT_DATE_LAYOUT: &str = "%Y-%m-%d";

/// Per-field options threaded through a coercion, including recursively
/// into sequence and mapping elements.
#[derive(Debug, Clone, Copy)]
pub struct ParseOpts<'a> {
    /// Separator for splitting sequence elements and mapping pairs.
    pub separator: &'a str,

    /// Layout override for timestamp fields, in chrono `strftime` syntax.
    /// When absent, each timestamp type falls back to its standard layout
    /// (RFC 3339 for offset-aware datetimes).
    pub layout: Option<&'a str>,
}

impl Default for ParseOpts<'_> {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            layout: None,
        }
    }
}

/// A value that can be coerced from a raw configuration string.
///
/// Implementations exist for strings, paths, booleans, sized integers,
/// floats, durations, chrono timestamps, `Option`, `Vec`, and maps.
/// Implementing this trait for your own type is the supported way to
/// bind it without the [`SetValue`](super::SetValue) escape hatch.
pub trait EnvValue: Sized {
    /// Parses a raw string into a value of this type.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] describing the malformed value.
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError>;

    /// Reports whether this value is in its type's zero/empty state.
    fn is_zero(&self) -> bool;

    /// Single-byte element types return a constructor here so that
    /// sequences of them bind as raw bytes instead of separator-split
    /// lists. Not meant to be implemented outside this crate.
    #[doc(hidden)]
    #[must_use]
    fn byte_repr() -> Option<fn(u8) -> Self> {
        None
    }
}

impl EnvValue for String {
    fn parse_env(raw: &str, _opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        Ok(raw.to_owned())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl EnvValue for PathBuf {
    fn parse_env(raw: &str, _opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        Ok(Self::from(raw))
    }

    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl EnvValue for bool {
    fn parse_env(raw: &str, _opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            other => Err(CoerceError::InvalidBool(other.to_owned())),
        }
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

/// Splits an integer literal into sign, radix, and digits.
///
/// Accepts an optional `+`/`-` sign followed by a `0x`/`0o`/`0b` radix
/// prefix (either case) or plain decimal digits.
fn int_literal_parts(raw: &str) -> (bool, u32, &str) {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    for (prefix, radix) in [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ] {
        if let Some(digits) = body.strip_prefix(prefix) {
            return (negative, radix, digits);
        }
    }

    (negative, 10, body)
}

macro_rules! impl_env_int {
    ($($int:ty),* $(,)?) => {$(
        impl EnvValue for $int {
            fn parse_env(raw: &str, _opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
                let (negative, radix, digits) = int_literal_parts(raw);
                // from_str_radix only understands a sign that is part of
                // the digit string, so it is re-attached after the radix
                // prefix has been stripped.
                let parsed = if negative {
                    <$int>::from_str_radix(&format!("-{digits}"), radix)
                } else {
                    <$int>::from_str_radix(digits, radix)
                };
                parsed.map_err(|source| CoerceError::InvalidInt {
                    raw: raw.to_owned(),
                    source,
                })
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

impl_env_int!(i8, i16, i32, i64, isize, u16, u32, u64, usize);

// u8 is the designated single-byte element type: a lone u8 field parses
// as an integer, but a Vec<u8> field binds the raw bytes of the string.
impl EnvValue for u8 {
    fn parse_env(raw: &str, _opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        let (negative, radix, digits) = int_literal_parts(raw);
        let parsed = if negative {
            Self::from_str_radix(&format!("-{digits}"), radix)
        } else {
            Self::from_str_radix(digits, radix)
        };
        parsed.map_err(|source| CoerceError::InvalidInt {
            raw: raw.to_owned(),
            source,
        })
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn byte_repr() -> Option<fn(u8) -> Self> {
        Some(|byte| byte)
    }
}

macro_rules! impl_env_float {
    ($($float:ty),* $(,)?) => {$(
        impl EnvValue for $float {
            fn parse_env(raw: &str, _opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
                raw.parse::<$float>().map_err(|source| CoerceError::InvalidFloat {
                    raw: raw.to_owned(),
                    source,
                })
            }

            fn is_zero(&self) -> bool {
                // Bit-level check: negative zero carries a sign bit and
                // therefore counts as explicitly set.
                self.to_bits() == 0
            }
        }
    )*};
}

impl_env_float!(f32, f64);

impl EnvValue for Duration {
    /// Durations use duration-literal syntax with an explicit unit,
    /// e.g. `"5s"`, `"10m"`, `"1h 30m"`. A bare integer is rejected.
    fn parse_env(raw: &str, _opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        humantime::parse_duration(raw).map_err(|source| CoerceError::InvalidDuration {
            raw: raw.to_owned(),
            source,
        })
    }

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl EnvValue for DateTime<Utc> {
    /// Offset-aware datetimes default to RFC 3339; a layout override must
    /// include an offset specifier (`%z`/`%:z`) for the parse to succeed.
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        let parsed = match opts.layout {
            Some(layout) => DateTime::parse_from_str(raw, layout),
            None => DateTime::parse_from_rfc3339(raw),
        };
        parsed
            .map(|datetime| datetime.with_timezone(&Utc))
            .map_err(|source| CoerceError::InvalidTimestamp {
                raw: raw.to_owned(),
                source,
            })
    }

    fn is_zero(&self) -> bool {
        // Zero state is the Unix epoch, this type's Default.
        *self == Self::default()
    }
}

impl EnvValue for NaiveDateTime {
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        let layout = opts.layout.unwrap_or(DEFAULT_DATETIME_LAYOUT);
        Self::parse_from_str(raw, layout).map_err(|source| CoerceError::InvalidTimestamp {
            raw: raw.to_owned(),
            source,
        })
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl EnvValue for NaiveDate {
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        let layout = opts.layout.unwrap_or(DEFAULT_DATE_LAYOUT);
        Self::parse_from_str(raw, layout).map_err(|source| CoerceError::InvalidTimestamp {
            raw: raw.to_owned(),
            source,
        })
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl<T: EnvValue> EnvValue for Option<T> {
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        T::parse_env(raw, opts).map(Some)
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T: EnvValue> EnvValue for Vec<T> {
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        // Sequences of single-byte elements take the raw bytes directly,
        // with no separator splitting.
        if let Some(from_byte) = T::byte_repr() {
            return Ok(raw.bytes().map(from_byte).collect());
        }

        if raw.trim().is_empty() {
            return Ok(Self::new());
        }

        // The unmodified raw value is split; elements are not trimmed.
        raw.split(opts.separator)
            .map(|token| T::parse_env(token, opts))
            .collect()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> EnvValue for HashMap<K, V>
where
    K: EnvValue + Eq + Hash,
    V: EnvValue,
{
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        let mut map = Self::new();
        if raw.trim().is_empty() {
            return Ok(map);
        }

        for token in raw.split(opts.separator) {
            let (key, value) = token
                .split_once(':')
                .ok_or_else(|| CoerceError::InvalidMapEntry(token.to_owned()))?;
            // Duplicate keys overwrite silently; the last occurrence wins.
            map.insert(K::parse_env(key, opts)?, V::parse_env(value, opts)?);
        }
        Ok(map)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> EnvValue for BTreeMap<K, V>
where
    K: EnvValue + Ord,
    V: EnvValue,
{
    fn parse_env(raw: &str, opts: ParseOpts<'_>) -> Result<Self, CoerceError> {
        let mut map = Self::new();
        if raw.trim().is_empty() {
            return Ok(map);
        }

        for token in raw.split(opts.separator) {
            let (key, value) = token
                .split_once(':')
                .ok_or_else(|| CoerceError::InvalidMapEntry(token.to_owned()))?;
            map.insert(K::parse_env(key, opts)?, V::parse_env(value, opts)?);
        }
        Ok(map)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}
