//! Resolution driver: looking up, defaulting, and coercing every field.
//!
//! The driver walks the descriptor sequence in order and mutates each
//! field slot in place. The process environment is treated as shared,
//! externally-mutable, read-only input: it is captured once per pass
//! into an [`Environment`] snapshot and never re-fetched or written.

use std::collections::HashMap;

use super::descriptor::Binding;
use super::error::BindError;
use super::schema::EnvSchema;

/// An immutable name-to-value snapshot of environment variables.
///
/// [`Environment::from_process`] captures the process environment;
/// building one from an iterator of pairs gives tests a deterministic
/// environment without touching process state.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Captures a snapshot of the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Looks up a variable by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Resolves every bindable field of `target` against a fresh snapshot of
/// the process environment.
///
/// `prefix` is prepended to every candidate environment name before
/// lookup. See [`resolve_with`] for the per-field algorithm.
///
/// # Errors
///
/// Returns the first [`BindError`] encountered; the pass aborts there.
pub fn resolve<T: EnvSchema>(target: &mut T, prefix: &str) -> Result<(), BindError> {
    resolve_with(target, prefix, &Environment::from_process())
}

/// Resolves every bindable field of `target` against an explicit
/// environment snapshot.
///
/// Per field, in declaration order:
/// 1. the first candidate name (with `prefix` prepended) present in the
///    snapshot supplies the raw value — first match, even if empty;
/// 2. with no match, a required field whose slot is still zero fails;
/// 3. with no match, a zero slot falls back to the declared default;
/// 4. with nothing resolved, the field is left untouched;
/// 5. otherwise the raw value is coerced into the slot.
///
/// A field whose initial value equals its type's zero value is
/// indistinguishable from one that was never set: its default applies
/// and its required check fires. This is a documented limitation of
/// zero-state gating, not a defect.
///
/// # Errors
///
/// Returns the first [`BindError`] encountered; the pass aborts there.
pub fn resolve_with<T: EnvSchema>(
    target: &mut T,
    prefix: &str,
    env: &Environment,
) -> Result<(), BindError> {
    for binding in target.bindings() {
        resolve_binding(binding, prefix, env)?;
    }
    Ok(())
}

fn resolve_binding(
    mut binding: Binding<'_>,
    prefix: &str,
    env: &Environment,
) -> Result<(), BindError> {
    let mut resolved: Option<String> = None;

    for name in binding.env_names() {
        let key = format!("{prefix}{name}");
        if let Some(value) = env.get(&key) {
            tracing::trace!(
                "Field '{}' resolved from environment variable '{key}'",
                binding.field()
            );
            resolved = Some(value.to_owned());
            break;
        }
    }

    if resolved.is_none() && binding.slot_is_zero() {
        // Required wins over default: a required field never falls back
        // to its declared default value.
        if binding.is_required() {
            return Err(BindError::MissingRequired {
                field: binding.field(),
            });
        }
        if let Some(default) = binding.default_value() {
            tracing::trace!("Field '{}' using default value", binding.field());
            resolved = Some(default.to_owned());
        }
    }

    let Some(raw) = resolved else {
        return Ok(());
    };

    binding.coerce(&raw).map_err(|source| BindError::Coercion {
        field: binding.field(),
        raw,
        source,
    })
}
