//! Field descriptors: binding rules paired with a mutable field slot.
//!
//! A [`Binding`] is produced fresh by every resolution pass and discarded
//! afterwards. It carries the declarative rules for one field (candidate
//! environment names, default, separator, layout, required flag,
//! description) together with an exclusive borrow of the field it
//! populates — the only way this crate mutates caller state.

use super::error::CoerceError;
use super::value::{DEFAULT_SEPARATOR, EnvValue, ParseOpts};

/// Boxed error returned by [`SetValue`] implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Caller-defined parsing for a field, superseding built-in coercion.
///
/// This is the one deliberate escape hatch: a field declared `custom`
/// delegates entirely to `set_value`, and the returned error is passed
/// through verbatim rather than reinterpreted.
pub trait SetValue {
    /// Parses the raw string and stores the result in `self`.
    ///
    /// # Errors
    ///
    /// Returns the implementation's own error, which the resolution
    /// driver wraps with the field name.
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError>;

    /// Reports whether this value has not been set yet.
    ///
    /// Plays the same role as [`EnvValue::is_zero`]: it gates default
    /// application and required-field enforcement.
    fn is_unset(&self) -> bool;
}

/// Erased write access to a typed field slot.
///
/// Object-safe shim over [`EnvValue`] so that descriptors for fields of
/// different types can share one sequence.
trait TypedSlot {
    fn assign(&mut self, raw: &str, opts: ParseOpts<'_>) -> Result<(), CoerceError>;
    fn is_zero_value(&self) -> bool;
}

impl<T: EnvValue> TypedSlot for T {
    fn assign(&mut self, raw: &str, opts: ParseOpts<'_>) -> Result<(), CoerceError> {
        *self = T::parse_env(raw, opts)?;
        Ok(())
    }

    fn is_zero_value(&self) -> bool {
        self.is_zero()
    }
}

enum Slot<'a> {
    Typed(&'a mut dyn TypedSlot),
    Custom(&'a mut dyn SetValue),
}

/// One bindable field: its binding rules plus the live slot they govern.
///
/// Constructed with [`Binding::value`] or [`Binding::custom`] (usually via
/// the [`env_schema!`](crate::env_schema) macro) and configured with the
/// builder methods.
pub struct Binding<'a> {
    field: &'static str,
    env_names: Vec<String>,
    default: Option<String>,
    separator: String,
    layout: Option<String>,
    required: bool,
    description: Option<String>,
    slot: Slot<'a>,
}

impl<'a> Binding<'a> {
    /// Creates a descriptor for a field with built-in coercion.
    pub fn value<T: EnvValue>(field: &'static str, slot: &'a mut T) -> Self {
        Self::with_slot(field, Slot::Typed(slot))
    }

    /// Creates a descriptor for a field with caller-defined parsing.
    pub fn custom<T: SetValue>(field: &'static str, slot: &'a mut T) -> Self {
        Self::with_slot(field, Slot::Custom(slot))
    }

    fn with_slot(field: &'static str, slot: Slot<'a>) -> Self {
        Self {
            field,
            env_names: Vec::new(),
            default: None,
            separator: DEFAULT_SEPARATOR.to_owned(),
            layout: None,
            required: false,
            description: None,
            slot,
        }
    }

    /// Declares the candidate environment variable names as a
    /// comma-separated, ordered list; the first name present in the
    /// environment wins.
    ///
    /// The list is always split on `,` — a per-field separator override
    /// affects composite values only, never the name list.
    #[must_use]
    pub fn with_env(mut self, names: &str) -> Self {
        self.env_names = names.split(DEFAULT_SEPARATOR).map(str::to_owned).collect();
        self
    }

    /// Declares the raw default value, applied only when no environment
    /// variable matched and the slot is still in its zero state.
    #[must_use]
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_owned());
        self
    }

    /// Overrides the separator used to split composite raw values.
    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_owned();
        self
    }

    /// Declares a timestamp layout in chrono `strftime` syntax.
    #[must_use]
    pub fn with_layout(mut self, layout: &str) -> Self {
        self.layout = Some(layout.to_owned());
        self
    }

    /// Attaches a human-readable description, consumed by usage-text
    /// generation.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Marks the field required: resolution fails unless the field ends
    /// the pass with a non-zero value.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Name of the field this descriptor governs.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Candidate environment names, in declaration order.
    #[must_use]
    pub fn env_names(&self) -> &[String] {
        &self.env_names
    }

    /// The declared raw default, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The declared description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the field is marked required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the governed slot currently holds its type's zero value.
    pub(super) fn slot_is_zero(&self) -> bool {
        match &self.slot {
            Slot::Typed(slot) => slot.is_zero_value(),
            Slot::Custom(slot) => slot.is_unset(),
        }
    }

    /// Coerces the raw value into the governed slot.
    pub(super) fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        let opts = ParseOpts {
            separator: &self.separator,
            layout: self.layout.as_deref(),
        };
        match &mut self.slot {
            Slot::Typed(slot) => slot.assign(raw, opts),
            Slot::Custom(slot) => slot.set_value(raw).map_err(CoerceError::Custom),
        }
    }
}

impl std::fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("field", &self.field)
            .field("env_names", &self.env_names)
            .field("default", &self.default)
            .field("separator", &self.separator)
            .field("layout", &self.layout)
            .field("required", &self.required)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
