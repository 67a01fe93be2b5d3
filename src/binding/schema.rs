//! Schema walking: discovering the bindable fields of a configuration
//! object.
//!
//! A configuration struct implements [`EnvSchema`] to hand the resolver
//! an ordered, flattened sequence of [`Binding`]s — nested structured
//! fields contribute their descriptors inline at their declaration
//! position, depth-first, with no hierarchical grouping. The
//! [`env_schema!`](crate::env_schema) macro generates the implementation
//! from a compact per-field rule table; hand-written implementations are
//! equally valid when a schema needs conditional or computed rules.

use super::descriptor::Binding;

/// A structured configuration object whose fields can be resolved.
///
/// Implementations list every bindable field in declaration order.
/// Fields left out of the list are skipped by resolution entirely —
/// omission is not an error.
///
/// Timestamp types (`chrono::DateTime<Utc>`, `NaiveDateTime`,
/// `NaiveDate`) are leaves, not schemas: they implement
/// [`EnvValue`](super::EnvValue) and are declared as `value` fields,
/// optionally with a `layout` rule.
pub trait EnvSchema {
    /// Produces the descriptor sequence for one resolution pass.
    ///
    /// Each descriptor exclusively borrows its field for the duration of
    /// the pass, so the returned sequence is necessarily consumed before
    /// the object can be used again.
    fn bindings(&mut self) -> Vec<Binding<'_>>;
}

impl<S: EnvSchema + ?Sized> EnvSchema for Box<S> {
    fn bindings(&mut self) -> Vec<Binding<'_>> {
        (**self).bindings()
    }
}

/// Generates an [`EnvSchema`] implementation from a per-field rule table.
///
/// Each listed field is one of:
/// - `value(...)` — a leaf coerced via [`EnvValue`](crate::EnvValue);
/// - `custom(...)` — a leaf delegating to [`SetValue`](crate::SetValue);
/// - `nested` — a structured field implementing [`EnvSchema`], whose
///   descriptors are flattened in at this position.
///
/// Rules inside `value(...)`/`custom(...)`, all optional, in any order:
/// `env = "NAME,OTHER_NAME"`, `default = "raw"`, `separator = ";"`,
/// `layout = "%Y-%m-%d"`, `describe = "help text"`, `required`.
///
/// # Example
///
/// ```
/// use envbind::{Environment, env_schema, resolve_with};
///
/// #[derive(Debug, Default)]
/// struct ServerConfig {
///     host: String,
///     port: u16,
/// }
///
/// env_schema!(ServerConfig {
///     host: value(env = "HOST", default = "localhost", describe = "bind host"),
///     port: value(env = "PORT", default = "8080"),
/// });
///
/// let env = Environment::from_iter([("APP_PORT", "9000")]);
/// let mut config = ServerConfig::default();
/// resolve_with(&mut config, "APP_", &env).unwrap();
/// assert_eq!(config.host, "localhost");
/// assert_eq!(config.port, 9000);
/// ```
#[macro_export]
macro_rules! env_schema {
    ($ty:ty { $( $field:ident : $kind:ident $( ( $($rules:tt)* ) )? ),* $(,)? }) => {
        impl $crate::EnvSchema for $ty {
            fn bindings(&mut self) -> ::std::vec::Vec<$crate::Binding<'_>> {
                let mut out = ::std::vec::Vec::new();
                $( $crate::env_schema!(@field out, self, $field, $kind $(( $($rules)* ))?); )*
                out
            }
        }
    };

    (@field $out:ident, $self:ident, $field:ident, nested) => {
        $out.extend($crate::EnvSchema::bindings(&mut $self.$field));
    };
    (@field $out:ident, $self:ident, $field:ident, value) => {
        $out.push($crate::Binding::value(stringify!($field), &mut $self.$field));
    };
    (@field $out:ident, $self:ident, $field:ident, value( $($rules:tt)* )) => {
        $out.push($crate::env_schema!(@rules
            $crate::Binding::value(stringify!($field), &mut $self.$field),
            $($rules)* ,
        ));
    };
    (@field $out:ident, $self:ident, $field:ident, custom) => {
        $out.push($crate::Binding::custom(stringify!($field), &mut $self.$field));
    };
    (@field $out:ident, $self:ident, $field:ident, custom( $($rules:tt)* )) => {
        $out.push($crate::env_schema!(@rules
            $crate::Binding::custom(stringify!($field), &mut $self.$field),
            $($rules)* ,
        ));
    };

    (@rules $binding:expr, $(,)*) => { $binding };
    (@rules $binding:expr, env = $v:expr, $($rest:tt)*) => {
        $crate::env_schema!(@rules $binding.with_env($v), $($rest)*)
    };
    (@rules $binding:expr, default = $v:expr, $($rest:tt)*) => {
        $crate::env_schema!(@rules $binding.with_default($v), $($rest)*)
    };
    (@rules $binding:expr, separator = $v:expr, $($rest:tt)*) => {
        $crate::env_schema!(@rules $binding.with_separator($v), $($rest)*)
    };
    (@rules $binding:expr, layout = $v:expr, $($rest:tt)*) => {
        $crate::env_schema!(@rules $binding.with_layout($v), $($rest)*)
    };
    (@rules $binding:expr, describe = $v:expr, $($rest:tt)*) => {
        $crate::env_schema!(@rules $binding.with_description($v), $($rest)*)
    };
    (@rules $binding:expr, required, $($rest:tt)*) => {
        $crate::env_schema!(@rules $binding.required(), $($rest)*)
    };
}
