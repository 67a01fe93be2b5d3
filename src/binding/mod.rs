//! The binding engine: schema walking, value coercion, and resolution.
//!
//! This module provides:
//! - Field descriptors and binding rules ([`Binding`], [`SetValue`])
//! - The schema walker trait ([`EnvSchema`]) and its
//!   [`env_schema!`](crate::env_schema) generator macro
//! - The value coercion engine ([`EnvValue`], [`ParseOpts`])
//! - The resolution driver ([`resolve`], [`resolve_with`], [`Environment`])
//!
//! # Priority
//!
//! A field's value is resolved with the following priority (highest to
//! lowest):
//!
//! 1. **Environment variable** - The first declared candidate name found
//!    in the environment snapshot, even if the field already holds a
//!    value (file-sourced or otherwise).
//! 2. **Existing non-zero value** - A slot populated before the pass
//!    (typically by a config-file parser) is never overwritten by a
//!    default.
//! 3. **Declared default** - Applied only to slots still in their zero
//!    state.
//!
//! A required field must end the pass with a non-zero value, and does not
//! fall back to its default.
//!
//! # Concurrency
//!
//! A resolution pass is synchronous and mutates the target in place; the
//! `&mut` receiver statically serializes passes per target object. The
//! environment snapshot is taken once per pass and never written.

mod descriptor;
mod error;
mod resolver;
mod schema;
mod value;

#[cfg(test)]
mod resolver_tests;
#[cfg(test)]
mod schema_tests;

pub use descriptor::{Binding, BoxError, SetValue};
pub use error::{BindError, CoerceError};
pub use resolver::{Environment, resolve, resolve_with};
pub use schema::EnvSchema;
pub use value::{
    DEFAULT_DATE_LAYOUT, DEFAULT_DATETIME_LAYOUT, DEFAULT_SEPARATOR, EnvValue, ParseOpts,
};
