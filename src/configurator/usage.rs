//! Usage text generation from a schema's descriptor walk.

use crate::binding::EnvSchema;

/// Renders per-field help for a schema: candidate environment names
/// (with `prefix` applied), description, and default value.
///
/// Fields with no candidate environment names are omitted — they are not
/// environment-bindable.
#[must_use]
pub fn usage<T: EnvSchema + Default>(prefix: &str) -> String {
    let mut target = T::default();
    let mut out = String::from("Environment variables:\n");

    for binding in target.bindings() {
        if binding.env_names().is_empty() {
            continue;
        }

        let names = binding
            .env_names()
            .iter()
            .map(|name| format!("{prefix}{name}"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str("  ");
        out.push_str(&names);
        if binding.is_required() {
            out.push_str(" (required)");
        }
        out.push('\n');

        match (binding.description(), binding.default_value()) {
            (Some(description), Some(default)) => {
                out.push_str(&format!("        {description} (default \"{default}\")\n"));
            }
            (Some(description), None) => {
                out.push_str(&format!("        {description}\n"));
            }
            (None, Some(default)) => {
                out.push_str(&format!("        (default \"{default}\")\n"));
            }
            (None, None) => {}
        }
    }

    out
}
