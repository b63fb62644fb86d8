//! Module registry adapter.
//!
//! Normalizes the loosely shaped module list handed over by the data-loading
//! collaborator into a total map from [`ModuleId`] to an enabled flag. The map
//! is built once per render pass, so gating N navigation entries against M
//! descriptors costs O(N + M) instead of a list scan per entry.
//!
//! Normalization fails closed: anything that is not a well-formed
//! `{ "name": <known module>, "enabled": true }` record leaves the module
//! disabled.

use atrium_types::{ModuleDescriptor, ModuleId};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleRegistry {
    enabled: [bool; ModuleId::COUNT],
}

impl ModuleRegistry {
    /// A registry with every module disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the lookup from typed descriptors.
    ///
    /// A module is enabled when at least one descriptor names it with
    /// `enabled: true`; unknown names are skipped.
    pub fn from_descriptors<'a>(descriptors: impl IntoIterator<Item = &'a ModuleDescriptor>) -> Self {
        let mut registry = Self::empty();
        for descriptor in descriptors {
            match descriptor.module_id() {
                Some(module) => registry.enabled[module.index()] |= descriptor.enabled,
                None => debug!(name = %descriptor.name, "ignoring unknown module descriptor"),
            }
        }
        registry
    }

    /// Builds the lookup from an untyped JSON value.
    ///
    /// Anything other than an array degrades to an empty registry. Inside the
    /// array, entries without a string `name` or with a non-boolean `enabled`
    /// are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            if !value.is_null() {
                warn!(kind = value_kind(value), "module list is not an array; showing always-on entries only");
            }
            return Self::empty();
        };

        let mut registry = Self::empty();
        for item in items {
            let Some(name) = item.get("name").and_then(Value::as_str) else {
                debug!(entry = %item, "ignoring module entry without a name");
                continue;
            };
            let Ok(module) = name.parse::<ModuleId>() else {
                debug!(name, "ignoring unknown module");
                continue;
            };
            let enabled = item.get("enabled").and_then(Value::as_bool).unwrap_or(false);
            registry.enabled[module.index()] |= enabled;
        }
        registry
    }

    pub fn is_enabled(&self, module: ModuleId) -> bool {
        self.enabled[module.index()]
    }

    pub fn set_enabled(&mut self, module: ModuleId, enabled: bool) {
        self.enabled[module.index()] = enabled;
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn enabled_descriptor_turns_module_on() {
        let registry = ModuleRegistry::from_descriptors(&[
            ModuleDescriptor::new("crm", true),
            ModuleDescriptor::new("projects", false),
        ]);
        assert!(registry.is_enabled(ModuleId::Crm));
        assert!(!registry.is_enabled(ModuleId::Projects));
        assert!(!registry.is_enabled(ModuleId::Reports));
    }

    #[test]
    fn any_enabled_duplicate_wins() {
        let registry = ModuleRegistry::from_descriptors(&[
            ModuleDescriptor::new("documents", false),
            ModuleDescriptor::new("documents", true),
        ]);
        assert!(registry.is_enabled(ModuleId::Documents));
    }

    #[test]
    fn unknown_names_are_ignored() {
        let registry = ModuleRegistry::from_value(&json!([
            { "name": "emails", "enabled": true },
            { "name": "Crm", "enabled": true },
        ]));
        assert_eq!(registry, ModuleRegistry::empty());
    }

    #[test]
    fn malformed_shapes_fail_closed() {
        for value in [
            json!(null),
            json!("crm"),
            json!({ "crm": true }),
            json!(42),
            json!([1, "crm", null, { "enabled": true }]),
            json!([{ "name": "crm", "enabled": "true" }, { "name": "reports", "enabled": 1 }]),
        ] {
            assert_eq!(ModuleRegistry::from_value(&value), ModuleRegistry::empty(), "value: {value}");
        }
    }

    #[test]
    fn untyped_list_matches_typed_list() {
        let value = json!([
            { "name": "crm", "enabled": true },
            { "name": "secondBrain", "enabled": true },
            { "name": "openai", "enabled": false },
            { "name": "invoice" },
        ]);
        let registry = ModuleRegistry::from_value(&value);
        let enabled: Vec<ModuleId> = ModuleId::ALL.into_iter().filter(|module| registry.is_enabled(*module)).collect();
        assert_eq!(enabled, vec![ModuleId::Crm, ModuleId::SecondBrain]);
    }
}
