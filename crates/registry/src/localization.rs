//! Localized navigation labels.
//!
//! Dictionaries are flat `key -> label` maps. Files may either be flat or nest
//! the labels under a `ModuleMenu` object; non-string values are dropped so a
//! lookup for them falls back to the caller's default.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::config::is_yaml;

/// Locale used when the requested one has no embedded dictionary.
pub const DEFAULT_LOCALE: &str = "en";

/// Locales with an embedded dictionary.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "de"];

const SECTION_KEY: &str = "ModuleMenu";

const EMBEDDED_EN: &str = include_str!("../locales/en.json");
const EMBEDDED_DE: &str = include_str!("../locales/de.json");

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON dictionary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML dictionary: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    labels: IndexMap<String, String>,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a dictionary from an untyped value, keeping only string labels.
    pub fn from_value(value: &Value) -> Self {
        let section = value.get(SECTION_KEY).filter(|section| section.is_object()).unwrap_or(value);
        let Some(object) = section.as_object() else {
            return Self::empty();
        };
        let labels = object
            .iter()
            .filter_map(|(key, label)| label.as_str().map(|label| (key.clone(), label.to_string())))
            .collect();
        Self { labels }
    }

    pub fn from_json_str(content: &str) -> Result<Self, DictionaryError> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self::from_value(&value))
    }

    /// Reads a dictionary file; `.yaml`/`.yml` files are parsed as YAML,
    /// everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if is_yaml(path) {
            let value: Value = serde_yaml::from_str(&content)?;
            return Ok(Self::from_value(&value));
        }
        Self::from_json_str(&content)
    }

    /// The embedded dictionary for `locale` (`de-AT` resolves to `de`).
    pub fn embedded(locale: &str) -> Option<Self> {
        let content = match base_language(locale).as_str() {
            "en" => EMBEDDED_EN,
            "de" => EMBEDDED_DE,
            _ => return None,
        };
        match Self::from_json_str(content) {
            Ok(dictionary) => Some(dictionary),
            Err(error) => {
                warn!(locale, %error, "embedded dictionary is invalid");
                None
            }
        }
    }

    /// The embedded dictionary for `locale`, or English when there is none.
    pub fn for_locale(locale: &str) -> Self {
        if let Some(dictionary) = Self::embedded(locale) {
            return dictionary;
        }
        warn!(locale, fallback = DEFAULT_LOCALE, "no dictionary for locale");
        Self::embedded(DEFAULT_LOCALE).unwrap_or_default()
    }

    /// Replaces labels with those from `other`, keeping the rest.
    pub fn overlay(&mut self, other: Dictionary) {
        self.labels.extend(other.labels);
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(key.into(), label.into());
    }

    /// A non-blank label for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str).filter(|label| !label.trim().is_empty())
    }

    /// First non-blank label among `keys`, else `default`.
    pub fn label_or<'a>(&'a self, keys: &[&str], default: &'a str) -> &'a str {
        keys.iter().find_map(|key| self.get(key)).unwrap_or(default)
    }
}

fn base_language(locale: &str) -> String {
    locale.trim().split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn nested_and_flat_shapes_are_equivalent() {
        let nested = Dictionary::from_value(&json!({ "ModuleMenu": { "dashboard": "Home" } }));
        let flat = Dictionary::from_value(&json!({ "dashboard": "Home" }));
        assert_eq!(nested, flat);
        assert_eq!(flat.get("dashboard"), Some("Home"));
    }

    #[test]
    fn non_string_labels_fall_back() {
        let dictionary = Dictionary::from_value(&json!({ "ModuleMenu": { "crm": { "title": "CRM" }, "reports": 3 } }));
        assert_eq!(dictionary.get("crm"), None);
        assert_eq!(dictionary.get("reports"), None);
        assert_eq!(dictionary, Dictionary::empty());
        assert_eq!(dictionary.label_or(&["crm"], "Sales"), "Sales");
    }

    #[test]
    fn blank_labels_fall_back() {
        let mut dictionary = Dictionary::empty();
        dictionary.insert("documents", "   ");
        assert_eq!(dictionary.label_or(&["documents"], "Documents"), "Documents");
    }

    #[test]
    fn label_keys_are_tried_in_order() {
        let mut dictionary = Dictionary::empty();
        dictionary.insert("settings", "Settings");
        assert_eq!(dictionary.label_or(&["administration", "settings"], "Administration"), "Settings");
        dictionary.insert("administration", "Admin");
        assert_eq!(dictionary.label_or(&["administration", "settings"], "Administration"), "Admin");
    }

    #[test]
    fn embedded_locales_cover_always_on_entries() {
        for locale in SUPPORTED_LOCALES {
            let dictionary = Dictionary::embedded(locale).expect("embedded dictionary");
            assert!(dictionary.get("dashboard").is_some(), "{locale} lacks dashboard");
            assert!(dictionary.get("settings").is_some(), "{locale} lacks settings");
        }
    }

    #[test]
    fn regional_locale_resolves_to_base_language() {
        let dictionary = Dictionary::for_locale("de-AT");
        assert_eq!(dictionary.get("reports"), Some("Berichte"));
        let fallback = Dictionary::for_locale("xx");
        assert_eq!(fallback.get("reports"), Some("Reports"));
    }

    #[test]
    fn overlay_replaces_only_given_keys() {
        let mut dictionary = Dictionary::for_locale("en");
        let mut custom = Dictionary::empty();
        custom.insert("crm", "Pipeline");
        dictionary.overlay(custom);
        assert_eq!(dictionary.get("crm"), Some("Pipeline"));
        assert_eq!(dictionary.get("contacts"), Some("Contacts"));
    }

    #[test]
    fn yaml_files_are_supported() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().expect("temp file");
        writeln!(file, "ModuleMenu:\n  dashboard: Start\n  reports: Auswertungen").expect("write yaml");
        let dictionary = Dictionary::load(file.path()).expect("load yaml dictionary");
        assert_eq!(dictionary.get("dashboard"), Some("Start"));
        assert_eq!(dictionary.get("reports"), Some("Auswertungen"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Dictionary::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DictionaryError::Io { .. })));
    }
}
