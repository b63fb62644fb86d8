//! Shell configuration: where the module list, locale and start location come
//! from.
//!
//! The file lives at `~/.config/atrium/shell.json` unless
//! `ATRIUM_CONFIG_PATH` points elsewhere. YAML is accepted when the file
//! extension says so.

use std::fs;
use std::path::{Path, PathBuf};

use atrium_util::{app_config_dir, env_path_override};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::localization::{DEFAULT_LOCALE, Dictionary, DictionaryError};
use crate::modules::ModuleRegistry;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "ATRIUM_CONFIG_PATH";

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "shell.json";

/// Name shown in the rail header when none is configured.
pub const DEFAULT_APP_NAME: &str = "Atrium";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub app_name: Option<String>,
    /// Module list exactly as supplied; it is normalized later and may be
    /// malformed.
    #[serde(default)]
    pub modules: Value,
    #[serde(default)]
    pub locale: Option<String>,
    /// Optional dictionary file overlaid on the embedded one for `locale`.
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,
    #[serde(default)]
    pub initial_path: Option<String>,
}

impl ShellConfig {
    /// Loads the default configuration file.
    ///
    /// A missing file yields defaults; an unreadable or unparsable one is
    /// logged and also yields defaults so the shell still starts.
    pub fn load() -> Self {
        let path = default_config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no shell config; using defaults");
                Self::default()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to load shell config; using defaults");
                Self::default()
            }
        }
    }

    /// Loads a configuration file that must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        read_document(path)
    }

    /// Replaces the module list with the contents of a JSON or YAML file.
    pub fn with_modules_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        self.modules = read_document(path)?;
        Ok(self)
    }

    /// Normalizes the configuration into render inputs.
    pub fn resolve(self) -> Result<ShellInputs, ConfigError> {
        let locale = self.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let mut dictionary = Dictionary::for_locale(&locale);
        if let Some(path) = self.dictionary_path.as_deref() {
            dictionary.overlay(Dictionary::load(path)?);
        }
        let initial_path = self
            .initial_path
            .map(|path| path.trim().to_string())
            .filter(|path| path.starts_with('/'))
            .unwrap_or_else(|| "/".to_string());
        Ok(ShellInputs {
            app_name: self
                .app_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            registry: ModuleRegistry::from_value(&self.modules),
            dictionary,
            initial_path,
        })
    }
}

/// Everything the shell needs for its first render pass.
#[derive(Debug, Clone)]
pub struct ShellInputs {
    pub app_name: String,
    pub registry: ModuleRegistry,
    pub dictionary: Dictionary,
    pub initial_path: String,
}

impl Default for ShellInputs {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            registry: ModuleRegistry::empty(),
            dictionary: Dictionary::for_locale(DEFAULT_LOCALE),
            initial_path: "/".to_string(),
        }
    }
}

/// Get the default path for the shell configuration file.
pub fn default_config_path() -> PathBuf {
    env_path_override(CONFIG_PATH_ENV).unwrap_or_else(|| app_config_dir().join(CONFIG_FILE_NAME))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    if is_yaml(path) {
        return serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml { path: display, source });
    }
    serde_json::from_str(&content).map_err(|source| ConfigError::Json { path: display, source })
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use atrium_types::ModuleId;
    use serde_json::json;

    use super::*;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().expect("temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn json_config_resolves_modules_and_locale() {
        let file = write_temp(
            ".json",
            r#"{
                "app_name": "NextCRM",
                "modules": [{ "name": "crm", "enabled": true }, { "name": "reports", "enabled": false }],
                "locale": "de",
                "initial_path": "/crm/contacts"
            }"#,
        );
        let inputs = ShellConfig::load_from(file.path()).expect("load config").resolve().expect("resolve");
        assert_eq!(inputs.app_name, "NextCRM");
        assert!(inputs.registry.is_enabled(ModuleId::Crm));
        assert!(!inputs.registry.is_enabled(ModuleId::Reports));
        assert_eq!(inputs.dictionary.get("dashboard"), Some("Übersicht"));
        assert_eq!(inputs.initial_path, "/crm/contacts");
    }

    #[test]
    fn yaml_config_is_supported() {
        let file = write_temp(".yml", "modules:\n  - name: documents\n    enabled: true\n");
        let inputs = ShellConfig::load_from(file.path()).expect("load yaml").resolve().expect("resolve");
        assert!(inputs.registry.is_enabled(ModuleId::Documents));
        assert_eq!(inputs.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn malformed_modules_degrade_instead_of_failing() {
        let file = write_temp(".json", r#"{ "modules": { "crm": true } }"#);
        let inputs = ShellConfig::load_from(file.path()).expect("load config").resolve().expect("resolve");
        assert_eq!(inputs.registry, ModuleRegistry::empty());
    }

    #[test]
    fn invalid_file_is_reported() {
        let file = write_temp(".json", "{ not json");
        assert!(matches!(ShellConfig::load_from(file.path()), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn modules_file_overrides_config() {
        let modules = write_temp(".json", r#"[{ "name": "openai", "enabled": true }]"#);
        let config = ShellConfig {
            modules: json!([{ "name": "crm", "enabled": true }]),
            ..ShellConfig::default()
        };
        let inputs = config
            .with_modules_file(modules.path())
            .expect("read modules file")
            .resolve()
            .expect("resolve");
        assert!(inputs.registry.is_enabled(ModuleId::OpenAi));
        assert!(!inputs.registry.is_enabled(ModuleId::Crm));
    }

    #[test]
    fn dictionary_file_overlays_embedded_labels() {
        let dictionary = write_temp(".json", r#"{ "ModuleMenu": { "dashboard": "Cockpit" } }"#);
        let config = ShellConfig {
            dictionary_path: Some(dictionary.path().to_path_buf()),
            ..ShellConfig::default()
        };
        let inputs = config.resolve().expect("resolve");
        assert_eq!(inputs.dictionary.get("dashboard"), Some("Cockpit"));
        assert_eq!(inputs.dictionary.get("reports"), Some("Reports"));
    }

    #[test]
    fn relative_initial_path_falls_back_to_root() {
        let config = ShellConfig {
            initial_path: Some("crm".to_string()),
            ..ShellConfig::default()
        };
        assert_eq!(config.resolve().expect("resolve").initial_path, "/");
    }
}
