//! Closed set of feature modules a deployment can switch on or off.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a feature module known at build time.
///
/// The wire names are compared by exact string equality; `secondBrain` and
/// `openai` keep the casing the module list uses.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleId {
    #[serde(rename = "crm")]
    Crm,
    #[serde(rename = "projects")]
    Projects,
    #[serde(rename = "secondBrain")]
    SecondBrain,
    #[serde(rename = "invoice")]
    Invoice,
    #[serde(rename = "reports")]
    Reports,
    #[serde(rename = "documents")]
    Documents,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ModuleId {
    /// Number of known modules.
    pub const COUNT: usize = 7;

    /// Every module, in declaration order.
    pub const ALL: [ModuleId; Self::COUNT] = [
        ModuleId::Crm,
        ModuleId::Projects,
        ModuleId::SecondBrain,
        ModuleId::Invoice,
        ModuleId::Reports,
        ModuleId::Documents,
        ModuleId::OpenAi,
    ];

    /// Wire name used by module descriptors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crm => "crm",
            Self::Projects => "projects",
            Self::SecondBrain => "secondBrain",
            Self::Invoice => "invoice",
            Self::Reports => "reports",
            Self::Documents => "documents",
            Self::OpenAi => "openai",
        }
    }

    /// Dense index into per-module tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = ParseModuleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| ParseModuleIdError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModuleIdError(pub String);

impl fmt::Display for ParseModuleIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown module '{}'", self.0)
    }
}

impl Error for ParseModuleIdError {}

/// A single `{name, enabled}` record from the externally supplied module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module wire name (e.g. "crm").
    pub name: String,
    /// Whether the module is switched on for this deployment.
    #[serde(default)]
    pub enabled: bool,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }

    /// Resolves the descriptor's name into a known module, if it is one.
    pub fn module_id(&self) -> Option<ModuleId> {
        self.name.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_exact() {
        assert_eq!("secondBrain".parse::<ModuleId>(), Ok(ModuleId::SecondBrain));
        assert!("secondbrain".parse::<ModuleId>().is_err());
        assert!("CRM".parse::<ModuleId>().is_err());
        assert!("emails".parse::<ModuleId>().is_err());
    }

    #[test]
    fn dense_indices_cover_all_modules() {
        for (position, module) in ModuleId::ALL.iter().enumerate() {
            assert_eq!(module.index(), position);
            assert_eq!(module.as_str().parse::<ModuleId>().unwrap(), *module);
        }
    }

    #[test]
    fn descriptor_enabled_defaults_to_false() {
        let descriptor: ModuleDescriptor = serde_json::from_str(r#"{ "name": "crm" }"#).expect("deserialize descriptor");
        assert!(!descriptor.enabled);
        assert_eq!(descriptor.module_id(), Some(ModuleId::Crm));
    }
}
