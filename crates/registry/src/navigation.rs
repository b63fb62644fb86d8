//! Navigation table and the module-gated render pass.
//!
//! [`NAVIGATION_ENTRIES`] is the fixed, ordered set of sections the rail can
//! show. [`render_navigation`] filters it against a [`ModuleRegistry`], picks
//! labels from a [`Dictionary`] and computes the active flag for the current
//! location. The pass is pure: no I/O, no module-list fetching.

use atrium_types::ModuleId;
use serde::Serialize;

use crate::localization::Dictionary;
use crate::modules::ModuleRegistry;
use crate::routes::ActiveMatch;

/// Symbolic icon reference; the terminal glyph is chosen by [`Icon::glyph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Home,
    Coins,
    Users,
    FolderKanban,
    Lightbulb,
    FileCheck,
    BarChart,
    FileText,
    Bot,
    Mail,
    Wrench,
    Search,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Home => "⌂",
            Self::Coins => "$",
            Self::Users => "☺",
            Self::FolderKanban => "▦",
            Self::Lightbulb => "✦",
            Self::FileCheck => "✓",
            Self::BarChart => "▥",
            Self::FileText => "≡",
            Self::Bot => "⚙",
            Self::Mail => "✉",
            Self::Wrench => "⚒",
            Self::Search => "⌕",
        }
    }
}

/// A statically known navigation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEntry {
    pub id: &'static str,
    pub route: &'static str,
    pub icon: Icon,
    /// Dictionary keys tried in order before falling back to `default_label`.
    pub label_keys: &'static [&'static str],
    pub default_label: &'static str,
    /// `None` for always-on entries.
    pub required_module: Option<ModuleId>,
    pub active_match: ActiveMatch,
}

impl NavigationEntry {
    pub fn is_included(&self, registry: &ModuleRegistry) -> bool {
        self.required_module.is_none_or(|module| registry.is_enabled(module))
    }

    pub fn label<'a>(&self, dictionary: &'a Dictionary) -> &'a str {
        dictionary.label_or(self.label_keys, self.default_label)
    }
}

/// Sections in top-to-bottom rail order.
pub static NAVIGATION_ENTRIES: [NavigationEntry; 10] = [
    NavigationEntry {
        id: "dashboard",
        route: "/",
        icon: Icon::Home,
        label_keys: &["dashboard"],
        default_label: "Dashboard",
        required_module: None,
        active_match: ActiveMatch::Exact(&["/", "/dashboard"]),
    },
    NavigationEntry {
        id: "crm",
        route: "/crm",
        icon: Icon::Coins,
        label_keys: &["crm"],
        default_label: "Sales",
        required_module: Some(ModuleId::Crm),
        active_match: ActiveMatch::Contains("crm"),
    },
    NavigationEntry {
        id: "contacts",
        route: "/crm/contacts",
        icon: Icon::Users,
        label_keys: &["contacts"],
        default_label: "Contacts",
        required_module: Some(ModuleId::Crm),
        active_match: ActiveMatch::Contains("contacts"),
    },
    NavigationEntry {
        id: "projects",
        route: "/projects",
        icon: Icon::FolderKanban,
        label_keys: &["projects"],
        default_label: "Projects",
        required_module: Some(ModuleId::Projects),
        active_match: ActiveMatch::Contains("projects"),
    },
    NavigationEntry {
        id: "secondBrain",
        route: "/secondBrain",
        icon: Icon::Lightbulb,
        label_keys: &["secondBrain"],
        default_label: "Second brain",
        required_module: Some(ModuleId::SecondBrain),
        active_match: ActiveMatch::Contains("secondBrain"),
    },
    NavigationEntry {
        id: "invoices",
        route: "/invoice",
        icon: Icon::FileCheck,
        label_keys: &["invoices"],
        default_label: "Invoices",
        required_module: Some(ModuleId::Invoice),
        active_match: ActiveMatch::Contains("invoice"),
    },
    NavigationEntry {
        id: "reports",
        route: "/reports",
        icon: Icon::BarChart,
        label_keys: &["reports"],
        default_label: "Reports",
        required_module: Some(ModuleId::Reports),
        active_match: ActiveMatch::Contains("reports"),
    },
    NavigationEntry {
        id: "documents",
        route: "/documents",
        icon: Icon::FileText,
        label_keys: &["documents"],
        default_label: "Documents",
        required_module: Some(ModuleId::Documents),
        active_match: ActiveMatch::Contains("documents"),
    },
    NavigationEntry {
        id: "openai",
        route: "/openAi",
        icon: Icon::Bot,
        label_keys: &["openai"],
        default_label: "ChatGPT",
        required_module: Some(ModuleId::OpenAi),
        active_match: ActiveMatch::Contains("openAi"),
    },
    NavigationEntry {
        id: "administration",
        route: "/admin",
        icon: Icon::Wrench,
        label_keys: &["administration", "settings"],
        default_label: "Administration",
        required_module: None,
        active_match: ActiveMatch::Contains("admin"),
    },
];

/// Collapsed/expanded width of the navigation rail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RailState {
    pub collapsed: bool,
}

impl RailState {
    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }
}

/// One navigation entry as produced by a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntry {
    pub id: &'static str,
    pub route: &'static str,
    pub icon: Icon,
    pub label: String,
    /// `false` while the rail is collapsed (icon only).
    pub show_label: bool,
    pub active: bool,
}

/// Renders the navigation rail for one pass.
///
/// An entry is included iff it has no required module or that module is
/// enabled in `registry`. `rail` only affects `show_label`.
pub fn render_navigation(
    registry: &ModuleRegistry,
    dictionary: &Dictionary,
    current_path: &str,
    rail: RailState,
) -> Vec<RenderedEntry> {
    NAVIGATION_ENTRIES
        .iter()
        .filter(|entry| entry.is_included(registry))
        .map(|entry| RenderedEntry {
            id: entry.id,
            route: entry.route,
            icon: entry.icon,
            label: entry.label(dictionary).to_string(),
            show_label: !rail.collapsed,
            active: entry.active_match.matches(current_path),
        })
        .collect()
}
