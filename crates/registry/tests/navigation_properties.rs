//! Exhaustive checks of the render pass over every module subset.

use atrium_registry::{Dictionary, ModuleRegistry, NAVIGATION_ENTRIES, RailState, render_navigation};
use atrium_types::{ModuleDescriptor, ModuleId};

fn registry_for(mask: u32) -> ModuleRegistry {
    let mut registry = ModuleRegistry::empty();
    for (bit, module) in ModuleId::ALL.into_iter().enumerate() {
        registry.set_enabled(module, mask & (1 << bit) != 0);
    }
    registry
}

fn all_subsets() -> impl Iterator<Item = ModuleRegistry> {
    (0..(1u32 << ModuleId::COUNT)).map(registry_for)
}

const LOCATIONS: &[&str] = &[
    "/",
    "/dashboard",
    "/crm",
    "/crm/contacts/7",
    "/projects/board",
    "/secondBrain",
    "/invoice/2024-001",
    "/reports",
    "/documents",
    "/openAi",
    "/admin/users",
    "/fulltext-search?q=crm",
    "/unknown",
];

/// Every rail entry with the wire name of the module gating it.
const GATES: &[(&str, Option<&str>)] = &[
    ("dashboard", None),
    ("crm", Some("crm")),
    ("contacts", Some("crm")),
    ("projects", Some("projects")),
    ("secondBrain", Some("secondBrain")),
    ("invoices", Some("invoice")),
    ("reports", Some("reports")),
    ("documents", Some("documents")),
    ("openai", Some("openai")),
    ("administration", None),
];

const MODULE_NAMES: [&str; 7] = ["crm", "projects", "secondBrain", "invoice", "reports", "documents", "openai"];

#[test]
fn entries_appear_iff_their_module_is_enabled() {
    let dictionary = Dictionary::for_locale("en");
    for mask in 0..(1u32 << MODULE_NAMES.len()) {
        let enabled_names: Vec<&str> = MODULE_NAMES
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, name)| *name)
            .collect();
        // Disabled modules are listed explicitly for odd masks and left out
        // for even ones; both must hide their entries.
        let descriptors: Vec<ModuleDescriptor> = MODULE_NAMES
            .iter()
            .filter(|name| enabled_names.contains(*name) || mask % 2 == 1)
            .map(|name| ModuleDescriptor::new(*name, enabled_names.contains(name)))
            .chain([ModuleDescriptor::new("calendar", true)])
            .collect();
        let registry = ModuleRegistry::from_descriptors(&descriptors);

        let rendered = render_navigation(&registry, &dictionary, "/", RailState::default());
        let expected: Vec<&str> = GATES
            .iter()
            .filter(|(_, module)| module.is_none_or(|name| enabled_names.contains(&name)))
            .map(|(id, _)| *id)
            .collect();
        let actual: Vec<&str> = rendered.iter().map(|entry| entry.id).collect();
        assert_eq!(actual, expected, "enabled: {enabled_names:?}");
    }
}

#[test]
fn always_on_entries_bracket_every_render() {
    for registry in all_subsets() {
        let rendered = render_navigation(&registry, &Dictionary::empty(), "/crm", RailState::default());
        assert_eq!(rendered.first().map(|entry| entry.id), Some("dashboard"));
        assert_eq!(rendered.last().map(|entry| entry.id), Some("administration"));
    }
}

#[test]
fn collapsing_never_changes_membership_or_activity() {
    let dictionary = Dictionary::for_locale("de");
    for registry in all_subsets() {
        for location in LOCATIONS {
            let expanded = render_navigation(&registry, &dictionary, location, RailState { collapsed: false });
            let collapsed = render_navigation(&registry, &dictionary, location, RailState { collapsed: true });
            assert_eq!(expanded.len(), collapsed.len());
            for (wide, narrow) in expanded.iter().zip(&collapsed) {
                assert_eq!(wide.id, narrow.id);
                assert_eq!(wide.active, narrow.active);
                assert!(wide.show_label);
                assert!(!narrow.show_label);
            }
        }
    }
}

#[test]
fn render_pass_is_deterministic() {
    let dictionary = Dictionary::for_locale("en");
    for registry in all_subsets().step_by(5) {
        for location in LOCATIONS {
            let first = render_navigation(&registry, &dictionary, location, RailState::default());
            let second = render_navigation(&registry, &dictionary, location, RailState::default());
            assert_eq!(first, second);
        }
    }
}

#[test]
fn root_never_activates_a_gated_entry() {
    for registry in all_subsets() {
        let rendered = render_navigation(&registry, &Dictionary::empty(), "/", RailState::default());
        let active: Vec<&str> = rendered.iter().filter(|entry| entry.active).map(|entry| entry.id).collect();
        assert_eq!(active, vec!["dashboard"]);
    }
}
