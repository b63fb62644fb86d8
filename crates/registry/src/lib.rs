//! Navigation registry for the Atrium shell.
//!
//! This crate owns the static navigation table, the module registry that gates
//! it, label dictionaries, the command palette's quick links and the shell
//! configuration. Everything here is pure data plus pure functions; the
//! terminal front end lives in `atrium-tui`.

pub mod config;
pub mod localization;
pub mod modules;
pub mod navigation;
pub mod quick_links;
pub mod routes;

pub use config::{ConfigError, ShellConfig, ShellInputs, default_config_path};
pub use localization::{DEFAULT_LOCALE, Dictionary, DictionaryError, SUPPORTED_LOCALES};
pub use modules::ModuleRegistry;
pub use navigation::{Icon, NAVIGATION_ENTRIES, NavigationEntry, RailState, RenderedEntry, render_navigation};
pub use quick_links::{QUICK_LINKS, QuickLink, SEARCH_ROUTE, find_quick_link, matching_quick_links, search_query, search_route};
pub use routes::{ActiveMatch, is_active, path_component};
