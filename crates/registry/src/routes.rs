//! Active-route matching for navigation entries.
//!
//! Matching is deliberately per entry: the dashboard compares whole paths so
//! that `/` does not light up on every page, every other entry checks whether
//! the path contains its route fragment so nested detail pages keep their
//! section highlighted.

/// How a navigation entry decides it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMatch {
    /// Active when the path equals one of the listed paths.
    Exact(&'static [&'static str]),
    /// Active when the path contains the fragment anywhere.
    Contains(&'static str),
}

impl ActiveMatch {
    pub fn matches(&self, current_path: &str) -> bool {
        is_active(*self, current_path)
    }
}

/// Decides whether an entry with `policy` is active for `location`.
///
/// Only the path component takes part; query strings and fragments are
/// stripped first so `/fulltext-search?q=crm` does not activate the CRM entry.
pub fn is_active(policy: ActiveMatch, location: &str) -> bool {
    let path = path_component(location);
    match policy {
        ActiveMatch::Exact(paths) => paths.contains(&path),
        ActiveMatch::Contains(fragment) => path.contains(fragment),
    }
}

/// The part of a location before any `?` or `#`.
pub fn path_component(location: &str) -> &str {
    location.split(['?', '#']).next().unwrap_or_default()
}
