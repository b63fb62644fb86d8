//! In-process router: the current location plus the visited history.

use atrium_registry::path_component;
use atrium_types::Router;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRouter {
    location: String,
    history: Vec<String>,
}

impl HistoryRouter {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            location: initial.into(),
            history: Vec::new(),
        }
    }

    /// Full location, including any query string.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Location without query string or fragment.
    pub fn pathname(&self) -> &str {
        path_component(&self.location)
    }

    /// Previously visited locations, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Default for HistoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router for HistoryRouter {
    fn navigate_to(&mut self, path: &str) {
        if path == self.location {
            return;
        }
        info!(from = %self.location, to = %path, "navigating");
        let previous = std::mem::replace(&mut self.location, path.to_string());
        self.history.push(previous);
    }
}
