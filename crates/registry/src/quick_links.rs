//! Command palette destinations.
//!
//! Quick links are a fixed list that is never gated by the module registry:
//! the palette offers every destination regardless of which modules are
//! enabled.

use atrium_util::{decode_query_component, encode_query_component};

use crate::navigation::Icon;
use crate::routes::path_component;

/// Route of the global full-text search page.
pub const SEARCH_ROUTE: &str = "/fulltext-search";

/// Name of the query parameter carrying the search text.
pub const SEARCH_QUERY_PARAM: &str = "q";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickLink {
    pub label: &'static str,
    pub route: &'static str,
    pub icon: Icon,
}

impl QuickLink {
    /// Case-insensitive substring match of `query` against label or route.
    /// A blank query matches every link.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(&needle) || self.route.to_lowercase().contains(&needle)
    }
}

pub static QUICK_LINKS: [QuickLink; 7] = [
    QuickLink {
        label: "CRM",
        route: "/crm",
        icon: Icon::Users,
    },
    QuickLink {
        label: "Projects",
        route: "/projects",
        icon: Icon::FolderKanban,
    },
    QuickLink {
        label: "Documents",
        route: "/documents",
        icon: Icon::FileText,
    },
    QuickLink {
        label: "Emails",
        route: "/emails",
        icon: Icon::Mail,
    },
    QuickLink {
        label: "Invoices",
        route: "/invoice",
        icon: Icon::FileCheck,
    },
    QuickLink {
        label: "Reports",
        route: "/reports",
        icon: Icon::BarChart,
    },
    QuickLink {
        label: "Administration",
        route: "/admin",
        icon: Icon::Wrench,
    },
];

/// Quick links matching `query`, in list order.
pub fn matching_quick_links(query: &str) -> impl Iterator<Item = &'static QuickLink> + '_ {
    QUICK_LINKS.iter().filter(move |link| link.matches(query))
}

/// The quick link whose route is exactly the path of `location`.
pub fn find_quick_link(location: &str) -> Option<&'static QuickLink> {
    let path = path_component(location);
    QUICK_LINKS.iter().find(|link| link.route == path)
}

/// The global search location for `query`.
///
/// The query is trimmed before submission; `None` when nothing is left.
pub fn search_route(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{SEARCH_ROUTE}?{SEARCH_QUERY_PARAM}={}", encode_query_component(trimmed)))
}

/// The search text carried by a global search location, decoded.
///
/// `None` when `location` is not the search page or has no query parameter.
pub fn search_query(location: &str) -> Option<String> {
    if path_component(location) != SEARCH_ROUTE {
        return None;
    }
    let (_, query_string) = location.split_once('?')?;
    let query_string = query_string.split('#').next().unwrap_or_default();
    query_string.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        (name == SEARCH_QUERY_PARAM).then(|| decode_query_component(value).into_owned())
    })
}
