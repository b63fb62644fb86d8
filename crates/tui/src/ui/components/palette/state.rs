//! Command palette state machine.
//!
//! The palette is `Closed`, `OpenEmpty` or `OpenQuerying`. Opening always
//! starts from an empty query and every way out (dismiss, quick link, search
//! submission) resets the query, so a reopened palette never shows stale
//! text. Navigation is returned as [`Effect::Navigate`] after the state has
//! been reset; the runtime applies it once the handler has returned.
//!
//! The palette listens for its global shortcut only while mounted. Mounting
//! attaches one [`ShortcutSubscription`]; unmounting (or dropping the state)
//! detaches it.

use atrium_registry::{QuickLink, matching_quick_links, search_route};
use atrium_types::{Effect, ShortcutAction};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::{layout::Rect, widgets::ListState};
use tracing::debug;

use crate::shortcuts::{PALETTE_CHORDS, ShortcutHub, ShortcutSubscription};
use crate::ui::components::common::TextInputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalettePhase {
    Closed,
    OpenEmpty,
    OpenQuerying,
}

/// One selectable row of the open palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteItem {
    /// Submit the current query to the global search page.
    SearchFor(String),
    QuickLink(&'static QuickLink),
}

impl PaletteItem {
    pub fn label(&self) -> String {
        match self {
            Self::SearchFor(query) => format!("Search for \"{query}\""),
            Self::QuickLink(link) => link.label.to_string(),
        }
    }
}

/// Whether the palette currently holds a shortcut subscription.
#[derive(Debug, Default)]
pub enum PaletteLifecycle {
    #[default]
    Unmounted,
    Mounted(ShortcutSubscription),
}

#[derive(Debug)]
pub struct PaletteState {
    open: bool,
    query: TextInputState,
    selected_index: usize,
    lifecycle: PaletteLifecycle,
    /// Focus flag for self
    container_focus: FocusFlag,
    /// Focus flag for the query input
    f_input: FocusFlag,
    /// Last rendered overlay area; clicks outside it dismiss the palette.
    pub last_area: Rect,
    /// Scroll position of the rendered list; the selected row is kept in view.
    pub list_state: ListState,
    /// Visible rows as (index into `items()`, area).
    pub per_item_areas: Vec<(usize, Rect)>,
    /// Area of the "Search globally" affordance, when it is shown.
    pub search_globally_area: Option<Rect>,
}

impl Default for PaletteState {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteState {
    pub fn new() -> Self {
        Self {
            open: false,
            query: TextInputState::new(),
            selected_index: 0,
            lifecycle: PaletteLifecycle::Unmounted,
            container_focus: FocusFlag::named("atrium.palette"),
            f_input: FocusFlag::named("atrium.palette.input"),
            last_area: Rect::default(),
            list_state: ListState::default(),
            per_item_areas: Vec::new(),
            search_globally_area: None,
        }
    }

    /// Attaches the global shortcut listener. Mounting twice is a no-op.
    pub fn mount(&mut self, hub: &ShortcutHub) -> bool {
        if self.is_mounted() {
            return false;
        }
        self.lifecycle = PaletteLifecycle::Mounted(hub.subscribe(&PALETTE_CHORDS, ShortcutAction::TogglePalette));
        true
    }

    /// Detaches the global shortcut listener, if attached.
    pub fn unmount(&mut self) -> bool {
        match std::mem::take(&mut self.lifecycle) {
            PaletteLifecycle::Mounted(subscription) => {
                subscription.unsubscribe();
                true
            }
            PaletteLifecycle::Unmounted => false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.lifecycle, PaletteLifecycle::Mounted(_))
    }

    pub fn phase(&self) -> PalettePhase {
        match (self.open, self.query.is_empty()) {
            (false, _) => PalettePhase::Closed,
            (true, true) => PalettePhase::OpenEmpty,
            (true, false) => PalettePhase::OpenQuerying,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        self.query.input()
    }

    pub fn input(&self) -> &TextInputState {
        &self.query
    }

    pub fn is_focused(&self) -> bool {
        self.f_input.get()
    }

    /// Opens with an empty query. Returns `false` when already open.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.query.clear();
        self.selected_index = 0;
        self.open = true;
        debug!("command palette opened");
        true
    }

    /// Closes and clears the query. Dismissing a closed palette does nothing.
    pub fn dismiss(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.reset();
        debug!("command palette dismissed");
        true
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.dismiss();
        } else {
            self.open();
        }
    }

    pub fn handle_shortcut(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::TogglePalette => self.toggle(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.query.insert_char(c);
        self.selected_index = 0;
    }

    pub fn backspace(&mut self) {
        self.query.backspace();
        self.selected_index = 0;
    }

    pub fn delete(&mut self) {
        self.query.delete();
        self.selected_index = 0;
    }

    pub fn move_cursor_left(&mut self) {
        self.query.move_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.query.move_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.query.move_home();
    }

    pub fn move_cursor_end(&mut self) {
        self.query.move_end();
    }

    /// Rows in display order: the search action first (non-empty query only),
    /// then every quick link matching the query.
    pub fn items(&self) -> Vec<PaletteItem> {
        let query = self.query();
        let mut items = Vec::with_capacity(1 + atrium_registry::QUICK_LINKS.len());
        if !query.is_empty() {
            items.push(PaletteItem::SearchFor(query.to_string()));
        }
        items.extend(matching_quick_links(query).map(PaletteItem::QuickLink));
        items
    }

    /// The query when it is non-empty but no quick link matches it.
    pub fn empty_results_query(&self) -> Option<&str> {
        let query = self.query();
        let no_links = matching_quick_links(query).next().is_none();
        (!query.is_empty() && no_links).then_some(query)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn select_next(&mut self) {
        let count = self.items().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.items().len();
        if count > 0 {
            self.selected_index = (self.selected_index + count - 1) % count;
        }
    }

    pub fn activate_selected(&mut self) -> Vec<Effect> {
        self.activate_index(self.selected_index)
    }

    pub fn activate_index(&mut self, index: usize) -> Vec<Effect> {
        match self.items().get(index) {
            Some(PaletteItem::SearchFor(_)) => self.submit_search(),
            Some(PaletteItem::QuickLink(link)) => self.select_quick_link(link.route),
            None => Vec::new(),
        }
    }

    /// Resets the palette, then requests navigation to `route`.
    pub fn select_quick_link(&mut self, route: &str) -> Vec<Effect> {
        self.reset();
        vec![Effect::Navigate(route.to_string())]
    }

    /// Submits the trimmed query to the global search page.
    ///
    /// A blank query does nothing and leaves the palette open.
    pub fn submit_search(&mut self) -> Vec<Effect> {
        let Some(route) = search_route(self.query()) else {
            return Vec::new();
        };
        self.reset();
        vec![Effect::Navigate(route)]
    }

    fn reset(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected_index = 0;
        self.list_state = ListState::default();
        self.per_item_areas.clear();
        self.search_globally_area = None;
        self.f_input.set(false);
        self.container_focus.set(false);
    }
}

impl HasFocus for PaletteState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_input);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
