use atrium_registry::{Dictionary, ModuleRegistry, RailState, RenderedEntry, render_navigation};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use crate::ui::utils::display_width;

/// Width of the rail while collapsed: borders, padding and one glyph.
pub const COLLAPSED_WIDTH: u16 = 7;
const MIN_EXPANDED_WIDTH: u16 = 18;
const MAX_EXPANDED_WIDTH: u16 = 34;
/// Borders, padding, active marker, glyph and the gap after it.
const ROW_CHROME: u16 = 8;

/// State for the navigation rail.
///
/// Owns the entries of the latest render pass, the collapsed flag and the
/// rat-focus flags for the toggle and each entry. Entries are recomputed on
/// every route change so gating and active flags always reflect the current
/// registry and location.
#[derive(Debug, Default, Clone)]
pub struct NavRailState {
    pub rail: RailState,
    /// Entries produced by the last render pass, in rail order.
    pub entries: Vec<RenderedEntry>,
    /// Index of the entry last activated from the rail.
    pub selected_index: usize,
    /// Focus flag for the container in the global focus tree.
    pub container_focus: FocusFlag,
    /// Focus flag for the collapse/expand toggle.
    pub toggle_focus: FocusFlag,
    /// Focus flags for each entry; kept in sync with `entries` length.
    pub item_focus_flags: Vec<FocusFlag>,
    /// Index of the first entry shown when the rail is shorter than its entries.
    pub scroll_offset: usize,
    /// Last rendered area of the rail; used for mouse hit testing.
    pub last_area: Rect,
    pub toggle_area: Rect,
    /// Areas of the visible entries, starting at `scroll_offset`.
    pub per_item_areas: Vec<Rect>,
}

impl NavRailState {
    pub fn new() -> Self {
        Self {
            container_focus: FocusFlag::named("atrium.nav"),
            toggle_focus: FocusFlag::named("atrium.nav.toggle"),
            ..Self::default()
        }
    }

    /// Runs a render pass for `location` and stores its entries.
    pub fn refresh(&mut self, registry: &ModuleRegistry, dictionary: &Dictionary, location: &str) {
        self.entries = render_navigation(registry, dictionary, location, self.rail);
        if self.item_focus_flags.len() != self.entries.len() {
            self.rebuild_item_focus_flags();
        }
        if let Some(active) = self.active_index() {
            self.selected_index = active;
        }
    }

    /// Flips collapsed/expanded. Only label visibility changes.
    pub fn toggle_collapsed(&mut self) {
        self.rail.toggle();
        let show_label = !self.rail.collapsed;
        for entry in &mut self.entries {
            entry.show_label = show_label;
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.rail.collapsed
    }

    /// Updates the item focus flags to match `entries` length, clamping the
    /// selection into range.
    pub fn rebuild_item_focus_flags(&mut self) {
        let length = self.entries.len();
        self.item_focus_flags = (0..length)
            .map(|index| FocusFlag::named(&format!("atrium.nav.item.{index}")))
            .collect();
        self.selected_index = self.selected_index.min(length.saturating_sub(1));
    }

    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|entry| entry.active)
    }

    pub fn get_focused_entry(&self) -> Option<(&RenderedEntry, usize)> {
        let index = self.item_focus_flags.iter().position(|flag| flag.get())?;
        self.entries.get(index).map(|entry| (entry, index))
    }

    pub fn is_toggle_focused(&self) -> bool {
        self.toggle_focus.get()
    }

    /// The flag one step up or down from the focused entry, wrapping around.
    pub fn cycle_focus(&self, increment: bool) -> Option<FocusFlag> {
        let length = self.item_focus_flags.len();
        if length == 0 {
            return None;
        }
        let next = match self.item_focus_flags.iter().position(|flag| flag.get()) {
            Some(index) if increment => (index + 1) % length,
            Some(index) => (index + length - 1) % length,
            None if increment => 0,
            None => length - 1,
        };
        self.item_focus_flags.get(next).cloned()
    }

    /// Scrolls so the focused entry, or else the selected one, lies within a
    /// window of `capacity` rows.
    pub fn ensure_visible(&mut self, capacity: usize) {
        if capacity == 0 {
            return;
        }
        let target = self
            .get_focused_entry()
            .map_or(self.selected_index, |(_, index)| index);
        if target < self.scroll_offset {
            self.scroll_offset = target;
        } else if target >= self.scroll_offset + capacity {
            self.scroll_offset = target + 1 - capacity;
        }
        self.scroll_offset = self.scroll_offset.min(self.entries.len().saturating_sub(capacity));
    }

    /// Columns the rail wants: an icon column when collapsed, otherwise wide
    /// enough for the longest label.
    pub fn preferred_width(&self, title: &str) -> u16 {
        if self.rail.collapsed {
            return COLLAPSED_WIDTH;
        }
        let widest_label = self.entries.iter().map(|entry| display_width(&entry.label)).max().unwrap_or(0);
        let content = widest_label.saturating_add(ROW_CHROME).max(display_width(title).saturating_add(4));
        content.clamp(MIN_EXPANDED_WIDTH, MAX_EXPANDED_WIDTH)
    }
}

impl HasFocus for NavRailState {
    /// The toggle first, then each entry as a leaf under the container flag.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.toggle_focus);
        for flag in &self.item_focus_flags {
            builder.leaf_widget(flag);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
