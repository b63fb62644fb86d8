use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

#[derive(Debug, Clone)]
pub struct HeaderState {
    pub container_focus: FocusFlag,
    /// Focus flag for the search button
    pub f_search: FocusFlag,
    pub last_area: Rect,
    pub search_button_area: Rect,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderState {
    pub fn new() -> Self {
        Self {
            container_focus: FocusFlag::named("atrium.header"),
            f_search: FocusFlag::named("atrium.header.search"),
            last_area: Rect::default(),
            search_button_area: Rect::default(),
        }
    }

    pub fn is_search_focused(&self) -> bool {
        self.f_search.get()
    }
}

impl HasFocus for HeaderState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_search);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
