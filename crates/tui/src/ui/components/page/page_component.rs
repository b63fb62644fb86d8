use atrium_registry::{SEARCH_ROUTE, find_quick_link, search_query};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// Placeholder content for the current location.
///
/// Section pages are owned by other parts of the product; the shell only
/// names where the user is.
#[derive(Debug, Default)]
pub struct PageComponent;

impl PageComponent {
    fn title(app: &App) -> String {
        if app.router.pathname() == SEARCH_ROUTE {
            return "Search".to_string();
        }
        if let Some(entry) = app.nav_rail.entries.iter().find(|entry| entry.active) {
            return entry.label.clone();
        }
        if let Some(link) = find_quick_link(app.router.location()) {
            return link.label.to_string();
        }
        app.router.pathname().to_string()
    }
}

impl Component for PageComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let title = Self::title(app);
        let block = th::block(theme, Some(title.as_str()), false);

        let mut lines = vec![Line::default()];
        match search_query(app.router.location()) {
            Some(query) => {
                lines.push(Line::from(vec![
                    Span::styled("Search results for ", theme.text_secondary_style()),
                    Span::styled(format!("\"{query}\""), theme.accent_emphasis_style()),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    format!("You are viewing {}.", app.router.pathname()),
                    theme.text_primary_style(),
                )));
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press Ctrl+K to search or jump to another section.",
            theme.text_muted_style(),
        )));

        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), rect);
    }
}
