use atrium_types::Effect;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Borders, Paragraph},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{self as th, ButtonRenderOptions, render_button};
use crate::ui::utils::display_width;

const SEARCH_LABEL: &str = "⌕ Search...   Ctrl+K";

#[derive(Debug, Default)]
pub struct HeaderComponent;

impl Component for HeaderComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.header.is_search_focused() && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            app.palette.open();
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && app.header.search_button_area.contains(Position::new(mouse.column, mouse.row))
        {
            app.focus.focus(&app.header.f_search);
            app.palette.open();
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, None, false).borders(Borders::BOTTOM);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = self.get_preferred_layout(app, inner);
        let breadcrumb = Line::from(vec![
            Span::styled(format!(" {} ", app.ctx.app_name), theme.accent_emphasis_style()),
            Span::styled("▸ ", theme.text_muted_style()),
            Span::styled(app.router.location().to_string(), theme.text_secondary_style()),
        ]);
        frame.render_widget(Paragraph::new(breadcrumb), layout[0]);

        render_button(
            frame,
            layout[1],
            SEARCH_LABEL,
            theme,
            ButtonRenderOptions::new(true, app.header.is_search_focused(), false, Borders::NONE),
        );

        app.header.last_area = area;
        app.header.search_button_area = layout[1];
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Enter", " Open search ")])
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let button_width = display_width(SEARCH_LABEL).saturating_add(2);
        Layout::horizontal([Constraint::Min(1), Constraint::Length(button_width)])
            .split(area)
            .to_vec()
    }
}
