use atrium_types::Effect;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph},
};

use super::state::PaletteItem;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::Theme;
use crate::ui::theme::theme_helpers as th;

const PLACEHOLDER: &str = "Search or jump to...";
const SEARCH_GLOBALLY: &str = "Search globally →";

/// Command palette overlay: a query line above the actions and quick links.
#[derive(Debug, Default)]
pub struct PaletteComponent;

impl PaletteComponent {
    fn create_input_paragraph<'a>(&self, app: &'a App, theme: &'a dyn Theme) -> Paragraph<'a> {
        let query = app.palette.query();
        let line = if query.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, theme.text_muted_style()))
        } else {
            Line::from(Span::styled(query, theme.text_primary_style()))
        };
        let block = th::block(theme, None, app.palette.is_focused()).title(Span::styled(
            " ⌕ Search ",
            theme.accent_emphasis_style(),
        ));
        Paragraph::new(line).block(block)
    }

    fn position_cursor(&self, frame: &mut Frame, input_area: Rect, app: &App) {
        if !app.palette.is_focused() {
            return;
        }
        let inner_x = input_area.x.saturating_add(1);
        let inner_y = input_area.y.saturating_add(1);
        let col = u16::try_from(app.palette.input().cursor_columns()).unwrap_or(u16::MAX);
        let max_x = input_area.right().saturating_sub(2);
        frame.set_cursor_position((inner_x.saturating_add(col).min(max_x), inner_y));
    }

    /// Builds the list lines and remembers which line each item lands on.
    fn build_list<'a>(&self, app: &App, theme: &'a dyn Theme) -> (Vec<Line<'a>>, Vec<usize>, Option<usize>) {
        let items = app.palette.items();
        let selected = app.palette.selected_index();
        let heading = theme.text_secondary_style().add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line<'a>> = Vec::new();
        let mut item_lines = Vec::with_capacity(items.len());
        let mut search_globally_line = None;

        let mut quick_links_started = false;
        for (index, item) in items.iter().enumerate() {
            match item {
                PaletteItem::SearchFor(_) => {
                    lines.push(Line::from(Span::styled("Actions", heading)));
                }
                PaletteItem::QuickLink(_) if !quick_links_started => {
                    quick_links_started = true;
                    if !lines.is_empty() {
                        lines.push(Line::default());
                    }
                    lines.push(Line::from(Span::styled("Quick Links", heading)));
                }
                PaletteItem::QuickLink(_) => {}
            }
            let glyph = match item {
                PaletteItem::SearchFor(_) => atrium_registry::Icon::Search.glyph(),
                PaletteItem::QuickLink(link) => link.icon.glyph(),
            };
            let style = th::list_row_style(theme, index == selected);
            item_lines.push(lines.len());
            lines.push(Line::from(vec![
                Span::styled(format!("  {glyph}  "), style),
                Span::styled(item.label(), style),
            ]));
        }

        if let Some(query) = app.palette.empty_results_query() {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                format!("No results found for \"{query}\""),
                theme.text_muted_style(),
            )));
            search_globally_line = Some(lines.len());
            lines.push(Line::from(Span::styled(SEARCH_GLOBALLY, theme.accent_primary_style())));
        }

        (lines, item_lines, search_globally_line)
    }
}

impl Component for PaletteComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let palette = &mut app.palette;
        match key.code {
            KeyCode::Esc => {
                palette.dismiss();
            }
            KeyCode::Enter => return palette.activate_selected(),
            KeyCode::Down => palette.select_next(),
            KeyCode::Up => palette.select_prev(),
            KeyCode::Left => palette.move_cursor_left(),
            KeyCode::Right => palette.move_cursor_right(),
            KeyCode::Home => palette.move_cursor_home(),
            KeyCode::End => palette.move_cursor_end(),
            KeyCode::Backspace => palette.backspace(),
            KeyCode::Delete => palette.delete(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) => {
                palette.insert_char(c);
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);
        let palette = &mut app.palette;
        if !palette.last_area.contains(position) {
            palette.dismiss();
            return Vec::new();
        }
        if palette.search_globally_area.is_some_and(|area| area.contains(position)) {
            return palette.submit_search();
        }
        let hit = palette.per_item_areas.iter().find(|(_, area)| area.contains(position));
        match hit.map(|(index, _)| *index) {
            Some(index) => palette.activate_index(index),
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        frame.render_widget(Clear, rect);
        let outer = th::block(theme, None, true);
        let inner = outer.inner(rect);
        frame.render_widget(outer, rect);

        let regions = self.get_preferred_layout(app, inner);
        frame.render_widget(self.create_input_paragraph(app, theme), regions[0]);
        self.position_cursor(frame, regions[0], app);

        let list_area = regions[1];
        let (lines, item_lines, search_globally_line) = self.build_list(app, theme);
        let list = List::new(lines.into_iter().map(ListItem::new)).style(th::panel_style(theme));
        let selected_line = item_lines.get(app.palette.selected_index()).copied();
        app.palette.list_state.select(selected_line);
        frame.render_stateful_widget(list, list_area, &mut app.palette.list_state);

        let offset = app.palette.list_state.offset();
        let row_area = |line: usize| -> Option<Rect> {
            let row = u16::try_from(line.checked_sub(offset)?).ok()?;
            (row < list_area.height).then(|| Rect::new(list_area.x, list_area.y + row, list_area.width, 1))
        };
        let per_item_areas: Vec<(usize, Rect)> = item_lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| row_area(*line).map(|area| (index, area)))
            .collect();
        let search_globally_area = search_globally_line.and_then(row_area);

        app.palette.last_area = rect;
        app.palette.per_item_areas = per_item_areas;
        app.palette.search_globally_area = search_globally_area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[(" Enter", " Select "), ("↑/↓", " Navigate "), ("Esc", " Close ")],
        )
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(3), // query input
            Constraint::Min(1),    // actions and quick links
        ])
        .split(area)
        .to_vec()
    }
}
