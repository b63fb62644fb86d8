use atrium_types::Effect;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Borders, Paragraph},
};

use super::NavRailState;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{self as th, ButtonRenderOptions, render_button};
use crate::ui::utils::find_target_index_by_mouse_position;

/// The navigation rail: a collapse toggle above one row per rendered entry.
///
/// Activating an entry (Enter or click) emits [`Effect::Navigate`] with the
/// entry's route; the toggle only flips the collapsed flag.
#[derive(Debug, Default)]
pub struct NavRailComponent;

impl NavRailComponent {
    fn activate_entry(state: &mut NavRailState, index: usize) -> Vec<Effect> {
        let Some(entry) = state.entries.get(index) else {
            return Vec::new();
        };
        state.selected_index = index;
        vec![Effect::Navigate(entry.route.to_string())]
    }
}

impl Component for NavRailComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Down => {
                if let Some(flag) = app.nav_rail.cycle_focus(true) {
                    app.focus.focus(&flag);
                }
            }
            KeyCode::Up => {
                if let Some(flag) = app.nav_rail.cycle_focus(false) {
                    app.focus.focus(&flag);
                }
            }
            KeyCode::Home => {
                if let Some(flag) = app.nav_rail.item_focus_flags.first() {
                    app.focus.focus(flag);
                }
            }
            KeyCode::End => {
                if let Some(flag) = app.nav_rail.item_focus_flags.last() {
                    app.focus.focus(flag);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if app.nav_rail.is_toggle_focused() {
                    app.nav_rail.toggle_collapsed();
                    return Vec::new();
                }
                let focused_index = app.nav_rail.get_focused_entry().map(|(_, index)| index);
                if let Some(index) = focused_index {
                    return Self::activate_entry(&mut app.nav_rail, index);
                }
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
        if app.nav_rail.toggle_area.contains(position) {
            app.nav_rail.toggle_collapsed();
            app.focus.focus(&app.nav_rail.toggle_focus);
            return Vec::new();
        }

        let NavRailState {
            last_area, per_item_areas, ..
        } = &app.nav_rail;
        let Some(hit) = find_target_index_by_mouse_position(last_area, per_item_areas, mouse.column, mouse.row) else {
            return Vec::new();
        };
        let index = app.nav_rail.scroll_offset + hit;
        if let Some(flag) = app.nav_rail.item_focus_flags.get(index) {
            app.focus.focus(flag);
        }
        Self::activate_entry(&mut app.nav_rail, index)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let collapsed = app.nav_rail.is_collapsed();
        let any_focused = app.nav_rail.is_toggle_focused() || app.nav_rail.get_focused_entry().is_some();

        let title = (!collapsed).then_some(app.ctx.app_name.as_str());
        let block = th::block(theme, title, any_focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        app.nav_rail.ensure_visible(usize::from(inner.height.saturating_sub(2)));

        let layout = self.get_preferred_layout(app, inner);
        let Some((toggle_area, item_areas)) = layout.split_first() else {
            return;
        };

        let toggle_label = if collapsed { "»" } else { "« Collapse" };
        render_button(
            frame,
            *toggle_area,
            toggle_label,
            theme,
            ButtonRenderOptions::new(true, app.nav_rail.is_toggle_focused(), false, Borders::NONE),
        );

        let offset = app.nav_rail.scroll_offset;
        let visible = app.nav_rail.entries.iter().enumerate().skip(offset);
        for ((index, entry), row_area) in visible.zip(item_areas.iter().copied()) {
            let focused = app.nav_rail.item_focus_flags.get(index).is_some_and(|flag| flag.get());
            let marker = if entry.active { "▌" } else { " " };
            let mut spans = vec![
                Span::styled(marker, theme.accent_primary_style()),
                Span::raw(" "),
                Span::raw(entry.icon.glyph()),
            ];
            if entry.show_label {
                spans.push(Span::raw("  "));
                spans.push(Span::raw(entry.label.clone()));
            }
            let mut style = th::list_row_style(theme, focused);
            if entry.active {
                style = style.add_modifier(Modifier::BOLD).fg(theme.roles().accent_primary);
            }
            frame.render_widget(Paragraph::new(Line::from(spans)).style(style), row_area);
        }

        app.nav_rail.last_area = area;
        app.nav_rail.toggle_area = *toggle_area;
        app.nav_rail.per_item_areas = item_areas.to_vec();
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        if app.nav_rail.is_toggle_focused() {
            return th::build_hint_spans(theme, &[(" Enter", " Collapse/expand ")]);
        }
        th::build_hint_spans(theme, &[(" Enter", " Open section "), ("↑/↓", " Navigate ")])
    }

    /// One row for the toggle, a spacer, then one row per visible entry.
    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let remaining = app.nav_rail.entries.len().saturating_sub(app.nav_rail.scroll_offset);
        let row_count = remaining.min(usize::from(area.height.saturating_sub(2)));
        let mut constraints = Vec::with_capacity(row_count + 3);
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.extend(std::iter::repeat_n(Constraint::Length(1), row_count));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(area);
        let mut layout = Vec::with_capacity(row_count + 1);
        layout.push(rows[0]);
        layout.extend(rows.iter().skip(2).take(row_count).filter(|row| row.height > 0).copied());
        layout
    }
}
