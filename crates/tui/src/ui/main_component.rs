use atrium_types::{Effect, Msg};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use rat_focus::FocusBuilder;
use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Paragraph},
};

use super::components::{Component, HeaderComponent, NavRailComponent, PageComponent, PaletteComponent};
use super::theme::theme_helpers as th;
use super::utils::centered_rect;
use crate::app::App;

/// Root view: navigation rail on the left, header, page and hints on the
/// right, and the command palette as an overlay on top.
#[derive(Default, Debug)]
pub struct MainView {
    pub nav_rail_view: NavRailComponent,
    pub header_view: HeaderComponent,
    pub page_view: PageComponent,
    pub palette_view: PaletteComponent,

    /// the widget_id of the focus just before the palette opened
    transient_focus_id: Option<usize>,
    palette_was_open: bool,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves focus into the palette when it opens and back out when it closes.
    ///
    /// The palette can open from the shortcut hub, the header button or the
    /// page, so this runs once per loop iteration instead of at each call site.
    pub fn sync_palette_focus(&mut self, app: &mut App) {
        let open = app.palette.is_open();
        if open == self.palette_was_open {
            return;
        }
        self.palette_was_open = open;
        if open {
            // save the current focus to restore when the palette is closed
            self.transient_focus_id = app.focus.focused().map(|focus| focus.widget_id());
            app.clear_shell_focus();
            app.focus = FocusBuilder::build_for(app);
            app.focus.focus(&app.palette);
        } else {
            app.focus = FocusBuilder::build_for(app);
            self.restore_focus(app);
        }
    }

    pub fn restore_focus(&mut self, app: &mut App) {
        if let Some(id) = self.transient_focus_id
            && !app.palette.is_open()
        {
            app.focus.by_widget_id(id);
            self.transient_focus_id = None;
        } else if app.palette.is_open() {
            app.focus.focus(&app.palette);
        } else {
            app.focus.first();
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let mut effects = app.update(msg);
        effects.extend(self.page_view.handle_message(app, msg));
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.palette.is_open() {
            return self.palette_view.handle_key_events(app, key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('b') => {
                    app.nav_rail.toggle_collapsed();
                    return Vec::new();
                }
                KeyCode::Char('q') => return vec![Effect::Quit],
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            _ => {}
        }

        if app.nav_rail.container_focus.get() {
            return self.nav_rail_view.handle_key_events(app, key);
        }

        if app.header.container_focus.get() {
            return self.header_view.handle_key_events(app, key);
        }

        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.palette.is_open() {
            return self.palette_view.handle_mouse_events(app, mouse);
        }

        let mut effects = Vec::new();
        effects.extend(self.nav_rail_view.handle_mouse_events(app, mouse));
        effects.extend(self.header_view.handle_mouse_events(app, mouse));
        effects.extend(self.page_view.handle_mouse_events(app, mouse));
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.nav_rail_view.render(frame, layout[0], app);
        self.header_view.render(frame, layout[1], app);
        self.page_view.render(frame, layout[2], app);

        let hint_spans = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[3]);

        if app.palette.is_open() {
            render_overlay(frame, app);
            let palette_area = centered_rect(60, 60, area);
            let splits = Layout::vertical([
                Constraint::Percentage(100), // Palette
                Constraint::Length(1),       // Palette hints bar
            ])
            .split(palette_area);
            let palette_hints = self.palette_view.get_hint_spans(app);
            let hints_widget = Paragraph::new(Line::from(palette_hints))
                .style(app.ctx.theme.text_muted_style())
                .bg(app.ctx.theme.roles().background);
            frame.render_widget(hints_widget, splits[1]);
            self.palette_view.render(frame, splits[0], app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let mut hint_spans = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];

        if app.nav_rail.container_focus.get() {
            hint_spans.extend(self.nav_rail_view.get_hint_spans(app));
        } else if app.header.container_focus.get() {
            hint_spans.extend(self.header_view.get_hint_spans(app));
        }

        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[
                (" Ctrl+K", " Search "),
                ("Ctrl+B", " Collapse rail "),
                ("Tab", " Next "),
                ("Ctrl+Q", " Quit "),
            ],
        ));

        hint_spans
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let outer_areas = Layout::horizontal([
            Constraint::Length(app.nav_rail.preferred_width(&app.ctx.app_name)), // Nav rail width
            Constraint::Min(1),                                                  // Wrapper
        ])
        .split(area);
        let content_areas = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Page
            Constraint::Length(1), // Hints bar
        ])
        .split(outer_areas[1]);

        vec![
            outer_areas[0],   // navigation
            content_areas[0], // header
            content_areas[1], // page
            content_areas[2], // hints bar
        ]
    }
}

/// Dims everything behind the palette.
fn render_overlay(frame: &mut Frame, app: &mut App) {
    frame.render_widget(Block::default().style(app.ctx.theme.modal_background_style()).dim(), frame.area());
}

#[cfg(test)]
mod tests {
    use atrium_registry::{ModuleRegistry, ShellInputs};
    use atrium_types::{ModuleDescriptor, ShortcutAction};
    use crossterm::event::{KeyEventKind, KeyEventState, MouseButton, MouseEventKind};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::ui::theme::DraculaTheme;

    fn test_app() -> App {
        let inputs = ShellInputs {
            registry: ModuleRegistry::from_descriptors(&[ModuleDescriptor::new("crm", true)]),
            ..ShellInputs::default()
        };
        App::new(inputs, Box::new(DraculaTheme::new()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn draw_buffer(view: &mut MainView, app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| view.render(frame, frame.area(), app)).expect("draw");
        terminal.backend().buffer().clone()
    }

    fn draw(view: &mut MainView, app: &mut App) -> String {
        let buffer = draw_buffer(view, app, 100, 30);
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn area_text(buffer: &Buffer, area: Rect) -> String {
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
        }
        text
    }

    #[test]
    fn palette_captures_keys_and_restores_focus() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.focus.focus(&app.header.f_search);
        assert!(app.header.is_search_focused());

        app.activate();
        view.handle_message(&mut app, &Msg::Shortcut(ShortcutAction::TogglePalette));
        view.sync_palette_focus(&mut app);
        assert!(app.palette.is_focused());
        assert!(!app.header.is_search_focused());

        // Tab must not leave the palette.
        view.handle_key_events(&mut app, key(KeyCode::Tab));
        assert!(app.palette.is_open());
        view.handle_key_events(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.palette.query(), "x");

        view.handle_key_events(&mut app, key(KeyCode::Esc));
        view.sync_palette_focus(&mut app);
        assert!(!app.palette.is_open());
        assert!(app.header.is_search_focused());
    }

    #[test]
    fn palette_scrolls_to_keep_the_selection_visible() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.activate();
        view.handle_message(&mut app, &Msg::Shortcut(ShortcutAction::TogglePalette));
        view.sync_palette_focus(&mut app);
        // "/" matches every route: the search action plus all quick links.
        view.handle_key_events(&mut app, key(KeyCode::Char('/')));
        let last = app.palette.items().len() - 1;
        for _ in 0..last {
            view.handle_key_events(&mut app, key(KeyCode::Down));
        }
        assert_eq!(app.palette.selected_index(), last);

        let buffer = draw_buffer(&mut view, &mut app, 80, 24);
        assert!(app.palette.list_state.offset() > 0);
        let (_, area) = app
            .palette
            .per_item_areas
            .iter()
            .find(|(index, _)| *index == last)
            .copied()
            .expect("selected row is visible");
        assert!(area_text(&buffer, area).contains("Administration"));
        assert!(app.palette.per_item_areas.iter().all(|(index, _)| *index != 0));

        // Clicking the visible row activates that item, not the first one.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 4,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        };
        let effects = view.handle_mouse_events(&mut app, click);
        assert_eq!(effects, vec![Effect::Navigate("/admin".to_string())]);
    }

    #[test]
    fn short_rail_scrolls_to_the_focused_entry() {
        let names = ["crm", "projects", "secondBrain", "invoice", "reports", "documents", "openai"];
        let descriptors: Vec<_> = names.iter().map(|name| ModuleDescriptor::new(*name, true)).collect();
        let inputs = ShellInputs {
            registry: ModuleRegistry::from_descriptors(&descriptors),
            ..ShellInputs::default()
        };
        let mut app = App::new(inputs, Box::new(DraculaTheme::new()));
        let mut view = MainView::new();
        assert_eq!(app.nav_rail.entries.len(), 10);

        let buffer = draw_buffer(&mut view, &mut app, 100, 12);
        assert_eq!(app.nav_rail.scroll_offset, 0);
        assert!(!area_text(&buffer, app.nav_rail.last_area).contains("Administration"));

        let last = app.nav_rail.item_focus_flags.last().cloned().expect("entry flags");
        app.focus.focus(&last);
        let buffer = draw_buffer(&mut view, &mut app, 100, 12);
        assert!(app.nav_rail.scroll_offset > 0);
        let last_row = app.nav_rail.per_item_areas.last().copied().expect("visible rows");
        assert!(area_text(&buffer, last_row).contains("Administration"));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: last_row.x + 2,
            row: last_row.y,
            modifiers: KeyModifiers::NONE,
        };
        let effects = view.handle_mouse_events(&mut app, click);
        assert_eq!(effects, vec![Effect::Navigate("/admin".to_string())]);
    }

    #[test]
    fn ctrl_q_quits_and_ctrl_b_collapses() {
        let mut app = test_app();
        let mut view = MainView::new();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        assert_eq!(view.handle_key_events(&mut app, ctrl('q')), vec![Effect::Quit]);
        assert!(!app.nav_rail.is_collapsed());
        view.handle_key_events(&mut app, ctrl('b'));
        assert!(app.nav_rail.is_collapsed());
    }

    #[test]
    fn renders_rail_header_and_palette() {
        let mut app = test_app();
        let mut view = MainView::new();
        let screen = draw(&mut view, &mut app);
        assert!(screen.contains("Dashboard"));
        assert!(screen.contains("Contacts"));
        assert!(screen.contains("Search..."));
        assert!(!screen.contains("Quick Links"));

        app.palette.open();
        view.sync_palette_focus(&mut app);
        let screen = draw(&mut view, &mut app);
        assert!(screen.contains("Search or jump to..."));
        assert!(screen.contains("Quick Links"));
    }
}
