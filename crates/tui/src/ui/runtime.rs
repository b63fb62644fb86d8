//! Runtime: event loop and input routing for the shell.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Forward terminal input from a dedicated reader task over a channel.
//! - Offer each key to the shortcut hub first, then to the focused component.
//! - Apply returned `Effect`s: navigation goes through the router, `Quit`
//!   leaves the loop.
//!
//! Startup Order
//! - The first frame is drawn while the shell is still `Initializing`; only
//!   then is `App::activate` called, which mounts the global shortcut
//!   listener. Input queued before that is discarded, so it reaches no
//!   listener.
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use atrium_registry::ShellInputs;
use atrium_types::{Effect, Msg};
use crossterm::event::MouseEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::*};
use tokio::{signal, sync::mpsc};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

type ShellTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Spawn a dedicated input task that reads terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// `poll()` and `read()` stay on the same task so no events are lost between
/// them. Mouse moves are throttled to one per 16 ms.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_event = Instant::now();

    tokio::task::spawn_blocking(move || {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            match event::poll(sixteen_ms) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                    continue;
                }
                Ok(true) => {}
                Err(e) => {
                    warn!("Failed to poll events: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_event.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_event = Instant::now();
                    }
                    if let Err(e) = sender.blocking_send(event) {
                        warn!("Failed to send event: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Drops every event already queued on `receiver`. Returns how many were
/// dropped.
fn discard_pending_input(receiver: &mut mpsc::Receiver<Event>) -> usize {
    let mut discarded = 0;
    while receiver.try_recv().is_ok() {
        discarded += 1;
    }
    if discarded > 0 {
        debug!(discarded, "discarded input received while initializing");
    }
    discarded
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<ShellTerminal> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut ShellTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut ShellTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    main_view.sync_palette_focus(app);
    // Rebuild focus just before rendering so structure changes are reflected
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = FocusBuilder::rebuild_for(app, Some(old_focus));
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Routes a key press: shortcuts first, then the focused component.
fn handle_key_event(app: &mut App, main_view: &mut MainView, key: KeyEvent) -> Vec<Effect> {
    if let Some(action) = app.shortcuts.dispatch(&key) {
        return main_view.handle_message(app, &Msg::Shortcut(action));
    }
    main_view.handle_key_events(app, key)
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => handle_key_event(app, main_view, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Applies effects in order. Returns `false` once a `Quit` is seen.
fn apply_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>) -> bool {
    let mut queue = effects;
    while !queue.is_empty() {
        let mut follow_up = Vec::new();
        for effect in queue {
            match effect {
                Effect::Navigate(path) => {
                    if let Some(msg) = route_message(app, &path) {
                        follow_up.extend(main_view.handle_message(app, &msg));
                    }
                }
                Effect::Quit => return false,
            }
        }
        queue = follow_up;
    }
    true
}

/// Navigates and returns the `RouteChanged` message to broadcast, or `None`
/// when `path` is already the current location.
fn route_message(app: &mut App, path: &str) -> Option<Msg> {
    app.navigate(path).then(|| Msg::RouteChanged(app.router.location().to_string()))
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Entry point for the shell: sets up the terminal, draws the first frame,
/// activates global listeners, runs the event loop and cleans up on exit.
pub async fn run_app(inputs: ShellInputs) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new();
    let mut app = App::new(inputs, theme::load());
    let mut terminal = setup_terminal()?;

    render(&mut terminal, &mut app, &mut main_view)?;
    discard_pending_input(&mut input_receiver);
    app.activate();
    info!(location = %app.router.location(), "shell started");

    loop {
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if is_ctrl_c(&event) {
                    break;
                }
                let effects = handle_input_event(&mut app, &mut main_view, event);
                if !apply_effects(&mut app, &mut main_view, effects) {
                    break;
                }
            }
            _ = signal::ctrl_c() => { break; }
        }

        render(&mut terminal, &mut app, &mut main_view)?;
    }

    debug!(
        attached = app.shortcuts.attach_count(),
        detached = app.shortcuts.detach_count(),
        "shutting down"
    );
    app.deactivate();
    cleanup_terminal(&mut terminal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use atrium_registry::ModuleRegistry;
    use atrium_types::ModuleDescriptor;

    use super::*;
    use crate::ui::theme::DraculaTheme;

    fn test_app() -> App {
        let inputs = ShellInputs {
            registry: ModuleRegistry::from_descriptors(&[ModuleDescriptor::new("invoice", true)]),
            ..ShellInputs::default()
        };
        App::new(inputs, Box::new(DraculaTheme::new()))
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn type_text(app: &mut App, view: &mut MainView, text: &str) {
        for c in text.chars() {
            let effects = handle_input_event(app, view, press(KeyCode::Char(c), KeyModifiers::NONE));
            assert!(apply_effects(app, view, effects));
        }
    }

    #[test]
    fn ctrl_k_before_activation_is_ignored() {
        let mut app = test_app();
        let mut view = MainView::new();
        handle_input_event(&mut app, &mut view, press(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert!(!app.palette.is_open());

        app.activate();
        handle_input_event(&mut app, &mut view, press(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert!(app.palette.is_open());
        handle_input_event(&mut app, &mut view, press(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert!(!app.palette.is_open());
    }

    #[test]
    fn input_queued_while_initializing_is_discarded() {
        let (sender, mut receiver) = mpsc::channel(8);
        sender.try_send(press(KeyCode::Char('k'), KeyModifiers::CONTROL)).expect("send");
        sender.try_send(press(KeyCode::Char('x'), KeyModifiers::NONE)).expect("send");
        assert_eq!(discard_pending_input(&mut receiver), 2);
        assert!(receiver.try_recv().is_err());
        assert_eq!(discard_pending_input(&mut receiver), 0);

        let mut app = test_app();
        app.activate();
        assert!(!app.palette.is_open());
        sender.try_send(press(KeyCode::Char('k'), KeyModifiers::CONTROL)).expect("send");
        let mut view = MainView::new();
        let event = receiver.try_recv().expect("queued after activation");
        handle_input_event(&mut app, &mut view, event);
        assert!(app.palette.is_open());
    }

    #[test]
    fn quick_link_selection_navigates_once() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.activate();
        handle_input_event(&mut app, &mut view, press(KeyCode::Char('k'), KeyModifiers::SUPER));
        view.sync_palette_focus(&mut app);
        type_text(&mut app, &mut view, "invoice");

        // First item is "Search for", the quick link follows.
        handle_input_event(&mut app, &mut view, press(KeyCode::Down, KeyModifiers::NONE));
        let effects = handle_input_event(&mut app, &mut view, press(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(effects.len(), 1);
        assert!(apply_effects(&mut app, &mut view, effects));

        assert!(!app.palette.is_open());
        assert_eq!(app.palette.query(), "");
        assert_eq!(app.router.history(), ["/".to_string()]);
        let active: Vec<_> = app.nav_rail.entries.iter().filter(|entry| entry.active).map(|entry| entry.id).collect();
        assert_eq!(active, vec!["invoices"]);
    }

    #[test]
    fn navigating_to_the_current_location_announces_nothing() {
        let mut app = test_app();
        assert_eq!(route_message(&mut app, "/"), None);
        assert_eq!(route_message(&mut app, "/invoices"), Some(Msg::RouteChanged("/invoices".to_string())));
        assert_eq!(route_message(&mut app, "/invoices"), None);
        assert_eq!(app.router.history(), ["/".to_string()]);

        let mut view = MainView::new();
        assert!(apply_effects(&mut app, &mut view, vec![Effect::Navigate("/invoices".to_string())]));
        assert_eq!(app.router.history(), ["/".to_string()]);
    }

    #[test]
    fn quit_effect_stops_the_loop() {
        let mut app = test_app();
        let mut view = MainView::new();
        let effects = handle_input_event(&mut app, &mut view, press(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!apply_effects(&mut app, &mut view, effects));
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.activate();
        let mut release = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        release.kind = KeyEventKind::Release;
        handle_input_event(&mut app, &mut view, Event::Key(release));
        assert!(!app.palette.is_open());
    }
}
