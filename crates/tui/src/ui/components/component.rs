//! Component system for the Atrium shell.
//!
//! Components are self-contained UI elements: they handle their own input,
//! render themselves into a provided `Rect`, and report side effects back to
//! the runtime as [`Effect`]s instead of touching the router directly.

use atrium_types::{Effect, Msg};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::App;

/// A UI component with its own behavior over shared [`App`] state.
///
/// # Component Lifecycle
///
/// 1. **Event handling**: `handle_message()`, `handle_key_events()` and
///    `handle_mouse_events()` update state and return effects.
/// 2. **Rendering**: `render()` draws the component and records the areas it
///    needs for mouse hit-testing.
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events routed to this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing,
    /// cursor placement and remembering layout for hit-testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the bottom bar while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }

    /// Sub-areas the component lays itself out into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
