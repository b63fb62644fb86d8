//! Command palette: a keyboard-first overlay for jumping to a section or
//! submitting a global full-text search.

mod palette_component;
mod state;

pub use palette_component::PaletteComponent;
pub use state::{PaletteItem, PaletteLifecycle, PalettePhase, PaletteState};
