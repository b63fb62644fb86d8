//! # Atrium Shell TUI Library
//!
//! The terminal rendition of the Atrium application shell: a collapsible
//! navigation rail gated by the module registry, a header with the current
//! location and a search button, and a command palette bound to Ctrl+K /
//! Cmd+K for jumping between sections or starting a full-text search.
//!
//! ## Architecture
//!
//! Each UI element (rail, header, page, palette) is a component that handles
//! its own input and renders itself. Components never navigate directly; they
//! return `Effect::Navigate` and the runtime routes it through the
//! [`HistoryRouter`]. Global keyboard shortcuts go through a
//! [`ShortcutHub`] whose subscriptions detach when dropped.

mod app;
mod router;
mod shortcuts;
mod ui;

use anyhow::Result;
use atrium_registry::ShellInputs;

pub use app::{App, ShellPhase};
pub use router::HistoryRouter;
pub use shortcuts::{KeyChord, PALETTE_CHORDS, ShortcutHub, ShortcutSubscription};

/// Runs the shell until the user quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into (or restored from)
/// raw mode and the alternate screen, or when drawing a frame fails.
pub async fn run(inputs: ShellInputs) -> Result<()> {
    ui::runtime::run_app(inputs).await
}
