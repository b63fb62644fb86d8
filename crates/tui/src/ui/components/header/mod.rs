//! Top bar: current location on the left, the search button on the right.
//!
//! Clicking the search button (or pressing Enter while it is focused) opens
//! the command palette directly, without going through the shortcut hub.

mod header_component;
mod state;

pub use header_component::HeaderComponent;
pub use state::HeaderState;
