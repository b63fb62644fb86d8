//! Navigation rail.
//!
//! A left-hand column listing the module-gated navigation entries. It
//! supports:
//! - collapsing to an icon column and expanding back (toggle row, Ctrl+B)
//! - rat-focus integration via one `FocusFlag` per entry plus the toggle
//! - keyboard navigation (Up/Down/Home/End/Enter) and mouse clicks
//!
//! Which entries exist, their labels and their active flags come from
//! `atrium_registry::render_navigation`; this module only draws them and maps
//! activation to `Effect::Navigate`.

mod nav_rail_component;
mod state;

pub use nav_rail_component::NavRailComponent;
pub use state::NavRailState;
