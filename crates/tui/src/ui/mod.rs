//! Terminal rendering for the shell: the root view, the event loop, the
//! components it routes input to and the fixed theme.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
