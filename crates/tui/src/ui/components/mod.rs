//! UI components: navigation rail, header, page, command palette.

pub mod common;
pub mod component;
pub mod header;
pub mod nav_rail;
pub mod page;
pub mod palette;

pub use component::*;
pub use header::HeaderComponent;
pub use nav_rail::NavRailComponent;
pub use page::PageComponent;
pub use palette::PaletteComponent;
