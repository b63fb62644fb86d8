//! Content area for the current location.

mod page_component;

pub use page_component::PageComponent;
