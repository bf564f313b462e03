//! Pointer and zoom handling on top of the layout engine.

pub mod browser;
pub mod pointer;
pub mod zoom;

pub use browser::{detail_url, open_in_browser};
pub use pointer::{PointerAction, PointerTracker};
pub use zoom::ZoomTransform;
