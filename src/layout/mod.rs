//! Force-directed bubble layout.
//!
//! One circular node per coin, sized by market cap and kept apart by a
//! collision force while a weak charge and a centering force hold the
//! cluster together in the middle of the viewport.

pub mod engine;
pub mod force;
pub mod node;
pub mod scale;

pub use engine::{BubbleEngine, ForceParams};
pub use node::{LayoutNode, Point};
pub use scale::SqrtScale;
