pub mod app;
pub mod bubbles;
pub mod colors;
pub mod format;
pub mod sparkle;
pub mod viewport;

pub use app::BubbleApp;
pub use bubbles::{LabelLine, Scene, label_lines};
pub use colors::BubbleColors;
pub use sparkle::{Sparkle, SparkleField};
pub use viewport::Viewport;
