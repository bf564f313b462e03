use ratatui::layout::Rect;

use crate::config::{CELL_HEIGHT, CELL_WIDTH, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};
use crate::layout::Point;

/// Maps terminal cells of the canvas area onto screen coordinates, in the
/// same units the layout engine works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn world_size(&self) -> (f64, f64) {
        if self.area.is_empty() {
            return (DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT);
        }
        (
            self.area.width as f64 * CELL_WIDTH,
            self.area.height as f64 * CELL_HEIGHT,
        )
    }

    pub fn center(&self) -> Point {
        let (w, h) = self.world_size();
        Point::new(w / 2.0, h / 2.0)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.right()
            && row >= self.area.y
            && row < self.area.bottom()
    }

    /// Center of the cell, clamped into the area so drags that leave the
    /// canvas keep tracking its edge.
    pub fn cell_to_screen(&self, column: u16, row: u16) -> Point {
        let col = column
            .clamp(self.area.x, self.area.right().saturating_sub(1).max(self.area.x))
            .saturating_sub(self.area.x);
        let row = row
            .clamp(self.area.y, self.area.bottom().saturating_sub(1).max(self.area.y))
            .saturating_sub(self.area.y);
        Point::new(
            (col as f64 + 0.5) * CELL_WIDTH,
            (row as f64 + 0.5) * CELL_HEIGHT,
        )
    }
}
