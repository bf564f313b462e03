use crate::config::{ZOOM_MAX, ZOOM_MIN};
use crate::layout::Point;

/// Scale-then-translate applied to the drawing layer only. Physical node
/// coordinates never see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    k: f64,
    tx: f64,
    ty: f64,
    min_k: f64,
    max_k: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::with_extent(ZOOM_MIN, ZOOM_MAX)
    }
}

impl ZoomTransform {
    pub fn with_extent(min_k: f64, max_k: f64) -> Self {
        Self {
            k: 1.0,
            tx: 0.0,
            ty: 0.0,
            min_k,
            max_k,
        }
    }

    pub fn scale(&self) -> f64 {
        self.k
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }

    pub fn is_identity(&self) -> bool {
        self.k == 1.0 && self.tx == 0.0 && self.ty == 0.0
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.tx, p.y * self.k + self.ty)
    }

    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.tx) / self.k, (p.y - self.ty) / self.k)
    }

    pub fn apply_length(&self, length: f64) -> f64 {
        length * self.k
    }

    /// Multiply the scale by `factor`, clamped to the extent, keeping the
    /// point under `anchor` where it is on screen.
    pub fn scale_by(&mut self, factor: f64, anchor: Point) {
        let world = self.invert(anchor);
        self.k = (self.k * factor).clamp(self.min_k, self.max_k);
        self.tx = anchor.x - world.x * self.k;
        self.ty = anchor.y - world.y * self.k;
    }

    pub fn translate_by(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    pub fn reset(&mut self) {
        self.k = 1.0;
        self.tx = 0.0;
        self.ty = 0.0;
    }
}
