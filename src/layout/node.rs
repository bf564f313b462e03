#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Physical state of one bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Offset into the drift wave so bubbles do not bob in unison.
    pub phase: f64,
    pub fx: Option<f64>,
    pub fy: Option<f64>,
}

impl LayoutNode {
    pub fn new(id: impl Into<String>, radius: f64, position: Point, phase: f64) -> Self {
        Self {
            id: id.into(),
            radius,
            x: position.x,
            y: position.y,
            vx: 0.0,
            vy: 0.0,
            phase,
            fx: None,
            fy: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.position().distance(p) <= self.radius
    }
}
