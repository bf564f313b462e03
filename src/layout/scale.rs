use crate::config::{MAX_RADIUS, MIN_RADIUS};

/// Square-root scale from `[0, domain_max]` onto `[range_min, range_max]`,
/// so a bubble's area grows linearly with its market cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn radius_scale(max_cap: f64) -> Self {
        Self::new(max_cap, MIN_RADIUS, MAX_RADIUS)
    }

    /// Zero, negative, NaN and out-of-domain inputs are clamped into the range.
    pub fn apply(&self, value: f64) -> f64 {
        if !(self.domain_max.is_finite() && self.domain_max > 0.0) || !(value > 0.0) {
            return self.range_min;
        }
        let t = (value / self.domain_max).min(1.0).sqrt();
        self.range_min + (self.range_max - self.range_min) * t
    }
}
