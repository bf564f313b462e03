//! Background sparkles. Purely decorative, drawn in screen space underneath
//! the bubbles and unaffected by zoom.

use rand::Rng;
use std::time::{Duration, Instant};

use crate::config::{
    SPARKLE_COUNT, SPARKLE_INTERVAL_MS, SPARKLE_LIFETIME_JITTER_MS, SPARKLE_MAX_OPACITY,
    SPARKLE_MAX_RADIUS, SPARKLE_MIN_LIFETIME_MS,
};
use crate::layout::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct Sparkle {
    pub position: Point,
    pub radius: f64,
    pub opacity: f64,
    born: Instant,
    lifetime: Duration,
}

impl Sparkle {
    /// Opacity at `now`, fading linearly to zero over the lifetime.
    pub fn opacity_at(&self, now: Instant) -> f64 {
        let age = now.saturating_duration_since(self.born).as_secs_f64();
        let life = self.lifetime.as_secs_f64();
        if life <= 0.0 || age >= life {
            return 0.0;
        }
        self.opacity * (1.0 - age / life)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.born) >= self.lifetime
    }
}

pub fn spawn_sparkles<R: Rng>(
    rng: &mut R,
    width: f64,
    height: f64,
    count: usize,
    now: Instant,
) -> Vec<Sparkle> {
    (0..count)
        .map(|_| Sparkle {
            position: Point::new(
                rng.gen_range(0.0..1.0) * width,
                rng.gen_range(0.0..1.0) * height,
            ),
            radius: rng.gen_range(0.0..1.0) * SPARKLE_MAX_RADIUS,
            opacity: rng.gen_range(0.0..1.0) * SPARKLE_MAX_OPACITY,
            born: now,
            lifetime: Duration::from_millis(
                SPARKLE_MIN_LIFETIME_MS + rng.gen_range(0..SPARKLE_LIFETIME_JITTER_MS),
            ),
        })
        .collect()
}

/// Live sparkles plus the regeneration timer.
pub struct SparkleField {
    sparkles: Vec<Sparkle>,
    last_spawn: Option<Instant>,
    interval: Duration,
}

impl Default for SparkleField {
    fn default() -> Self {
        Self::new(Duration::from_millis(SPARKLE_INTERVAL_MS))
    }
}

impl SparkleField {
    pub fn new(interval: Duration) -> Self {
        Self {
            sparkles: Vec::new(),
            last_spawn: None,
            interval,
        }
    }

    /// Drop faded sparkles and spawn a new batch when the interval is due.
    pub fn update<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64, now: Instant) {
        self.sparkles.retain(|s| !s.is_expired(now));
        let due = self
            .last_spawn
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.sparkles
                .extend(spawn_sparkles(rng, width, height, SPARKLE_COUNT, now));
            self.last_spawn = Some(now);
        }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }
}
