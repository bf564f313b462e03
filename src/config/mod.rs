use ratatui::style::palette::tailwind;

pub const PALETTE: tailwind::Palette = tailwind::AMBER;

pub const INFO_TEXT: [&str; 2] = [
    "(q/Esc) quit | (drag) move bubble / pan | (click) open coin page",
    "(wheel, +/-) zoom | (←/→/↑/↓) pan | (0) reset view",
];

// Markets endpoint query
pub const VS_CURRENCY: &str = "usd";
pub const MARKET_ORDER: &str = "market_cap_desc";
pub const COINS_PER_PAGE: u32 = 60;
pub const MARKET_PAGE: u32 = 1;

// Cadence
pub const FETCH_INTERVAL_SECS: u64 = 30;
pub const FRAME_DURATION_MS: u64 = 33;

// Radius scale
pub const MIN_RADIUS: f64 = 30.0;
pub const MAX_RADIUS: f64 = 120.0;

// Forces
pub const CHARGE_STRENGTH: f64 = 12.0;
pub const CENTER_STRENGTH: f64 = 1.0;
pub const COLLISION_MARGIN: f64 = 3.0;
pub const COLLISION_STRENGTH: f64 = 1.0;
pub const COLLISION_ITERATIONS: usize = 1;
pub const ALPHA_MIN: f64 = 0.001;
pub const ALPHA_DECAY_TICKS: f64 = 300.0;
pub const VELOCITY_DECAY: f64 = 0.4;

// Energy targets
pub const DRAG_ALPHA_TARGET: f64 = 0.3;
pub const RESIZE_ALPHA: f64 = 0.3;
pub const DRIFT_ALPHA: f64 = 0.07;

// Drift
pub const DRIFT_SPEED: f64 = 0.015;
pub const DRIFT_X_SPEED_RATIO: f64 = 0.7;
pub const DRIFT_AMPLITUDE: f64 = 0.15;

// Zoom
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 1.2;
pub const PAN_STEP: f64 = 40.0;

// Sparkles
pub const SPARKLE_COUNT: usize = 80;
pub const SPARKLE_INTERVAL_MS: u64 = 3000;
pub const SPARKLE_MIN_LIFETIME_MS: u64 = 4000;
pub const SPARKLE_LIFETIME_JITTER_MS: u64 = 2000;
pub const SPARKLE_MAX_RADIUS: f64 = 1.5;
pub const SPARKLE_MAX_OPACITY: f64 = 0.5;

pub const HOVER_SCALE: f64 = 1.15;

// One terminal cell in world units. Braille packs 2x4 dots per cell, so a dot is 4x4.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

pub const DEFAULT_WORLD_WIDTH: f64 = 1280.0;
pub const DEFAULT_WORLD_HEIGHT: f64 = 800.0;

pub const LOG_FILE: &str = "/tmp/coin_bubbles.log";
