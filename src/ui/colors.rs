use ratatui::style::{Color, palette::tailwind};

const LOSS: (u8, u8, u8) = (0xff, 0x00, 0x33);
const FLAT: (u8, u8, u8) = (0xff, 0xd7, 0x00);
const GAIN: (u8, u8, u8) = (0x00, 0xff, 0x88);
const CHANGE_CLAMP: f64 = 20.0;

pub struct BubbleColors {
    pub buffer_bg: Color,
    pub title_fg: Color,
    pub label_fg: Color,
    pub price_fg: Color,
    pub market_cap_fg: Color,
    pub gain_fg: Color,
    pub loss_fg: Color,
    pub no_change: Color,
    pub glow: Color,
    pub sparkle: (u8, u8, u8),
    pub footer_fg: Color,
    pub footer_border_color: Color,
}

impl BubbleColors {
    pub const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            title_fg: color.c300,
            label_fg: Color::White,
            price_fg: tailwind::SLATE.c200,
            market_cap_fg: Color::Rgb(0xf9, 0xe8, 0x8b),
            gain_fg: Color::Rgb(0x00, 0xff, 0x88),
            loss_fg: Color::Rgb(0xff, 0x33, 0x33),
            no_change: Color::Rgb(0x55, 0x55, 0x55),
            glow: Color::Rgb(0xff, 0xfa, 0x9e),
            sparkle: (0xff, 0xf8, 0xb0),
            footer_fg: tailwind::SLATE.c200,
            footer_border_color: color.c400,
        }
    }

    /// Outline color: red through gold to green across a ±20% day.
    pub fn change_color(&self, change: Option<f64>) -> Color {
        let Some(change) = change.filter(|c| c.is_finite()) else {
            return self.no_change;
        };
        let t = change.clamp(-CHANGE_CLAMP, CHANGE_CLAMP) / (2.0 * CHANGE_CLAMP) + 0.5;
        let (from, to, local) = if t < 0.5 {
            (LOSS, FLAT, t * 2.0)
        } else {
            (FLAT, GAIN, (t - 0.5) * 2.0)
        };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * local).round() as u8;
        Color::Rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }

    pub fn change_text_color(&self, change: Option<f64>) -> Color {
        match change {
            Some(c) if c >= 0.0 => self.gain_fg,
            Some(_) => self.loss_fg,
            None => self.no_change,
        }
    }

    /// Sparkle tint faded toward black by `opacity`.
    pub fn sparkle_color(&self, opacity: f64) -> Color {
        let o = opacity.clamp(0.0, 1.0);
        let (r, g, b) = self.sparkle;
        let scale = |c: u8| (c as f64 * o).round() as u8;
        Color::Rgb(scale(r), scale(g), scale(b))
    }
}
