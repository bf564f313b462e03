use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{
        Block,
        canvas::{Canvas, Circle},
    },
};
use std::time::Instant;

use crate::config::{CELL_HEIGHT, CELL_WIDTH, HOVER_SCALE};
use crate::data::Coin;
use crate::interaction::ZoomTransform;
use crate::layout::LayoutNode;
use crate::ui::colors::BubbleColors;
use crate::ui::format::{format_change, format_market_cap, format_price};
use crate::ui::sparkle::Sparkle;

// Share of the diameter usable for text.
const LABEL_FILL: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLine {
    pub text: String,
    pub color: Color,
    pub bold: bool,
}

/// Symbol, price, change and market cap, as many as fit in a bubble of
/// rendered radius `radius`.
pub fn label_lines(coin: &Coin, radius: f64, colors: &BubbleColors) -> Vec<LabelLine> {
    let span = 2.0 * radius * LABEL_FILL;
    let max_rows = (span / CELL_HEIGHT).floor() as usize;
    let max_chars = (span / CELL_WIDTH).floor() as usize;

    let candidates = [
        LabelLine {
            text: coin.symbol.to_uppercase(),
            color: colors.label_fg,
            bold: true,
        },
        LabelLine {
            text: format_price(coin.current_price),
            color: colors.price_fg,
            bold: false,
        },
        LabelLine {
            text: format_change(coin.price_change_percentage_24h),
            color: colors.change_text_color(coin.price_change_percentage_24h),
            bold: false,
        },
        LabelLine {
            text: format!("MC: {}", format_market_cap(coin.market_cap)),
            color: colors.market_cap_fg,
            bold: false,
        },
    ];

    candidates
        .into_iter()
        .take(max_rows.max(1))
        .take_while(|line| line.text.chars().count() <= max_chars)
        .collect()
}

/// Everything one frame of the bubble canvas needs.
pub struct Scene<'a> {
    pub nodes: &'a [LayoutNode],
    pub coins: &'a [Coin],
    pub zoom: ZoomTransform,
    pub hovered: Option<&'a str>,
    pub sparkles: &'a [Sparkle],
    pub now: Instant,
    pub colors: &'a BubbleColors,
    pub size: (f64, f64),
}

impl Scene<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, block: Block) {
        let (width, height) = self.size;
        let colors = self.colors;

        let canvas = Canvas::default()
            .block(block)
            .background_color(colors.buffer_bg)
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                // Canvas y grows upward, screen y grows downward.
                for sparkle in self.sparkles {
                    let opacity = sparkle.opacity_at(self.now);
                    if opacity <= 0.0 {
                        continue;
                    }
                    ctx.draw(&Circle {
                        x: sparkle.position.x,
                        y: height - sparkle.position.y,
                        radius: sparkle.radius,
                        color: colors.sparkle_color(opacity),
                    });
                }
                ctx.layer();

                for (node, coin) in self.nodes.iter().zip(self.coins) {
                    let center = self.zoom.apply(node.position());
                    let radius = self.zoom.apply_length(node.radius);
                    let hovered = self.hovered == Some(node.id.as_str());
                    let outline = colors.change_color(coin.price_change_percentage_24h);

                    ctx.draw(&Circle {
                        x: center.x,
                        y: height - center.y,
                        radius,
                        color: outline,
                    });
                    if hovered {
                        ctx.draw(&Circle {
                            x: center.x,
                            y: height - center.y,
                            radius: radius * HOVER_SCALE,
                            color: colors.glow,
                        });
                    }

                    let lines = label_lines(coin, radius, colors);
                    let mid = (lines.len() as f64 - 1.0) / 2.0;
                    for (i, line) in lines.into_iter().enumerate() {
                        let text_width = line.text.chars().count() as f64 * CELL_WIDTH;
                        let x = center.x - text_width / 2.0;
                        let y = center.y + (i as f64 - mid) * CELL_HEIGHT;
                        let fg = if hovered { colors.glow } else { line.color };
                        let mut style = Style::default().fg(fg);
                        if line.bold {
                            style = style.bold();
                        }
                        ctx.print(x, height - y, Line::styled(line.text, style));
                    }
                }
            });

        frame.render_widget(canvas, area);
    }
}
