use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Block, BorderType, Paragraph},
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::config::{FRAME_DURATION_MS, INFO_TEXT, PALETTE, PAN_STEP, ZOOM_STEP};
use crate::data::{Coin, CoinBoard};
use crate::interaction::{PointerAction, PointerTracker, ZoomTransform, open_in_browser};
use crate::layout::BubbleEngine;
use crate::ui::{BubbleColors, Scene, SparkleField, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct BubbleApp {
    engine: BubbleEngine,
    board: CoinBoard,
    zoom: ZoomTransform,
    pointer: PointerTracker,
    sparkles: SparkleField,
    rng: StdRng,
    colors: BubbleColors,
    viewport: Viewport,
    started: Instant,
}

impl BubbleApp {
    pub fn new() -> Self {
        let viewport = Viewport::default();
        let (width, height) = viewport.world_size();
        Self {
            engine: BubbleEngine::new(width, height),
            board: CoinBoard::new(),
            zoom: ZoomTransform::default(),
            pointer: PointerTracker::new(),
            sparkles: SparkleField::default(),
            rng: StdRng::from_entropy(),
            colors: BubbleColors::new(&PALETTE),
            viewport,
            started: Instant::now(),
        }
    }

    fn split(area: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Min(5), Constraint::Length(4)]).areas(area)
    }

    fn canvas_block(&self) -> Block<'static> {
        let title = if self.board.is_empty() {
            " Crypto Bubbles - waiting for market data ".to_string()
        } else {
            format!(" Crypto Bubbles - Top {} by Market Cap ", self.board.len())
        };
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.colors.footer_border_color))
            .title(Line::from(title).bold().fg(self.colors.title_fg).centered())
    }

    /// Swap in a new coin list and reseed the layout in the same step, so no
    /// frame mixes nodes from two polls.
    fn replace_coins(&mut self, coins: Vec<Coin>) {
        self.engine.update(&coins);
        self.pointer.clear_hover();
        self.board.replace(coins);
        info!(
            "Coin list replaced: {} coins (generation {})",
            self.board.len(),
            self.board.generation()
        );
    }

    fn sync_viewport(&mut self, inner: Rect) {
        if inner == self.viewport.area() {
            return;
        }
        self.viewport = Viewport::new(inner);
        let (width, height) = self.viewport.world_size();
        self.engine.resize(width, height);
    }

    fn animate(&mut self, now: Instant) {
        let (width, height) = self.viewport.world_size();
        self.sparkles.update(&mut self.rng, width, height, now);
        self.engine.drift(now.saturating_duration_since(self.started));
        self.engine.tick();
    }

    fn handle_key(&mut self, code: KeyCode) -> Flow {
        let center = self.viewport.center();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom.scale_by(ZOOM_STEP, center),
            KeyCode::Char('-') => self.zoom.scale_by(1.0 / ZOOM_STEP, center),
            KeyCode::Char('0') => self.zoom.reset(),
            KeyCode::Char('h') | KeyCode::Left => self.zoom.translate_by(PAN_STEP, 0.0),
            KeyCode::Char('l') | KeyCode::Right => self.zoom.translate_by(-PAN_STEP, 0.0),
            KeyCode::Char('k') | KeyCode::Up => self.zoom.translate_by(0.0, PAN_STEP),
            KeyCode::Char('j') | KeyCode::Down => self.zoom.translate_by(0.0, -PAN_STEP),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let inside = self.viewport.contains(mouse.column, mouse.row);
        let screen = self.viewport.cell_to_screen(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.pointer.press(&mut self.engine, &self.zoom, screen)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer.drag_to(&mut self.engine, &mut self.zoom, screen)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let PointerAction::Open(url) = self.pointer.release(&mut self.engine) {
                    match open_in_browser(&url) {
                        Ok(()) => info!("Opened {}", url),
                        Err(e) => warn!("Failed to open {}: {}", url, e),
                    }
                }
            }
            MouseEventKind::Moved if inside => {
                self.pointer.hover(&self.engine, &self.zoom, screen)
            }
            MouseEventKind::Moved => self.pointer.clear_hover(),
            MouseEventKind::ScrollUp if inside => self.zoom.scale_by(ZOOM_STEP, screen),
            MouseEventKind::ScrollDown if inside => self.zoom.scale_by(1.0 / ZOOM_STEP, screen),
            _ => {}
        }
    }

    pub fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut rx: mpsc::UnboundedReceiver<Vec<Coin>>,
    ) -> Result<()> {
        let size = terminal.size()?;
        let [canvas_area, _] = Self::split(Rect::new(0, 0, size.width, size.height));
        self.sync_viewport(self.canvas_block().inner(canvas_area));

        loop {
            // Only the newest list matters if several polls queued up.
            let mut latest = None;
            while let Ok(coins) = rx.try_recv() {
                latest = Some(coins);
            }
            if let Some(coins) = latest {
                self.replace_coins(coins);
            }

            self.animate(Instant::now());
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(FRAME_DURATION_MS))? {
                // Drain ALL events, not just one
                while event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            if self.handle_key(key.code) == Flow::Quit {
                                self.engine.stop();
                                return Ok(());
                            }
                        }
                        Event::Mouse(mouse) => self.handle_mouse(mouse),
                        // Picked up by the next draw.
                        Event::Resize(_, _) => {}
                        _ => {}
                    }
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [canvas_area, footer_area] = Self::split(frame.area());
        let block = self.canvas_block();
        self.sync_viewport(block.inner(canvas_area));

        let scene = Scene {
            nodes: self.engine.nodes(),
            coins: self.board.coins(),
            zoom: self.zoom,
            hovered: self.pointer.hovered(),
            sparkles: self.sparkles.sparkles(),
            now: Instant::now(),
            colors: &self.colors,
            size: self.viewport.world_size(),
        };
        scene.render(frame, canvas_area, block);
        self.render_footer(frame, footer_area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let updated = self
            .board
            .updated_at()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        let status = format!(
            "{} coins | last update {} | zoom {:.0}%",
            self.board.len(),
            updated,
            self.zoom.scale() * 100.0
        );
        let text = Text::from(vec![
            Line::from(format!("{} | {}", INFO_TEXT[0], INFO_TEXT[1])),
            Line::from(status),
        ]);
        let info_footer = Paragraph::new(text)
            .style(
                Style::new()
                    .fg(self.colors.footer_fg)
                    .bg(self.colors.buffer_bg),
            )
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .border_style(Style::new().fg(self.colors.footer_border_color)),
            );
        frame.render_widget(info_footer, area);
    }
}

impl Default for BubbleApp {
    fn default() -> Self {
        Self::new()
    }
}
