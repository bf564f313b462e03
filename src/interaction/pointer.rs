use rand::Rng;

use super::browser::detail_url;
use super::zoom::ZoomTransform;
use crate::layout::{BubbleEngine, Point};

#[derive(Debug, Clone, PartialEq)]
pub enum PointerAction {
    Idle,
    Open(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Bubble(String),
    Pan,
}

#[derive(Debug, Clone)]
struct Press {
    gesture: Gesture,
    origin: Point,
    last: Point,
    moved: bool,
}

/// Turns raw press/drag/release/move events (in screen coordinates) into
/// pins on the engine, pans on the zoom transform, and click-throughs.
#[derive(Debug, Default)]
pub struct PointerTracker {
    press: Option<Press>,
    hovered: Option<String>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press<R: Rng>(
        &mut self,
        engine: &mut BubbleEngine<R>,
        zoom: &ZoomTransform,
        screen: Point,
    ) {
        let world = zoom.invert(screen);
        let gesture = match engine.hit_test(world).map(|n| n.id.clone()) {
            Some(id) => {
                engine.pin(&id, world);
                Gesture::Bubble(id)
            }
            None => Gesture::Pan,
        };
        self.press = Some(Press {
            gesture,
            origin: screen,
            last: screen,
            moved: false,
        });
    }

    pub fn drag_to<R: Rng>(
        &mut self,
        engine: &mut BubbleEngine<R>,
        zoom: &mut ZoomTransform,
        screen: Point,
    ) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if screen != press.origin {
            press.moved = true;
        }
        match &press.gesture {
            Gesture::Bubble(id) => {
                engine.pin(id, zoom.invert(screen));
            }
            Gesture::Pan => zoom.translate_by(screen.x - press.last.x, screen.y - press.last.y),
        }
        press.last = screen;
    }

    pub fn release<R: Rng>(&mut self, engine: &mut BubbleEngine<R>) -> PointerAction {
        let Some(press) = self.press.take() else {
            return PointerAction::Idle;
        };
        match press.gesture {
            Gesture::Bubble(id) => {
                engine.unpin(&id);
                if press.moved {
                    PointerAction::Idle
                } else {
                    PointerAction::Open(detail_url(&id))
                }
            }
            Gesture::Pan => PointerAction::Idle,
        }
    }

    pub fn hover<R: Rng>(
        &mut self,
        engine: &BubbleEngine<R>,
        zoom: &ZoomTransform,
        screen: Point,
    ) {
        self.hovered = engine.hit_test(zoom.invert(screen)).map(|n| n.id.clone());
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }
}
