//! Mouse mapping from terminal events to board pointer input.
//!
//! Terminals report mouse positions in cells; the board works in
//! pixel-equivalent viewport units, so every position is scaled by a
//! [`CellScale`] on the way in.

use arrayvec::ArrayVec;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{CellScale, PointerInput, WHEEL_UNIT};

/// Tracks the primary button so drags and releases stay paired with a press.
#[derive(Debug, Clone)]
pub struct PointerMapper {
    scale: CellScale,
    pressed: bool,
}

impl PointerMapper {
    pub fn new(scale: CellScale) -> Self {
        Self {
            scale,
            pressed: false,
        }
    }

    pub fn scale(&self) -> CellScale {
        self.scale
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Translate one mouse event.
    ///
    /// Some terminals drop the press when it lands during a redraw, so a drag
    /// without a press synthesizes the missing `Down` first.
    pub fn map(&mut self, event: MouseEvent, t_ms: u64) -> ArrayVec<PointerInput, 2> {
        let mut out = ArrayVec::new();
        let (x, y) = self.scale.to_viewport(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = true;
                out.push(PointerInput::Down { x, y, t_ms });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.pressed {
                    self.pressed = true;
                    out.push(PointerInput::Down { x, y, t_ms });
                }
                out.push(PointerInput::Move { x, y, t_ms });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.pressed {
                    self.pressed = false;
                    out.push(PointerInput::Up { x, y, t_ms });
                }
            }
            // Scrolling down reads as "next glyph", matching a wheel's positive delta.
            MouseEventKind::ScrollDown => out.push(PointerInput::Wheel {
                x,
                y,
                delta: WHEEL_UNIT,
            }),
            MouseEventKind::ScrollUp => out.push(PointerInput::Wheel {
                x,
                y,
                delta: -WHEEL_UNIT,
            }),
            _ => {}
        }
        out
    }
}

impl Default for PointerMapper {
    fn default() -> Self {
        Self::new(CellScale::default())
    }
}
