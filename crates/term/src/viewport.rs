//! Terminal-backed viewport source.

use crate::board_view::Viewport;
use crate::core::ViewportSource;
use crate::types::CellScale;

/// Reports the board area of the terminal in viewport units.
///
/// The event loop feeds resize events in with [`TerminalViewport::on_resize`];
/// the board picks them up through [`ViewportSource::poll_resize`].
#[derive(Debug, Clone)]
pub struct TerminalViewport {
    scale: CellScale,
    cells: Viewport,
    resized: bool,
}

impl TerminalViewport {
    pub fn new(scale: CellScale, width: u16, height: u16) -> Self {
        Self {
            scale,
            cells: Viewport::new(width, height),
            resized: false,
        }
    }

    /// Query the current terminal size.
    pub fn detect(scale: CellScale) -> std::io::Result<Self> {
        let (w, h) = crossterm::terminal::size()?;
        Ok(Self::new(scale, w, h))
    }

    /// Whole terminal in cells, status line included.
    pub fn cells(&self) -> Viewport {
        self.cells
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        let next = Viewport::new(width, height);
        if next != self.cells {
            self.cells = next;
            self.resized = true;
        }
    }
}

impl ViewportSource for TerminalViewport {
    fn size(&self) -> (f32, f32) {
        let area = self.cells.board_area();
        self.scale.viewport_size(area.width, area.height)
    }

    fn poll_resize(&mut self) -> Option<(f32, f32)> {
        if std::mem::take(&mut self.resized) {
            Some(self.size())
        } else {
            None
        }
    }
}
