//! BoardView: maps a `BoardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each tile is drawn as two stacked halves split by a hinge. The upper half
//! shows the glyph the tile is turning to; the lower half keeps the old glyph
//! until the falling flap lands, like a physical split-flap module.

use crate::core::{BoardSnapshot, GridPlan, TileSnapshot};
use crate::fb::{CellRect, CellStyle, FrameBuffer, Rgb};
use crate::types::{CellScale, Rect};

/// Rows reserved under the board for the status line.
pub const STATUS_ROWS: u16 = 1;

/// Terminal viewport dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The part of the viewport the board may use.
    pub fn board_area(&self) -> Viewport {
        Viewport::new(self.width, self.height.saturating_sub(STATUS_ROWS))
    }
}

/// Text shown on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView<'a> {
    pub strategy: &'a str,
    pub live: bool,
    pub live_available: bool,
    /// Short transient message (feed address, errors).
    pub note: Option<&'a str>,
}

/// Colors used by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub upper: Rgb,
    pub lower: Rgb,
    pub flap: Rgb,
    pub glyph: Rgb,
    pub hinge: Rgb,
    pub status_fg: Rgb,
    pub status_bg: Rgb,
    pub live: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::new(14, 14, 16),
            upper: Rgb::new(42, 42, 46),
            lower: Rgb::new(32, 32, 36),
            flap: Rgb::new(58, 58, 64),
            glyph: Rgb::new(238, 232, 212),
            hinge: Rgb::new(10, 10, 12),
            status_fg: Rgb::new(150, 150, 160),
            status_bg: Rgb::new(24, 24, 28),
            live: Rgb::new(230, 80, 70),
        }
    }
}

pub struct BoardView {
    scale: CellScale,
    theme: Theme,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new(CellScale::default())
    }
}

impl BoardView {
    pub fn new(scale: CellScale) -> Self {
        Self {
            scale,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn scale(&self) -> CellScale {
        self.scale
    }

    /// Viewport-unit rectangle to the terminal cells it covers.
    pub fn cell_rect(&self, rect: Rect) -> CellRect {
        let x0 = (rect.x / self.scale.width).floor().max(0.0) as u16;
        let y0 = (rect.y / self.scale.height).floor().max(0.0) as u16;
        let x1 = ((rect.x + rect.w) / self.scale.width).floor().max(0.0) as u16;
        let y1 = ((rect.y + rect.h) / self.scale.height).floor().max(0.0) as u16;
        CellRect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// Allocation-free once the framebuffer has reached the viewport size.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        plan: &GridPlan,
        status: Option<&StatusView<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(self.theme.glyph, self.theme.background).cell(' '));

        let cols = snap.grid.cols as usize;
        let (cell_w, cell_h) = (plan.cell_width(), plan.cell_height());
        for (i, tile) in snap.tiles.iter().enumerate() {
            let (row, col) = (i / cols.max(1), i % cols.max(1));
            let rect = Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h);
            self.draw_tile(fb, self.cell_rect(rect), tile);
        }

        if let Some(status) = status {
            self.draw_status(fb, viewport, status);
        }
    }

    pub fn render(
        &self,
        snap: &BoardSnapshot,
        plan: &GridPlan,
        status: Option<&StatusView<'_>>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, plan, status, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, cell: CellRect, tile: &TileSnapshot) {
        // Leave a one-cell gutter between tiles when there is room.
        let body = CellRect::new(
            cell.x,
            cell.y,
            if cell.w >= 3 { cell.w - 1 } else { cell.w },
            if cell.h >= 3 { cell.h - 1 } else { cell.h },
        );
        if body.is_empty() {
            return;
        }

        let mut upper = CellStyle::new(self.theme.glyph, self.theme.upper).bold();
        let mut lower = CellStyle::new(self.theme.glyph, self.theme.lower).bold();
        if tile.flipping {
            upper.bg = self.theme.flap;
        }
        if tile.fast {
            upper = upper.dim();
        }
        if tile.inverted {
            upper = upper.inverted();
            lower = lower.inverted();
        }

        if body.h == 1 {
            fb.fill(body, upper.cell(' '));
            put_glyph(fb, body, body.y, tile.current, upper);
            return;
        }

        let split = body.y + body.h / 2;
        fb.fill(
            CellRect::new(body.x, body.y, body.w, split - body.y),
            upper.cell(' '),
        );
        fb.fill(
            CellRect::new(body.x, split, body.w, body.bottom() - split),
            lower.cell(' '),
        );
        put_glyph(fb, body, split - 1, tile.current, upper);
        put_glyph(fb, body, split, tile.lower(), lower);

        // Hinge pins at both edges of the split.
        if body.w >= 4 {
            let pin = CellStyle::new(self.theme.hinge, lower.bg).cell('▪');
            fb.set(body.x, split, pin);
            fb.set(body.right() - 1, split, pin);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, viewport: Viewport, status: &StatusView<'_>) {
        if viewport.height == 0 {
            return;
        }
        let y = viewport.height - 1;
        let base = CellStyle::new(self.theme.status_fg, self.theme.status_bg);
        fb.fill(CellRect::new(0, y, viewport.width, 1), base.cell(' '));

        let mut x = 1;
        fb.put_str(x, y, "SOLARI", base.bold());
        x += 8;
        let mode = if status.live { "LIVE" } else { status.strategy };
        let mode_style = if status.live {
            CellStyle::new(self.theme.live, self.theme.status_bg).bold()
        } else {
            base
        };
        for (i, ch) in mode.chars().enumerate() {
            fb.set(x + i as u16, y, mode_style.cell(ch.to_ascii_uppercase()));
        }
        x += mode.len() as u16 + 3;

        let help = if status.live_available {
            "r shuffle  t layout  l live  q quit"
        } else {
            "r shuffle  t layout  q quit"
        };
        fb.put_str(x, y, help, base.dim());
        x += help.len() as u16 + 3;

        if let Some(note) = status.note {
            fb.put_str(x, y, note, base);
        }
    }
}

fn put_glyph(fb: &mut FrameBuffer, body: CellRect, y: u16, ch: char, style: CellStyle) {
    fb.set(body.x + (body.w - 1) / 2, y, style.cell(ch));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardConfig};

    fn settled_board() -> Board {
        let mut board = Board::new(BoardConfig::default().with_seed(3), 640.0, 368.0);
        board.run_until_idle();
        board
    }

    #[test]
    fn cell_rect_scales_viewport_units() {
        let view = BoardView::default();
        let rect = view.cell_rect(Rect::new(80.0, 160.0, 96.0, 176.0));
        assert_eq!(rect, CellRect::new(10, 10, 12, 11));
    }

    #[test]
    fn settled_tile_shows_its_glyph_on_both_halves() {
        let board = settled_board();
        let snap = board.snapshot();
        let view = BoardView::default();
        let fb = view.render(&snap, board.plan(), None, Viewport::new(80, 24));

        let first = snap.tiles[0].current;
        let rect = view.cell_rect(Rect::new(
            0.0,
            0.0,
            board.plan().cell_width(),
            board.plan().cell_height(),
        ));
        let body_h = rect.h - 1;
        let split = rect.y + body_h / 2;
        let upper_row: String = fb.row(split - 1).iter().map(|c| c.ch).collect();
        let lower_row: String = fb.row(split).iter().map(|c| c.ch).collect();
        if first != ' ' {
            assert!(upper_row.contains(first));
            assert!(lower_row.contains(first));
        }
    }

    #[test]
    fn status_line_occupies_the_last_row() {
        let board = settled_board();
        let snap = board.snapshot();
        let status = StatusView {
            strategy: "words",
            live: false,
            live_available: true,
            note: Some("feed 127.0.0.1:7878"),
        };
        let fb = BoardView::default().render(&snap, board.plan(), Some(&status), Viewport::new(80, 24));
        let last: String = fb.row(23).iter().map(|c| c.ch).collect();
        assert!(last.contains("SOLARI"));
        assert!(last.contains("WORDS"));
        assert!(last.contains("l live"));
        assert!(last.contains("7878"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let board = settled_board();
        let snap = board.snapshot();
        let view = BoardView::default();
        for (w, h) in [(0, 0), (1, 1), (3, 2), (10, 3)] {
            let fb = view.render(&snap, board.plan(), None, Viewport::new(w, h));
            assert_eq!(fb.size(), (w, h));
        }
    }

    #[test]
    fn board_area_reserves_the_status_row() {
        assert_eq!(Viewport::new(80, 24).board_area(), Viewport::new(80, 23));
        assert_eq!(Viewport::new(80, 0).board_area(), Viewport::new(80, 0));
    }
}
