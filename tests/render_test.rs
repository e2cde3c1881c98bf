//! Rendering a live board into the terminal framebuffer.

use solari::core::{Board, BoardConfig, BoardSnapshot};
use solari::term::{collect_dirty_runs, BoardView, FrameBuffer, StatusView, Viewport};
use solari::types::{CellScale, Direction, Rect, TICK_MS};

const TERM: Viewport = Viewport {
    width: 100,
    height: 41,
};

fn board_for_terminal() -> Board {
    let area = TERM.board_area();
    let (w, h) = CellScale::default().viewport_size(area.width, area.height);
    let mut board = Board::new(BoardConfig::default().with_seed(12), w, h);
    board.run_until_idle();
    board
}

fn row_text(fb: &FrameBuffer, y: u16) -> String {
    fb.row(y).iter().map(|c| c.ch).collect()
}

/// Upper and lower glyph rows of a tile.
fn split_rows(view: &BoardView, board: &Board, slot: usize) -> (u16, u16, u16) {
    let rect: Rect = board.tile_rects()[slot];
    let cell = view.cell_rect(rect);
    let body_h = if cell.h >= 3 { cell.h - 1 } else { cell.h };
    let body_w = if cell.w >= 3 { cell.w - 1 } else { cell.w };
    let split = cell.y + body_h / 2;
    let glyph_x = cell.x + (body_w - 1) / 2;
    (split - 1, split, glyph_x)
}

#[test]
fn settled_board_shows_each_glyph_on_both_halves() {
    let board = board_for_terminal();
    let view = BoardView::default();
    let snap = board.snapshot();
    let fb = view.render(&snap, board.plan(), None, TERM);

    for slot in 0..snap.tiles.len() {
        let (upper, lower, x) = split_rows(&view, &board, slot);
        let ch = snap.tiles[slot].current;
        assert_eq!(fb.get(x, upper).map(|c| c.ch), Some(ch));
        assert_eq!(fb.get(x, lower).map(|c| c.ch), Some(ch));
    }
}

#[test]
fn flipping_tile_keeps_old_glyph_on_the_lower_half() {
    let mut board = board_for_terminal();
    let view = BoardView::default();
    let before = board.tile(0).unwrap().current_char();

    board.flick(0, Direction::Forward, 1);
    board.tick(TICK_MS);
    let snap = board.snapshot();
    assert!(snap.tiles[0].flipping);

    let fb = view.render(&snap, board.plan(), None, TERM);
    let (upper, lower, x) = split_rows(&view, &board, 0);
    assert_eq!(fb.get(x, upper).map(|c| c.ch), Some(snap.tiles[0].current));
    assert_eq!(fb.get(x, lower).map(|c| c.ch), Some(before));
    assert_ne!(snap.tiles[0].current, before);
}

#[test]
fn inverted_tile_swaps_colors() {
    let mut board = board_for_terminal();
    let view = BoardView::default();
    let plain = view.render(&board.snapshot(), board.plan(), None, TERM);

    let rect = board.tile_rects()[0];
    let (x, y) = (rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
    board.handle_pointer(solari::types::PointerInput::Down { x, y, t_ms: 0 });
    board.handle_pointer(solari::types::PointerInput::Up { x, y, t_ms: 20 });
    let inverted = view.render(&board.snapshot(), board.plan(), None, TERM);

    let (upper, _, gx) = split_rows(&view, &board, 0);
    let a = plain.get(gx, upper).unwrap().style;
    let b = inverted.get(gx, upper).unwrap().style;
    assert_eq!(a.fg, b.bg);
    assert_eq!(a.bg, b.fg);
}

#[test]
fn status_line_reports_live_mode() {
    let board = board_for_terminal();
    let mut snap = BoardSnapshot::default();
    board.snapshot_into(&mut snap);
    let status = StatusView {
        strategy: board.strategy().as_str(),
        live: true,
        live_available: true,
        note: None,
    };
    let fb = BoardView::default().render(&snap, board.plan(), Some(&status), TERM);
    let last = row_text(&fb, TERM.height - 1);
    assert!(last.contains("LIVE"));
    assert!(!last.contains("WORDS"));
}

#[test]
fn one_flip_dirties_only_its_tile() {
    let mut board = board_for_terminal();
    let view = BoardView::default();
    let before = view.render(&board.snapshot(), board.plan(), None, TERM);

    board.flick(0, Direction::Forward, 1);
    board.tick(TICK_MS);
    let after = view.render(&board.snapshot(), board.plan(), None, TERM);

    let tile = view.cell_rect(board.tile_rects()[0]);
    let mut runs = Vec::new();
    collect_dirty_runs(&before, &after, &mut runs);
    assert!(!runs.is_empty());
    for run in runs {
        assert!(run.y >= tile.y && run.y < tile.y + tile.h, "{run:?}");
        assert!(run.x + run.len <= tile.x + tile.w, "{run:?}");
    }
}
