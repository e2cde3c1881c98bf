//! Integration tests for the board: reveals, live streams, resizes, input.

use solari::core::{Board, BoardConfig, BoardMode, LayoutStrategy, ScriptedStream};
use solari::types::{CharacterSet, Direction, PointerInput, TICK_MS};

fn settled(seed: u32, width: f32, height: f32) -> Board {
    let mut board = Board::new(BoardConfig::default().with_seed(seed), width, height);
    board.run_until_idle();
    board
}

fn tile_center(board: &Board, slot: usize) -> (f32, f32) {
    let rect = board.tile_rects()[slot];
    (rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)
}

#[test]
fn same_seed_same_board() {
    let a = settled(99, 1400.0, 900.0);
    let b = settled(99, 1400.0, 900.0);
    assert_eq!(a.snapshot(), b.snapshot());

    let c = settled(100, 1400.0, 900.0);
    assert_ne!(a.snapshot().rows_text(), c.snapshot().rows_text());
}

#[test]
fn cascade_reveal_settles_on_drawable_glyphs() {
    let board = settled(5, 1400.0, 900.0);
    let snap = board.snapshot();
    assert!(snap.settled());
    assert!(board.is_idle());
    assert_eq!(board.pending_timers(), 0);
    assert_eq!(snap.tiles.len(), 44);
    for tile in &snap.tiles {
        assert!(CharacterSet::STANDARD.index_of(tile.current).is_some());
    }
}

fn glyphs(board: &Board) -> Vec<char> {
    board.snapshot().tiles.iter().map(|t| t.current).collect()
}

fn flip_seqs(board: &Board) -> Vec<u64> {
    board.tiles().iter().map(|t| t.flip_seq()).collect()
}

#[test]
fn reveal_starts_each_slot_exactly_at_its_stagger() {
    let config = BoardConfig::default().with_seed(3);
    let stagger = config.stagger_ms;
    assert!(stagger > 0);

    // Same seed, so this board shows which slots the reveal actually changes.
    let mut reference = Board::new(config, 1400.0, 900.0);
    let before = glyphs(&reference);
    reference.run_until_idle();
    let after = glyphs(&reference);
    let changed: Vec<usize> = (1..after.len())
        .filter(|&i| after[i] != before[i])
        .take(4)
        .collect();
    assert!(!changed.is_empty());

    for slot in changed {
        let mut board = Board::new(config, 1400.0, 900.0);
        let due = slot as u32 * stagger;
        board.tick(due - 1);
        assert_eq!(board.tile(slot).unwrap().flip_seq(), 0, "slot {slot} started early");
        board.tick(1);
        let tile = board.tile(slot).unwrap();
        assert!(tile.flip_seq() > 0, "slot {slot} did not start at {due}ms");
        assert!(tile.is_flipping());
    }
}

#[test]
fn entering_live_mode_blanks_tiles_on_the_stagger() {
    let mut board = settled(21, 1400.0, 900.0);
    let stagger = board.config().stagger_ms;
    let before = glyphs(&board);
    let slot = (1..before.len())
        .find(|&i| before[i] != ' ')
        .expect("a settled word board has visible glyphs");

    let mut stream = ScriptedStream::default();
    assert!(board.enter_live_stream(&mut stream));
    let seqs = flip_seqs(&board);

    board.tick(slot as u32 * stagger - 1);
    assert_eq!(board.tile(slot).unwrap().flip_seq(), seqs[slot]);
    board.tick(1);
    assert!(board.tile(slot).unwrap().flip_seq() > seqs[slot]);

    board.run_until_idle();
    assert!(glyphs(&board).iter().all(|&c| c == ' '));
}

#[test]
fn live_update_starts_changed_slots_on_the_stagger() {
    let mut board = settled(21, 1400.0, 900.0);
    let stagger = board.config().stagger_ms;
    let mut stream = ScriptedStream::default();
    assert!(board.enter_live_stream(&mut stream));
    board.apply_stream_text("HELLO");
    board.run_until_idle();

    let seqs = flip_seqs(&board);
    assert_eq!(board.apply_stream_text("HELPO"), 1);
    board.tick(3 * stagger - 1);
    assert_eq!(flip_seqs(&board), seqs);

    board.tick(1);
    let now = flip_seqs(&board);
    assert!(now[3] > seqs[3]);
    for (slot, (a, b)) in now.iter().zip(&seqs).enumerate() {
        if slot != 3 {
            assert_eq!(a, b, "slot {slot} flipped without a change");
        }
    }

    board.run_until_idle();
    assert!(board.snapshot().rows_text().concat().starts_with("HELPO"));
}

#[test]
fn ticking_in_frames_matches_running_to_idle() {
    let mut framed = Board::new(BoardConfig::default().with_seed(11), 700.0, 500.0);
    for _ in 0..2_000 {
        framed.tick(TICK_MS);
        if framed.is_idle() {
            break;
        }
    }
    let direct = settled(11, 700.0, 500.0);
    assert!(framed.is_idle());
    assert_eq!(framed.snapshot().rows_text(), direct.snapshot().rows_text());
}

#[test]
fn cycling_strategy_reveals_destinations() {
    let mut board = settled(8, 1400.0, 900.0);
    assert_eq!(board.cycle_strategy(), LayoutStrategy::Destinations);
    board.run_until_idle();

    // Sparse lines leave most rows blank.
    let rows = board.snapshot().rows_text();
    let blank_rows = rows.iter().filter(|r| r.trim().is_empty()).count();
    assert!(blank_rows >= 1, "rows: {rows:?}");
    assert_eq!(board.cycle_strategy(), LayoutStrategy::Words);
}

#[test]
fn flick_lands_on_the_expected_glyph() {
    let mut board = settled(21, 700.0, 500.0);
    let start = board.tile(2).unwrap().current_index();
    assert!(board.flick(2, Direction::Backward, 40));
    board.run_until_idle();
    let expected = CharacterSet::STANDARD.wrap(start as i64 - 40);
    assert_eq!(board.tile(2).unwrap().current_index(), expected);
    assert!(!board.flick(2, Direction::Forward, 0));
    assert!(!board.flick(10_000, Direction::Forward, 1));
}

#[test]
fn flip_to_converges_from_any_glyph() {
    let mut board = settled(4, 700.0, 500.0);
    for target in ['Z', '7', ' ', 'a', '-'] {
        board.flip_to(0, target);
        board.run_until_idle();
        assert_eq!(
            board.tile(0).unwrap().current_char(),
            target.to_ascii_uppercase()
        );
    }
}

#[test]
fn live_stream_diff_only_touches_changed_positions() {
    let mut board = settled(6, 1400.0, 900.0);
    let mut stream = ScriptedStream::new(["HELLO WORLD"]);
    assert!(board.enter_live_stream(&mut stream));
    assert_eq!(board.mode(), BoardMode::LiveStream);

    assert!(board.poll_stream(&mut stream));
    board.run_until_idle();
    assert!(board.snapshot().rows_text().concat().starts_with("HELLO WORLD"));

    assert_eq!(board.apply_stream_text("HELLO WORLD"), 0);
    assert_eq!(board.apply_stream_text("HELLO WORMS"), 2);
    board.run_until_idle();
    assert!(board.snapshot().rows_text().concat().starts_with("HELLO WORMS"));
    assert_eq!(board.transcript(), "HELLO WORMS");

    board.exit_live_stream(&mut stream);
    assert!(!stream.is_running());
    assert_eq!(board.mode(), BoardMode::Cascade);
}

#[test]
fn live_mode_ignores_pointer_input() {
    let mut board = settled(6, 700.0, 500.0);
    let mut stream = ScriptedStream::default();
    board.enter_live_stream(&mut stream);
    board.run_until_idle();

    let (x, y) = tile_center(&board, 0);
    assert!(!board.handle_pointer(PointerInput::Down { x, y, t_ms: 0 }));
    assert!(!board.handle_pointer(PointerInput::Up { x, y, t_ms: 5 }));
    assert!(!board.tile(0).unwrap().is_inverted());
}

#[test]
fn tap_toggles_polarity() {
    let mut board = settled(2, 700.0, 500.0);
    let (x, y) = tile_center(&board, 1);
    assert!(board.handle_pointer(PointerInput::Down { x, y, t_ms: 100 }));
    assert!(board.handle_pointer(PointerInput::Up {
        x,
        y: y + 4.0,
        t_ms: 150
    }));
    assert!(board.tile(1).unwrap().is_inverted());
    assert!(!board.tile(1).unwrap().is_flipping());
}

#[test]
fn upward_swipe_flicks_forward() {
    let mut board = settled(2, 700.0, 500.0);
    let start = board.tile(0).unwrap().current_index();
    let (x, y) = tile_center(&board, 0);
    board.handle_pointer(PointerInput::Down { x, y, t_ms: 0 });
    // 30 units in 10ms: velocity 3/ms, six steps per unit velocity.
    board.handle_pointer(PointerInput::Up {
        x,
        y: y - 30.0,
        t_ms: 10,
    });
    board.run_until_idle();
    let expected = CharacterSet::STANDARD.wrap(start as i64 + 15);
    assert_eq!(board.tile(0).unwrap().current_index(), expected);
}

#[test]
fn wheel_flips_tile_under_pointer() {
    let mut board = settled(2, 700.0, 500.0);
    let start = board.tile(3).unwrap().current_index();
    let (x, y) = tile_center(&board, 3);
    assert!(board.handle_pointer(PointerInput::Wheel { x, y, delta: 120.0 }));
    board.run_until_idle();
    let expected = CharacterSet::STANDARD.wrap(start as i64 + 3);
    assert_eq!(board.tile(3).unwrap().current_index(), expected);

    assert!(!board.handle_pointer(PointerInput::Wheel {
        x: -5.0,
        y: -5.0,
        delta: 40.0
    }));
}

#[test]
fn resize_to_smaller_grid_cancels_removed_tiles() {
    let mut board = Board::new(BoardConfig::default().with_seed(1), 1400.0, 900.0);
    board.tick(TICK_MS * 4);
    assert!(board.resize(300.0, 300.0));
    assert_eq!(board.tiles().len(), board.grid().total());
    board.run_until_idle();
    assert!(board.is_idle());
    assert!(board.snapshot().settled());
}

#[test]
fn teardown_leaves_nothing_scheduled() {
    let mut board = Board::new(BoardConfig::default().with_seed(1), 1400.0, 900.0);
    board.flick(0, Direction::Forward, 30);
    board.teardown();
    assert_eq!(board.pending_timers(), 0);
    assert!(board.tiles().iter().all(|t| !t.is_flipping()));
}
