//! Board module - owns the tiles and drives them
//!
//! The board holds one [`Tile`] per grid cell and a single timer queue shared
//! by all of them. It has two modes:
//!
//! - **Cascade**: on every (re)layout a target character array is computed
//!   from the active [`LayoutStrategy`] and tile `i` is sent there after
//!   `i * stagger` milliseconds, so the reveal sweeps across the board.
//! - **Live stream**: an external transcript is diffed against the previously
//!   observed text and only changed positions are flipped, with the same
//!   stagger. Manual input is disabled while the stream drives the board.
//!
//! Call [`Board::tick`] every frame with the elapsed time.

use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::grid::GridPlan;
use crate::rng::SimpleRng;
use crate::scheduler::{Scheduler, TimerQueue};
use crate::snapshot::BoardSnapshot;
use crate::stream::TextStreamSource;
use crate::text_layout::LayoutStrategy;
use crate::tile::Tile;
use crate::types::{Direction, Grid, PointerInput, Rect, BLANK};

/// Timer payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardEvent {
    /// The flip step in flight on `slot` has finished.
    FlipElapsed { slot: usize },
    /// Staggered `flip_to(glyph)` for `slot`.
    Reveal { slot: usize, glyph: char },
}

impl BoardEvent {
    pub fn slot(&self) -> usize {
        match *self {
            BoardEvent::FlipElapsed { slot } | BoardEvent::Reveal { slot, .. } => slot,
        }
    }

    pub fn is_reveal(&self) -> bool {
        matches!(self, BoardEvent::Reveal { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoardMode {
    #[default]
    Cascade,
    LiveStream,
}

#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    plan: GridPlan,
    tiles: Vec<Tile>,
    timers: TimerQueue<BoardEvent>,
    rng: SimpleRng,
    mode: BoardMode,
    strategy: LayoutStrategy,
    /// Live mode: the glyph last requested for each position.
    observed: Vec<char>,
    transcript: String,
    /// Tile that owns the current pointer interaction.
    captured: Option<usize>,
}

impl Board {
    /// Build a board for the viewport and start the first cascade reveal.
    pub fn new(config: BoardConfig, width: f32, height: f32) -> Self {
        let plan = config.planner.plan(width, height);
        let mut board = Self {
            config,
            plan,
            tiles: Vec::with_capacity(plan.grid.total()),
            timers: TimerQueue::new(),
            rng: SimpleRng::new(config.seed),
            mode: BoardMode::Cascade,
            strategy: config.strategy,
            observed: Vec::new(),
            transcript: String::new(),
            captured: None,
        };
        board.resize_tiles(plan.grid.total());
        board.reveal();
        board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.plan.grid
    }

    pub fn plan(&self) -> &GridPlan {
        &self.plan
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// True when nothing is scheduled: no flips in flight, no reveals pending.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn tile_rects(&self) -> Vec<Rect> {
        self.plan.tile_rects()
    }

    /// Re-plan for a new viewport. Returns true if the grid changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let plan = self.config.planner.plan(width, height);
        let changed = plan.grid != self.plan.grid;
        self.plan = plan;
        if !changed {
            return false;
        }

        debug!(
            cols = plan.grid.cols,
            rows = plan.grid.rows,
            "board resized"
        );
        self.resize_tiles(plan.grid.total());
        match self.mode {
            BoardMode::Cascade => self.reveal(),
            BoardMode::LiveStream => self.replay_transcript(),
        }
        true
    }

    fn resize_tiles(&mut self, total: usize) {
        if total < self.tiles.len() {
            for mut tile in self.tiles.drain(total..) {
                tile.teardown(&mut self.timers);
            }
            self.timers.cancel_where(|e| e.slot() >= total);
            if self.captured.is_some_and(|slot| slot >= total) {
                self.captured = None;
            }
        }

        let charset = self.config.charset;
        let disabled = self.mode == BoardMode::LiveStream;
        for slot in self.tiles.len()..total {
            let start = self.rng.next_range(charset.len() as u32) as usize;
            let mut tile = Tile::new(slot, charset, self.config.timing, start);
            tile.set_disabled(disabled);
            self.tiles.push(tile);
        }
        self.observed.resize(total, BLANK);
    }

    /// Cascade reveal of fresh content from the active strategy.
    pub fn reveal(&mut self) {
        self.timers.cancel_where(BoardEvent::is_reveal);
        let targets = self.strategy.layout(self.plan.grid, &mut self.rng);
        debug!(strategy = self.strategy.as_str(), "cascade reveal");
        self.schedule_targets(targets.iter().copied().enumerate());
    }

    /// New content with the same strategy. Ignored in live mode.
    pub fn reshuffle(&mut self) {
        if self.mode == BoardMode::Cascade {
            self.reveal();
        }
    }

    pub fn cycle_strategy(&mut self) -> LayoutStrategy {
        self.strategy = self.strategy.next();
        info!(strategy = self.strategy.as_str(), "layout strategy changed");
        if self.mode == BoardMode::Cascade {
            self.reveal();
        }
        self.strategy
    }

    fn schedule_targets(&mut self, targets: impl Iterator<Item = (usize, char)>) {
        let stagger = self.config.stagger_ms;
        for (slot, glyph) in targets {
            let delay = (slot as u32).saturating_mul(stagger);
            self.timers
                .schedule_after(delay, BoardEvent::Reveal { slot, glyph });
        }
    }

    /// Hand the board to a text stream. Returns false if the stream is unsupported.
    pub fn enter_live_stream<S: TextStreamSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if self.mode == BoardMode::LiveStream {
            return true;
        }
        if !source.supported() {
            warn!("text stream unsupported; staying in cascade mode");
            return false;
        }
        source.start();
        self.mode = BoardMode::LiveStream;
        self.captured = None;
        for tile in &mut self.tiles {
            tile.set_disabled(true);
        }

        // Clear to blank before the first transcript lands.
        self.timers.cancel_where(BoardEvent::is_reveal);
        let total = self.tiles.len();
        self.schedule_targets((0..total).map(|slot| (slot, BLANK)));
        self.observed = vec![BLANK; total];
        self.transcript.clear();
        info!("entered live stream mode");
        true
    }

    pub fn exit_live_stream<S: TextStreamSource + ?Sized>(&mut self, source: &mut S) {
        if self.mode != BoardMode::LiveStream {
            return;
        }
        source.stop();
        self.mode = BoardMode::Cascade;
        for tile in &mut self.tiles {
            tile.set_disabled(false);
        }
        info!("left live stream mode");
        self.reveal();
    }

    /// Pull the latest transcript, if any. Returns true if one was applied.
    pub fn poll_stream<S: TextStreamSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if self.mode != BoardMode::LiveStream {
            return false;
        }
        match source.poll() {
            Some(text) => {
                self.apply_stream_text(&text);
                true
            }
            None => false,
        }
    }

    /// Diff a transcript against the previous one and flip changed positions.
    ///
    /// Positions past the end of the text count as blank. Returns the number
    /// of positions scheduled.
    pub fn apply_stream_text(&mut self, text: &str) -> usize {
        if self.mode != BoardMode::LiveStream {
            return 0;
        }
        self.transcript.clear();
        self.transcript.push_str(text);

        let targets = self.stream_targets(text);
        let changed: Vec<(usize, char)> = targets
            .iter()
            .zip(&self.observed)
            .enumerate()
            .filter(|(_, (new, old))| new != old)
            .map(|(slot, (&new, _))| (slot, new))
            .collect();

        self.observed = targets;
        let count = changed.len();
        self.schedule_targets(changed.into_iter());
        count
    }

    /// After a resize in live mode every position is re-sent.
    fn replay_transcript(&mut self) {
        self.timers.cancel_where(BoardEvent::is_reveal);
        let targets = self.stream_targets(&self.transcript);
        self.schedule_targets(targets.iter().copied().enumerate());
        self.observed = targets;
    }

    fn stream_targets(&self, text: &str) -> Vec<char> {
        let mut chars = text.chars().map(|c| c.to_ascii_uppercase());
        (0..self.tiles.len())
            .map(|_| chars.next().unwrap_or(BLANK))
            .collect()
    }

    /// Advance the clock and fire everything due, in due order.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let deadline = self.timers.now_ms() + elapsed_ms as u64;
        while let Some(event) = self.timers.pop_due_by(deadline) {
            self.dispatch(event);
        }
        self.timers.advance_to(deadline);
    }

    /// Fire every scheduled event until nothing is left.
    pub fn run_until_idle(&mut self) {
        while let Some(event) = self.timers.pop_due_by(u64::MAX) {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::FlipElapsed { slot } => {
                if let Some(tile) = self.tiles.get_mut(slot) {
                    tile.on_flip_elapsed(&mut self.timers);
                }
            }
            BoardEvent::Reveal { slot, glyph } => {
                if let Some(tile) = self.tiles.get_mut(slot) {
                    tile.flip_to(glyph, &mut self.timers);
                }
            }
        }
    }

    pub fn flick(&mut self, slot: usize, direction: Direction, count: u32) -> bool {
        match self.tiles.get_mut(slot) {
            Some(tile) => tile.flick(direction, count, &mut self.timers),
            None => false,
        }
    }

    pub fn flip_to(&mut self, slot: usize, glyph: char) -> bool {
        match self.tiles.get_mut(slot) {
            Some(tile) => tile.flip_to(glyph, &mut self.timers),
            None => false,
        }
    }

    /// Route pointer input to the tile under (or captured by) the pointer.
    ///
    /// Returns true if a tile reacted.
    pub fn handle_pointer(&mut self, input: PointerInput) -> bool {
        match input {
            PointerInput::Down { x, y, t_ms } => self.pointer_down(x, y, t_ms),
            PointerInput::Move { y, t_ms, .. } => self.pointer_move(y, t_ms),
            PointerInput::Up { y, t_ms, .. } => self.pointer_up(y, t_ms),
            PointerInput::Wheel { x, y, delta } => self.wheel(x, y, delta),
        }
    }

    fn pointer_down(&mut self, x: f32, y: f32, t_ms: u64) -> bool {
        if self.mode == BoardMode::LiveStream {
            return false;
        }
        let Some(slot) = self.plan.hit_test(x, y) else {
            return false;
        };
        self.captured = Some(slot);
        self.tiles[slot].pointer_down(y, t_ms);
        true
    }

    fn pointer_move(&mut self, y: f32, t_ms: u64) -> bool {
        let Some(slot) = self.captured else {
            return false;
        };
        let height = self.plan.cell_height();
        match self.tiles.get_mut(slot) {
            Some(tile) => tile.pointer_move(y, t_ms, height, &mut self.timers),
            None => false,
        }
    }

    fn pointer_up(&mut self, y: f32, t_ms: u64) -> bool {
        let Some(slot) = self.captured.take() else {
            return false;
        };
        match self.tiles.get_mut(slot) {
            Some(tile) => tile.pointer_up(y, t_ms, &mut self.timers),
            None => false,
        }
    }

    fn wheel(&mut self, x: f32, y: f32, delta: f32) -> bool {
        let Some(slot) = self.plan.hit_test(x, y) else {
            return false;
        };
        self.tiles[slot].wheel(delta, &mut self.timers)
    }

    /// Tear every tile down and drop all pending timers.
    pub fn teardown(&mut self) {
        for tile in &mut self.tiles {
            tile.teardown(&mut self.timers);
        }
        self.timers.clear();
        self.captured = None;
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.grid = self.plan.grid;
        out.live = self.mode == BoardMode::LiveStream;
        out.tiles.clear();
        out.tiles.extend(self.tiles.iter().map(Tile::snapshot));
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut out = BoardSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
