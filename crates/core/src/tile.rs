//! Tile module - the split-flap state machine
//!
//! A tile is either `Idle` or `Flipping`. Each flip step advances the drum by
//! one glyph and schedules its own completion; when the completion fires the
//! tile either settles or continues with the next queued step at the faster
//! chained duration, producing an accelerating cascade.
//!
//! Flicks that arrive mid-flip never abort the step in flight. They replace
//! the queued count instead: the last flick while pending wins.

use crate::board::BoardEvent;
use crate::gesture::{wheel_steps, GestureAction, GestureTracker};
use crate::scheduler::{Scheduler, TimerId};
use crate::snapshot::TileSnapshot;
use crate::types::{CharacterSet, Direction, CHAIN_FLIP_MS, FLIP_MS};

/// Step durations for fresh and chained flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipTiming {
    pub flip_ms: u32,
    pub chain_flip_ms: u32,
}

impl Default for FlipTiming {
    fn default() -> Self {
        Self {
            flip_ms: FLIP_MS,
            chain_flip_ms: CHAIN_FLIP_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    Idle,
    /// A step is in flight; `timer` fires its completion.
    Flipping { timer: TimerId },
}

#[derive(Debug, Clone)]
pub struct Tile {
    slot: usize,
    charset: CharacterSet,
    timing: FlipTiming,
    current: usize,
    previous: usize,
    state: TileState,
    queued: u32,
    pending_direction: Direction,
    fast: bool,
    inverted: bool,
    /// Blocks direct manipulation; `flip_to` still works.
    disabled: bool,
    flip_seq: u64,
    gesture: GestureTracker,
}

impl Tile {
    pub fn new(slot: usize, charset: CharacterSet, timing: FlipTiming, start_index: usize) -> Self {
        let current = charset.wrap(start_index as i64);
        Self {
            slot,
            charset,
            timing,
            current,
            previous: current,
            state: TileState::Idle,
            queued: 0,
            pending_direction: Direction::Forward,
            fast: false,
            inverted: false,
            disabled: false,
            flip_seq: 0,
            gesture: GestureTracker::new(),
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.state, TileState::Flipping { .. })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn previous_index(&self) -> usize {
        self.previous
    }

    pub fn current_char(&self) -> char {
        self.charset.glyph(self.current)
    }

    pub fn queued(&self) -> u32 {
        self.queued
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn is_fast(&self) -> bool {
        self.fast
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn flip_seq(&self) -> u64 {
        self.flip_seq
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.gesture.cancel();
        }
    }

    /// Rotate `count` glyphs in `direction`.
    ///
    /// Returns false when the request is rejected (zero count, disabled tile).
    pub fn flick<S: Scheduler<BoardEvent>>(
        &mut self,
        direction: Direction,
        count: u32,
        sched: &mut S,
    ) -> bool {
        if self.disabled {
            return false;
        }
        self.request(direction, count, sched)
    }

    /// Rotate forward until `ch` shows. Unknown characters resolve to blank.
    ///
    /// Returns true if any movement was requested.
    pub fn flip_to<S: Scheduler<BoardEvent>>(&mut self, ch: char, sched: &mut S) -> bool {
        let target = self.charset.resolve(ch);
        let distance = self.charset.forward_distance(self.current, target);
        if distance == 0 {
            // Already showing (or landing on) the target: drop leftover steps.
            if self.is_flipping() {
                self.queued = 0;
            }
            return false;
        }
        self.request(Direction::Forward, distance as u32, sched)
    }

    fn request<S: Scheduler<BoardEvent>>(
        &mut self,
        direction: Direction,
        count: u32,
        sched: &mut S,
    ) -> bool {
        if count == 0 {
            return false;
        }
        self.pending_direction = direction;
        match self.state {
            TileState::Flipping { .. } => {
                self.queued = count;
            }
            TileState::Idle => {
                self.queued = count - 1;
                self.step(direction, false, sched);
            }
        }
        true
    }

    fn step<S: Scheduler<BoardEvent>>(&mut self, direction: Direction, chained: bool, sched: &mut S) {
        self.previous = self.current;
        self.current = self.charset.wrap(self.current as i64 + direction.sign());
        self.fast = chained;
        self.flip_seq += 1;

        let duration = if chained {
            self.timing.chain_flip_ms
        } else {
            self.timing.flip_ms
        };
        let timer = sched.schedule_after(duration, BoardEvent::FlipElapsed { slot: self.slot });
        self.state = TileState::Flipping { timer };
    }

    /// Completion of the step in flight.
    pub fn on_flip_elapsed<S: Scheduler<BoardEvent>>(&mut self, sched: &mut S) {
        if !self.is_flipping() {
            return;
        }
        if self.queued > 0 {
            self.queued -= 1;
            self.step(self.pending_direction, true, sched);
        } else {
            self.state = TileState::Idle;
            self.fast = false;
        }
    }

    pub fn pointer_down(&mut self, offset: f32, t_ms: u64) {
        if self.disabled {
            return;
        }
        self.gesture.start(offset, t_ms);
    }

    pub fn pointer_move<S: Scheduler<BoardEvent>>(
        &mut self,
        offset: f32,
        t_ms: u64,
        tile_height: f32,
        sched: &mut S,
    ) -> bool {
        if self.disabled {
            return false;
        }
        let locked = self.is_flipping();
        match self.gesture.drag(offset, t_ms, tile_height, locked) {
            Some(action) => self.apply_gesture(action, sched),
            None => false,
        }
    }

    pub fn pointer_up<S: Scheduler<BoardEvent>>(
        &mut self,
        offset: f32,
        t_ms: u64,
        sched: &mut S,
    ) -> bool {
        if self.disabled {
            self.gesture.cancel();
            return false;
        }
        match self.gesture.end(offset, t_ms) {
            Some(action) => self.apply_gesture(action, sched),
            None => false,
        }
    }

    pub fn wheel<S: Scheduler<BoardEvent>>(&mut self, delta: f32, sched: &mut S) -> bool {
        match wheel_steps(delta) {
            Some((direction, count)) => self.flick(direction, count, sched),
            None => false,
        }
    }

    fn apply_gesture<S: Scheduler<BoardEvent>>(
        &mut self,
        action: GestureAction,
        sched: &mut S,
    ) -> bool {
        match action {
            GestureAction::Flick { direction, count } => self.flick(direction, count, sched),
            GestureAction::ToggleInvert => {
                self.inverted = !self.inverted;
                true
            }
        }
    }

    /// Cancel the pending completion before the tile is dropped.
    pub fn teardown<S: Scheduler<BoardEvent>>(&mut self, sched: &mut S) {
        if let TileState::Flipping { timer } = self.state {
            sched.cancel(timer);
        }
        self.state = TileState::Idle;
        self.queued = 0;
        self.fast = false;
        self.gesture.cancel();
    }

    pub fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            current: self.charset.glyph(self.current),
            previous: self.charset.glyph(self.previous),
            flipping: self.is_flipping(),
            fast: self.fast,
            inverted: self.inverted,
            flip_seq: self.flip_seq,
        }
    }
}
