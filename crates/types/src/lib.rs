//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the board.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (tile logic, terminal rendering, transcript feed).
//!
//! # Glyphs
//!
//! A split-flap tile rotates through a fixed drum of glyphs. The standard drum
//! holds 38 glyphs: blank, `A`-`Z`, `0`-`9` and `-`. Index 0 is always the blank
//! glyph and doubles as the fallback for characters the drum cannot show.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FLIP_MS` | 320 | Duration of a flip that starts a fresh gesture |
//! | `CHAIN_FLIP_MS` | 110 | Duration of each queued follow-up flip |
//! | `STAGGER_MS` | 20 | Per-tile delay of a cascading reveal |
//!
//! # Gesture Constants
//!
//! Distances are in pixel-equivalent units:
//!
//! - `DRAG_STEP_RATIO`: a live drag flips once per quarter tile height
//! - `TAP_THRESHOLD`: releases within 10 units of the press are taps
//! - `FLICK_VELOCITY_GAIN` / `MAX_FLICK_STEPS`: release velocity to step count
//! - `WHEEL_UNIT` / `MAX_WHEEL_STEPS`: wheel delta to step count
//!
//! # Examples
//!
//! ```
//! use solari_types::{CharacterSet, Direction, Grid};
//!
//! let set = CharacterSet::STANDARD;
//! assert_eq!(set.len(), 38);
//! assert_eq!(set.resolve('c'), 3);
//! assert_eq!(set.wrap(-1), 37);
//!
//! assert_eq!(Direction::from_sign(-4.0), Some(Direction::Backward));
//!
//! let grid = Grid::new(5, 2);
//! assert_eq!(grid.total(), 10);
//! assert_eq!(grid.position(7), (1, 2));
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of a flip that starts a fresh gesture.
pub const FLIP_MS: u32 = 320;

/// Duration of a flip that continues an already queued sequence.
pub const CHAIN_FLIP_MS: u32 = 110;

/// Per-tile delay used by cascading reveals and live-stream updates.
pub const STAGGER_MS: u32 = 20;

/// Fraction of the tile height a live drag must cover to flip once.
pub const DRAG_STEP_RATIO: f32 = 0.25;

/// Releases whose total displacement stays within this distance are taps.
pub const TAP_THRESHOLD: f32 = 10.0;

/// Steps per unit of release velocity (distance per millisecond).
pub const FLICK_VELOCITY_GAIN: f32 = 6.0;

/// Upper bound on the steps produced by one flick gesture.
pub const MAX_FLICK_STEPS: u32 = 15;

/// Wheel delta that corresponds to one flip.
pub const WHEEL_UNIT: f32 = 40.0;

/// Upper bound on the steps produced by one wheel event.
pub const MAX_WHEEL_STEPS: u32 = 10;

/// Smallest tile width the planner will choose.
pub const MIN_TILE_WIDTH: f32 = 50.0;

/// Largest tile width the planner will choose.
pub const MAX_TILE_WIDTH: f32 = 120.0;

/// Preferred number of tiles across the viewport before clamping.
pub const TILE_WIDTH_DIVISOR: f32 = 7.0;

/// Tile width divided by tile height (tall portrait, like real Solari boards).
pub const TILE_ASPECT: f32 = 0.55;

/// Neither grid dimension ever drops below this.
pub const MIN_GRID_DIM: u16 = 2;

/// Neither grid dimension ever exceeds this, bounding a board to 65536 tiles.
pub const MAX_GRID_DIM: u16 = 256;

/// Share of the rows the sparse-line layout fills.
pub const SPARSE_ROW_FRACTION: f32 = 0.35;

/// The standard split-flap drum.
pub const STANDARD_GLYPHS: [char; 38] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '-',
];

/// The blank glyph (index 0 of every drum).
pub const BLANK: char = ' ';


/// Ordered, circularly indexable alphabet of drawable glyphs.
///
/// The drum is borrowed from static data so every tile can carry a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSet {
    glyphs: &'static [char],
}

impl CharacterSet {
    /// The 38-glyph drum used by the board.
    pub const STANDARD: CharacterSet = CharacterSet {
        glyphs: &STANDARD_GLYPHS,
    };

    /// Build a drum from static glyphs.
    ///
    /// Returns `None` for an empty slice; index arithmetic needs at least one glyph.
    pub const fn new(glyphs: &'static [char]) -> Option<Self> {
        if glyphs.is_empty() {
            None
        } else {
            Some(Self { glyphs })
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &'static [char] {
        self.glyphs
    }

    /// Map any integer onto `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use solari_types::CharacterSet;
    ///
    /// let set = CharacterSet::STANDARD;
    /// assert_eq!(set.wrap(38), 0);
    /// assert_eq!(set.wrap(-39), 37);
    /// ```
    pub fn wrap(&self, i: i64) -> usize {
        i.rem_euclid(self.glyphs.len() as i64) as usize
    }

    /// Glyph at a (wrapped) index.
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index % self.glyphs.len()]
    }

    /// Case-insensitive lookup.
    pub fn index_of(&self, ch: char) -> Option<usize> {
        let upper = ch.to_ascii_uppercase();
        self.glyphs
            .iter()
            .position(|&g| g == ch || g.to_ascii_uppercase() == upper)
    }

    /// Case-insensitive lookup falling back to the blank glyph.
    pub fn resolve(&self, ch: char) -> usize {
        self.index_of(ch).unwrap_or(0)
    }

    /// Forward steps needed to go from `from` to `to`.
    pub fn forward_distance(&self, from: usize, to: usize) -> usize {
        self.wrap(to as i64 - from as i64)
    }
}

impl Default for CharacterSet {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Rotation direction of the drum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Direction of a signed displacement; `None` for zero or NaN.
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Forward)
        } else if value < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Board dimensions in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    pub cols: u16,
    pub rows: u16,
}

impl Grid {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn total(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// `(row, col)` of a linear index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        let cols = (self.cols as usize).max(1);
        (index / cols, index % cols)
    }

    /// Linear index of `(row, col)`, or `None` when out of range.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows as usize || col >= self.cols as usize {
            return None;
        }
        Some(row * self.cols as usize + col)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(MIN_GRID_DIM, MIN_GRID_DIM)
    }
}

/// Axis-aligned rectangle in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// High-level board actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardAction {
    /// Re-run the cascade reveal with fresh content.
    Reshuffle,
    /// Switch between the word and destination layouts.
    CycleLayout,
    /// Enter or leave live-stream mode.
    ToggleLiveStream,
}

impl BoardAction {
    /// Parse action from string (camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use solari_types::BoardAction;
    ///
    /// assert_eq!(BoardAction::from_str("reshuffle"), Some(BoardAction::Reshuffle));
    /// assert_eq!(BoardAction::from_str("toggleLiveStream"), Some(BoardAction::ToggleLiveStream));
    /// assert_eq!(BoardAction::from_str("spin"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "reshuffle" => Some(BoardAction::Reshuffle),
            "cycleLayout" => Some(BoardAction::CycleLayout),
            "toggleLiveStream" => Some(BoardAction::ToggleLiveStream),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::Reshuffle => "reshuffle",
            BoardAction::CycleLayout => "cycleLayout",
            BoardAction::ToggleLiveStream => "toggleLiveStream",
        }
    }
}

/// Viewport units covered by one terminal cell.
///
/// Gesture thresholds are expressed in pixel-equivalent units; a terminal
/// front end scales cell coordinates by this before handing them to the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub width: f32,
    pub height: f32,
}

impl CellScale {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of a terminal cell in viewport units.
    pub fn to_viewport(&self, column: u16, row: u16) -> (f32, f32) {
        (
            (column as f32 + 0.5) * self.width,
            (row as f32 + 0.5) * self.height,
        )
    }

    /// Viewport size of a `columns x rows` terminal.
    pub fn viewport_size(&self, columns: u16, rows: u16) -> (f32, f32) {
        (columns as f32 * self.width, rows as f32 * self.height)
    }

    /// Terminal cell containing a viewport point.
    pub fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        ((x / self.width).floor() as u16, (y / self.height).floor() as u16)
    }
}

impl Default for CellScale {
    /// Typical monospace cell: twice as tall as wide.
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

/// Pointer input in viewport units, timestamped in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { x: f32, y: f32, t_ms: u64 },
    Move { x: f32, y: f32, t_ms: u64 },
    Up { x: f32, y: f32, t_ms: u64 },
    /// Positive delta rotates forward.
    Wheel { x: f32, y: f32, delta: f32 },
}
