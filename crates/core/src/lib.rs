//! Core board logic module - pure, deterministic, and testable
//!
//! This module contains the split-flap tile state machine, the grid planner,
//! the text layout strategies and the board that ties them together.
//! It has **zero dependencies** on terminals, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Testable**: Timers run on a simulated clock, no real sleeping
//! - **Portable**: Can drive any view layer (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: Tile collection, cascade reveals, live-stream diffing, input routing
//! - [`tile`]: Per-tile `Idle`/`Flipping` state machine with queued chained flips
//! - [`gesture`]: Press/drag/release and wheel input to flick requests
//! - [`grid`]: Viewport size to tile grid and tile rectangles
//! - [`text_layout`]: Word-fill and sparse-line content packing
//! - [`scheduler`]: Deterministic timer queue
//! - [`rng`]: Seedable LCG used for every random choice
//! - [`stream`]: Text stream and viewport collaborator traits
//! - [`config`]: Board configuration and validation
//!
//! # Example
//!
//! ```
//! use solari_core::{Board, BoardConfig};
//! use solari_core::types::Direction;
//!
//! let mut board = Board::new(BoardConfig::default().with_seed(42), 700.0, 400.0);
//! board.run_until_idle();
//!
//! let before = board.tile(0).unwrap().current_index();
//! board.flick(0, Direction::Forward, 5);
//! board.run_until_idle();
//! assert_eq!(board.tile(0).unwrap().current_index(), (before + 5) % 38);
//! ```
//!
//! # Timing
//!
//! - **Fresh flip**: 320ms
//! - **Chained flip**: 110ms for every step after the first of a sequence
//! - **Stagger**: 20ms per tile index for reveals and live updates
//!
//! Call [`Board::tick`](board::Board::tick) every frame with elapsed time.

pub mod board;
pub mod config;
pub mod content;
pub mod gesture;
pub mod grid;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod stream;
pub mod text_layout;
pub mod tile;

pub use solari_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardEvent, BoardMode};
pub use config::{BoardConfig, ConfigError};
pub use gesture::{GestureAction, GestureTracker};
pub use grid::{GridPlan, GridPlanner};
pub use rng::SimpleRng;
pub use scheduler::{Scheduler, TimerId, TimerQueue};
pub use snapshot::{BoardSnapshot, TileSnapshot};
pub use stream::{FixedViewport, NoTextStream, ScriptedStream, TextStreamSource, ViewportSource};
pub use text_layout::{ContentLine, LayoutStrategy};
pub use tile::{FlipTiming, Tile, TileState};
