//! Terminal board renderer.
//!
//! Renders board snapshots into a framebuffer of styled cells and flushes it
//! to a terminal backend. No widget toolkit: every tile is a rectangle of cells
//! split into an upper and a lower flap.
//!
//! - [`board_view`]: snapshot to framebuffer (pure, unit-testable)
//! - [`renderer`]: diffed terminal output via crossterm
//! - [`viewport`]: terminal size as a board viewport source

pub mod board_view;
pub mod fb;
pub mod renderer;
pub mod viewport;

pub use solari_core as core;
pub use solari_types as types;

pub use board_view::{BoardView, StatusView, Theme, Viewport, STATUS_ROWS};
pub use fb::{Cell, CellRect, CellStyle, FrameBuffer, Rgb};
pub use renderer::{collect_dirty_runs, encode_full_into, encode_runs_into, DirtyRun, TerminalRenderer};
pub use viewport::TerminalViewport;
