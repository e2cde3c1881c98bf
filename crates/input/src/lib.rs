//! Terminal input module (board-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::BoardAction`] and mouse events
//! into [`crate::types::PointerInput`] scaled to board viewport units.

pub mod map;
pub mod pointer;

pub use solari_types as types;

pub use map::{handle_key_event, should_quit};
pub use pointer::PointerMapper;
