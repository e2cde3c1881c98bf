//! Solari split-flap board (workspace facade crate).
//!
//! Re-exports the member crates under one name so integration tests, benches
//! and the binary can use `solari::{core, adapter, term, input, types}`.

pub use solari_adapter as adapter;
pub use solari_core as core;
pub use solari_input as input;
pub use solari_term as term;
pub use solari_types as types;
