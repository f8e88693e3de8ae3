//! Text helpers (cell widths, line layout, styled spans).
//!
//! These helpers are pure and live under `core` so the state machine and widgets can share them.

pub mod ansi;
pub mod layout;
pub mod styled;
pub mod width;
