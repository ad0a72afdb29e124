//! Engine module: the 4x4 grid, the compress/merge move routine, spawning and
//! win/loss checks. Public API stays small and ergonomic.
//!
//! - `Grid` is the tile matrix with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Line-level internals live in `ops` so one compress-left routine serves
//!   all four directions.

mod ops;
pub mod state;

pub use state::{DEFAULT_WIN_TILE, Grid, Move, SIZE};

pub use ops::{ShiftResult, is_lost, is_won, shift, spawn_tile};
