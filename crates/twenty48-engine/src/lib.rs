//! twenty48-engine: the 2048 grid, its move/merge rules and a game session
//!
//! This crate provides:
//! - A `Grid` type with the compress/merge/compress move routine (`engine`)
//! - `Tile` values with the colors and font sizes renderers paint them with (`tile`)
//! - A `Game` session with score, best score and a single save slot, driven
//!   by `Command`s (`game`)
//!
//! Quick start:
//! ```
//! use twenty48_engine::engine::Move;
//! use twenty48_engine::game::{Command, Game, Outcome};
//!
//! // Seeded so the spawn sequence is reproducible
//! let mut game = Game::seeded(42);
//! if let Outcome::Moved(m) = game.apply(Command::Move(Move::Left)).unwrap() {
//!     if m.changed {
//!         // Score is the sum of every cell, not a merge tally
//!         assert_eq!(game.score(), game.grid().sum());
//!     }
//! }
//! ```
pub mod engine;
pub mod error;
pub mod game;
pub mod tile;

pub use error::{GameError, GameResult};
