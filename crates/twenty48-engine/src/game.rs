//! Game session: the grid plus score, best score, one save slot and the
//! random source used for spawns.
//!
//! Front-ends drive a [`Game`] through [`Command`]s (or the matching methods)
//! and read the grid and scores back for rendering. Nothing here blocks or
//! waits on the front-end; win/loss are reported through [`Status`].

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::{self, DEFAULT_WIN_TILE, Grid, Move};
use crate::error::{GameError, GameResult};
use crate::tile::Tile;

/// Everything a front-end can ask the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Move),
    Reset,
    Save,
    Load,
}

impl Command {
    /// Whether the board should be repainted after this command. Saving does
    /// not change anything visible; every other command does, or might.
    pub fn needs_redraw(self) -> bool {
        !matches!(self, Command::Save)
    }
}

impl From<Move> for Command {
    fn from(m: Move) -> Self {
        Command::Move(m)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(m) => write!(f, "{m}"),
            Command::Reset => f.write_str("reset"),
            Command::Save => f.write_str("save"),
            Command::Load => f.write_str("load"),
        }
    }
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" | "new" => Ok(Command::Reset),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            other => other.parse::<Move>().map(Command::Move),
        }
    }
}

/// Result of evaluating win then loss after a changed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Playing,
    Won,
    Lost,
}

/// What a move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// False when nothing slid or merged; the move had no effect at all.
    pub changed: bool,
    /// Cell that received the new tile, if any.
    pub spawned: Option<(usize, usize)>,
    /// Sum of merged tile values. Informational: the score is recomputed
    /// from the grid, not accumulated from this.
    pub merged: u64,
    pub status: Status,
}

/// What a [`Command`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved(MoveOutcome),
    Reset,
    Saved,
    Loaded,
}

/// The single saved (score, grid) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub grid: Grid,
}

/// Check that `win_tile` is a reachable tile value: a power of two of at
/// least 8 (two spawns can already make a 4).
pub fn validate_win_tile(win_tile: u32) -> GameResult<()> {
    if win_tile >= 8 && win_tile.is_power_of_two() {
        Ok(())
    } else {
        Err(GameError::InvalidWinTile(win_tile))
    }
}

/// A running game.
///
/// ```
/// use twenty48_engine::game::{Command, Game};
/// use twenty48_engine::engine::Move;
///
/// let mut game = Game::seeded(42);
/// assert_eq!(game.grid().count_empty(), 14);
/// game.apply(Command::Save).unwrap();
/// game.apply(Command::Move(Move::Left)).unwrap();
/// game.apply(Command::Load).unwrap();
/// ```
#[derive(Debug)]
pub struct Game<R = StdRng> {
    grid: Grid,
    score: u64,
    high_score: u64,
    status: Status,
    saved: Option<Snapshot>,
    win_tile: u32,
    rng: R,
}

impl Game<StdRng> {
    /// New game with a deterministic spawn sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::build(StdRng::seed_from_u64(seed), DEFAULT_WIN_TILE)
    }

    /// New game seeded from `seed` if given, otherwise from OS entropy.
    ///
    /// Fails with [`GameError::InvalidWinTile`] unless `win_tile` passes
    /// [`validate_win_tile`].
    pub fn new(seed: Option<u64>, win_tile: u32) -> GameResult<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, win_tile)
    }
}

impl<R: Rng> Game<R> {
    /// New game drawing spawns from `rng`. The grid starts with two tiles.
    pub fn with_rng(rng: R, win_tile: u32) -> GameResult<Self> {
        validate_win_tile(win_tile)?;
        Ok(Self::build(rng, win_tile))
    }

    fn build(rng: R, win_tile: u32) -> Self {
        let mut game = Game {
            grid: Grid::EMPTY,
            score: 0,
            high_score: 0,
            status: Status::Playing,
            saved: None,
            win_tile,
            rng,
        };
        game.reset();
        game
    }

    /// Clear the grid, spawn two tiles and zero the score. The best score and
    /// the save slot survive.
    pub fn reset(&mut self) {
        self.grid = Grid::EMPTY;
        self.score = 0;
        self.status = Status::Playing;
        engine::spawn_tile(&mut self.grid, &mut self.rng);
        engine::spawn_tile(&mut self.grid, &mut self.rng);
        log::info!("new game");
    }

    /// Slide and merge towards `dir`.
    ///
    /// On a change: one tile spawns, the score becomes the sum of all cells,
    /// the best score is raised if beaten, then win and (if not won) loss are
    /// checked. Without a change nothing at all happens.
    pub fn move_tiles(&mut self, dir: Move) -> MoveOutcome {
        let shifted = self.grid.shift(dir);
        if !shifted.changed {
            log::debug!("move {dir}: no change");
            return MoveOutcome { changed: false, spawned: None, merged: 0, status: self.status };
        }

        let spawned = engine::spawn_tile(&mut self.grid, &mut self.rng);
        self.score = self.grid.sum();
        if self.score > self.high_score {
            self.high_score = self.score;
        }

        self.status = if self.grid.is_won(self.win_tile) {
            Status::Won
        } else if self.grid.is_lost() {
            Status::Lost
        } else {
            Status::Playing
        };
        match self.status {
            Status::Won => log::info!("reached {} with score {}", self.win_tile, self.score),
            Status::Lost => log::info!(
                "game over with score {} (highest tile {})",
                self.score,
                self.grid.highest_tile()
            ),
            Status::Playing => {}
        }

        MoveOutcome { changed: true, spawned, merged: shifted.merged, status: self.status }
    }

    /// Store the current score and grid, replacing any earlier save.
    pub fn save(&mut self) {
        self.saved = Some(Snapshot { score: self.score, grid: self.grid });
        log::info!("saved game with score {}", self.score);
    }

    /// Restore the last save. The save stays in place for later loads.
    ///
    /// Fails with [`GameError::EmptySnapshot`] when nothing was saved; the
    /// grid and score are left as they are.
    pub fn load(&mut self) -> GameResult<()> {
        let snapshot = self.saved.ok_or(GameError::EmptySnapshot)?;
        self.score = snapshot.score;
        self.grid = snapshot.grid;
        self.status = Status::Playing;
        log::info!("loaded game with score {}", self.score);
        Ok(())
    }

    /// Run one command.
    pub fn apply(&mut self, command: Command) -> GameResult<Outcome> {
        match command {
            Command::Move(dir) => Ok(Outcome::Moved(self.move_tiles(dir))),
            Command::Reset => {
                self.reset();
                Ok(Outcome::Reset)
            }
            Command::Save => {
                self.save();
                Ok(Outcome::Saved)
            }
            Command::Load => self.load().map(|()| Outcome::Loaded),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Tile {
        self.grid.get(row, col)
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Best score seen by this session; never goes down.
    #[inline]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Status from the last changed move (`Playing` after reset or load).
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.grid.is_won(self.win_tile)
    }

    pub fn is_lost(&self) -> bool {
        self.grid.is_lost()
    }

    pub fn has_snapshot(&self) -> bool {
        self.saved.is_some()
    }

    pub fn win_tile(&self) -> u32 {
        self.win_tile
    }

    #[cfg(test)]
    pub(crate) fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }
}
