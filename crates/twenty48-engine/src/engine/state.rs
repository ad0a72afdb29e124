use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ops;
use crate::error::GameError;
use crate::tile::Tile;

/// Side length of the (fixed) square grid.
pub const SIZE: usize = 4;

/// Tile value that wins the game.
pub const DEFAULT_WIN_TILE: u32 = 2048;

/// One row or column, ordered in the direction tiles slide towards.
pub(crate) type Line = [Tile; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in the order front-ends usually list them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// True when lines are reversed before the compress-left pass.
    #[inline]
    pub(crate) fn is_reversed(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            other => Err(GameError::UnknownCommand(other.to_string())),
        }
    }
}

/// The 4x4 matrix of tiles, addressed as `(row, col)` from the top-left.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid(pub(crate) [[Tile; SIZE]; SIZE]);

impl Grid {
    /// A grid with every cell empty.
    pub const EMPTY: Grid = Grid([[Tile::EMPTY; SIZE]; SIZE]);

    /// Build a grid from raw row values.
    ///
    /// ```
    /// use twenty48_engine::engine::Grid;
    /// let g = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
    /// assert_eq!(g.get(3, 3).value(), 4);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Self {
        Grid(rows.map(|row| row.map(Tile::new)))
    }

    /// Copy the grid out as raw row values.
    pub fn rows(&self) -> [[u32; SIZE]; SIZE] {
        self.0.map(|row| row.map(Tile::value))
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.0[row][col] = tile;
    }

    /// Sum of every cell value. This is the score after a changed move.
    pub fn sum(&self) -> u64 {
        self.tiles().map(|t| u64::from(t.value())).sum()
    }

    pub fn count_empty(&self) -> usize {
        self.tiles().filter(|t| t.is_empty()).count()
    }

    /// Largest value on the grid (0 when empty).
    pub fn highest_tile(&self) -> Tile {
        self.tiles().max().unwrap_or(Tile::EMPTY)
    }

    /// Iterate tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }

    /// Positions of empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.0[row][col].is_empty())
            .collect()
    }

    /// Slide/merge tiles in `dir` without spawning. See [`ops::shift`].
    #[inline]
    pub fn shift(&mut self, dir: Move) -> ops::ShiftResult {
        ops::shift(self, dir)
    }

    /// True iff any cell holds `win_tile` or more.
    #[inline]
    pub fn is_won(&self, win_tile: u32) -> bool {
        ops::is_won(self, win_tile)
    }

    /// True iff the grid is full and no two neighbors are equal.
    #[inline]
    pub fn is_lost(&self) -> bool {
        ops::is_lost(self)
    }

    /// Read line `idx` as seen when moving in `dir`: rows for Left/Right,
    /// columns for Up/Down, reversed for Right/Down.
    pub(crate) fn line(&self, dir: Move, idx: usize) -> Line {
        let mut line: Line = match dir {
            Move::Left | Move::Right => self.0[idx],
            Move::Up | Move::Down => std::array::from_fn(|row| self.0[row][idx]),
        };
        if dir.is_reversed() {
            line.reverse();
        }
        line
    }

    /// Inverse of [`Grid::line`].
    pub(crate) fn put_line(&mut self, dir: Move, idx: usize, mut line: Line) {
        if dir.is_reversed() {
            line.reverse();
        }
        match dir {
            Move::Left | Move::Right => self.0[idx] = line,
            Move::Up | Move::Down => {
                for (row, tile) in line.into_iter().enumerate() {
                    self.0[row][idx] = tile;
                }
            }
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.rows())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "-------------------------------")?;
            }
            let cells: Vec<String> = row.iter().map(|t| ops::format_val(*t)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl From<[[u32; SIZE]; SIZE]> for Grid {
    fn from(rows: [[u32; SIZE]; SIZE]) -> Self {
        Grid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_lines_per_direction() {
        let g = Grid::from_rows([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]]);
        let vals = |l: Line| l.map(Tile::value);
        assert_eq!(vals(g.line(Move::Left, 1)), [5, 6, 7, 8]);
        assert_eq!(vals(g.line(Move::Right, 1)), [8, 7, 6, 5]);
        assert_eq!(vals(g.line(Move::Up, 2)), [3, 7, 11, 15]);
        assert_eq!(vals(g.line(Move::Down, 2)), [15, 11, 7, 3]);
    }

    #[test]
    fn it_puts_lines_back() {
        let src = Grid::from_rows([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]]);
        for dir in Move::ALL {
            let mut g = Grid::EMPTY;
            for idx in 0..SIZE {
                g.put_line(dir, idx, src.line(dir, idx));
            }
            assert_eq!(g, src, "{dir}");
        }
    }

    #[test]
    fn it_counts_and_sums() {
        let g = Grid::from_rows([[2, 2, 0, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 1024]]);
        assert_eq!(g.sum(), 1032);
        assert_eq!(g.count_empty(), 12);
        assert_eq!(g.highest_tile(), Tile::new(1024));
        assert_eq!(g.empty_cells().len(), 12);
        assert_eq!(g.empty_cells()[0], (0, 2));
        assert_eq!(Grid::EMPTY.highest_tile(), Tile::EMPTY);
    }

    #[test]
    fn it_parses_moves() {
        assert_eq!("Left".parse::<Move>().unwrap(), Move::Left);
        assert_eq!(" down ".parse::<Move>().unwrap(), Move::Down);
        assert!("sideways".parse::<Move>().is_err());
    }
}
