use rand::Rng;

use super::state::{Grid, Line, Move, SIZE};
use crate::tile::Tile;

/// What a single [`shift`] did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftResult {
    /// True if any tile slid or merged.
    pub changed: bool,
    /// Sum of the doubled values produced by merges during this shift.
    pub merged: u64,
}

/// What one compress-merge-compress pass did to a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct LineResult {
    pub(crate) changed: bool,
    pub(crate) merged: u64,
}

/// Slide/merge tiles in the given direction. No randomness.
///
/// Every row (Left/Right) or column (Up/Down) is read in the direction of
/// travel, run through [`compress_merge_line`], and written back.
pub fn shift(grid: &mut Grid, direction: Move) -> ShiftResult {
    let mut result = ShiftResult::default();
    for idx in 0..SIZE {
        let mut line = grid.line(direction, idx);
        let line_result = compress_merge_line(&mut line);
        if line_result.changed {
            grid.put_line(direction, idx, line);
            result.changed = true;
        }
        result.merged += line_result.merged;
    }
    result
}

/// Compress towards index 0, merge equal neighbors once, compress again.
pub(crate) fn compress_merge_line(line: &mut Line) -> LineResult {
    let mut changed = compress_line(line);
    let merged = merge_line(line);
    if merged > 0 {
        changed = true;
    }
    changed |= compress_line(line);
    LineResult { changed, merged }
}

/// One forward sweep: each empty slot pulls in the nearest non-empty tile to
/// its right.
fn compress_line(line: &mut Line) -> bool {
    let mut changed = false;
    for i in 0..SIZE {
        if !line[i].is_empty() {
            continue;
        }
        if let Some(j) = (i + 1..SIZE).find(|&j| !line[j].is_empty()) {
            line[i] = line[j];
            line[j] = Tile::EMPTY;
            changed = true;
        }
    }
    changed
}

/// Merge adjacent equal pairs left to right. The right tile of a merged pair
/// is emptied, so it cannot take part in another merge during the same pass.
fn merge_line(line: &mut Line) -> u64 {
    let mut merged = 0;
    for i in 0..SIZE - 1 {
        if !line[i].is_empty() && line[i] == line[i + 1] {
            line[i] = line[i].doubled();
            line[i + 1] = Tile::EMPTY;
            merged += u64::from(line[i].value());
        }
    }
    merged
}

/// Put a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
///
/// Returns the cell that was filled, or `None` when the grid is full, in which
/// case the grid is left untouched.
///
/// ```
/// use twenty48_engine::engine::{spawn_tile, Grid};
/// use rand::{SeedableRng, rngs::StdRng};
/// let mut rng = StdRng::seed_from_u64(123);
/// let mut g = Grid::EMPTY;
/// assert!(spawn_tile(&mut g, &mut rng).is_some());
/// assert_eq!(g.count_empty(), 15);
/// ```
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<(usize, usize)> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        log::debug!("grid is full, skipping spawn");
        return None;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let tile = generate_random_tile(rng);
    grid.set(row, col, tile);
    log::debug!("spawned {tile} at ({row}, {col})");
    Some((row, col))
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { Tile::new(2) } else { Tile::new(4) }
}

/// True iff any cell holds `win_tile` or more.
pub fn is_won(grid: &Grid, win_tile: u32) -> bool {
    grid.tiles().any(|t| t.value() >= win_tile)
}

/// True iff no cell is empty and no two horizontally- or vertically-adjacent
/// cells are equal.
pub fn is_lost(grid: &Grid) -> bool {
    for row in 0..SIZE {
        for col in 0..SIZE {
            let tile = grid.get(row, col);
            if tile.is_empty() {
                return false;
            }
            if col + 1 < SIZE && tile == grid.get(row, col + 1) {
                return false;
            }
            if row + 1 < SIZE && tile == grid.get(row + 1, col) {
                return false;
            }
        }
    }
    true
}

pub(crate) fn format_val(tile: Tile) -> String {
    if tile.is_empty() {
        " ".repeat(7)
    } else {
        format!("{:^7}", tile.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn line(vals: [u32; 4]) -> Line {
        vals.map(Tile::new)
    }

    fn run(vals: [u32; 4]) -> ([u32; 4], LineResult) {
        let mut l = line(vals);
        let r = compress_merge_line(&mut l);
        (l.map(Tile::value), r)
    }

    #[test]
    fn it_compresses_and_merges_lines() {
        assert_eq!(run([2, 0, 2, 4]).0, [4, 4, 0, 0]);
        assert_eq!(run([2, 2, 4, 4]).0, [4, 8, 0, 0]);
        assert_eq!(run([2, 2, 2, 2]).0, [4, 4, 0, 0]);
        assert_eq!(run([0, 0, 0, 2]).0, [2, 0, 0, 0]);
        assert_eq!(run([4, 0, 0, 4]).0, [8, 0, 0, 0]);
        assert_eq!(run([2, 4, 4, 2]).0, [2, 8, 2, 0]);
        assert_eq!(run([8, 4, 4, 0]).0, [8, 8, 0, 0]);
    }

    #[test]
    fn it_reports_merge_totals() {
        assert_eq!(run([2, 2, 4, 4]).1, LineResult { changed: true, merged: 12 });
        assert_eq!(run([0, 2, 0, 0]).1, LineResult { changed: true, merged: 0 });
    }

    #[test]
    fn it_leaves_settled_lines_alone() {
        for vals in [[0, 0, 0, 0], [2, 4, 2, 4], [2, 4, 8, 0], [16, 0, 0, 0]] {
            let (out, r) = run(vals);
            assert_eq!(out, vals);
            assert!(!r.changed);
            assert_eq!(r.merged, 0);
        }
    }

    #[test]
    fn test_shift_left() {
        let mut g = Grid::from_rows([[2, 0, 2, 4], [2, 2, 4, 4], [2, 2, 2, 2], [0, 0, 0, 2]]);
        let r = shift(&mut g, Move::Left);
        assert!(r.changed);
        assert_eq!(g.rows(), [[4, 4, 0, 0], [4, 8, 0, 0], [4, 4, 0, 0], [2, 0, 0, 0]]);
        assert_eq!(r.merged, 4 + 12 + 8);
    }

    #[test]
    fn test_shift_right() {
        let mut g = Grid::from_rows([[2, 0, 2, 4], [2, 2, 4, 4], [2, 2, 2, 2], [0, 0, 0, 2]]);
        shift(&mut g, Move::Right);
        assert_eq!(g.rows(), [[0, 0, 4, 4], [0, 0, 4, 8], [0, 0, 4, 4], [0, 0, 0, 2]]);
    }

    #[test]
    fn test_shift_up() {
        let mut g = Grid::from_rows([[2, 0, 0, 4], [2, 0, 4, 0], [4, 2, 0, 4], [4, 0, 4, 8]]);
        shift(&mut g, Move::Up);
        assert_eq!(g.rows(), [[4, 2, 8, 8], [8, 0, 0, 8], [0, 0, 0, 0], [0, 0, 0, 0]]);
    }

    #[test]
    fn test_shift_down() {
        let mut g = Grid::from_rows([[2, 0, 0, 4], [2, 0, 4, 0], [4, 2, 0, 4], [4, 0, 4, 8]]);
        shift(&mut g, Move::Down);
        assert_eq!(g.rows(), [[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 8], [8, 2, 8, 8]]);
    }

    #[test]
    fn it_reports_no_change_for_settled_grid() {
        let rows = [[0, 0, 0, 2], [0, 0, 0, 4], [0, 0, 0, 8], [0, 0, 0, 16]];
        let mut g = Grid::from_rows(rows);
        let r = shift(&mut g, Move::Right);
        assert!(!r.changed);
        assert_eq!(g.rows(), rows);
    }

    #[test]
    fn it_spawns_only_into_empty_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = Grid::EMPTY;
        for n in 1..=16 {
            let (row, col) = spawn_tile(&mut g, &mut rng).unwrap();
            assert!(matches!(g.get(row, col).value(), 2 | 4));
            assert_eq!(g.count_empty(), 16 - n);
        }
        let full = g;
        assert_eq!(spawn_tile(&mut g, &mut rng), None);
        assert_eq!(g, full);
    }

    #[test]
    fn it_spawns_mostly_twos() {
        let mut rng = StdRng::seed_from_u64(2048);
        let fours = (0..10_000)
            .filter(|_| generate_random_tile(&mut rng) == Tile::new(4))
            .count();
        assert!((700..1300).contains(&fours), "fours = {fours}");
    }

    #[test]
    fn it_detects_win() {
        let mut g = Grid::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]]);
        assert!(!is_won(&g, 2048));
        g.set(1, 1, Tile::new(2048));
        assert!(is_won(&g, 2048));
        g.set(1, 1, Tile::new(4096));
        assert!(is_won(&g, 2048));
        assert!(is_won(&g, 4096));
    }

    #[test]
    fn it_detects_loss() {
        let stuck = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(is_lost(&stuck));

        let mut gap = stuck;
        gap.set(3, 3, Tile::EMPTY);
        assert!(!is_lost(&gap));

        let mut horizontal = stuck;
        horizontal.set(0, 1, Tile::new(2));
        assert!(!is_lost(&horizontal));

        let mut vertical = stuck;
        vertical.set(3, 3, Tile::new(4));
        assert!(!is_lost(&vertical));
    }

    #[test]
    fn it_formats_values() {
        assert_eq!(format_val(Tile::EMPTY), "       ");
        assert_eq!(format_val(Tile::new(2)), "   2   ");
        assert_eq!(format_val(Tile::new(2048)), " 2048  ");
    }
}
