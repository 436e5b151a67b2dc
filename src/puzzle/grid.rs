use std::fmt::{self, Display, Formatter};

use fastrand::Rng;

use super::TileId;
use crate::error::PuzzleError;
use crate::shuffle::{shuffle, shuffled};

/// N x N board of tile ids stored row-major. Always a permutation of
/// `0..N²`, the last id standing for the empty slot.
///
/// With the `serde` feature the grid is (de)serialized as an array of rows and
/// goes through [`Grid::from_rows`] on the way in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<TileId>>", into = "Vec<Vec<TileId>>")
)]
pub struct Grid {
    size: usize,
    cells: Vec<TileId>,
}

impl Grid {
    /// Solved layout: cell `i` holds id `i`.
    pub fn identity(size: usize) -> Self {
        Self {
            size,
            cells: (0..(size * size) as TileId).collect(),
        }
    }

    /// Identity layout with every row shuffled, then the row order shuffled.
    pub fn shuffled(size: usize, rng: &mut Rng) -> Self {
        let mut rows: Vec<Vec<TileId>> = Self::identity(size).rows();
        for row in &mut rows {
            shuffle(rng, row);
        }
        let rows = shuffled(rng, rows);
        Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Builds a grid from nested rows. Returns `None` unless the rows form a
    /// square permutation of `0..N²`.
    pub fn from_rows(rows: &[Vec<TileId>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let grid = Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        };
        grid.is_permutation().then_some(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn empty_id(&self) -> TileId {
        (self.size * self.size - 1) as TileId
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<TileId> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(self.index(row, col)).copied()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, id: TileId) {
        let idx = self.index(row, col);
        self.cells[idx] = id;
    }

    /// Row-major view of the ids.
    pub fn cells(&self) -> &[TileId] {
        &self.cells
    }

    pub fn rows(&self) -> Vec<Vec<TileId>> {
        self.cells.chunks(self.size).map(<[TileId]>::to_vec).collect()
    }

    /// Iterates `(row, col, id)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileId)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &id)| (i / size, i % size, id))
    }

    pub fn is_identity(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, &id)| id as usize == i)
    }

    /// Square and a permutation of `0..N²`.
    pub fn is_valid(&self) -> bool {
        self.size > 0
            && self.size.checked_mul(self.size) == Some(self.cells.len())
            && self.is_permutation()
    }

    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.cells.len()];
        for &id in &self.cells {
            match seen.get_mut(id as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    pub(crate) fn reset_to_identity(&mut self) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = i as TileId;
        }
    }
}

impl TryFrom<Vec<Vec<TileId>>> for Grid {
    type Error = PuzzleError;

    fn try_from(rows: Vec<Vec<TileId>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows).ok_or(PuzzleError::InvalidGrid)
    }
}

impl From<Grid> for Vec<Vec<TileId>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}

#[cfg(test)]
impl Grid {
    /// Bypasses every check; only for exercising validation paths.
    pub(crate) fn from_raw(size: usize, cells: Vec<TileId>) -> Self {
        Self { size, cells }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let empty = self.empty_id();
        for row in self.cells.chunks(self.size) {
            for &id in row {
                if id == empty {
                    write!(f, "   ")?;
                } else {
                    write!(f, "{id:>02} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
