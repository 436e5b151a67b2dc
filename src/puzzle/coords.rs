//! Pixel <-> grid mappings. All three are stateless and share the same tile
//! size, so a click and a draw request always agree on cell boundaries.

use super::TileId;

/// Pixel rectangle handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    /// Square tile-sized rect anchored at `origin`.
    pub fn tile((x, y): (u32, u32), size: u32) -> Self {
        Self { x, y, w: size, h: size }
    }
}

/// `(row, col)` of the cell containing the pixel. Not clamped: negative or
/// oversize results mean "no tile there".
pub fn pixel_to_cell(x: f64, y: f64, tile_size: u32) -> (i64, i64) {
    let w = tile_size as f64;
    ((y / w).floor() as i64, (x / w).floor() as i64)
}

/// Top-left pixel `(x, y)` of a cell.
pub fn cell_to_pixel(row: usize, col: usize, tile_size: u32) -> (u32, u32) {
    (col as u32 * tile_size, row as u32 * tile_size)
}

/// Home `(row, col)` of a tile id in the solved layout.
pub fn index_to_cell(id: TileId, size: usize) -> (usize, usize) {
    let id = id as usize;
    (id / size, id % size)
}
