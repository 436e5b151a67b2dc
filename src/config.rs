//! Per-session puzzle configuration.

use crate::error::PuzzleError;

/// Grid dimension used when the host does not pick one.
pub const DEFAULT_GRID_SIZE: usize = 3;
/// Tile edge in pixels (source image and canvas share the same scale).
pub const DEFAULT_TILE_SIZE: u32 = 120;
/// Stroke colour drawn around tiles; matches the canvas backdrop.
pub const DEFAULT_BACKGROUND: &str = "#181818";

/// Fixed for the lifetime of one session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleConfig {
    /// Grid dimension N (the board is N x N).
    pub size: usize,
    /// Edge length of one tile in pixels.
    pub tile_size: u32,
    pub background: String,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl PuzzleConfig {
    pub fn new(size: usize, tile_size: u32) -> Self {
        Self {
            size,
            tile_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.size < 2 {
            return Err(PuzzleError::InvalidGridSize(self.size));
        }
        if self.tile_size == 0 {
            return Err(PuzzleError::InvalidTileSize(self.tile_size));
        }
        // Tile ids and pixel coordinates are u32; both must fit.
        let ids_fit = self
            .size
            .checked_mul(self.size)
            .is_some_and(|cells| u32::try_from(cells).is_ok());
        let pixels_fit = u32::try_from(self.size)
            .ok()
            .and_then(|n| n.checked_mul(self.tile_size))
            .is_some();
        if !ids_fit || !pixels_fit {
            return Err(PuzzleError::BoardTooLarge {
                size: self.size,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }

    /// Side length of the whole board in pixels. Only meaningful for a
    /// validated config.
    pub fn board_pixels(&self) -> u32 {
        (self.size as u32).saturating_mul(self.tile_size)
    }
}
