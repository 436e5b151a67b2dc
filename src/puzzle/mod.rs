//! Sliding tile puzzle core.
//!
//! [`PuzzleGrid`] owns the board, the click mailbox and the session flags. It
//! never touches the browser: a frame scheduler calls [`PuzzleGrid::update`]
//! with a [`Renderer`] (copy a source rect of the image onto a destination
//! rect) and a [`SessionObserver`] (told once when the picture is restored).

use fastrand::Rng;
use tracing::{debug, info};

use crate::config::PuzzleConfig;
use crate::error::PuzzleError;

mod click;
mod coords;
mod grid;

pub use click::PendingClick;
pub use coords::{Rect, cell_to_pixel, index_to_cell, pixel_to_cell};
pub use grid::Grid;

/// Tile identifier; equals the tile's position in the solved layout.
pub type TileId = u32;

/// Draw target for tiles. Both rects passed to `draw_region` are tile-sized.
pub trait Renderer {
    fn clear(&mut self);
    fn draw_region(&mut self, source: Rect, dest: Rect);
}

/// Receives the win notification.
pub trait SessionObserver {
    fn solved(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Cleared on win or explicit stop; the scheduler stops pumping frames.
    pub running: bool,
    /// Set once the source image has loaded.
    pub ready: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            running: true,
            ready: false,
        }
    }
}

pub struct PuzzleGrid {
    config: PuzzleConfig,
    grid: Grid,
    pending_click: PendingClick,
    state: SessionState,
}

impl PuzzleGrid {
    /// Validates `config` and deals a freshly shuffled board.
    pub fn new(config: PuzzleConfig) -> Result<Self, PuzzleError> {
        Self::with_rng(config, &mut Rng::new())
    }

    pub fn with_rng(config: PuzzleConfig, rng: &mut Rng) -> Result<Self, PuzzleError> {
        config.validate()?;
        let grid = Grid::shuffled(config.size, rng);
        Ok(Self::from_parts(config, grid))
    }

    /// Starts from a known arrangement instead of a shuffle.
    pub fn with_grid(config: PuzzleConfig, grid: Grid) -> Result<Self, PuzzleError> {
        config.validate()?;
        if !grid.is_valid() {
            return Err(PuzzleError::InvalidGrid);
        }
        if grid.size() != config.size {
            return Err(PuzzleError::InvalidGridSize(grid.size()));
        }
        Ok(Self::from_parts(config, grid))
    }

    fn from_parts(config: PuzzleConfig, grid: Grid) -> Self {
        debug!(size = config.size, "dealt board\n{grid}");
        Self {
            config,
            grid,
            pending_click: PendingClick::default(),
            state: SessionState::default(),
        }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_ready(&self) -> bool {
        self.state.ready
    }

    pub fn mark_ready(&mut self) {
        if !self.state.ready {
            info!("puzzle image ready");
        }
        self.state.ready = true;
    }

    pub fn stop(&mut self) {
        self.state.running = false;
    }

    /// Buffers a click in surface-local pixels for the next frame.
    pub fn submit_click(&mut self, x: f64, y: f64) {
        self.pending_click.set(x, y);
    }

    /// Forces the solved layout, bypassing move rules. The next frame reports
    /// the win.
    pub fn solve(&mut self) {
        info!("board forced to solved layout");
        self.grid.reset_to_identity();
    }

    pub fn check_solved(&self) -> GameResult {
        if self.grid.is_identity() {
            GameResult::Win
        } else {
            GameResult::Continue
        }
    }

    /// One frame: clear, detect a win, apply the pending click, redraw.
    pub fn update<R, O>(&mut self, renderer: &mut R, observer: &mut O)
    where
        R: Renderer + ?Sized,
        O: SessionObserver + ?Sized,
    {
        if !self.state.ready || !self.state.running {
            return;
        }

        renderer.clear();

        if self.check_solved() == GameResult::Win {
            self.render_tiles(renderer);
            observer.solved();
            self.state.running = false;
            info!("puzzle solved");
            return;
        }

        if let Some((x, y)) = self.pending_click.take_if_unconsumed() {
            self.apply_click(x, y);
        }

        self.render_tiles(renderer);
    }

    fn apply_click(&mut self, x: f64, y: f64) {
        let (row, col) = pixel_to_cell(x, y, self.config.tile_size);
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            debug!(x, y, "click outside board");
            return;
        };
        self.move_tile(row, col);
    }

    /// Swaps the tile at `(row, col)` with an orthogonally adjacent gap.
    /// Returns `false` (and leaves the board alone) when the cell is the gap,
    /// off the board, or has no gap beside it.
    pub fn move_tile(&mut self, row: usize, col: usize) -> bool {
        let empty = self.grid.empty_id();
        let value = match self.grid.get(row, col) {
            Some(v) if v != empty => v,
            _ => {
                debug!(row, col, "click on empty slot or outside board");
                return false;
            }
        };

        // Order matters: below, above, left, right. Every matching neighbour
        // is swapped; with a single empty slot at most one can match.
        let neighbours = [
            Some((row + 1, col)),
            row.checked_sub(1).map(|r| (r, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ];
        let open: Vec<(usize, usize)> = neighbours
            .into_iter()
            .flatten()
            .filter(|&(r, c)| self.grid.get(r, c) == Some(empty))
            .collect();

        if open.is_empty() {
            debug!(row, col, "no empty neighbour");
            return false;
        }
        for (r, c) in open {
            self.grid.set(r, c, value);
            self.grid.set(row, col, empty);
            debug!(tile = value, from = ?(row, col), to = ?(r, c), "moved tile");
        }
        true
    }

    fn render_tiles<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let w = self.config.tile_size;
        let n = self.grid.size();
        let empty = self.grid.empty_id();
        for (row, col, id) in self.grid.iter() {
            if id == empty {
                continue;
            }
            let dest = Rect::tile(cell_to_pixel(row, col, w), w);
            let (home_row, home_col) = index_to_cell(id, n);
            let source = Rect::tile(cell_to_pixel(home_row, home_col, w), w);
            renderer.draw_region(source, dest);
        }
    }
}
