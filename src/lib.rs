//! Slide Puzzle core crate.
//!
//! An image is cut into an N x N grid of tiles, shuffled, and the player clicks
//! tiles next to the single gap until the picture is whole again. The rules
//! live in [`puzzle`] and are plain Rust; the `web` module wires them to a
//! canvas, an image element and `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod puzzle;
pub mod shuffle;
mod web;

pub use config::PuzzleConfig;
pub use error::PuzzleError;
pub use puzzle::{GameResult, Grid, PuzzleGrid, Rect, Renderer, SessionObserver, TileId};
pub use web::WIN_EVENT;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "tracing-wasm")]
    if !tracing::dispatcher::has_been_set() {
        let config = tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .set_report_logs_in_timings(false)
            .build();
        tracing_wasm::set_as_global_default_with_config(config);
    }
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Starts a session on the canvas with id `canvas_id`, slicing `image_src`
/// into `size` x `size` tiles of `tile_size` pixels. Fails when the canvas or
/// its 2d context is unavailable.
#[wasm_bindgen]
pub fn start_game(
    canvas_id: &str,
    image_src: &str,
    size: u32,
    tile_size: u32,
) -> Result<(), JsValue> {
    let config = PuzzleConfig::new(size as usize, tile_size);
    web::start_puzzle(config, canvas_id, image_src).map_err(JsValue::from)
}

/// Stops the running session; the frame loop exits on its next tick.
#[wasm_bindgen]
pub fn stop_game() -> bool {
    web::stop()
}

/// Debug helper: snaps the board to the solved layout.
#[wasm_bindgen]
pub fn solve_puzzle() -> bool {
    web::solve()
}

#[wasm_bindgen]
pub fn set_image_source(src: &str) -> bool {
    web::set_image_source(src)
}

/// Current board as a JSON array of rows, for poking at from the console.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn grid_json() -> Option<String> {
    web::grid_json()
}
