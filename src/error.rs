use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures raised while setting up a puzzle session. Steady-state frames never
/// produce these.
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("grid size must be at least 2, got {0}")]
    InvalidGridSize(usize),
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(u32),
    #[error("a {size}x{size} board of {tile_size}px tiles is too large")]
    BoardTooLarge { size: usize, tile_size: u32 },
    #[error("rows do not form a square permutation of tile ids")]
    InvalidGrid,
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("canvas element '{0}' not found")]
    CanvasNotFound(String),
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),
    #[error("failed to retrieve rendering context")]
    NoRenderingContext,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for PuzzleError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PuzzleError> for JsValue {
    fn from(err: PuzzleError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
