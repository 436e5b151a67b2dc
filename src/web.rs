//! Browser host for the puzzle: canvas renderer, image loading, mouse input and
//! the `requestAnimationFrame` loop. Everything here is thin glue around
//! [`PuzzleGrid`]; the game rules live in `crate::puzzle`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, MouseEvent, window,
};

use crate::config::PuzzleConfig;
use crate::error::PuzzleError;
use crate::puzzle::{PuzzleGrid, Rect, Renderer, SessionObserver};

/// DOM event dispatched on the canvas when the picture is restored.
pub const WIN_EVENT: &str = "game-result-win";

const TILE_STROKE_WIDTH: f64 = 5.0;

struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
    stroke: String,
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn draw_region(&mut self, source: Rect, dest: Rect) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_stroke_style_str(&self.stroke);
        ctx.set_line_width(TILE_STROKE_WIDTH);
        if let Err(err) = ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &self.image,
                source.x as f64,
                source.y as f64,
                source.w as f64,
                source.h as f64,
                dest.x as f64,
                dest.y as f64,
                dest.w as f64,
                dest.h as f64,
            )
        {
            warn!(?err, ?source, ?dest, "tile draw failed");
        }
        ctx.stroke();
        ctx.restore();
    }
}

/// Remembers the win until the frame loop has released the session borrow, so
/// JS listeners may call back into the game.
struct WinSignal {
    canvas: HtmlCanvasElement,
    fired: bool,
}

impl SessionObserver for WinSignal {
    fn solved(&mut self) {
        self.fired = true;
    }
}

impl WinSignal {
    fn take(&mut self) -> Option<HtmlCanvasElement> {
        std::mem::take(&mut self.fired).then(|| self.canvas.clone())
    }
}

struct WebSession {
    generation: u32,
    puzzle: PuzzleGrid,
    renderer: CanvasRenderer,
    observer: WinSignal,
}

thread_local! {
    static PUZZLE_STATE: RefCell<Option<WebSession>> = const { RefCell::new(None) };
}

/// Runs `f` against the live session, if `generation` still owns it.
fn with_session<T>(generation: Option<u32>, f: impl FnOnce(&mut WebSession) -> T) -> Option<T> {
    PUZZLE_STATE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(session) if generation.is_none_or(|g| g == session.generation) => Some(f(session)),
        _ => None,
    })
}

pub(crate) fn start_puzzle(
    config: PuzzleConfig,
    canvas_id: &str,
    image_src: &str,
) -> Result<(), PuzzleError> {
    config.validate()?;
    let win = window().ok_or(PuzzleError::NoWindow)?;
    let doc = win.document().ok_or(PuzzleError::NoDocument)?;

    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(canvas_id)
        .ok_or_else(|| PuzzleError::CanvasNotFound(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| PuzzleError::NotACanvas(canvas_id.to_string()))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(PuzzleError::NoRenderingContext)?
        .dyn_into()
        .map_err(|_| PuzzleError::NoRenderingContext)?;

    let px = config.board_pixels();
    let image = HtmlImageElement::new_with_width_and_height(px, px)?;
    let stroke = config.background.clone();
    let size = config.size;
    let puzzle = PuzzleGrid::new(config)?;

    let generation = PUZZLE_STATE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let generation = slot.as_ref().map_or(0, |s| s.generation.wrapping_add(1));
        *slot = Some(WebSession {
            generation,
            puzzle,
            renderer: CanvasRenderer {
                canvas: canvas.clone(),
                ctx,
                image: image.clone(),
                stroke,
            },
            observer: WinSignal {
                canvas: canvas.clone(),
                fired: false,
            },
        });
        generation
    });

    // Image load flips the session to ready
    {
        let closure = Closure::wrap(Box::new(move || {
            with_session(Some(generation), |s| s.puzzle.mark_ready());
        }) as Box<dyn FnMut()>);
        image.set_onload(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    // Left mouse button feeds the click mailbox
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if evt.button() != 0 {
                return;
            }
            // offset_x/offset_y are already local to the canvas.
            let (x, y) = (evt.offset_x() as f64, evt.offset_y() as f64);
            with_session(Some(generation), |s| s.puzzle.submit_click(x, y));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    image.set_src(image_src);
    info!(generation, size, canvas_id, image_src, "puzzle session started");

    start_frame_loop(generation);
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop(generation: u32) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let frame = with_session(Some(generation), |s| {
            s.puzzle.update(&mut s.renderer, &mut s.observer);
            (s.puzzle.is_running(), s.observer.take())
        });
        let (running, won) = frame.unwrap_or((false, None));

        if let Some(canvas) = won {
            dispatch_win(&canvas);
        }
        if !running {
            info!(generation, "frame loop stopped");
            // Drop our own closure to break the Rc cycle.
            let _ = f.borrow_mut().take();
            return;
        }
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(f: &FrameCallback) {
    let Some(w) = window() else {
        return;
    };
    if let Some(cb) = f.borrow().as_ref() {
        if let Err(err) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            warn!(?err, "requestAnimationFrame failed");
        }
    }
}

fn dispatch_win(canvas: &HtmlCanvasElement) {
    match Event::new(WIN_EVENT) {
        Ok(evt) => {
            if let Err(err) = canvas.dispatch_event(&evt) {
                warn!(?err, "failed to dispatch win event");
            }
        }
        Err(err) => warn!(?err, "failed to create win event"),
    }
}

/// Returns `false` when there is no session to act on.
pub(crate) fn stop() -> bool {
    with_session(None, |s| {
        s.puzzle.stop();
        info!(generation = s.generation, "puzzle stopped");
    })
    .is_some()
}

pub(crate) fn solve() -> bool {
    with_session(None, |s| s.puzzle.solve()).is_some()
}

pub(crate) fn set_image_source(src: &str) -> bool {
    with_session(None, |s| s.renderer.image.set_src(src)).is_some()
}

#[cfg(feature = "serde_json")]
pub(crate) fn grid_json() -> Option<String> {
    with_session(None, |s| serde_json::to_string(&s.puzzle.grid().rows()).ok()).flatten()
}
