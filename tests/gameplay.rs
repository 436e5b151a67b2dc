// Frame-by-frame gameplay scenarios driven through the public API with a
// recording renderer.

use fastrand::Rng;
use slide_puzzle::puzzle::pixel_to_cell;
use slide_puzzle::{
    GameResult, Grid, PuzzleConfig, PuzzleGrid, Rect, Renderer, SessionObserver, TileId,
};

const TILE: u32 = 100;

#[derive(Default)]
struct Canvas {
    clears: usize,
    draws: Vec<(Rect, Rect)>,
}

impl Renderer for Canvas {
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn draw_region(&mut self, source: Rect, dest: Rect) {
        self.draws.push((source, dest));
    }
}

#[derive(Default)]
struct Session {
    wins: usize,
}

impl SessionObserver for Session {
    fn solved(&mut self) {
        self.wins += 1;
    }
}

fn puzzle_from(rows: &[Vec<TileId>]) -> PuzzleGrid {
    let grid = Grid::from_rows(rows).expect("valid grid");
    let mut puzzle = PuzzleGrid::with_grid(PuzzleConfig::new(grid.size(), TILE), grid).unwrap();
    puzzle.mark_ready();
    puzzle
}

fn click_cell(puzzle: &mut PuzzleGrid, row: usize, col: usize) {
    let t = TILE as f64;
    puzzle.submit_click(col as f64 * t + t / 2.0, row as f64 * t + t / 2.0);
}

fn tick(puzzle: &mut PuzzleGrid) -> (Canvas, Session) {
    let mut canvas = Canvas::default();
    let mut session = Session::default();
    puzzle.update(&mut canvas, &mut session);
    (canvas, session)
}

#[test]
fn initial_grid_is_a_permutation_for_all_sizes() {
    let mut rng = Rng::with_seed(2024);
    for n in 2..=10 {
        let puzzle = PuzzleGrid::with_rng(PuzzleConfig::new(n, TILE), &mut rng).unwrap();
        let mut ids = puzzle.grid().cells().to_vec();
        ids.sort_unstable();
        let expected: Vec<TileId> = (0..(n * n) as TileId).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn check_solved_only_for_exact_identity() {
    let puzzle = puzzle_from(&[vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
    assert_eq!(puzzle.check_solved(), GameResult::Win);

    let puzzle = puzzle_from(&[vec![0, 1, 2], vec![3, 4, 5], vec![6, 8, 7]]);
    assert_eq!(puzzle.check_solved(), GameResult::Continue);

    let puzzle = puzzle_from(&[vec![1, 0, 2], vec![3, 4, 5], vec![6, 7, 8]]);
    assert_eq!(puzzle.check_solved(), GameResult::Continue);
}

#[test]
fn identity_board_move_down_into_gap() {
    // 5 at (1,2), gap (8) directly below at (2,2).
    let mut puzzle = puzzle_from(&[vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
    assert!(puzzle.move_tile(1, 2));
    assert_eq!(
        puzzle.grid().rows(),
        vec![vec![0, 1, 2], vec![3, 4, 8], vec![6, 7, 5]]
    );
}

#[test]
fn solved_board_reports_win_before_taking_clicks() {
    let mut puzzle = puzzle_from(&[vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
    click_cell(&mut puzzle, 1, 2);
    let (_, session) = tick(&mut puzzle);
    assert_eq!(session.wins, 1);
    assert!(puzzle.grid().is_identity());
}

#[test]
fn click_above_gap_moves_tile_down() {
    let mut puzzle = puzzle_from(&[vec![0, 1, 2], vec![3, 4, 5], vec![7, 6, 8]]);
    click_cell(&mut puzzle, 1, 2);
    tick(&mut puzzle);
    assert_eq!(
        puzzle.grid().rows(),
        vec![vec![0, 1, 2], vec![3, 4, 8], vec![7, 6, 5]]
    );
}

#[test]
fn click_without_adjacent_gap_is_ignored() {
    let start = vec![vec![8, 1, 2], vec![3, 4, 5], vec![6, 7, 0]];
    let mut puzzle = puzzle_from(&start);
    click_cell(&mut puzzle, 2, 2);
    tick(&mut puzzle);
    assert_eq!(puzzle.grid().rows(), start);
}

#[test]
fn click_on_gap_is_ignored() {
    let start = vec![vec![8, 1, 2], vec![3, 4, 5], vec![6, 7, 0]];
    let mut puzzle = puzzle_from(&start);
    click_cell(&mut puzzle, 0, 0);
    tick(&mut puzzle);
    assert_eq!(puzzle.grid().rows(), start);
}

#[test]
fn only_latest_click_before_a_frame_counts() {
    // Gap at (0,0); both (0,1) and (1,0) are movable.
    let mut puzzle = puzzle_from(&[vec![8, 1, 2], vec![3, 4, 5], vec![6, 7, 0]]);
    click_cell(&mut puzzle, 0, 1);
    click_cell(&mut puzzle, 1, 0);
    tick(&mut puzzle);
    assert_eq!(
        puzzle.grid().rows(),
        vec![vec![3, 1, 2], vec![8, 4, 5], vec![6, 7, 0]]
    );
}

#[test]
fn a_click_is_consumed_once() {
    // Clicking (0,1) moves 1 left into the gap; replaying the same click
    // would move it back.
    let mut puzzle = puzzle_from(&[vec![8, 1, 2], vec![3, 4, 5], vec![6, 7, 0]]);
    click_cell(&mut puzzle, 0, 1);
    tick(&mut puzzle);
    let after_first = puzzle.grid().rows();
    assert_eq!(after_first, vec![vec![1, 8, 2], vec![3, 4, 5], vec![6, 7, 0]]);
    for _ in 0..5 {
        tick(&mut puzzle);
    }
    assert_eq!(puzzle.grid().rows(), after_first);
}

#[test]
fn solve_restores_identity_and_next_frame_wins() {
    let mut puzzle =
        PuzzleGrid::with_rng(PuzzleConfig::new(3, TILE), &mut Rng::with_seed(9)).unwrap();
    puzzle.mark_ready();
    puzzle.solve();
    assert_eq!(
        puzzle.grid().rows(),
        vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]
    );
    assert_eq!(puzzle.check_solved(), GameResult::Win);

    let (canvas, session) = tick(&mut puzzle);
    assert_eq!(session.wins, 1);
    assert_eq!(canvas.clears, 1);
    assert_eq!(canvas.draws.len(), 8);
    assert!(canvas.draws.iter().all(|(s, d)| s == d));
    assert!(!puzzle.is_running());
}

#[test]
fn frame_draws_every_tile_but_the_gap() {
    let mut puzzle = puzzle_from(&[vec![8, 1, 2], vec![3, 4, 5], vec![6, 7, 0]]);
    let (canvas, _) = tick(&mut puzzle);
    assert_eq!(canvas.draws.len(), 8);
    // Tile 0 lives at (2,2) but is cut from the image's top-left corner.
    assert!(canvas.draws.contains(&(
        Rect { x: 0, y: 0, w: TILE, h: TILE },
        Rect { x: 200, y: 200, w: TILE, h: TILE },
    )));
    assert!(!canvas
        .draws
        .iter()
        .any(|(_, d)| d.x == 0 && d.y == 0));
}

#[test]
fn playing_back_to_solved() {
    // Gap starts at (2,1); one move right-to-left finishes the picture.
    let mut puzzle = puzzle_from(&[vec![0, 1, 2], vec![3, 4, 5], vec![6, 8, 7]]);
    click_cell(&mut puzzle, 2, 2);
    let (_, session) = tick(&mut puzzle);
    assert_eq!(session.wins, 0);
    let (_, session) = tick(&mut puzzle);
    assert_eq!(session.wins, 1);
    assert!(!puzzle.is_running());
}

#[test]
fn fractional_clicks_truncate_to_containing_cell() {
    for w in [1u32, 3, 48, 100] {
        let wf = w as f64;
        assert_eq!(pixel_to_cell(wf * 1.9, wf * 0.1, w), (0, 1));
    }
}
