//! Browser entry points, enabled with the `wasm` feature.

use js_sys::Error;
use wasm_bindgen::prelude::*;

use crate::{Board, Puzzle, SolverConfig};

/// Parse a board in the on-disk text format, solve it, and return the drawing produced by [`Puzzle`]'s `Display`.
///
/// Parse errors and unsolvable boards are thrown as JavaScript `Error`s.
#[wasm_bindgen(js_name = solveText)]
pub fn solve_text(text: &str) -> Result<String, JsValue> {
    let board: Board = text.parse().map_err(|err: crate::ParseBoardError| Error::new(&err.to_string()))?;
    let mut puzzle = Puzzle::new(board);
    puzzle.solve(&SolverConfig::default()).map_err(|err| Error::new(&err.to_string()))?;

    Ok(puzzle.to_string())
}
