use std::fmt::{Display, Formatter};

use ndarray::{Array2, AssignElem};

use crate::board::{print, Board};
use crate::bridge::{BridgeCount, Orientation};
use crate::connectivity::is_fully_connected;
use crate::ledger::BridgeLedger;
use crate::legality::{add_checked, remove_checked, IllegalMove};
use crate::location::Location;
use crate::solver::{self, SolveStats, SolverConfig, SolverFailure};
use crate::steps::StepLog;

/// A game session: one [`Board`] together with the bridges laid on it so far.
///
/// Interactive edits and the solver both go through this object, one at a time, so the ledger only ever has a single writer.
#[derive(Clone, Debug)]
pub struct Puzzle {
    board: Board,
    ledger: BridgeLedger,
    steps: StepLog,
}

impl From<Board> for Puzzle {
    fn from(board: Board) -> Self {
        Self::new(board)
    }
}

impl Puzzle {
    /// Start a session on `board` with no bridges laid.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ledger: BridgeLedger::new(),
            steps: StepLog::new(),
        }
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The bridges laid so far.
    pub fn ledger(&self) -> &BridgeLedger {
        &self.ledger
    }

    /// The bridges laid by the last [`solve`](Self::solve), in the order they were found.
    pub fn steps(&self) -> &StepLog {
        &self.steps
    }

    /// The number of bridges currently touching `location`.
    pub fn degree(&self, location: Location) -> usize {
        self.ledger.degree(location)
    }

    /// Lay one bridge between `a` and `b` if the rules allow it.
    pub fn try_add(&mut self, a: Location, b: Location) -> Result<(), IllegalMove> {
        add_checked(&self.board, &mut self.ledger, a, b)
    }

    /// Take away one bridge between `a` and `b` if there is one.
    pub fn try_remove(&mut self, a: Location, b: Location) -> Result<(), IllegalMove> {
        remove_checked(&mut self.ledger, a, b)
    }

    /// Remove every bridge and forget the step log.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.steps.clear();
    }

    /// Whether every island has exactly the bridges it requires. Says nothing about connectivity.
    pub fn is_complete(&self) -> bool {
        self.board.islands().all(|island| self.ledger.degree(island) == self.board.requirement(island))
    }

    /// Whether the puzzle is won: every island is complete and all islands form a single group.
    pub fn is_solved(&self) -> bool {
        self.is_complete()
            && (!self.ledger.is_empty() || self.board.island_count() == 0)
            && is_fully_connected(&self.board, &self.ledger)
    }

    /// Clear the board and solve it from scratch, recording every bridge in [`steps`](Self::steps).
    ///
    /// On failure the bridges and step log are put back exactly as they were before the call.
    pub fn solve(&mut self, config: &SolverConfig) -> Result<SolveStats, SolverFailure> {
        let saved = (self.ledger.clone(), self.steps.clone());
        self.reset();

        let result = solver::solve(&self.board, &mut self.ledger, &mut self.steps, config);
        if result.is_err() {
            (self.ledger, self.steps) = saved;
        }

        result
    }
}

impl Display for Puzzle {
    /// Islands are drawn as their requirement, single bridges as `-` or `|`, and double bridges as `=` or `H`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut cells = Array2::from_elem((self.board.rows(), self.board.cols()), '.');

        for bridge in self.ledger.iter() {
            let glyph = match (bridge.orientation(), bridge.count) {
                (Orientation::Horizontal, BridgeCount::Single) => '-',
                (Orientation::Horizontal, BridgeCount::Double) => '=',
                (Orientation::Vertical, BridgeCount::Single) => '|',
                (Orientation::Vertical, BridgeCount::Double) => 'H',
            };
            for location in Board::cells_between(bridge.start(), bridge.end()) {
                if let Some(cell) = cells.get_mut(location.as_index()) {
                    cell.assign_elem(glyph);
                }
            }
        }

        for island in self.board.islands() {
            if let Some(cell) = cells.get_mut(island.as_index()) {
                let requirement = self.board.requirement(island);
                cell.assign_elem(char::from_digit(requirement as u32, 10).unwrap_or('?'));
            }
        }

        write!(f, "{}", print(cells))
    }
}
