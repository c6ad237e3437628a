use std::cmp::Reverse;

use crate::board::Board;
use crate::connectivity::is_fully_connected;
use crate::ledger::BridgeLedger;
use crate::legality::remaining;
use crate::location::Location;
use crate::propagate::{lay, openings, Opening, Propagator};
use crate::steps::StepLog;

/// Knobs for [`solve`](crate::Puzzle::solve) and [`BacktrackingSolver`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SolverConfig {
    /// Search nodes visited before the backtracking search gives up with [`SolverFailure::SearchAborted`].
    pub max_iterations: usize,
    /// Passes over the board the forced-move propagator may make.
    pub max_propagation_rounds: usize,
    /// Whether to lay forced bridges before searching.
    pub propagate: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1_000_000,
            max_propagation_rounds: 10_000,
            propagate: true,
        }
    }
}

/// Reasons a solve may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SolverFailure {
    /// Every branch was explored and none of them solves the board.
    #[display("board has no solution")]
    Unsolvable,
    /// The search visited more nodes than [`SolverConfig::max_iterations`] allows.
    #[display("search aborted after {iterations} iterations")]
    SearchAborted {
        /// Nodes visited before giving up.
        iterations: usize,
    },
    /// An island already had more bridges than it requires.
    /// Only reachable if something laid bridges without consulting the legality gate.
    #[display("an island has more bridges than it requires")]
    InvariantViolation,
}

/// Counters describing a successful solve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SolveStats {
    /// Single bridges laid by the propagator.
    pub forced_steps: usize,
    /// Single bridges laid by the search that ended up in the solution.
    pub search_steps: usize,
    /// Search nodes visited.
    pub iterations: usize,
}

enum Branch {
    Solved,
    DeadEnd,
}

/// Exhaustive search over bridge placements, most constrained island first.
///
/// The ledger is edited in place one bridge at a time, always through the legality gate,
/// and every bridge taken back on a dead end is also popped off the step log.
pub struct BacktrackingSolver<'a> {
    board: &'a Board,
    max_iterations: usize,
    iterations: usize,
}

impl<'a> BacktrackingSolver<'a> {
    /// A solver for `board` that visits at most `max_iterations` search nodes.
    pub fn new(board: &'a Board, max_iterations: usize) -> Self {
        Self {
            board,
            max_iterations,
            iterations: 0,
        }
    }

    /// Search nodes visited so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Extend `ledger` into a full solution, appending every bridge laid to `steps`.
    ///
    /// On success the ledger holds a solution. On any failure both `ledger` and `steps` are exactly as they were on entry.
    pub fn solve(&mut self, ledger: &mut BridgeLedger, steps: &mut StepLog) -> Result<usize, SolverFailure> {
        let entry_ledger = ledger.clone();
        let entry_len = steps.len();
        self.iterations = 0;

        let failure = match self.search(ledger, steps) {
            Ok(Branch::Solved) => {
                log::debug!("search solved the board after {} iterations", self.iterations);
                return Ok(steps.len() - entry_len);
            }
            Ok(Branch::DeadEnd) => {
                log::debug!("search exhausted after {} iterations", self.iterations);
                SolverFailure::Unsolvable
            }
            Err(failure @ SolverFailure::SearchAborted { iterations }) => {
                log::warn!("search aborted after {iterations} iterations");
                failure
            }
            Err(failure) => {
                log::error!("search stopped: {failure}");
                failure
            }
        };

        *ledger = entry_ledger;
        steps.truncate(entry_len);
        Err(failure)
    }

    fn is_goal(&self, ledger: &BridgeLedger) -> bool {
        self.board.islands().all(|island| ledger.degree(island) == self.board.requirement(island))
            && (!ledger.is_empty() || self.board.island_count() == 0)
            && is_fully_connected(self.board, ledger)
    }

    // the unsatisfied island with the fewest openings, ties going to the one needing the most bridges;
    // `None` means every island is satisfied
    fn select(&self, ledger: &BridgeLedger) -> Option<(Location, usize, Vec<Opening>)> {
        self.board.islands()
            .map(|island| (island, remaining(self.board, ledger, island)))
            .filter(|(_, need)| *need > 0)
            .map(|(island, need)| (island, need, openings(self.board, ledger, island)))
            .min_by_key(|(_, need, openings)| (openings.len(), Reverse(*need)))
    }

    fn search(&mut self, ledger: &mut BridgeLedger, steps: &mut StepLog) -> Result<Branch, SolverFailure> {
        self.iterations += 1;
        if self.iterations > self.max_iterations {
            return Err(SolverFailure::SearchAborted { iterations: self.iterations - 1 });
        }

        if self.is_goal(ledger) {
            return Ok(Branch::Solved);
        }

        if self.board.islands().any(|island| ledger.degree(island) > self.board.requirement(island)) {
            return Err(SolverFailure::InvariantViolation);
        }

        let Some((island, need, openings)) = self.select(ledger) else {
            // every island is satisfied but the bridges do not form one group
            return Ok(Branch::DeadEnd);
        };

        if openings.iter().map(|opening| opening.capacity).sum::<usize>() < need {
            log::trace!("{island} needs {need} more but cannot get them");
            return Ok(Branch::DeadEnd);
        }

        for opening in openings {
            let most = need.min(opening.capacity);
            for amount in 1..=most {
                let laid = lay(self.board, ledger, steps, island, opening.neighbor, amount);
                if laid < amount {
                    self.undo(ledger, steps, island, opening.neighbor, laid);
                    break;
                }

                log::trace!("try {amount} bridge(s) {island} -> {}", opening.neighbor);
                if let Branch::Solved = self.search(ledger, steps)? {
                    return Ok(Branch::Solved);
                }
                self.undo(ledger, steps, island, opening.neighbor, amount);
            }
        }

        Ok(Branch::DeadEnd)
    }

    fn undo(&self, ledger: &mut BridgeLedger, steps: &mut StepLog, from: Location, to: Location, amount: usize) {
        for _ in 0..amount {
            ledger.remove(from, to);
            steps.pop();
        }
    }
}

/// Run the configured pipeline on `ledger`: forced moves first (if enabled), then the backtracking search.
///
/// On failure `ledger` and `steps` are restored to their state on entry.
pub fn solve(board: &Board, ledger: &mut BridgeLedger, steps: &mut StepLog, config: &SolverConfig) -> Result<SolveStats, SolverFailure> {
    let entry_ledger = ledger.clone();
    let entry_len = steps.len();

    let forced_steps = match config.propagate {
        true => Propagator::with_max_rounds(config.max_propagation_rounds).run(board, ledger, steps),
        false => 0,
    };

    let mut solver = BacktrackingSolver::new(board, config.max_iterations);
    match solver.solve(ledger, steps) {
        Ok(search_steps) => {
            let stats = SolveStats { forced_steps, search_steps, iterations: solver.iterations() };
            log::info!("solved: {} forced, {} searched, {} iterations", stats.forced_steps, stats.search_steps, stats.iterations);
            Ok(stats)
        }
        Err(failure) => {
            log::info!("no solution: {failure}");
            *ledger = entry_ledger;
            steps.truncate(entry_len);
            Err(failure)
        }
    }
}
