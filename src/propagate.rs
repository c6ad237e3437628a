use itertools::Itertools;

use crate::board::Board;
use crate::ledger::BridgeLedger;
use crate::legality::{add_checked, can_add_bridge, remaining};
use crate::location::Location;
use crate::steps::StepLog;

/// A neighbour that can still take bridges from some island, and how many.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Opening {
    pub(crate) neighbor: Location,
    // bounded by the neighbour's remaining need and the pair's remaining room, not by the island's own need
    pub(crate) capacity: usize,
}

/// Every neighbour of `island` that one more bridge could legally reach right now.
pub(crate) fn openings(board: &Board, ledger: &BridgeLedger, island: Location) -> Vec<Opening> {
    board.neighbors(island)
        .filter(|(_, neighbor)| can_add_bridge(board, ledger, island, *neighbor).is_ok())
        .map(|(_, neighbor)| Opening {
            neighbor,
            capacity: remaining(board, ledger, neighbor).min(2 - ledger.count_between(island, neighbor)),
        })
        .filter(|opening| opening.capacity > 0)
        .collect_vec()
}

/// Lays bridges that are forced by island requirements alone, without guessing.
///
/// Two deductions are applied to every unsatisfied island until neither changes anything:
/// an island with a single reachable neighbour sends it as many bridges as both can take,
/// and an island whose neighbours can take exactly what it still needs sends each of them their full share.
/// Bridges are only ever added, each one through the legality gate, and each is recorded in the step log.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Propagator {
    max_rounds: usize,
}

impl Default for Propagator {
    fn default() -> Self {
        Self { max_rounds: 10_000 }
    }
}

impl Propagator {
    /// A propagator that gives up after `max_rounds` passes over the board even if it is still making progress.
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    /// Apply forced bridges to `ledger` until a fixed point, returning how many single bridges were laid.
    ///
    /// Running this twice in a row lays nothing the second time.
    pub fn run(&self, board: &Board, ledger: &mut BridgeLedger, steps: &mut StepLog) -> usize {
        let mut laid = 0;

        for round in 0..self.max_rounds {
            let laid_this_round = self.round(board, ledger, steps);
            log::trace!("propagation round {round} laid {laid_this_round} bridges");
            if laid_this_round == 0 {
                log::debug!("propagation reached a fixed point after {round} rounds, {laid} bridges forced");
                return laid;
            }
            laid += laid_this_round;
        }

        log::debug!("propagation stopped after {} rounds, {laid} bridges forced", self.max_rounds);
        laid
    }

    fn round(&self, board: &Board, ledger: &mut BridgeLedger, steps: &mut StepLog) -> usize {
        let mut laid = 0;

        for island in board.islands() {
            let need = remaining(board, ledger, island);
            if need == 0 {
                continue;
            }

            let openings = openings(board, ledger, island);
            match openings.as_slice() {
                [] => {}
                [only] => {
                    log::trace!("{island} can only reach {}", only.neighbor);
                    laid += lay(board, ledger, steps, island, only.neighbor, need.min(only.capacity));
                }
                _ => {
                    if openings.iter().map(|opening| opening.capacity).sum::<usize>() == need {
                        log::trace!("{island} needs everything its neighbours can take");
                        for opening in &openings {
                            laid += lay(board, ledger, steps, island, opening.neighbor, opening.capacity);
                        }
                    }
                }
            }
        }

        laid
    }
}

// lay up to `amount` single bridges, stopping at the first one the gate refuses
pub(crate) fn lay(board: &Board, ledger: &mut BridgeLedger, steps: &mut StepLog, from: Location, to: Location, amount: usize) -> usize {
    let mut laid = 0;
    while laid < amount && add_checked(board, ledger, from, to).is_ok() {
        steps.record_add(from, to);
        laid += 1;
    }

    laid
}
