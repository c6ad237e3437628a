use crate::board::Board;
use crate::ledger::BridgeLedger;
use crate::legality::{add_checked, IllegalMove};
use crate::location::Location;

/// One recorded edit to a [`BridgeLedger`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Step {
    /// A single bridge was laid between the two islands.
    Added {
        /// The island the bridge was laid from.
        from: Location,
        /// The island the bridge was laid to.
        to: Location,
    },
}

/// An ordered record of the bridges laid while solving.
///
/// The search pops from the tail to undo a branch; a presenter reads from the head to play a solution back one bridge at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepLog {
    steps: Vec<Step>,
}

/// A recorded step that the legality gate refused during playback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
#[display("step {index} cannot be replayed: {reason}")]
pub struct ReplayError {
    /// Position of the refused step in the log.
    pub index: usize,
    /// Why it was refused.
    pub reason: IllegalMove,
}

impl StepLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Record that a bridge was laid between `from` and `to`.
    pub fn record_add(&mut self, from: Location, to: Location) {
        self.push(Step::Added { from, to });
    }

    /// Remove and return the most recent step.
    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    /// Drop every step after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.steps.truncate(len);
    }

    /// Forget every step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// The number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every step, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Step> + '_ {
        self.steps.iter()
    }

    /// Apply the step at `index` to `ledger` through the legality gate.
    ///
    /// Returns `Ok(false)` once `index` runs past the end of the log.
    pub fn replay_step(&self, index: usize, board: &Board, ledger: &mut BridgeLedger) -> Result<bool, ReplayError> {
        match self.steps.get(index) {
            None => Ok(false),
            Some(Step::Added { from, to }) => add_checked(board, ledger, *from, *to)
                .map(|()| true)
                .map_err(|reason| ReplayError { index, reason }),
        }
    }

    /// Clear `ledger` and apply every step in order.
    ///
    /// Stops at the first step the legality gate refuses, leaving the steps before it applied.
    pub fn replay(&self, board: &Board, ledger: &mut BridgeLedger) -> Result<(), ReplayError> {
        ledger.clear();
        for index in 0..self.steps.len() {
            self.replay_step(index, board, ledger)?;
        }

        Ok(())
    }
}
