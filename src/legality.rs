//! The single gate every bridge edit passes through.
//!
//! Interactive edits, forced moves, and the backtracking search all consult [`can_add_bridge`] before touching a [`BridgeLedger`],
//! which is what keeps the ledger free of crossings and over-saturated islands.

use crate::board::Board;
use crate::ledger::BridgeLedger;
use crate::location::Location;

/// Why a bridge may not be laid or taken away.
///
/// Carries no positions so that the verdict for `(a, b)` is identical to the verdict for `(b, a)`.
/// Mapping these to user-facing text is up to the presentation layer; [`Display`](std::fmt::Display) is a plain default.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, derive_more::Display, derive_more::Error)]
pub enum IllegalMove {
    /// One of the endpoints is off the board or open water.
    #[display("both ends of a bridge must be islands")]
    NotAnIsland,
    /// Both endpoints are the same island.
    #[display("an island cannot be joined to itself")]
    SelfConnection,
    /// The endpoints share neither a row nor a column.
    #[display("bridges must run horizontally or vertically")]
    NonOrthogonal,
    /// Another island sits between the endpoints.
    #[display("another island is in the way")]
    Obstruction,
    /// The bridge would cross an existing bridge.
    #[display("bridges cannot cross")]
    Crossing,
    /// The pair already holds two bridges.
    #[display("these islands already share two bridges")]
    CapacityExceeded,
    /// One of the endpoints already has all the bridges it needs.
    #[display("island already has all its bridges")]
    IslandSaturated,
    /// There is no bridge between the endpoints to take away.
    #[display("no bridge to remove")]
    NoBridge,
}

/// Whether an island sits strictly between `start` and `end`.
///
/// `start` and `end` are assumed to share a row or a column.
pub fn is_obstructed(board: &Board, start: Location, end: Location) -> bool {
    Board::cells_between(start, end).into_iter().any(|loc| board.is_island(loc))
}

/// Whether a bridge from `start` to `end` would cross any bridge already in `ledger`.
pub fn would_cross(ledger: &BridgeLedger, start: Location, end: Location) -> bool {
    ledger.iter().any(|bridge| bridge.crosses(start, end))
}

/// How many more bridges `location` still needs, `0` if it is saturated (or over-saturated).
pub fn remaining(board: &Board, ledger: &BridgeLedger, location: Location) -> usize {
    board.requirement(location).saturating_sub(ledger.degree(location))
}

/// Decide whether one more bridge may be laid between `start` and `end`.
///
/// Rules are checked in a fixed order and the first one broken is reported:
/// endpoints must be islands, distinct, and aligned; nothing may stand between them;
/// the bridge may not cross another; the pair may not already hold two bridges;
/// and neither island may already be saturated.
pub fn can_add_bridge(board: &Board, ledger: &BridgeLedger, start: Location, end: Location) -> Result<(), IllegalMove> {
    if !board.is_island(start) || !board.is_island(end) {
        return Err(IllegalMove::NotAnIsland);
    }

    if start == end {
        return Err(IllegalMove::SelfConnection);
    }

    if !start.is_aligned_with(&end) {
        return Err(IllegalMove::NonOrthogonal);
    }

    if is_obstructed(board, start, end) {
        return Err(IllegalMove::Obstruction);
    }

    if would_cross(ledger, start, end) {
        return Err(IllegalMove::Crossing);
    }

    if ledger.count_between(start, end) >= 2 {
        return Err(IllegalMove::CapacityExceeded);
    }

    if ledger.degree(start) >= board.requirement(start) || ledger.degree(end) >= board.requirement(end) {
        return Err(IllegalMove::IslandSaturated);
    }

    Ok(())
}

/// Decide whether a bridge between `start` and `end` may be taken away, which is the case exactly when one exists.
pub fn can_remove_bridge(ledger: &BridgeLedger, start: Location, end: Location) -> Result<(), IllegalMove> {
    match ledger.get(start, end) {
        Some(_) => Ok(()),
        None => Err(IllegalMove::NoBridge),
    }
}

/// Lay a bridge between `start` and `end` if, and only if, [`can_add_bridge`] allows it.
pub fn add_checked(board: &Board, ledger: &mut BridgeLedger, start: Location, end: Location) -> Result<(), IllegalMove> {
    can_add_bridge(board, ledger, start, end)?;
    ledger.add(start, end);
    Ok(())
}

/// Take away a bridge between `start` and `end` if, and only if, [`can_remove_bridge`] allows it.
pub fn remove_checked(ledger: &mut BridgeLedger, start: Location, end: Location) -> Result<(), IllegalMove> {
    can_remove_bridge(ledger, start, end)?;
    ledger.remove(start, end);
    Ok(())
}
