#![warn(missing_docs)]

//! # `hashi`
//!
//! A rules engine and solver for [Hashiwokakero](https://en.wikipedia.org/wiki/Hashiwokakero), also known as Bridges.
//! Build a [`Board`] with a [`BoardBuilder`] or parse one from text, wrap it in a [`Puzzle`],
//! then either lay bridges one at a time with [`Puzzle::try_add`] or call [`Puzzle::solve`].
//!
//! # Rules
//! Islands carry a number from 1 to 8. Bridges run horizontally or vertically between two islands,
//! at most two bridges join any pair, bridges never cross each other or pass over an island,
//! every island ends up with exactly as many bridges as its number, and all islands form one connected group.
//!
//! # Internals
//! Every edit, whoever makes it, goes through [`legality::can_add_bridge`], so the [`BridgeLedger`] never holds a crossing or an over-full island.
//! Solving is a two stage affair:
//!
//! 1. A [`Propagator`] lays bridges that the island numbers force outright: an island with one reachable neighbour,
//! or an island whose neighbours can take exactly what it still needs.
//! 2. A [`BacktrackingSolver`] picks the island with the fewest reachable neighbours (ties going to the one needing the most bridges),
//! tries each neighbour with one bridge and then two, and takes the bridges back on a dead end.
//!
//! Every bridge laid in either stage is recorded in a [`StepLog`] so a front-end can play the solution back.

pub use board::Board;
pub use bridge::{Bridge, BridgeCount, Orientation};
pub use builder::{BoardBuilder, BuilderInvalidReason, ParseBoardError};
pub use direction::Direction;
pub use ledger::BridgeLedger;
pub use legality::IllegalMove;
pub use location::{Coord, Dimension, Location};
pub use propagate::Propagator;
pub use puzzle::Puzzle;
pub use solver::{BacktrackingSolver, SolveStats, SolverConfig, SolverFailure};
pub use steps::{ReplayError, Step, StepLog};

pub mod board;
pub mod bridge;
pub mod builder;
pub mod connectivity;
pub(crate) mod direction;
pub mod ledger;
pub mod legality;
pub(crate) mod location;
pub mod propagate;
pub(crate) mod puzzle;
pub mod solver;
pub mod steps;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;
