use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::direction::{self, Direction};
use crate::location::{Coord, Dimension, Location};

/// The largest requirement an island may carry: two bridges in each of four directions.
pub const MAX_REQUIREMENT: u8 = 8;

/// An immutable grid of required bridge counts. A cell holding `0` is open water; any other cell is an island.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder) or parsed from text with [`str::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) requirements: Array2<u8>,
    // rows, cols
    pub(crate) dims: (Dimension, Dimension),
}

impl Board {
    /// The number of rows on this board.
    pub fn rows(&self) -> Coord {
        self.dims.0.get()
    }

    /// The number of columns on this board.
    pub fn cols(&self) -> Coord {
        self.dims.1.get()
    }

    /// Whether `location` lies on this board.
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.rows() && location.1 < self.cols()
    }

    /// The number of bridges the island at `location` must end up with.
    ///
    /// Open water and out of bounds locations require `0`.
    pub fn requirement(&self, location: Location) -> usize {
        self.requirements.get(location.as_index()).copied().unwrap_or(0) as usize
    }

    /// Whether an island sits at `location`.
    pub fn is_island(&self, location: Location) -> bool {
        self.requirement(location) > 0
    }

    /// Every island on the board, in row-major order.
    pub fn islands(&self) -> impl Iterator<Item = Location> + '_ {
        self.requirements.indexed_iter()
            .filter(|(_, req)| **req > 0)
            .map(|(index, _)| Location::from(index))
    }

    /// The number of islands on the board.
    pub fn island_count(&self) -> usize {
        self.requirements.iter().filter(|req| **req > 0).count()
    }

    /// The sum of all island requirements. Twice the number of bridges in any solution.
    pub fn total_requirement(&self) -> usize {
        self.requirements.iter().map(|req| *req as usize).sum()
    }

    /// Walk from `from` along `direction` and return the first island met, if any.
    pub fn neighbor(&self, from: Location, direction: Direction) -> Option<Location> {
        let mut cursor = direction.attempt_from(from);
        while self.contains(cursor) {
            if self.is_island(cursor) {
                return Some(cursor);
            }
            cursor = direction.attempt_from(cursor);
        }

        None
    }

    /// Every island visible from `from` in a straight line with no island in between.
    pub fn neighbors(&self, from: Location) -> impl Iterator<Item = (Direction, Location)> + '_ {
        direction::all().filter_map(move |dir| self.neighbor(from, dir).map(|loc| (dir, loc)))
    }

    /// Locations strictly between `a` and `b`.
    ///
    /// Empty unless `a` and `b` share a row or a column.
    pub fn cells_between(a: Location, b: Location) -> Vec<Location> {
        if a.0 == b.0 && a.1 != b.1 {
            ((a.1.min(b.1) + 1)..a.1.max(b.1)).map(|col| Location(a.0, col)).collect_vec()
        } else if a.1 == b.1 && a.0 != b.0 {
            ((a.0.min(b.0) + 1)..a.0.max(b.0)).map(|row| Location(row, a.1)).collect_vec()
        } else {
            Vec::new()
        }
    }

    /// Render the requirement grid in the text format accepted by [`str::parse`], including the header line.
    pub fn to_text(&self) -> String {
        let mut out = format!("{},{}\n", self.rows(), self.cols());
        for row in self.requirements.rows() {
            out.extend(row.iter().map(|req| char::from(b'0' + *req)));
            out.push('\n');
        }

        out
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(self.requirements.map(|req| match req {
            0 => '.',
            n => char::from(b'0' + *n),
        })))
    }
}

/// Dump the specified [`ndarray::Array2`] one row per line.
pub(crate) fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}
