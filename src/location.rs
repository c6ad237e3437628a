use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// A single board coordinate.
pub type Coord = usize;
/// A board extent; boards always have at least one row and one column.
pub type Dimension = NonZero<Coord>;

/// A location `(row, col)` on a board. The top left corner is `Location(0, 0)`.
///
/// The derived ordering is row-major, which is also the order islands are visited in.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    // wraps on underflow; callers bounds-check the result against the board
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether `self` and `other` share a row or a column, but not both.
    pub fn is_aligned_with(&self, other: &Location) -> bool {
        (self.0 == other.0) != (self.1 == other.1)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
