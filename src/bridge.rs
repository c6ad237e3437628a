use unordered_pair::UnorderedPair;

use crate::direction::Direction;
use crate::location::Location;

/// How many parallel bridges join a pair of islands. Zero bridges is represented by absence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum BridgeCount {
    /// One bridge.
    Single,
    /// Two parallel bridges, the most a pair may hold.
    Double,
}

impl BridgeCount {
    /// The number of bridges as an integer.
    #[inline]
    pub fn get(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }

    /// One more bridge, if the pair has room for it.
    pub fn increment(self) -> Option<Self> {
        match self {
            Self::Single => Some(Self::Double),
            Self::Double => None,
        }
    }

    /// One fewer bridge, or [`None`] if the last bridge is gone.
    pub fn decrement(self) -> Option<Self> {
        match self {
            Self::Single => None,
            Self::Double => Some(Self::Single),
        }
    }
}

/// Which way a bridge runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Both ends share a row.
    Horizontal,
    /// Both ends share a column.
    Vertical,
}

impl Orientation {
    /// The orientation of a bridge from `a` to `b`, or [`None`] if no straight bridge can join them.
    pub fn of(a: Location, b: Location) -> Option<Self> {
        Direction::between(a, b).map(|dir| match dir.is_horizontal() {
            true => Self::Horizontal,
            false => Self::Vertical,
        })
    }
}

/// Build the ledger key for a bridge between `a` and `b`, with the lower location first.
pub(crate) fn span(a: Location, b: Location) -> UnorderedPair<Location> {
    if a <= b {
        UnorderedPair(a, b)
    } else {
        UnorderedPair(b, a)
    }
}

/// One or two parallel bridges between a pair of islands.
///
/// The endpoints are stored with the lower location first; orientation is derived from them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Bridge {
    /// The two islands joined.
    pub ends: UnorderedPair<Location>,
    /// How many bridges join them.
    pub count: BridgeCount,
}

impl Bridge {
    /// The lower (row-major) endpoint.
    pub fn start(&self) -> Location {
        self.ends.0
    }

    /// The higher (row-major) endpoint.
    pub fn end(&self) -> Location {
        self.ends.1
    }

    /// Which way this bridge runs.
    pub fn orientation(&self) -> Orientation {
        match self.ends.0.0 == self.ends.1.0 {
            true => Orientation::Horizontal,
            false => Orientation::Vertical,
        }
    }

    /// Whether this bridge touches `location` at either end.
    pub fn touches(&self, location: Location) -> bool {
        self.ends.0 == location || self.ends.1 == location
    }

    /// Whether this bridge would cross a bridge laid from `a` to `b`.
    pub fn crosses(&self, a: Location, b: Location) -> bool {
        segments_cross((self.ends.0, self.ends.1), (a, b))
    }
}

/// Whether two straight bridges intersect somewhere other than a shared island.
///
/// Only a horizontal and a vertical segment can cross; collinear segments never do.
pub fn segments_cross(first: (Location, Location), second: (Location, Location)) -> bool {
    let (s1, e1) = first;
    let (s2, e2) = second;

    // meeting at an island is a junction, not a crossing
    if s1 == s2 || s1 == e2 || e1 == s2 || e1 == e2 {
        return false;
    }

    let (horizontal, vertical) = match (Orientation::of(s1, e1), Orientation::of(s2, e2)) {
        (Some(Orientation::Horizontal), Some(Orientation::Vertical)) => ((s1, e1), (s2, e2)),
        (Some(Orientation::Vertical), Some(Orientation::Horizontal)) => ((s2, e2), (s1, e1)),
        _ => return false,
    };

    let h_row = horizontal.0.0;
    let (h_min, h_max) = (horizontal.0.1.min(horizontal.1.1), horizontal.0.1.max(horizontal.1.1));
    let v_col = vertical.0.1;
    let (v_min, v_max) = (vertical.0.0.min(vertical.1.0), vertical.0.0.max(vertical.1.0));

    v_min < h_row && h_row < v_max && h_min < v_col && v_col < h_max
}
