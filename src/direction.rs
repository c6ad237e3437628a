use std::cmp::Ordering;

use strum::VariantArray;

use crate::location::Location;

/// The four orthogonal steps a bridge may be laid along.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result is not bounds-checked; stepping off the top or left edge wraps to a huge coordinate.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Determine the direction one must travel in a straight line to get from `a` to `b`.
    ///
    /// Returns [`None`] if the two locations are equal or do not share a row or column.
    pub fn between(a: Location, b: Location) -> Option<Self> {
        if !a.is_aligned_with(&b) {
            return None;
        }

        Some(match (a.0.cmp(&b.0), a.1.cmp(&b.1)) {
            (Ordering::Greater, _) => Self::Up,
            (Ordering::Less, _) => Self::Down,
            (_, Ordering::Greater) => Self::Left,
            _ => Self::Right,
        })
    }

    /// Whether a bridge laid along this direction is horizontal.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Iterate every direction, in declaration order.
pub(crate) fn all() -> impl Iterator<Item = Direction> {
    Direction::VARIANTS.iter().copied()
}
