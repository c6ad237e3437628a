use std::ops::IndexMut;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};

use crate::board::{Board, MAX_REQUIREMENT};
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BuilderInvalidReason {
    /// An island was placed outside the bounds specified by `dims` on a builder.
    #[display("island placed outside the board")]
    FeatureOutOfBounds,
    /// An island was given a requirement of `0` or more than [`MAX_REQUIREMENT`].
    #[display("island requirement must be between 1 and 8")]
    BadRequirement,
    /// The board has no islands at all.
    #[display("board has no islands")]
    NoIslands,
}

/// A builder for rectangular Hashiwokakero boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once a builder has become invalid, further calls do nothing and [`build`](Self::build) reports why.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    cells: Array2<u8>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        let side = Dimension::new(7).unwrap_or(Dimension::MIN);
        Self::with_dims((side, side))
    }
}

impl BoardBuilder {
    /// Construct a new, empty [`Self`] with the specified dimensions, specified in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::zeros((dims.0.get(), dims.1.get())),
            invalid_reasons: Default::default(),
        }
    }

    fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Place an island requiring `requirement` bridges at `location`, replacing any island already there.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds,
    /// or a [`BadRequirement`](BuilderInvalidReason::BadRequirement) invalid state if `requirement` is not in `1..=8`.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_island(&mut self, location: Location, requirement: u8) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        if !(1..=MAX_REQUIREMENT).contains(&requirement) {
            self.invalid_reasons.push(BuilderInvalidReason::BadRequirement);
            return self;
        }

        self.cells.index_mut(location.as_index()).assign_elem(requirement);
        self
    }

    /// Turn `location` back into open water.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn remove_island(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.cells.index_mut(location.as_index()).assign_elem(0);
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, or holds no islands, the returned [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        if self.cells.iter().all(|req| *req == 0) {
            return Err(vec![BuilderInvalidReason::NoIslands]);
        }

        Ok(Board {
            requirements: self.cells.clone(),
            dims: self.dims,
        })
    }
}

/// Reasons the text form of a board could not be read.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The input was empty.
    #[display("missing `rows,cols` header line")]
    MissingHeader,
    /// The first line was not two positive integers separated by a comma.
    #[display("malformed header line `{line}`")]
    BadHeader {
        /// The offending line.
        line: String,
    },
    /// Fewer grid lines than the header announced.
    #[display("expected {expected} rows, found {found}")]
    RowCount {
        /// Rows announced by the header.
        expected: usize,
        /// Rows present.
        found: usize,
    },
    /// A grid line of the wrong width.
    #[display("row {row} has {found} cells, expected {expected}")]
    RowLength {
        /// Zero-based row index.
        row: usize,
        /// Columns announced by the header.
        expected: usize,
        /// Cells present.
        found: usize,
    },
    /// A cell that is not a digit from `0` to `8`.
    #[display("unexpected character {found:?} at {location}")]
    BadCell {
        /// Where the character was found.
        location: Location,
        /// The character itself.
        found: char,
    },
    /// The grid was readable but does not describe a usable board.
    #[display("invalid board: {reasons:?}")]
    Invalid {
        /// Why the board was rejected.
        reasons: Vec<BuilderInvalidReason>,
    },
}

fn parse_header(line: &str) -> Option<(Dimension, Dimension)> {
    let (rows, cols) = line.split(',').map(str::trim).collect_tuple()?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Read a board in the on-disk format: a `rows,cols` header line followed by `rows` lines of digits, `0` for open water.
    ///
    /// Blank lines after the grid are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim);

        let header = lines.next().filter(|line| !line.is_empty()).ok_or(ParseBoardError::MissingHeader)?;
        let dims = parse_header(header).ok_or_else(|| ParseBoardError::BadHeader { line: header.to_owned() })?;

        let grid = lines.take(dims.0.get()).collect_vec();
        let found = grid.iter().filter(|line| !line.is_empty()).count();
        if grid.len() < dims.0.get() || found < dims.0.get() {
            return Err(ParseBoardError::RowCount { expected: dims.0.get(), found });
        }

        let mut builder = BoardBuilder::with_dims(dims);
        for (row, line) in grid.into_iter().enumerate() {
            let width = line.chars().count();
            if width != dims.1.get() {
                return Err(ParseBoardError::RowLength { row, expected: dims.1.get(), found: width });
            }

            for (col, ch) in line.chars().enumerate() {
                let location = Location(row, col);
                let requirement = ch.to_digit(10)
                    .filter(|digit| *digit <= MAX_REQUIREMENT as u32)
                    .ok_or(ParseBoardError::BadCell { location, found: ch })?;
                if requirement > 0 {
                    builder.add_island(location, requirement as u8);
                }
            }
        }

        builder.build().map_err(|reasons| ParseBoardError::Invalid { reasons })
    }
}
