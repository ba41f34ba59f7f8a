//! Directions a road can run in.

use strum::VariantArray;

use crate::location::Coordinate;

/// The four directions a road can leave a square cell by.
///
/// Variants are declared in canonical order; [`VARIANTS`](VariantArray::VARIANTS) and every connection list in the catalog follow it.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards higher columns.
    Right,
    /// Towards higher rows.
    Down,
    /// Towards column 0.
    Left,
}

impl Direction {
    /// Directions which, stepping from a cell, land on a cell later in row-major order.
    pub(crate) const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Unit step `(d_row, d_column)`.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// The direction pointing back the way `self` came.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Take one step from `location` in this direction.
    ///
    /// The result is not bounds checked; see [`Coordinate::offset_by`].
    pub fn attempt_from(&self, location: Coordinate) -> Coordinate {
        location.offset_by(self.delta())
    }
}
