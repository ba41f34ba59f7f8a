use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::str::FromStr;

use ndarray::Ix;
use thiserror::Error;

type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

/// A location `(row, column)` on a board. The top left corner is `Coordinate(0, 0)`.
///
/// Boards label rows with letters and columns with 1-based numbers, so `Coordinate(1, 2)` is also written `b3`.
/// See [`Coordinate::label`] and the [`FromStr`] implementation.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Coordinate(pub Coord, pub Coord);

impl Coordinate {
    /// The row, counted from the top.
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column, counted from the left.
    pub fn column(&self) -> Coord {
        self.1
    }

    /// Offset by `(d_row, d_column)`.
    ///
    /// Stepping off the top or left edge wraps around to a huge index, which no board considers in bounds.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    /// The board label of this coordinate, e.g. `b3` for `Coordinate(1, 2)`.
    pub fn label(&self) -> String {
        format!("{}{}", row_label(self.0), self.1 + 1)
    }
}

impl From<(Ix, Ix)> for Coordinate {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// Letters naming `row`: `a` through `z`, then `aa`, `ab` and so on.
pub(crate) fn row_label(row: Coord) -> String {
    let mut letters = Vec::new();
    let mut rest = row + 1;
    while rest > 0 {
        rest -= 1;
        letters.push(char::from(b'a' + (rest % 26) as u8));
        rest /= 26;
    }
    letters.iter().rev().collect()
}

/// Reasons a board label could not be read as a [`Coordinate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The label has no leading row letters.
    #[error("`{0}` does not start with a row letter")]
    MissingRow(String),
    /// The label has no column number after the row letters, or the number is not positive.
    #[error("`{0}` does not end with a column number starting at 1")]
    BadColumn(String),
}

impl FromStr for Coordinate {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let split = label.find(|c: char| !c.is_ascii_lowercase()).unwrap_or(label.len());
        let (letters, digits) = label.split_at(split);
        if letters.is_empty() {
            return Err(LabelError::MissingRow(label.to_owned()));
        }

        let row = letters.bytes()
            .try_fold(0usize, |acc, b| acc.checked_mul(26)?.checked_add((b - b'a') as usize + 1))
            .ok_or_else(|| LabelError::MissingRow(label.to_owned()))?;
        let column = match digits.parse::<Coord>() {
            Ok(column) if column > 0 => column,
            _ => return Err(LabelError::BadColumn(label.to_owned())),
        };

        Ok(Self(row - 1, column - 1))
    }
}
