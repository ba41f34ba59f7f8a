use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;
use thiserror::Error;
use tracing::info;
use unordered_pair::UnorderedPair;

use crate::builder::Difficulty;
use crate::cell::{Cell, CellType};
use crate::location::{row_label, Coordinate, Dimension, LabelError};

/// Reasons a move on a [`Level`] was refused. A refused move changes nothing.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveError {
    /// The coordinate is off the board.
    #[error("coordinate {0} is off the board")]
    InvalidCoordinate(Coordinate),
    /// The cell at this coordinate cannot be moved.
    #[error("cell at {0} is not a movable cell")]
    NotMovable(Coordinate),
    /// The cell at this coordinate cannot be rotated.
    #[error("cell at {0} is not a rotatable cell")]
    NotRotatable(Coordinate),
}

/// One player action.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Move {
    /// Exchange two movable cells. Order does not matter.
    Swap(UnorderedPair<Coordinate>),
    /// Turn a rotatable cell once.
    Rotate(Coordinate),
}

impl Move {
    /// A swap between `a` and `b`.
    pub fn swap(a: Coordinate, b: Coordinate) -> Self {
        Self::Swap(UnorderedPair::from((a, b)))
    }
}

/// Reads `b1-c1` as a swap and `b2` as a rotation, using board labels.
impl FromStr for Move {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((a, b)) => Ok(Self::swap(a.parse()?, b.parse()?)),
            None => Ok(Self::Rotate(s.parse()?)),
        }
    }
}

/// A puzzle in play: a square board of [`Cell`]s, its [`Difficulty`] and the number of moves made so far.
///
/// Levels are loaded with [`Level::load`] or [`Level::from_reader`], or assembled with a [`LevelBuilder`](crate::LevelBuilder).
/// Every level has exactly one start cell in the bottom row, exactly one finish cell in the top row, and something to move or rotate.
#[derive(Clone, Debug)]
pub struct Level {
    pub(crate) size: Dimension,
    pub(crate) difficulty: Difficulty,
    pub(crate) cells: Array2<Cell>,
    pub(crate) moves: usize,
}

impl Level {
    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// The difficulty label the level was stored with.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Successful swaps and rotations so far.
    pub fn move_count(&self) -> usize {
        self.moves
    }

    /// The cell at `location`.
    pub fn cell_at(&self, location: Coordinate) -> Result<&Cell, MoveError> {
        self.cells.get(location.as_index()).ok_or(MoveError::InvalidCoordinate(location))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Where the start cell is.
    pub fn start(&self) -> Coordinate {
        self.find_in_row(self.size() - 1, CellType::Start)
    }

    /// Where the finish cell is.
    pub fn finish(&self) -> Coordinate {
        self.find_in_row(0, CellType::Finish)
    }

    fn find_in_row(&self, row: usize, cell_type: CellType) -> Coordinate {
        // levels are only built once the bottom row holds Start and the top row holds Finish
        self.cells.row(row).iter()
            .find(|cell| cell.cell_type() == cell_type)
            .map(Cell::coordinate)
            .unwrap_or(Coordinate(row, 0))
    }

    /// Exchange the movable cells at `a` and `b`, counting one move.
    pub fn swap(&mut self, a: Coordinate, b: Coordinate) -> Result<(), MoveError> {
        let pair = [self.cell_at(a)?, self.cell_at(b)?];
        if let Some(cell) = pair.iter().find(|cell| !matches!(cell, Cell::Movable(_))) {
            return Err(MoveError::NotMovable(cell.coordinate()));
        }

        self.cells.swap(a.as_index(), b.as_index());
        for location in [a, b] {
            if let Some(Cell::Movable(cell)) = self.cells.get_mut(location.as_index()) {
                cell.move_to(location);
            }
        }

        self.moves += 1;
        info!(from = %a.label(), to = %b.label(), moves = self.moves, "swapped cells");
        Ok(())
    }

    /// Turn the rotatable cell at `location` once, counting one move.
    pub fn rotate(&mut self, location: Coordinate) -> Result<(), MoveError> {
        match self.cells.get_mut(location.as_index()) {
            None => Err(MoveError::InvalidCoordinate(location)),
            Some(Cell::Rotatable(cell)) => {
                cell.rotate();
                self.moves += 1;
                info!(at = %location.label(), moves = self.moves, "rotated cell");
                Ok(())
            }
            Some(_) => Err(MoveError::NotRotatable(location)),
        }
    }

    /// Perform `mv`.
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        match mv {
            Move::Swap(UnorderedPair(a, b)) => self.swap(a, b),
            Move::Rotate(location) => self.rotate(location),
        }
    }

    /// The text view of the board, same as [`Display`].
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Column numbers across the top, then each row labelled with its letter and drawn with cell glyphs.
impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", (1..=self.size()).join(""))?;
        for (index, row) in self.cells.rows().into_iter().enumerate() {
            writeln!(f, "{}|{}", row_label(index), row.iter().join(""))?;
        }
        Ok(())
    }
}
