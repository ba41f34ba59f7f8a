//! Programmatic construction of levels and the rules every level must follow.

use itertools::Itertools;
use ndarray::Array2;
use strum::{Display, EnumString, VariantArray};
use thiserror::Error;

use crate::board::Level;
use crate::cell::{Capability, Cell, CellType};
use crate::location::{Coordinate, Dimension};

/// Smallest board side length a level may have.
pub const MINIMUM_BOARD_SIZE: usize = 3;

/// How hard a level is meant to be. Stored with the level, never interpreted.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Display, EnumString, VariantArray)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// `EASY` in level files.
    #[default]
    Easy,
    /// `MEDIUM` in level files.
    Medium,
    /// `HARD` in level files.
    Hard,
}

/// Reasons a builder may become invalid, either while placing cells or when its board is checked on [`build`](LevelBuilder::build).
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum InvalidReason {
    /// The board side is below [`MINIMUM_BOARD_SIZE`].
    #[error("board's size must be at least {min}, got {0}", min = MINIMUM_BOARD_SIZE)]
    BoardTooSmall(usize),
    /// A cell was placed outside the board.
    #[error("{0} is outside the board")]
    FeatureOutOfBounds(Coordinate),
    /// More than one start cell anywhere on the board.
    #[error("level has more than one starting cell")]
    DuplicateStart,
    /// More than one finish cell anywhere on the board.
    #[error("level has more than one finish cell")]
    DuplicateFinish,
    /// No start cell in the bottom row.
    #[error("level does not have any starting cell")]
    NoStart,
    /// No finish cell in the top row.
    #[error("level does not have any finish cell")]
    NoFinish,
    /// Nothing the player could move or rotate.
    #[error("level does not have any road")]
    NoRoad,
}

/// Assembles a [`Level`] cell by cell.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Every cell starts out as [`CellType::Free`].
#[derive(Clone, Debug)]
pub struct LevelBuilder {
    size: Dimension,
    difficulty: Difficulty,
    cells: Array2<CellType>,
    invalid_reasons: Vec<InvalidReason>,
}

impl LevelBuilder {
    /// Construct a builder for a `size` by `size` board.
    ///
    /// A `size` below [`MINIMUM_BOARD_SIZE`] puts the builder in a [`BoardTooSmall`](InvalidReason::BoardTooSmall) invalid state.
    ///
    /// # Panics
    /// If `size * size` cells cannot be allocated. The level parser only gets here once every row has been read.
    pub fn with_size(size: Dimension) -> Self {
        let mut invalid_reasons = Vec::new();
        if size.get() < MINIMUM_BOARD_SIZE {
            invalid_reasons.push(InvalidReason::BoardTooSmall(size.get()));
        }

        Self {
            size,
            difficulty: Default::default(),
            cells: Array2::from_elem((size.get(), size.get()), CellType::Free),
            invalid_reasons,
        }
    }

    /// Set the difficulty label the level will carry.
    pub fn difficulty(&mut self, difficulty: Difficulty) -> &mut Self {
        self.difficulty = difficulty;
        self
    }

    /// Put `cell_type` at `location`, replacing whatever was there.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](InvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn place(&mut self, location: Coordinate, cell_type: CellType) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.cells.get_mut(location.as_index()) {
            Some(slot) => *slot = cell_type,
            None => self.invalid_reasons.push(InvalidReason::FeatureOutOfBounds(location)),
        }

        self
    }

    /// Check the validity of this builder so far, ignoring the board checks that only run on [`build`](Self::build).
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<InvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<InvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Run every board check, without stopping at the first failure.
    ///
    /// Start must sit in the bottom row and Finish in the top row, each exactly once, and at least one cell must be movable or rotatable.
    fn board_reasons(&self) -> Vec<InvalidReason> {
        let mut reasons = Vec::new();
        let last = self.size.get() - 1;
        let count_of = |ty| self.cells.iter().filter(|cell| **cell == ty).count();

        if count_of(CellType::Start) > 1 {
            reasons.push(InvalidReason::DuplicateStart);
        }
        if count_of(CellType::Finish) > 1 {
            reasons.push(InvalidReason::DuplicateFinish);
        }
        if !self.cells.row(last).iter().contains(&CellType::Start) {
            reasons.push(InvalidReason::NoStart);
        }
        if !self.cells.row(0).iter().contains(&CellType::Finish) {
            reasons.push(InvalidReason::NoFinish);
        }
        if self.cells.iter().all(|cell| cell.capability() == Capability::Fixed) {
            reasons.push(InvalidReason::NoRoad);
        }

        reasons
    }

    /// Convert the state of this builder into a [`Level`] with no moves made.
    ///
    /// If the builder is invalid, or the board fails any check, every reason found is returned.
    pub fn build(&self) -> Result<Level, Vec<InvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let reasons = self.board_reasons();
        if !reasons.is_empty() {
            return Err(reasons);
        }

        let cells = Array2::from_shape_fn(self.cells.raw_dim(), |index| {
            Cell::new(Coordinate::from(index), self.cells[index])
        });

        Ok(Level {
            size: self.size,
            difficulty: self.difficulty,
            cells,
            moves: 0,
        })
    }
}
