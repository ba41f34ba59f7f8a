#![warn(missing_docs)]

//! # `road-trip`
//!
//! The board model and rules of a tile-sliding road puzzle.
//! A square board holds fixed cells (start, finish, terrain), movable cells (straight and corner road, free ground)
//! and rotatable cells (straight road that turns in place).
//! The player swaps movable cells and rotates rotatable ones until a continuous road runs from the start cell in the bottom row
//! to the finish cell in the top row.
//!
//! Begin by loading a [`Level`] with [`Level::load`], [`Level::from_reader`] or [`str::parse`], or assemble one with a [`LevelBuilder`].
//! Mutate it with [`Level::swap`], [`Level::rotate`] or [`Level::apply`], and ask [`Level::is_solved`].
//!
//! # Level files
//! ```text
//! # comments and blank lines are skipped anywhere
//! 3
//! EASY
//! MFM
//! MVM
//! MSM
//! ```
//! The first significant line is the board size (at least [`MINIMUM_BOARD_SIZE`]), the second a [`Difficulty`] name,
//! then one line per board row with one [`CellType`] symbol per column.
//!
//! # Solving
//! [`Level::trace_road`] walks from the start cell along each cell's open connections. The walk fails as soon as the road leaves the
//! board or runs into a cell that does not connect back, and succeeds on entering the finish cell.
//! [`Level::road_graph`] expresses the same connections as an undirected graph for callers that want to inspect the whole board.

pub use board::{Level, Move, MoveError};
pub use builder::{Difficulty, InvalidReason, LevelBuilder, MINIMUM_BOARD_SIZE};
pub use cell::{Capability, Cell, CellType, FixedCell, MovableCell, RotatableCell};
pub use location::{Coordinate, LabelError};
pub use parse::{ParseError, COMMENT_MARKER};
pub use shape::Direction;
pub use solver::{RoadTrace, WalkOutcome};

pub(crate) mod board;
pub(crate) mod location;
pub(crate) mod parse;
pub mod shape;
pub(crate) mod cell;
pub mod builder;
pub(crate) mod solver;
