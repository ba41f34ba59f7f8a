use std::fmt::{Display, Formatter};

use strum::VariantArray;

use crate::location::Coordinate;
use crate::shape::Direction::{self, Down, Left, Right, Up};

/// What the player may do with a cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Capability {
    /// Neither position nor type ever changes.
    Fixed,
    /// Can trade places with another movable cell.
    Movable,
    /// Stays put but cycles through its rotation successors.
    Rotatable,
}

/// Every kind of tile a board can hold.
///
/// The per-variant data (file symbol, glyph, open connections, rotation successor, capability) lives in one table, see [`CellType::symbol`] and friends.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum CellType {
    /// Where the road begins; always in the bottom row.
    Start,
    /// Where the road must end; always in the top row.
    Finish,
    /// Impassable terrain.
    Mountains,
    /// Impassable water.
    River,
    /// Straight road, up and down.
    Vertical,
    /// Straight road, left and right.
    Horizontal,
    /// Corner joining the right and bottom edges.
    BottomRight,
    /// Corner joining the bottom and left edges.
    BottomLeft,
    /// Corner joining the top and right edges.
    TopRight,
    /// Corner joining the top and left edges.
    TopLeft,
    /// Empty ground a road piece can slide into.
    #[default]
    Free,
    /// Straight road, up and down, that turns in place.
    RotatableVertical,
    /// Straight road, left and right, that turns in place.
    RotatableHorizontal,
}

struct Entry {
    symbol: char,
    glyph: char,
    connections: &'static [Direction],
    successor: Option<CellType>,
    capability: Capability,
}

fn entry(
    symbol: char,
    glyph: char,
    connections: &'static [Direction],
    successor: Option<CellType>,
    capability: Capability,
) -> Entry {
    Entry { symbol, glyph, connections, successor, capability }
}

impl CellType {
    fn entry(self) -> Entry {
        match self {
            Self::Start => entry('S', '^', &[Up], None, Capability::Fixed),
            Self::Finish => entry('F', 'v', &[Down], None, Capability::Fixed),
            Self::Mountains => entry('M', 'M', &[], None, Capability::Fixed),
            Self::River => entry('~', '~', &[], None, Capability::Fixed),
            Self::Vertical => entry('V', '\u{2551}', &[Up, Down], None, Capability::Movable),
            Self::Horizontal => entry('H', '\u{2550}', &[Right, Left], None, Capability::Movable),
            Self::BottomRight => entry('r', '\u{2554}', &[Right, Down], None, Capability::Movable),
            Self::BottomLeft => entry('l', '\u{2557}', &[Down, Left], None, Capability::Movable),
            Self::TopRight => entry('R', '\u{255A}', &[Up, Right], None, Capability::Movable),
            Self::TopLeft => entry('L', '\u{255D}', &[Up, Left], None, Capability::Movable),
            Self::Free => entry('\u{00B7}', '\u{00B7}', &[], None, Capability::Movable),
            Self::RotatableVertical => entry('G', '\u{2503}', &[Up, Down], Some(Self::RotatableHorizontal), Capability::Rotatable),
            Self::RotatableHorizontal => entry('g', '\u{2501}', &[Right, Left], Some(Self::RotatableVertical), Capability::Rotatable),
        }
    }

    /// Look up the type written as `symbol` in level files.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::VARIANTS.iter().find(|ty| ty.symbol() == symbol).copied()
    }

    /// The character representing this type in level files.
    pub fn symbol(&self) -> char {
        self.entry().symbol
    }

    /// The character drawn for this type in the text rendering of a board.
    pub fn glyph(&self) -> char {
        self.entry().glyph
    }

    /// Directions the road continues in, in canonical [`Direction`] order.
    ///
    /// Start and Finish have one, road pieces have two, terrain and free ground have none.
    pub fn connections(&self) -> &'static [Direction] {
        self.entry().connections
    }

    /// Whether the road continues towards `direction`.
    pub fn connects(&self, direction: Direction) -> bool {
        self.connections().contains(&direction)
    }

    /// The type this one becomes after one rotation, or `None` for types that do not rotate.
    pub fn rotation_successor(&self) -> Option<Self> {
        self.entry().successor
    }

    /// Which kind of [`Cell`] holds this type.
    pub fn capability(&self) -> Capability {
        self.entry().capability
    }
}

/// A cell whose position and type never change.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FixedCell {
    coordinate: Coordinate,
    cell_type: CellType,
}

impl FixedCell {
    /// Where this cell sits on the board.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// What this cell holds.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }
}

/// A cell that keeps its type but may trade places.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MovableCell {
    coordinate: Coordinate,
    cell_type: CellType,
}

impl MovableCell {
    /// Where this cell sits on the board.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// What this cell holds.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub(crate) fn move_to(&mut self, destination: Coordinate) {
        self.coordinate = destination;
    }
}

/// A cell that keeps its place but may turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RotatableCell {
    coordinate: Coordinate,
    cell_type: CellType,
}

impl RotatableCell {
    /// Where this cell sits on the board.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// What this cell holds right now; changes on every rotation.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub(crate) fn rotate(&mut self) {
        self.cell_type = match self.cell_type.rotation_successor() {
            Some(next) => next,
            None => unreachable!("rotatable cells are only built from types with a successor"),
        };
    }
}

/// One occupant of a board: a [`CellType`] at a [`Coordinate`], split by [`Capability`].
///
/// Moving and rotating are only defined on [`MovableCell`] and [`RotatableCell`], and only the owning [`Level`](crate::Level) may call them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Cell {
    /// Start, finish or terrain.
    Fixed(FixedCell),
    /// A road piece or free ground.
    Movable(MovableCell),
    /// A road piece that turns in place.
    Rotatable(RotatableCell),
}

impl Cell {
    pub(crate) fn new(coordinate: Coordinate, cell_type: CellType) -> Self {
        match cell_type.capability() {
            Capability::Fixed => Self::Fixed(FixedCell { coordinate, cell_type }),
            Capability::Movable => Self::Movable(MovableCell { coordinate, cell_type }),
            Capability::Rotatable => Self::Rotatable(RotatableCell { coordinate, cell_type }),
        }
    }

    /// What the player may do with this cell.
    pub fn capability(&self) -> Capability {
        match self {
            Self::Fixed(_) => Capability::Fixed,
            Self::Movable(_) => Capability::Movable,
            Self::Rotatable(_) => Capability::Rotatable,
        }
    }

    /// Where this cell sits on the board.
    pub fn coordinate(&self) -> Coordinate {
        match self {
            Self::Fixed(cell) => cell.coordinate(),
            Self::Movable(cell) => cell.coordinate(),
            Self::Rotatable(cell) => cell.coordinate(),
        }
    }

    /// What this cell holds.
    pub fn cell_type(&self) -> CellType {
        match self {
            Self::Fixed(cell) => cell.cell_type(),
            Self::Movable(cell) => cell.cell_type(),
            Self::Rotatable(cell) => cell.cell_type(),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cell_type().glyph())
    }
}
