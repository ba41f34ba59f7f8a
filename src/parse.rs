use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZero;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, warn};

use crate::board::Level;
use crate::builder::{Difficulty, InvalidReason, LevelBuilder, MINIMUM_BOARD_SIZE};
use crate::cell::CellType;
use crate::location::Coordinate;

/// Lines starting with this are ignored, as are blank lines.
pub const COMMENT_MARKER: char = '#';

/// Reasons a level definition could not be loaded.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The source could not be read.
    #[error("level source could not be read")]
    Unreadable(#[from] std::io::Error),
    /// The source ended before the size line.
    #[error("level is missing its board size")]
    MissingSize,
    /// The size line is not a whole number.
    #[error("board size `{0}` is not a whole number")]
    InvalidSize(String),
    /// The size is below [`MINIMUM_BOARD_SIZE`].
    #[error("board's size must be at least {min}, got {0}", min = MINIMUM_BOARD_SIZE)]
    SizeTooSmall(usize),
    /// The source ended before the difficulty line.
    #[error("level is missing its difficulty")]
    MissingDifficulty,
    /// The difficulty line names no known [`Difficulty`].
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
    /// The source ended before every row of the board was read.
    #[error("level is missing board row {row}")]
    MissingRow {
        /// Zero-based row index.
        row: usize,
    },
    /// A row does not have exactly one symbol per column.
    #[error("board row {row} has {found} symbols, expected {expected}")]
    RowLength {
        /// Zero-based row index.
        row: usize,
        /// The board size.
        expected: usize,
        /// Symbols actually on the line.
        found: usize,
    },
    /// A symbol maps to no [`CellType`].
    #[error("unknown symbol `{symbol}` at row {row}, column {column}")]
    UnknownSymbol {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending character.
        symbol: char,
    },
    /// A row holds bytes that are not UTF-8, such as a Latin-1 `·`.
    #[error("board row {row} is not valid UTF-8 from column {column}")]
    NotUtf8 {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column of the first undecodable symbol.
        column: usize,
    },
    /// The board was read but breaks the rules every level must follow.
    #[error("invalid level: {}", .0.iter().join("; "))]
    Invalid(Vec<InvalidReason>),
}

impl From<Vec<InvalidReason>> for ParseError {
    fn from(value: Vec<InvalidReason>) -> Self {
        Self::Invalid(value)
    }
}

/// Pulls significant lines out of a reader, skipping blanks and comments.
///
/// Lines come out as raw bytes so that bad encoding can be reported with its position.
struct LevelLines<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LevelLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, buffer: Vec::new() }
    }

    fn next_line(&mut self) -> Result<Option<&[u8]>, ParseError> {
        loop {
            self.buffer.clear();
            if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
                return Ok(None);
            }

            let mut len = self.buffer.len();
            while len > 0 && matches!(self.buffer[len - 1], b'\n' | b'\r') {
                len -= 1;
            }

            let line = &self.buffer[..len];
            if line.iter().all(u8::is_ascii_whitespace) || line.first() == Some(&(COMMENT_MARKER as u8)) {
                continue;
            }

            // fresh borrow, `line` itself cannot outlive the `clear` above
            return Ok(Some(&self.buffer[..len]));
        }
    }
}

/// Decode one board row, pointing at the first symbol that is not UTF-8.
fn decode_row(line: &[u8], row: usize) -> Result<&str, ParseError> {
    std::str::from_utf8(line).map_err(|error| {
        let column = std::str::from_utf8(&line[..error.valid_up_to()]).map_or(0, |valid| valid.chars().count());
        ParseError::NotUtf8 { row, column }
    })
}

pub(crate) fn parse_level<R: BufRead>(reader: R) -> Result<Level, ParseError> {
    let mut lines = LevelLines::new(reader);

    let size = {
        let line = lines.next_line()?.ok_or(ParseError::MissingSize)?;
        let text = String::from_utf8_lossy(line);
        let text = text.trim();
        let size = text.parse::<usize>().map_err(|_| ParseError::InvalidSize(text.to_owned()))?;
        match NonZero::new(size) {
            Some(size) if size.get() >= MINIMUM_BOARD_SIZE => size,
            _ => return Err(ParseError::SizeTooSmall(size)),
        }
    };

    let difficulty = {
        let line = lines.next_line()?.ok_or(ParseError::MissingDifficulty)?;
        let text = String::from_utf8_lossy(line);
        let text = text.trim();
        text.parse::<Difficulty>().map_err(|_| ParseError::UnknownDifficulty(text.to_owned()))?
    };

    // rows are read before the grid exists, so memory follows the input rather than the size line
    let mut rows = Vec::new();
    for row in 0..size.get() {
        let line = lines.next_line()?.ok_or(ParseError::MissingRow { row })?;
        let line = decode_row(line, row)?.trim_end();
        let found = line.chars().count();
        if found != size.get() {
            return Err(ParseError::RowLength { row, expected: size.get(), found });
        }

        let symbols = line
            .chars()
            .enumerate()
            .map(|(column, symbol)| CellType::from_symbol(symbol).ok_or(ParseError::UnknownSymbol { row, column, symbol }))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(symbols);
    }

    let mut builder = LevelBuilder::with_size(size);
    builder.difficulty(difficulty);
    for (row, symbols) in rows.into_iter().enumerate() {
        for (column, cell_type) in symbols.into_iter().enumerate() {
            builder.place(Coordinate(row, column), cell_type);
        }
    }

    let level = builder.build()?;
    debug!(size = size.get(), %difficulty, "level parsed");
    Ok(level)
}

impl Level {
    /// Parse a level definition from `reader`.
    ///
    /// The definition is, skipping blank lines and lines starting with [`COMMENT_MARKER`]:
    /// the board size, a [`Difficulty`] name, then one line of cell symbols per board row.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        parse_level(reader)
    }

    /// Open the level file at `path` and parse it. The file is closed before this returns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let result = File::open(path)
            .map_err(ParseError::from)
            .and_then(|file| parse_level(BufReader::new(file)));

        if let Err(error) = &result {
            warn!(path = %path.display(), %error, "failed to load level");
        }
        result
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(s.as_bytes())
    }
}
