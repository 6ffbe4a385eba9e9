//! Text board import.
//!
//! The format is three sections: a `"<rows> <columns>"` header, a line of
//! allowed-color letters, then `rows` lines of `columns` letters each (see
//! [`TileColor::letter`] for the table). Unknown letters are a fatal parse
//! error naming the offender and listing the valid letters.
//!
//! ```
//! use tilefall_core::{Board, TileColor};
//!
//! let board: Board = "\
//! 4 4
//! RGB
//! RGGR
//! GGBG
//! BGGR
//! BBBR"
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(board.rows(), 4);
//! assert_eq!(board.palette(), &[TileColor::Red, TileColor::Green, TileColor::Blue]);
//! assert!(board.has_matches());
//! ```

use std::str::FromStr;

use derive_more::{Display, Error};

use crate::{Board, BoardError, TileColor};

/// Fatal errors raised by the text board import.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    /// The input has no header line.
    #[display("missing board header line")]
    MissingHeader,
    /// The header line is not `"<rows> <columns>"`.
    #[display("cannot read dimensions from {line:?}, expected \"<rows> <columns>\"")]
    InvalidDimensions {
        /// The offending header line.
        line: String,
    },
    /// The input ends before the allowed-color line.
    #[display("missing allowed-color line")]
    MissingPalette,
    /// A letter maps to no color.
    #[display("unknown color letter '{letter}', valid letters are {expected}")]
    UnknownColor {
        /// The offending letter.
        letter: char,
        /// The full valid letter table.
        expected: String,
    },
    /// The number of board lines does not match the header.
    #[display("expected {expected} board rows, found {found}")]
    WrongRowCount {
        /// Row count announced by the header.
        expected: usize,
        /// Rows actually present.
        found: usize,
    },
    /// A board line does not match the header's column count.
    #[display("board row {row} holds {found} cells, expected {expected}")]
    WrongRowLength {
        /// Index of the offending row.
        row: usize,
        /// Column count announced by the header.
        expected: usize,
        /// Cells actually present.
        found: usize,
    },
    /// Board construction rejected the parsed contents.
    #[display("{_0}")]
    Board(BoardError),
}

impl From<BoardError> for ParseBoardError {
    fn from(error: BoardError) -> Self {
        Self::Board(error)
    }
}

fn color_from_letter(letter: char) -> Result<TileColor, ParseBoardError> {
    TileColor::from_letter(letter).ok_or_else(|| ParseBoardError::UnknownColor {
        letter,
        expected: TileColor::letters(),
    })
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().ok_or(ParseBoardError::MissingHeader)?;
        let invalid_dimensions = || ParseBoardError::InvalidDimensions {
            line: header.to_owned(),
        };
        let mut parts = header.split_whitespace();
        let rows: usize = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid_dimensions)?;
        let columns: usize = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid_dimensions)?;
        if parts.next().is_some() {
            return Err(invalid_dimensions());
        }

        let palette = lines
            .next()
            .ok_or(ParseBoardError::MissingPalette)?
            .chars()
            .map(color_from_letter)
            .collect::<Result<Vec<_>, _>>()?;

        let colors = lines
            .map(|line| line.chars().map(color_from_letter).collect())
            .collect::<Result<Vec<Vec<_>>, _>>()?;

        if colors.len() != rows {
            return Err(ParseBoardError::WrongRowCount {
                expected: rows,
                found: colors.len(),
            });
        }
        for (row, line) in colors.iter().enumerate() {
            if line.len() != columns {
                return Err(ParseBoardError::WrongRowLength {
                    row,
                    expected: columns,
                    found: line.len(),
                });
            }
        }

        Ok(Self::from_rows(&colors, &palette)?)
    }
}
