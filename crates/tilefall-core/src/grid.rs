//! The mutable tile store and identity allocator.

use std::fmt::{self, Display};

use derive_more::{Display as DeriveDisplay, Error};

use crate::{MIN_MATCH_LENGTH, Tile, TileColor, TileId, TileKind};

/// Fatal board construction errors.
///
/// Construction refuses to produce an unusable board; there is no silent
/// fallback to defaults.
#[derive(Debug, Clone, PartialEq, Eq, DeriveDisplay, Error)]
pub enum BoardError {
    /// Either dimension is below the minimum match length of 3.
    #[display("board dimensions {rows}x{columns} are below the 3x3 minimum")]
    TooSmall {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        columns: usize,
    },
    /// The allowed-color palette is empty.
    #[display("the allowed-color palette is empty")]
    EmptyPalette,
    /// The palette contains a sentinel color (empty, static, or wildcard).
    #[display("palette color '{color}' is a sentinel, not a matchable color")]
    SentinelInPalette {
        /// The offending color.
        color: TileColor,
    },
    /// A row of initial colors has a different length than the first row.
    #[display("row {row} holds {found} cells, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Expected cell count (length of the first row).
        expected: usize,
        /// Actual cell count.
        found: usize,
    },
}

/// The rows×columns tile grid, the allowed-color palette, and the tile
/// identity allocator.
///
/// Exactly one [`Tile`] occupies each cell ([`Tile::EMPTY`] for unoccupied
/// cells). Mutating a cell through [`Board::set`] is the only way tile state
/// changes; the board holds no derived data that could fall out of sync.
///
/// Dimensions are at least 3×3 in every constructed board (the minimum match
/// length), enforced before any allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Tile>,
    palette: Vec<TileColor>,
    next_id: u64,
}

impl Board {
    /// Creates a board of empty cells with the given palette.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TooSmall`] if either dimension is below 3, and
    /// [`BoardError::EmptyPalette`] / [`BoardError::SentinelInPalette`] for a
    /// malformed palette.
    pub fn empty(rows: usize, columns: usize, palette: &[TileColor]) -> Result<Self, BoardError> {
        if rows < MIN_MATCH_LENGTH || columns < MIN_MATCH_LENGTH {
            return Err(BoardError::TooSmall { rows, columns });
        }
        let palette = Self::check_palette(palette)?;
        Ok(Self {
            rows,
            columns,
            cells: vec![Tile::EMPTY; rows * columns],
            palette,
            next_id: 0,
        })
    }

    /// Creates a board from explicit initial colors, one `Normal` tile per
    /// non-empty cell.
    ///
    /// `Static` and `Empty` cells are preserved as given. Primarily used by
    /// the text import and by tests.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RaggedRows`] if the rows differ in length, plus
    /// every error [`Board::empty`] can return.
    pub fn from_rows(colors: &[Vec<TileColor>], palette: &[TileColor]) -> Result<Self, BoardError> {
        let rows = colors.len();
        let columns = colors.first().map_or(0, Vec::len);
        for (row, line) in colors.iter().enumerate() {
            if line.len() != columns {
                return Err(BoardError::RaggedRows {
                    row,
                    expected: columns,
                    found: line.len(),
                });
            }
        }
        let mut board = Self::empty(rows, columns, palette)?;
        for (row, line) in colors.iter().enumerate() {
            for (column, &color) in line.iter().enumerate() {
                if color != TileColor::Empty {
                    let tile = board.allocate(color, TileKind::Normal);
                    board.set(row, column, tile);
                }
            }
        }
        Ok(board)
    }

    fn check_palette(palette: &[TileColor]) -> Result<Vec<TileColor>, BoardError> {
        if palette.is_empty() {
            return Err(BoardError::EmptyPalette);
        }
        let mut checked = Vec::with_capacity(palette.len());
        for &color in palette {
            if color.is_sentinel() {
                return Err(BoardError::SentinelInPalette { color });
            }
            if !checked.contains(&color) {
                checked.push(color);
            }
        }
        Ok(checked)
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the allowed-color palette (sentinels excluded, duplicates
    /// removed, in first-seen order).
    #[must_use]
    pub fn palette(&self) -> &[TileColor] {
        &self.palette
    }

    /// Returns the tile at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Tile {
        assert!(row < self.rows && column < self.columns, "cell out of range");
        self.cells[row * self.columns + column]
    }

    /// Stores a tile at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of range.
    pub fn set(&mut self, row: usize, column: usize, tile: Tile) {
        assert!(row < self.rows && column < self.columns, "cell out of range");
        self.cells[row * self.columns + column] = tile;
    }

    /// Allocates a fresh tile with the next identity.
    ///
    /// The tile is returned, not placed; identities are monotonically
    /// increasing and never reused while a cell references them.
    pub fn allocate(&mut self, color: TileColor, kind: TileKind) -> Tile {
        let id = TileId::new(self.next_id);
        self.next_id += 1;
        Tile::new(id, color, kind)
    }

    /// Returns `true` if the signed coordinates name a cell on the board.
    ///
    /// Blast effects probe neighborhoods that run past the edges; callers
    /// skip the misses rather than treating them as errors.
    #[must_use]
    pub fn in_bounds(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.rows && (column as usize) < self.columns
    }

    /// Returns `true` if `color` participates in match detection.
    ///
    /// The wildcard counts as matchable here (a run of wildcards is a legal
    /// run); `Empty` and `Static` never do.
    #[must_use]
    pub fn is_matchable(&self, color: TileColor) -> bool {
        color == TileColor::Wildcard || self.palette.contains(&color)
    }

    /// Returns `true` if `color` is one of the palette colors.
    ///
    /// Unlike [`Board::is_matchable`] this excludes the wildcard; it is the
    /// membership test used by move-availability patterns and random fills.
    #[must_use]
    pub fn is_palette_color(&self, color: TileColor) -> bool {
        self.palette.contains(&color)
    }

    /// Counts the empty cells strictly below `(row, column)` in its column.
    ///
    /// A tile with a non-zero count is "hanging" mid-fall and never
    /// contributes to a match.
    #[must_use]
    pub fn empty_below(&self, row: usize, column: usize) -> usize {
        (row + 1..self.rows)
            .filter(|&r| self.get(r, column).is_empty())
            .count()
    }

    /// Counts all empty cells in `column`.
    #[must_use]
    pub fn column_empty_count(&self, column: usize) -> usize {
        (0..self.rows)
            .filter(|&r| self.get(r, column).is_empty())
            .count()
    }

    /// Returns `true` if the cell holds a static (immovable) tile.
    #[must_use]
    pub fn is_static(&self, row: usize, column: usize) -> bool {
        self.get(row, column).color() == TileColor::Static
    }
}

impl Display for Board {
    /// Renders the board as its letter grid with row and column indices.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "{} ", row % 10)?;
            for column in 0..self.columns {
                write!(f, "{}", self.get(row, column).color().letter())?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for column in 0..self.columns {
            write!(f, "{}", column % 10)?;
        }
        writeln!(f)
    }
}
