//! Tile value types: identity, color, and kind.

use std::fmt::{self, Display};

/// Process-unique tile identity.
///
/// Identities are allocated monotonically by [`Board::allocate`] and are never
/// reused while the tile occupies a cell. Front-ends use the identity to track
/// one tile object across a whole turn (swap, fall, removal).
///
/// [`Board::allocate`]: crate::Board::allocate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u64);

impl TileId {
    /// Identity carried by the empty-cell placeholder tile.
    ///
    /// Never produced by the allocator.
    pub const PLACEHOLDER: Self = Self(u64::MAX);

    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identity value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A tile color.
///
/// The six plain colors form the configurable palette. Three more values are
/// reserved:
///
/// - [`Empty`](Self::Empty): no tile occupies the cell.
/// - [`Static`](Self::Static): a permanently immovable cell, excluded from
///   matching, shuffling, and refill.
/// - [`Wildcard`](Self::Wildcard): the "rainbow" color carried by Mega tiles;
///   it matches every color when swapped against one.
///
/// Each color has a unique ASCII letter used by the text board format:
///
/// ```
/// use tilefall_core::TileColor;
///
/// assert_eq!(TileColor::Red.letter(), 'R');
/// assert_eq!(TileColor::from_letter('W'), Some(TileColor::Wildcard));
/// assert_eq!(TileColor::from_letter('x'), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileColor {
    /// No tile present.
    Empty,
    /// Immovable cell, never matched and never replaced.
    Static,
    /// The "rainbow" wildcard color.
    Wildcard,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Yellow.
    Yellow,
    /// Purple.
    Purple,
    /// Orange.
    Orange,
}

impl TileColor {
    /// All colors, sentinels included, in letter-table order.
    pub const ALL: [Self; 9] = [
        Self::Empty,
        Self::Static,
        Self::Wildcard,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
    ];

    /// Returns the letter used for this color in the text board format.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Empty => 'E',
            Self::Static => 'S',
            Self::Wildcard => 'W',
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Yellow => 'Y',
            Self::Purple => 'P',
            Self::Orange => 'O',
        }
    }

    /// Looks a color up by its board-format letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.letter() == letter)
    }

    /// Returns the full letter table as a string, for error messages.
    #[must_use]
    pub fn letters() -> String {
        Self::ALL.into_iter().map(Self::letter).collect()
    }

    /// Returns `true` for the colors that never belong to a palette:
    /// [`Empty`](Self::Empty), [`Static`](Self::Static), and
    /// [`Wildcard`](Self::Wildcard).
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::Empty | Self::Static | Self::Wildcard)
    }
}

impl Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The kind of a tile, selecting its removal effect.
///
/// The set is closed: effect dispatch is an exhaustive `match`, checked at
/// compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// An ordinary tile, destroyed when matched.
    Normal,
    /// Clears the 3×3 neighborhood around its cell when activated.
    Bomb,
    /// Clears its entire row and column when activated.
    Cross,
    /// Clears every tile of the color it was swapped against.
    Mega,
}

impl TileKind {
    /// Returns `true` for kinds with an activation effect (everything but
    /// [`Normal`](Self::Normal)).
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// A tile: identity, color, and kind.
///
/// Tiles are small `Copy` values; the grid cell is the single source of truth
/// for a tile's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    color: TileColor,
    kind: TileKind,
}

impl Tile {
    /// The placeholder stored in unoccupied cells.
    ///
    /// Its kind is [`TileKind::Normal`], so an emptied cell still passes
    /// "holds no special" checks during special-tile placement.
    pub const EMPTY: Self = Self {
        id: TileId::PLACEHOLDER,
        color: TileColor::Empty,
        kind: TileKind::Normal,
    };

    pub(crate) const fn new(id: TileId, color: TileColor, kind: TileKind) -> Self {
        Self { id, color, kind }
    }

    /// Returns the tile identity.
    #[must_use]
    pub const fn id(self) -> TileId {
        self.id
    }

    /// Returns the tile color.
    #[must_use]
    pub const fn color(self) -> TileColor {
        self.color
    }

    /// Returns the tile kind.
    #[must_use]
    pub const fn kind(self) -> TileKind {
        self.kind
    }

    /// Returns `true` if this is the empty-cell placeholder color.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self.color, TileColor::Empty)
    }

    /// Returns a copy of this tile with a different kind, keeping identity.
    #[must_use]
    pub const fn with_kind(self, kind: TileKind) -> Self {
        Self { kind, ..self }
    }

    /// Returns a copy of this tile with a different color, keeping identity.
    #[must_use]
    pub const fn with_color(self, color: TileColor) -> Self {
        Self { color, ..self }
    }
}
