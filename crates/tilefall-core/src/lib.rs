//! Core data model for the tilefall match-3 rules engine.
//!
//! This crate owns the board state and the match detector:
//!
//! - [`Tile`], [`TileColor`], [`TileKind`]: the tile value types. Every live
//!   tile carries a process-unique [`TileId`] so front-ends can track a tile
//!   across a turn.
//! - [`Board`]: the mutable rows×columns tile store and the tile identity
//!   allocator. All other components mutate the grid exclusively through it.
//! - [`MatchRun`] / [`CrossingPair`]: descriptors produced by
//!   [`Board::find_matches`] and [`crossing_pairs`], recomputed from scratch
//!   on every detection pass.
//! - The text board import format, via [`Board`]'s [`FromStr`] impl.
//!
//! Randomized construction lives in `tilefall-generator`, move availability
//! in `tilefall-solver`, and the turn pipeline (swaps, specials, cascades,
//! gravity) in `tilefall-game`.
//!
//! [`FromStr`]: std::str::FromStr

mod grid;
mod matches;
mod parse;
mod tile;

pub use grid::{Board, BoardError};
pub use matches::{CrossingPair, MIN_MATCH_LENGTH, MatchRun, Orientation, crossing_pairs};
pub use parse::ParseBoardError;
pub use tile::{Tile, TileColor, TileId, TileKind};
