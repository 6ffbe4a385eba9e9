//! Board solvability: does any legal swap produce a match?
//!
//! The check is an exhaustive enumeration, not a heuristic: every cell
//! anchors up to twelve fixed window patterns, each describing a triple of
//! same-colored cells that one adjacent swap would line up into a 3-run. A
//! wildcard tile anywhere short-circuits the scan, since swapping a wildcard
//! is always a legal, match-producing move.
//!
//! The generator crate uses this check to guarantee freshly built and
//! reshuffled boards are playable; the game crate consults it after every
//! settled turn.
//!
//! ```
//! use tilefall_core::Board;
//! use tilefall_solver::has_available_move;
//!
//! // The classic dead 3×3 layout: no matches, no moves.
//! let dead: Board = "3 3\nRGB\nRGG\nBGR\nRBR".parse().unwrap();
//! assert!(!has_available_move(&dead));
//!
//! let alive: Board = "4 4\nRGB\nRGGR\nGGBG\nBGGR\nBBBR".parse().unwrap();
//! assert!(has_available_move(&alive));
//! ```

use tilefall_core::{Board, TileColor};

/// A window pattern: three cell offsets that must share a palette color, and
/// the offset of the gap the completing swap fills. The lone off-line cell
/// swaps into the gap, so the gap must hold a swappable tile for the move to
/// be legal.
type Pattern = ([(usize, usize); 3], (usize, usize));

/// The six wide-window patterns, offsets into a 2×3 block. Each triple lines
/// up into a horizontal 3-run after one vertical swap.
const WIDE_PATTERNS: [Pattern; 6] = [
    // *        |  *   |    *  |  **   | * *   | **
    //  **      | * *  | **    | *     |  *    |   *
    ([(0, 0), (1, 1), (1, 2)], (1, 0)),
    ([(0, 1), (1, 0), (1, 2)], (1, 1)),
    ([(0, 2), (1, 0), (1, 1)], (1, 2)),
    ([(0, 1), (0, 2), (1, 0)], (0, 0)),
    ([(0, 0), (0, 2), (1, 1)], (0, 1)),
    ([(0, 0), (0, 1), (1, 2)], (0, 2)),
];

/// The six tall-window patterns, offsets into a 3×2 block; the transposed
/// counterparts of [`WIDE_PATTERNS`].
const TALL_PATTERNS: [Pattern; 6] = [
    ([(0, 0), (1, 1), (2, 1)], (0, 1)),
    ([(0, 1), (1, 0), (2, 1)], (1, 1)),
    ([(0, 1), (1, 1), (2, 0)], (2, 1)),
    ([(0, 1), (1, 0), (2, 0)], (0, 0)),
    ([(0, 0), (1, 1), (2, 0)], (1, 0)),
    ([(0, 0), (1, 0), (2, 1)], (2, 0)),
];

/// Returns `true` if the board has at least one legal, match-producing swap.
///
/// Immediately `true` when any cell holds the wildcard color. Otherwise every
/// cell is tested against the twelve window patterns; the patterns only
/// accept palette colors, so empty, static, and wildcard cells never complete
/// a triple, and a hit whose completing swap passes through an empty or
/// static gap is discarded, since no legal swap can fill it.
/// O(rows×columns) with a constant factor of 12.
#[must_use]
pub fn has_available_move(board: &Board) -> bool {
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            if board.get(row, column).color() == TileColor::Wildcard {
                return true;
            }
            if row + 1 < board.rows()
                && column + 2 < board.columns()
                && matches_any_pattern(board, row, column, &WIDE_PATTERNS)
            {
                return true;
            }
            if row + 2 < board.rows()
                && column + 1 < board.columns()
                && matches_any_pattern(board, row, column, &TALL_PATTERNS)
            {
                return true;
            }
        }
    }
    false
}

fn matches_any_pattern(board: &Board, row: usize, column: usize, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|&(cells, (gap_r, gap_c))| {
        let [a, b, c] = cells.map(|(dr, dc)| board.get(row + dr, column + dc).color());
        let gap = board.get(row + gap_r, column + gap_c).color();
        board.is_palette_color(a) && a == b && a == c && board.is_matchable(gap)
    })
}
