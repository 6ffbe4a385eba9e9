//! Random board construction and reshuffling.
//!
//! All randomness flows through a caller-supplied [`rand::Rng`], so the same
//! seed always produces the same board. Boards built here come with two
//! guarantees: no pre-existing match, and at least one available swap
//! (checked with [`tilefall_solver::has_available_move`]).
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64Mcg;
//! use tilefall_core::TileColor;
//! use tilefall_generator::random_board;
//!
//! let palette = [TileColor::Red, TileColor::Green, TileColor::Blue];
//! let mut rng = Pcg64Mcg::seed_from_u64(7);
//! let board = random_board(&mut rng, 6, 6, &palette).unwrap();
//! assert!(!board.has_matches());
//! ```

use rand::{Rng, RngExt as _, seq::SliceRandom as _};
use tilefall_core::{Board, BoardError, Tile, TileColor, TileKind};
use tilefall_solver::has_available_move;

/// Builds a `rows`×`columns` board filled with random palette colors,
/// guaranteed matchless and with at least one available swap.
///
/// Cells that land inside a match are re-rolled rather than regenerating the
/// whole board, so generation converges quickly even on small palettes. If a
/// matchless fill has no available swap it is shuffled and re-checked.
///
/// # Errors
///
/// Returns an error if the dimensions are below 3×3 or the palette is empty
/// or contains a sentinel color.
pub fn random_board<R>(
    rng: &mut R,
    rows: usize,
    columns: usize,
    palette: &[TileColor],
) -> Result<Board, BoardError>
where
    R: Rng + ?Sized,
{
    let mut board = Board::empty(rows, columns, palette)?;
    refill(rng, &mut board);
    loop {
        let runs = board.find_matches();
        if runs.is_empty() {
            if has_available_move(&board) {
                return Ok(board);
            }
            shuffle(rng, &mut board);
            continue;
        }
        for run in &runs {
            for (row, column) in run.cells() {
                let tile = random_tile(rng, &mut board);
                board.set(row, column, tile);
            }
        }
    }
}

/// Fills every empty cell with a freshly allocated random palette tile.
///
/// Non-empty cells are left untouched. Makes no matchlessness guarantee;
/// use [`random_board`] for that.
pub fn refill<R>(rng: &mut R, board: &mut Board)
where
    R: Rng + ?Sized,
{
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            if board.get(row, column).is_empty() {
                let tile = random_tile(rng, board);
                board.set(row, column, tile);
            }
        }
    }
}

/// Permutes the movable tiles in place with a Fisher–Yates shuffle.
///
/// Empty and static cells keep their positions; every other tile may move.
/// Tiles are rearranged, not reallocated, so the color multiset and tile
/// identities are preserved.
pub fn shuffle<R>(rng: &mut R, board: &mut Board)
where
    R: Rng + ?Sized,
{
    let mut positions = Vec::new();
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            if !board.get(row, column).is_empty() && !board.is_static(row, column) {
                positions.push((row, column));
            }
        }
    }
    let mut tiles = positions
        .iter()
        .map(|&(row, column)| board.get(row, column))
        .collect::<Vec<_>>();
    tiles.shuffle(rng);
    for (&(row, column), tile) in positions.iter().zip(tiles) {
        board.set(row, column, tile);
    }
}

/// Shuffles until the board is matchless and has an available swap, returning
/// the number of shuffles performed.
///
/// Returns `0` without touching the board when it already qualifies. The loop
/// is probabilistic and unbounded: the caller must ensure the tile multiset
/// admits at least one playable arrangement, which holds for any board built
/// by [`random_board`].
pub fn shuffle_until_solvable<R>(rng: &mut R, board: &mut Board) -> u32
where
    R: Rng + ?Sized,
{
    let mut shuffles = 0;
    while board.has_matches() || !has_available_move(board) {
        shuffle(rng, board);
        shuffles += 1;
    }
    shuffles
}

fn random_tile<R>(rng: &mut R, board: &mut Board) -> Tile
where
    R: Rng + ?Sized,
{
    let palette = board.palette();
    let color = palette[rng.random_range(0..palette.len())];
    board.allocate(color, TileKind::Normal)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use tilefall_core::TileColor::*;

    use super::*;

    const PALETTE: [TileColor; 4] = [Red, Green, Blue, Yellow];

    fn color_counts(board: &Board) -> HashMap<TileColor, usize> {
        let mut counts = HashMap::new();
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                *counts.entry(board.get(row, column).color()).or_insert(0) += 1;
            }
        }
        counts
    }

    fn tile_ids(board: &Board) -> HashSet<u64> {
        let mut ids = HashSet::new();
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                ids.insert(board.get(row, column).id().value());
            }
        }
        ids
    }

    #[test]
    fn random_board_is_matchless_and_solvable() {
        for seed in 0..20 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let board = random_board(&mut rng, 6, 6, &PALETTE).unwrap();
            assert!(!board.has_matches(), "seed {seed} left a match:\n{board}");
            assert!(has_available_move(&board), "seed {seed} is dead:\n{board}");
            for row in 0..board.rows() {
                for column in 0..board.columns() {
                    let tile = board.get(row, column);
                    assert!(board.is_palette_color(tile.color()));
                    assert_eq!(tile.kind(), TileKind::Normal);
                }
            }
        }
    }

    #[test]
    fn random_board_is_deterministic_per_seed() {
        let mut a = Pcg64Mcg::seed_from_u64(42);
        let mut b = Pcg64Mcg::seed_from_u64(42);
        assert_eq!(
            random_board(&mut a, 5, 7, &PALETTE).unwrap(),
            random_board(&mut b, 5, 7, &PALETTE).unwrap(),
        );
    }

    #[test]
    fn random_board_rejects_bad_dimensions() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        assert!(random_board(&mut rng, 2, 6, &PALETTE).is_err());
        assert!(random_board(&mut rng, 6, 6, &[]).is_err());
    }

    #[test]
    fn refill_fills_only_empty_cells() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let mut board = random_board(&mut rng, 4, 4, &PALETTE).unwrap();
        let kept = board.get(0, 0);
        board.set(1, 1, Tile::EMPTY);
        board.set(3, 2, Tile::EMPTY);

        refill(&mut rng, &mut board);

        assert_eq!(board.get(0, 0), kept);
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                assert!(!board.get(row, column).is_empty());
            }
        }
    }

    #[test]
    fn shuffle_keeps_static_cells_in_place() {
        let colors = vec![
            vec![Red, Green, Blue, Yellow],
            vec![Green, Static, Yellow, Red],
            vec![Blue, Yellow, Red, Green],
            vec![Yellow, Red, Green, Blue],
        ];
        let mut board = Board::from_rows(&colors, &PALETTE).unwrap();
        let anchor = board.get(1, 1);
        let mut rng = Pcg64Mcg::seed_from_u64(9);

        shuffle(&mut rng, &mut board);

        assert_eq!(board.get(1, 1), anchor);
        assert!(board.is_static(1, 1));
    }

    #[test]
    fn shuffle_until_solvable_reaches_playable_state() {
        let colors = vec![
            vec![Red, Green, Green],
            vec![Blue, Green, Red],
            vec![Red, Blue, Red],
        ];
        let mut board = Board::from_rows(&colors, &[Red, Green, Blue]).unwrap();
        assert!(!has_available_move(&board));

        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let shuffles = shuffle_until_solvable(&mut rng, &mut board);

        assert!(shuffles >= 1);
        assert!(!board.has_matches());
        assert!(has_available_move(&board));
    }

    #[test]
    fn shuffle_until_solvable_leaves_playable_board_alone() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let mut board = random_board(&mut rng, 6, 6, &PALETTE).unwrap();
        let before = board.clone();
        assert_eq!(shuffle_until_solvable(&mut rng, &mut board), 0);
        assert_eq!(board, before);
    }

    proptest! {
        #[test]
        fn shuffle_preserves_tiles(seed in any::<u64>()) {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let mut board = random_board(&mut rng, 5, 6, &PALETTE).unwrap();
            let colors_before = color_counts(&board);
            let ids_before = tile_ids(&board);

            shuffle(&mut rng, &mut board);

            prop_assert_eq!(colors_before, color_counts(&board));
            prop_assert_eq!(ids_before, tile_ids(&board));
        }
    }
}
