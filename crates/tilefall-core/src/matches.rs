//! Match detection: same-color runs and crossing run pairs.

use crate::{Board, TileColor};

/// Minimum run length that counts as a match, and the minimum board
/// dimension.
pub const MIN_MATCH_LENGTH: usize = 3;

/// Direction of a [`MatchRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The run extends along one row.
    Horizontal,
    /// The run extends along one column.
    Vertical,
}

/// A maximal same-color run of at least [`MIN_MATCH_LENGTH`] tiles.
///
/// Descriptors are produced fresh by every [`Board::find_matches`] pass and
/// never persisted; mutating the board invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRun {
    /// Row of the first (leftmost / topmost) cell.
    pub row: usize,
    /// Column of the first cell.
    pub column: usize,
    /// Number of cells in the run, at least [`MIN_MATCH_LENGTH`].
    pub length: usize,
    /// Direction the run extends in.
    pub orientation: Orientation,
    /// The matched color.
    pub color: TileColor,
}

impl MatchRun {
    /// Iterates the cells covered by this run, start to end.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let MatchRun {
            row,
            column,
            length,
            orientation,
            ..
        } = *self;
        (0..length).map(move |offset| match orientation {
            Orientation::Horizontal => (row, column + offset),
            Orientation::Vertical => (row + offset, column),
        })
    }

    /// Returns `true` if `(row, column)` lies within this run.
    #[must_use]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        match self.orientation {
            Orientation::Horizontal => {
                row == self.row && (self.column..self.column + self.length).contains(&column)
            }
            Orientation::Vertical => {
                column == self.column && (self.row..self.row + self.length).contains(&row)
            }
        }
    }
}

/// A horizontal and a vertical [`MatchRun`] sharing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingPair {
    /// The horizontal member.
    pub horizontal: MatchRun,
    /// The vertical member.
    pub vertical: MatchRun,
}

impl CrossingPair {
    /// Returns the shared cell: the horizontal run's row, the vertical run's
    /// column.
    #[must_use]
    pub const fn cell(&self) -> (usize, usize) {
        (self.horizontal.row, self.vertical.column)
    }
}

/// Reports every horizontal/vertical pair of runs that intersect at a shared
/// cell.
///
/// All qualifying pairs are returned; a single run may cross several
/// perpendicular runs.
#[must_use]
pub fn crossing_pairs(runs: &[MatchRun]) -> Vec<CrossingPair> {
    let mut pairs = Vec::new();
    for (i, &first) in runs.iter().enumerate() {
        for &second in &runs[i + 1..] {
            let (horizontal, vertical) = match (first.orientation, second.orientation) {
                (Orientation::Horizontal, Orientation::Vertical) => (first, second),
                (Orientation::Vertical, Orientation::Horizontal) => (second, first),
                _ => continue,
            };
            let column_hit = (horizontal.column..horizontal.column + horizontal.length)
                .contains(&vertical.column);
            let row_hit = (vertical.row..vertical.row + vertical.length).contains(&horizontal.row);
            if column_hit && row_hit {
                pairs.push(CrossingPair {
                    horizontal,
                    vertical,
                });
            }
        }
    }
    pairs
}

impl Board {
    /// Returns `true` if the board currently contains at least one match.
    #[must_use]
    pub fn has_matches(&self) -> bool {
        !self.find_matches().is_empty()
    }

    /// Scans the whole board for same-color runs of length ≥ 3.
    ///
    /// Two independent passes: each row left to right, then each column top
    /// to bottom. A cell breaks the current run when its color is not
    /// matchable (empty or static) **or** when any empty cell lies strictly
    /// below it — a tile hanging mid-fall never counts toward a match, so no
    /// match is registered before gravity settles.
    ///
    /// Runs are greedy and leftmost/topmost; horizontal runs precede vertical
    /// ones in the result. Everything is recomputed from scratch on each
    /// call.
    #[must_use]
    pub fn find_matches(&self) -> Vec<MatchRun> {
        let mut runs = Vec::new();
        for row in 0..self.rows() {
            self.scan_line(Orientation::Horizontal, row, &mut runs);
        }
        for column in 0..self.columns() {
            self.scan_line(Orientation::Vertical, column, &mut runs);
        }
        runs
    }

    fn scan_line(&self, orientation: Orientation, line: usize, runs: &mut Vec<MatchRun>) {
        let line_len = match orientation {
            Orientation::Horizontal => self.columns(),
            Orientation::Vertical => self.rows(),
        };
        let cell = |index: usize| match orientation {
            Orientation::Horizontal => (line, index),
            Orientation::Vertical => (index, line),
        };
        let flush = |runs: &mut Vec<MatchRun>, start: usize, length: usize, color: TileColor| {
            if length >= MIN_MATCH_LENGTH {
                let (row, column) = cell(start);
                runs.push(MatchRun {
                    row,
                    column,
                    length,
                    orientation,
                    color,
                });
            }
        };

        let mut current = TileColor::Empty;
        let mut length = 0;
        for index in 0..line_len {
            let (row, column) = cell(index);
            let tile = self.get(row, column);
            let hanging = self.empty_below(row, column) > 0;

            if !self.is_matchable(tile.color()) || hanging {
                flush(runs, index - length, length, current);
                current = TileColor::Empty;
                length = 0;
            } else if tile.color() == current {
                length += 1;
                if index == line_len - 1 {
                    flush(runs, index + 1 - length, length, current);
                }
            } else {
                flush(runs, index - length, length, current);
                current = tile.color();
                length = 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{Tile, TileColor, TileColor::*};

    fn board(rows: &[&str]) -> Board {
        let colors = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| TileColor::from_letter(c).expect("valid letter"))
                    .collect()
            })
            .collect::<Vec<Vec<_>>>();
        Board::from_rows(&colors, &[Red, Green, Blue]).unwrap()
    }

    #[test]
    fn simple_board_has_exactly_two_runs() {
        let board = board(&["RGGR", "GGBG", "BGGR", "BBBR"]);

        let matches = board.find_matches();
        assert_eq!(matches.len(), 2);
        assert!(matches.contains(&MatchRun {
            row: 0,
            column: 1,
            length: 3,
            orientation: Orientation::Vertical,
            color: Green,
        }));
        assert!(matches.contains(&MatchRun {
            row: 3,
            column: 0,
            length: 3,
            orientation: Orientation::Horizontal,
            color: Blue,
        }));
        assert!(board.has_matches());
    }

    #[test]
    fn no_match_board_yields_nothing() {
        let board = board(&["RGG", "BGR", "RBR"]);
        assert!(board.find_matches().is_empty());
        assert!(!board.has_matches());
    }

    #[test]
    fn many_matches_board_yields_all_five_runs() {
        let board = board(&["BGGR", "BGGR", "BGGR", "BRRR"]);

        let matches = board.find_matches();
        assert_eq!(matches.len(), 5);
        for expected in [
            MatchRun {
                row: 3,
                column: 1,
                length: 3,
                orientation: Orientation::Horizontal,
                color: Red,
            },
            MatchRun {
                row: 0,
                column: 0,
                length: 4,
                orientation: Orientation::Vertical,
                color: Blue,
            },
            MatchRun {
                row: 0,
                column: 1,
                length: 3,
                orientation: Orientation::Vertical,
                color: Green,
            },
            MatchRun {
                row: 0,
                column: 2,
                length: 3,
                orientation: Orientation::Vertical,
                color: Green,
            },
            MatchRun {
                row: 0,
                column: 3,
                length: 4,
                orientation: Orientation::Vertical,
                color: Red,
            },
        ] {
            assert!(matches.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn run_start_is_correct_when_broken_by_static_cell() {
        // RRRS G: the static cell breaks the run; the run starts at column 0.
        let board = board(&["RRRSG", "GBGBG", "BGBGB", "GBGBG"]);
        let matches = board.find_matches();
        assert_eq!(
            matches,
            vec![MatchRun {
                row: 0,
                column: 0,
                length: 3,
                orientation: Orientation::Horizontal,
                color: Red,
            }]
        );
    }

    #[test]
    fn hanging_tiles_never_match() {
        // Column 3 of row 3 is empty, so every tile above it hangs; the
        // horizontal R run in row 0 would otherwise be length 4.
        let mut board = board(&["RRRR", "GBGB", "BGBG", "GBGR"]);
        board.set(3, 3, Tile::EMPTY);

        let matches = board.find_matches();
        assert_eq!(
            matches,
            vec![MatchRun {
                row: 0,
                column: 0,
                length: 3,
                orientation: Orientation::Horizontal,
                color: Red,
            }]
        );
    }

    #[test]
    fn run_cells_and_contains() {
        let run = MatchRun {
            row: 2,
            column: 1,
            length: 3,
            orientation: Orientation::Horizontal,
            color: Red,
        };
        assert_eq!(run.cells().collect::<Vec<_>>(), vec![(2, 1), (2, 2), (2, 3)]);
        assert!(run.contains(2, 1));
        assert!(run.contains(2, 3));
        assert!(!run.contains(2, 4));
        assert!(!run.contains(1, 2));

        let vertical = MatchRun {
            orientation: Orientation::Vertical,
            ..run
        };
        assert_eq!(
            vertical.cells().collect::<Vec<_>>(),
            vec![(2, 1), (3, 1), (4, 1)]
        );
        assert!(vertical.contains(4, 1));
        assert!(!vertical.contains(5, 1));
    }

    #[test]
    fn crossing_pairs_reports_all_intersections() {
        // Row 3 R run crosses the column 3 R run at (3, 3).
        let board = board(&["BGGR", "BGGR", "BGGR", "BRRR"]);
        let runs = board.find_matches();
        let pairs = crossing_pairs(&runs);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].cell(), (3, 3));
        assert_eq!(pairs[0].horizontal.color, Red);
        assert_eq!(pairs[0].vertical.color, Red);
    }

    #[test]
    fn non_intersecting_runs_do_not_pair() {
        // Vertical G run rows 0-2 column 1, horizontal B run row 3: the
        // horizontal row lies outside the vertical span.
        let board = board(&["RGGR", "GGBG", "BGGR", "BBBR"]);
        let runs = board.find_matches();
        assert!(crossing_pairs(&runs).is_empty());
    }

    proptest! {
        /// No reported run may cover a hanging cell or a non-matchable color,
        /// and every run's cells really do share one color.
        #[test]
        fn runs_are_consistent(cells in proptest::collection::vec(0u8..5, 36)) {
            let colors = cells
                .chunks(6)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|&c| match c {
                            0 => Empty,
                            1 => Red,
                            2 => Green,
                            3 => Blue,
                            _ => Static,
                        })
                        .collect()
                })
                .collect::<Vec<Vec<_>>>();
            let board = Board::from_rows(&colors, &[Red, Green, Blue]).unwrap();

            for run in board.find_matches() {
                prop_assert!(run.length >= MIN_MATCH_LENGTH);
                for (row, column) in run.cells() {
                    let tile = board.get(row, column);
                    prop_assert_eq!(tile.color(), run.color);
                    prop_assert!(board.is_matchable(tile.color()));
                    prop_assert_eq!(board.empty_below(row, column), 0);
                }
            }
        }
    }
}
