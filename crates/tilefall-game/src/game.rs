use std::{collections::HashSet, mem};

use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use tilefall_core::{
    Board, BoardError, MatchRun, Tile, TileColor, TileId, TileKind, crossing_pairs,
};

use crate::{
    ChainStep, FallPlan, Removal, RemovalReason, SpawnedTile, SpecialActivation, StepOutcome,
    TurnReport,
};

/// A wildcard tile accepted in a swap: where it landed, and the color of the
/// tile it was swapped against. Becomes the Mega laser's target on the next
/// removal pass.
#[derive(Debug, Clone, Copy)]
struct WildcardSwap {
    row: usize,
    column: usize,
    target: TileColor,
}

/// A running match-3 session: a board, a seeded RNG, and the bookkeeping the
/// turn pipeline needs between calls.
///
/// The per-turn call order mirrors what a front end drives: [`try_swap`],
/// then [`remove_matches`], then [`try_chain_reaction`] until it returns
/// `None`, then [`compute_falls`] / [`apply_falls`], looping back to
/// `remove_matches` until the board settles, and finally [`ensure_solvable`].
/// [`resolve_turn`] runs everything after the swap in one call.
///
/// # Example
///
/// ```
/// use tilefall_core::TileColor;
/// use tilefall_game::Game;
///
/// let palette = [TileColor::Red, TileColor::Green, TileColor::Blue, TileColor::Yellow];
/// let mut game = Game::new(6, 6, &palette, 42).unwrap();
/// assert!(!game.board().has_matches());
/// assert!(game.has_available_move());
/// ```
///
/// [`try_swap`]: Game::try_swap
/// [`remove_matches`]: Game::remove_matches
/// [`try_chain_reaction`]: Game::try_chain_reaction
/// [`compute_falls`]: Game::compute_falls
/// [`apply_falls`]: Game::apply_falls
/// [`ensure_solvable`]: Game::ensure_solvable
/// [`resolve_turn`]: Game::resolve_turn
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    rng: Pcg64Mcg,
    /// Cells of the most recent accepted swap, used to bias special-tile
    /// placement toward where the player acted.
    swap_hint: Option<[(usize, usize); 2]>,
    wildcard_swap: Option<WildcardSwap>,
    mega_target: Option<(TileId, TileColor)>,
    /// Specials waiting to fire in the next chain round.
    queue: Vec<SpecialActivation>,
    /// Every special activated since the last `remove_matches`, by identity.
    /// Prevents re-activation loops across chain rounds.
    processed: HashSet<TileId>,
}

impl Game {
    /// Starts a session on a freshly generated board.
    ///
    /// The board is guaranteed matchless with at least one available swap
    /// (see [`tilefall_generator::random_board`]). The same seed always
    /// produces the same session.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are below 3×3 or the palette is
    /// empty or contains a sentinel color.
    pub fn new(
        rows: usize,
        columns: usize,
        palette: &[TileColor],
        seed: u64,
    ) -> Result<Self, BoardError> {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let board = tilefall_generator::random_board(&mut rng, rows, columns, palette)?;
        Ok(Self::with_parts(board, rng))
    }

    /// Starts a session on an existing board, typically one parsed from the
    /// text import format.
    #[must_use]
    pub fn from_board(board: Board, seed: u64) -> Self {
        Self::with_parts(board, Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_parts(board: Board, rng: Pcg64Mcg) -> Self {
        Self {
            board,
            rng,
            swap_hint: None,
            wildcard_swap: None,
            mega_target: None,
            queue: Vec::new(),
            processed: HashSet::new(),
        }
    }

    /// The current board, for rendering and inspection.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns `true` if any legal swap would produce a match.
    #[must_use]
    pub fn has_available_move(&self) -> bool {
        tilefall_solver::has_available_move(&self.board)
    }

    /// Attempts to swap two cells, returning whether the swap was accepted.
    ///
    /// Rejected without mutation: out-of-range or non-adjacent coordinates,
    /// empty or static participants, and same-color no-op swaps. A swap
    /// involving a wildcard tile is accepted unconditionally and records the
    /// Mega trigger for the next [`remove_matches`](Game::remove_matches);
    /// otherwise the swap stands only if it produces a match. A rejected
    /// provisional swap is rolled back exactly, identity included.
    pub fn try_swap(&mut self, first: (usize, usize), second: (usize, usize)) -> bool {
        let (r1, c1) = first;
        let (r2, c2) = second;
        if r1 >= self.board.rows()
            || r2 >= self.board.rows()
            || c1 >= self.board.columns()
            || c2 >= self.board.columns()
        {
            return false;
        }
        if r1.abs_diff(r2) + c1.abs_diff(c2) != 1 {
            return false;
        }
        let a = self.board.get(r1, c1);
        let b = self.board.get(r2, c2);
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if self.board.is_static(r1, c1) || self.board.is_static(r2, c2) {
            return false;
        }
        if a.color() == b.color() {
            return false;
        }

        self.board.set(r1, c1, b);
        self.board.set(r2, c2, a);

        if a.color() == TileColor::Wildcard || b.color() == TileColor::Wildcard {
            // The wildcard's post-swap position and the color it displaced.
            let swap = if a.color() == TileColor::Wildcard {
                WildcardSwap { row: r2, column: c2, target: b.color() }
            } else {
                WildcardSwap { row: r1, column: c1, target: a.color() }
            };
            self.wildcard_swap = Some(swap);
            self.swap_hint = Some([first, second]);
            return true;
        }

        if self.board.has_matches() {
            self.swap_hint = Some([first, second]);
            true
        } else {
            self.board.set(r1, c1, a);
            self.board.set(r2, c2, b);
            false
        }
    }

    /// Runs one direct-removal pass: destroys matched normal tiles, queues
    /// matched specials (and a swapped wildcard) for activation, and places
    /// Cross, Bomb, and Mega tiles.
    ///
    /// Begins a new resolution: any activation state left over from a
    /// previous pass is discarded. When the outcome reports pending
    /// activations, drive them with
    /// [`try_chain_reaction`](Game::try_chain_reaction) before touching
    /// gravity.
    pub fn remove_matches(&mut self) -> StepOutcome {
        self.queue.clear();
        self.processed.clear();

        let runs = self.board.find_matches();
        let crossings = crossing_pairs(&runs);

        let mut removals = Vec::new();
        for run in &runs {
            for (row, column) in run.cells() {
                let tile = self.board.get(row, column);
                if tile.is_empty() {
                    // Cleared by an overlapping run already.
                    continue;
                }
                if tile.kind().is_special() {
                    if self.processed.insert(tile.id()) {
                        self.queue.push(SpecialActivation { tile, row, column });
                    }
                    continue;
                }
                removals.push(Removal {
                    tile,
                    reason: RemovalReason::MatchedDirectly,
                    row,
                    column,
                });
                self.board.set(row, column, Tile::EMPTY);
            }
        }

        if let Some(swap) = self.wildcard_swap.take() {
            let tile = self.board.get(swap.row, swap.column);
            if tile.kind() == TileKind::Mega && self.processed.insert(tile.id()) {
                self.mega_target = Some((tile.id(), swap.target));
                self.queue.push(SpecialActivation {
                    tile,
                    row: swap.row,
                    column: swap.column,
                });
            }
        }

        let mut spawned = Vec::new();
        for pair in &crossings {
            let (row, column) = pair.cell();
            if self.board.get(row, column).kind() == TileKind::Normal {
                let cross = self.board.allocate(pair.horizontal.color, TileKind::Cross);
                self.board.set(row, column, cross);
                spawned.push(SpawnedTile { tile: cross, row, column });
            }
        }
        for run in &runs {
            if run.length < 4 {
                continue;
            }
            let (color, kind) = if run.length > 4 {
                (TileColor::Wildcard, TileKind::Mega)
            } else {
                (run.color, TileKind::Bomb)
            };
            if let Some((row, column)) = self.special_cell(run) {
                let special = self.board.allocate(color, kind);
                self.board.set(row, column, special);
                spawned.push(SpawnedTile { tile: special, row, column });
            }
        }

        StepOutcome {
            removals,
            spawned,
            pending_activations: !self.queue.is_empty(),
        }
    }

    /// Picks the cell a run's Bomb/Mega lands on: the first swap cell inside
    /// the run, then the second, then a center-outward scan. `None` when no
    /// cell in the run can take it (every cell holds another special).
    fn special_cell(&self, run: &MatchRun) -> Option<(usize, usize)> {
        if let Some(hint) = self.swap_hint {
            for (row, column) in hint {
                if run.contains(row, column)
                    && self.board.get(row, column).kind() == TileKind::Normal
                {
                    return Some((row, column));
                }
            }
        }
        let cells: Vec<_> = run.cells().collect();
        let center = cells.len() / 2;
        let mut order = Vec::with_capacity(cells.len());
        order.push(center);
        for offset in 1..cells.len() {
            if center >= offset {
                order.push(center - offset);
            }
            if center + offset < cells.len() {
                order.push(center + offset);
            }
        }
        order
            .into_iter()
            .map(|index| cells[index])
            .find(|&(row, column)| self.board.get(row, column).kind() == TileKind::Normal)
    }

    /// Fires every queued special once and collects the specials their
    /// blasts touched into the next round's queue. Returns `None` when no
    /// activation is pending, i.e. the cascade has quiesced.
    ///
    /// Each round strictly consumes tiles, so a full resolution performs at
    /// most rows×columns activations.
    pub fn try_chain_reaction(&mut self) -> Option<ChainStep> {
        if self.queue.is_empty() {
            return None;
        }
        let pending = mem::take(&mut self.queue);
        let mut newly = Vec::new();
        let mut removals = Vec::new();
        for activation in &pending {
            self.apply_effect(*activation, &mut newly, &mut removals);
        }
        self.queue = newly;
        Some(ChainStep {
            activations: pending,
            removals,
        })
    }

    fn apply_effect(
        &mut self,
        activation: SpecialActivation,
        newly: &mut Vec<SpecialActivation>,
        removals: &mut Vec<Removal>,
    ) {
        let SpecialActivation { tile, row, column } = activation;
        let (rows, columns) = (self.board.rows(), self.board.columns());
        match tile.kind() {
            TileKind::Normal => {}
            TileKind::Bomb => {
                // Kind reset first so the blast destroys its own cell
                // instead of re-activating it.
                self.board.set(row, column, tile.with_kind(TileKind::Normal));
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        self.destroy_or_activate(
                            row as isize + dr,
                            column as isize + dc,
                            RemovalReason::BombBlast,
                            newly,
                            removals,
                        );
                    }
                }
            }
            TileKind::Cross => {
                self.board.set(row, column, tile.with_kind(TileKind::Normal));
                for c in 0..columns {
                    self.destroy_or_activate(
                        row as isize,
                        c as isize,
                        RemovalReason::MatchedDirectly,
                        newly,
                        removals,
                    );
                }
                for r in 0..rows {
                    self.destroy_or_activate(
                        r as isize,
                        column as isize,
                        RemovalReason::CrossBlast,
                        newly,
                        removals,
                    );
                }
            }
            TileKind::Mega => {
                let target = self
                    .mega_target
                    .take_if(|&mut (id, _)| id == tile.id())
                    .map(|(_, color)| color);
                match target {
                    Some(color) => {
                        // Recolored to the target so the sweep clears the
                        // trigger cell along with everything else.
                        let spent = tile.with_kind(TileKind::Normal).with_color(color);
                        self.board.set(row, column, spent);
                        for r in 0..rows {
                            for c in 0..columns {
                                if self.board.get(r, c).color() == color {
                                    self.destroy_or_activate(
                                        r as isize,
                                        c as isize,
                                        RemovalReason::MegaLaser,
                                        newly,
                                        removals,
                                    );
                                }
                            }
                        }
                    }
                    None => {
                        // Chain-activated Mega: no recorded target color, so
                        // it spends itself without firing the laser.
                        removals.push(Removal {
                            tile: tile.with_kind(TileKind::Normal),
                            reason: RemovalReason::MegaLaser,
                            row,
                            column,
                        });
                        self.board.set(row, column, Tile::EMPTY);
                    }
                }
            }
        }
    }

    /// Destroys the tile at a blast coordinate, or turns a special caught in
    /// the blast into a new pending activation. Out-of-bounds coordinates,
    /// empty cells, and static cells are skipped.
    fn destroy_or_activate(
        &mut self,
        row: isize,
        column: isize,
        reason: RemovalReason,
        newly: &mut Vec<SpecialActivation>,
        removals: &mut Vec<Removal>,
    ) {
        if !self.board.in_bounds(row, column) {
            return;
        }
        #[allow(clippy::cast_sign_loss)]
        let (row, column) = (row as usize, column as usize);
        let tile = self.board.get(row, column);
        if tile.is_empty() || self.board.is_static(row, column) {
            return;
        }
        if tile.kind().is_special() {
            if self.processed.insert(tile.id()) {
                newly.push(SpecialActivation { tile, row, column });
            } else {
                log::warn!(
                    "tile {} at ({row}, {column}) already activated in this resolution",
                    tile.id().value()
                );
            }
            return;
        }
        removals.push(Removal { tile, reason, row, column });
        self.board.set(row, column, Tile::EMPTY);
    }

    /// Plans gravity for the current board: settled tiles slide down by the
    /// number of empty cells beneath them, and each column's remaining
    /// empties are filled by freshly allocated tiles entering from above the
    /// board (negative origin rows, fall distance proportional to the stack
    /// of empties).
    ///
    /// The board is not modified; commit the plans with
    /// [`apply_falls`](Game::apply_falls). Refill tiles are allocated here,
    /// which advances the RNG.
    pub fn compute_falls(&mut self) -> Vec<FallPlan> {
        let rows = self.board.rows();
        let mut plans = Vec::new();
        for column in 0..self.board.columns() {
            // The bottom row has nowhere to fall.
            for row in (0..rows - 1).rev() {
                let tile = self.board.get(row, column);
                if tile.is_empty() {
                    continue;
                }
                let drop = self.board.empty_below(row, column);
                if drop > 0 {
                    plans.push(FallPlan {
                        tile,
                        column,
                        from_row: row as isize,
                        to_row: row + drop,
                    });
                }
            }
            let empties = self.board.column_empty_count(column);
            for slot in (0..empties).rev() {
                let tile = self.random_refill_tile();
                plans.push(FallPlan {
                    tile,
                    column,
                    from_row: slot as isize - empties as isize,
                    to_row: slot,
                });
            }
        }
        plans
    }

    /// Commits a set of fall plans, returning `false` when there was nothing
    /// to move (the board was already settled, no refill happened).
    ///
    /// Origins are vacated before any destination is written, so plans may
    /// be applied in any order within one call.
    pub fn apply_falls(&mut self, plans: &[FallPlan]) -> bool {
        if plans.is_empty() {
            return false;
        }
        for plan in plans {
            if let Ok(row) = usize::try_from(plan.from_row) {
                self.board.set(row, plan.column, Tile::EMPTY);
            }
        }
        for plan in plans {
            self.board.set(plan.to_row, plan.column, plan.tile);
        }
        true
    }

    /// Shuffles until the board is matchless with at least one available
    /// swap, returning the number of shuffles (usually `0`).
    pub fn ensure_solvable(&mut self) -> u32 {
        let shuffles = tilefall_generator::shuffle_until_solvable(&mut self.rng, &mut self.board);
        if shuffles > 0 {
            log::debug!("board reshuffled {shuffles} time(s) to restore a move");
        }
        shuffles
    }

    /// Runs the full post-swap pipeline to quiescence: removal, chain
    /// reactions, gravity and refill, repeated until nothing changes, then a
    /// final solvability pass.
    pub fn resolve_turn(&mut self) -> TurnReport {
        let mut report = TurnReport::default();
        loop {
            let mut outcome = self.remove_matches();
            let quiet = outcome.removals.is_empty()
                && outcome.spawned.is_empty()
                && !outcome.pending_activations;
            report.removals.append(&mut outcome.removals);
            report.spawned.append(&mut outcome.spawned);
            while let Some(mut step) = self.try_chain_reaction() {
                report.activations.append(&mut step.activations);
                report.removals.append(&mut step.removals);
            }
            let falls = self.compute_falls();
            let fell = self.apply_falls(&falls);
            report.falls.extend(falls);
            if quiet && !fell {
                break;
            }
        }
        report.shuffles = self.ensure_solvable();
        report
    }

    fn random_refill_tile(&mut self) -> Tile {
        let count = self.board.palette().len();
        let index = self.rng.random_range(0..count);
        let color = self.board.palette()[index];
        self.board.allocate(color, TileKind::Normal)
    }
}
