use tilefall_core::Tile;

/// Why a tile left the board.
///
/// The front end keys its destruction effects off this; the engine itself
/// never branches on it after emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    /// Part of a detected run, or cleared by a Cross tile's row sweep.
    MatchedDirectly,
    /// Caught in a Bomb's 3×3 blast.
    BombBlast,
    /// Cleared by a Cross tile's column sweep.
    CrossBlast,
    /// Destroyed by a Mega tile's board-wide color laser.
    MegaLaser,
}

/// One destroyed tile: which tile, why, and where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// The tile as it was at the moment of destruction.
    pub tile: Tile,
    /// Why it was destroyed.
    pub reason: RemovalReason,
    /// Row of the cell it occupied.
    pub row: usize,
    /// Column of the cell it occupied.
    pub column: usize,
}

/// A special tile whose effect has fired (or is about to fire).
///
/// Unlike a [`Removal`], the tile is still on the board when the activation
/// is reported; its own cell is cleared by its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialActivation {
    /// The activated tile, kind intact.
    pub tile: Tile,
    /// Row of the activation cell.
    pub row: usize,
    /// Column of the activation cell.
    pub column: usize,
}

/// A tile freshly placed on the board outside of gravity: a Cross at a
/// crossing cell, or a Bomb/Mega spawned by a long run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedTile {
    /// The new tile.
    pub tile: Tile,
    /// Row it was placed at.
    pub row: usize,
    /// Column it was placed at.
    pub column: usize,
}

/// One tile movement under gravity.
///
/// Refill tiles enter with a negative `from_row` proportional to the column's
/// stack of empties, so the front end can animate a continuous fall from
/// above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallPlan {
    /// The falling tile (freshly allocated for refills).
    pub tile: Tile,
    /// Column the fall happens in.
    pub column: usize,
    /// Origin row; negative for refill tiles spawned above the board.
    pub from_row: isize,
    /// Destination row.
    pub to_row: usize,
}

/// Result of one direct-removal pass ([`crate::Game::remove_matches`]).
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// Normal tiles destroyed by the detected runs.
    pub removals: Vec<Removal>,
    /// Cross/Bomb/Mega tiles created by this pass.
    pub spawned: Vec<SpawnedTile>,
    /// `true` when special tiles are queued and
    /// [`crate::Game::try_chain_reaction`] must be called.
    pub pending_activations: bool,
}

/// One round of chain propagation ([`crate::Game::try_chain_reaction`]).
#[derive(Debug, Clone)]
pub struct ChainStep {
    /// Specials whose effects fired this round.
    pub activations: Vec<SpecialActivation>,
    /// Tiles their effects destroyed.
    pub removals: Vec<Removal>,
}

/// Everything that happened while resolving one turn to quiescence.
#[derive(Debug, Clone, Default)]
pub struct TurnReport {
    /// Every tile destroyed, across all cascades.
    pub removals: Vec<Removal>,
    /// Every special activation, in firing order.
    pub activations: Vec<SpecialActivation>,
    /// Every Cross/Bomb/Mega created.
    pub spawned: Vec<SpawnedTile>,
    /// Every gravity movement, including refills.
    pub falls: Vec<FallPlan>,
    /// How many shuffles were needed to leave the board playable.
    pub shuffles: u32,
}
