//! Turn pipeline for the tilefall match-3 engine.
//!
//! [`Game`] ties the workspace together: it owns a
//! [`Board`](tilefall_core::Board) and a seeded RNG, validates player swaps,
//! removes matches, spawns and chains special tiles, applies gravity with
//! refill, and reshuffles dead boards. Every mutation returns plain event
//! records ([`Removal`], [`SpecialActivation`], [`SpawnedTile`],
//! [`FallPlan`]) for the presentation layer to consume after the call; the
//! engine itself never calls out.
//!
//! Everything is synchronous and single-owner: one `Game`, one board, one
//! writer. Determinism comes from the seed alone.

mod events;
mod game;

pub use self::{
    events::{
        ChainStep, FallPlan, Removal, RemovalReason, SpawnedTile, SpecialActivation, StepOutcome,
        TurnReport,
    },
    game::Game,
};
