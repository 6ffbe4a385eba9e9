//! Example playing random turns on a generated board.
//!
//! This example shows how to:
//! - Build a `Game` on a seeded random board
//! - Attempt swaps and resolve the resulting cascades
//! - Consume the returned event records per turn
//!
//! # Usage
//!
//! ```sh
//! cargo run --example playout
//! ```
//!
//! Pick the board shape, palette size, and seed:
//!
//! ```sh
//! cargo run --example playout -- --rows 10 --columns 10 --colors 4 --seed 7
//! ```
//!
//! Set `RUST_LOG=debug` to see reshuffle diagnostics.

use clap::Parser;
use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use tilefall_core::TileColor;
use tilefall_game::Game;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board rows.
    #[arg(long, value_name = "ROWS", default_value_t = 8)]
    rows: usize,

    /// Board columns.
    #[arg(long, value_name = "COLUMNS", default_value_t = 8)]
    columns: usize,

    /// Palette size, drawn from red/green/blue/yellow/purple/orange.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    colors: usize,

    /// RNG seed; the same seed replays the same session.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,

    /// Number of accepted swaps to play.
    #[arg(long, value_name = "COUNT", default_value_t = 10)]
    turns: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let palette = [
        TileColor::Red,
        TileColor::Green,
        TileColor::Blue,
        TileColor::Yellow,
        TileColor::Purple,
        TileColor::Orange,
    ];
    let colors = args.colors.clamp(3, palette.len());

    let mut game = Game::new(args.rows, args.columns, &palette[..colors], args.seed)?;
    let mut picker = Pcg64Mcg::seed_from_u64(args.seed.wrapping_add(1));

    println!("Board ({}x{}, seed {}):", args.rows, args.columns, args.seed);
    println!("{}", game.board());

    let mut played = 0;
    let mut attempts = 0;
    while played < args.turns && attempts < args.turns * 10_000 {
        attempts += 1;
        let row = picker.random_range(0..args.rows);
        let column = picker.random_range(0..args.columns);
        let other = if picker.random_bool(0.5) {
            (row + 1, column)
        } else {
            (row, column + 1)
        };
        if !game.try_swap((row, column), other) {
            continue;
        }
        played += 1;

        let report = game.resolve_turn();
        println!(
            "Turn {played}: swapped ({row}, {column}) <-> ({}, {})",
            other.0, other.1
        );
        println!(
            "  removed {}, activated {}, spawned {}, moved {}, shuffled {}",
            report.removals.len(),
            report.activations.len(),
            report.spawned.len(),
            report.falls.len(),
            report.shuffles,
        );
        println!("{}", game.board());
    }

    if played < args.turns {
        eprintln!("Gave up after {attempts} attempts with {played} accepted swaps.");
    }
    Ok(())
}
