#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Skirmish demo match.
//!
//! Builds a battlefield from a TOML scenario (or the built-in demo), hands
//! one side to the commander, and loops: snapshot the world, plan a turn,
//! apply the resulting commands, report what happened. The map is rendered
//! as ASCII art after every turn unless `--quiet` is passed.

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use log::{info, warn};

use skirmish_core::{CellCoord, Event, PlayerId, SpawnPoint, TurnSnapshot};
use skirmish_system_commander::{Commander, Config};
use skirmish_world::{self as world, query, Board, World};

mod scenario;

use scenario::Scenario;

/// Plays a scripted demo match and prints the battlefield after each turn.
#[derive(Debug, Parser)]
#[command(name = "skirmish", version, about)]
struct Args {
    /// Number of turns to simulate.
    #[arg(long, default_value_t = 20)]
    turns: u32,

    /// Seed for the commander's random-exploration phase.
    #[arg(long, default_value_t = 2024)]
    seed: u64,

    /// Side the commander plays for.
    #[arg(long, default_value_t = 0)]
    player: u32,

    /// Path to a TOML scenario file; the built-in demo is used otherwise.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Suppresses the per-turn ASCII map.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario {}", path.display()))?;
            Scenario::from_toml(&text)
                .with_context(|| format!("failed to parse scenario {}", path.display()))?
        }
        None => Scenario::demo(),
    };
    let (board, mut world) = scenario.build().context("invalid scenario")?;

    let us = PlayerId::new(args.player);
    let mut commander = Commander::new(Config::new(us, args.seed));
    let mut razed: Vec<SpawnPoint> = Vec::new();

    for turn in 1..=args.turns {
        let snapshot = TurnSnapshot {
            units: query::unit_view(&world),
            collectibles: query::collectible_cells(&world),
            spawn_points_sighted: query::spawn_points(&world),
            spawn_points_razed: std::mem::take(&mut razed),
        };
        let commands = commander.plan_turn(&board, &snapshot);

        let mut moved = 0u32;
        let mut collected = 0u32;
        for command in &commands {
            let mut events = Vec::new();
            world::apply(&mut world, *command, &mut events);
            for event in events {
                match event {
                    Event::UnitMoved { .. } => moved += 1,
                    Event::MoveRejected {
                        unit,
                        direction,
                        reason,
                    } => warn!(
                        "turn {turn}: move {direction:?} for unit {} rejected: {reason:?}",
                        unit.get()
                    ),
                    Event::ResourceCollected { unit, cell } => {
                        collected += 1;
                        info!(
                            "turn {turn}: unit {} collected resource at ({}, {})",
                            unit.get(),
                            cell.column(),
                            cell.row()
                        );
                    }
                    Event::SpawnPointRazed { cell, owner } => {
                        info!(
                            "turn {turn}: spawn point of player {} razed at ({}, {})",
                            owner.get(),
                            cell.column(),
                            cell.row()
                        );
                        razed.push(SpawnPoint { cell, owner });
                    }
                }
            }
        }

        info!(
            "turn {turn}: {} commands, {moved} moved, {collected} collected, {} frontier cells left",
            commands.len(),
            commander.frontier().len()
        );

        if !args.quiet {
            println!("turn {turn}");
            println!("{}", render(&board, &world));
        }
    }

    Ok(())
}

/// Renders the battlefield as one character per cell.
///
/// `#` impassable, `*` collectible, `s` spawn point, digits are units
/// labelled by owner; `.` everything else.
fn render(board: &Board, world: &World) -> String {
    let collectibles = query::collectible_cells(world);
    let spawn_points = query::spawn_points(world);
    let units = query::unit_view(world);

    let mut output = String::new();
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let cell = CellCoord::new(column, row);
            let glyph = if let Some(unit) = units.iter().find(|unit| unit.cell == cell) {
                char::from_digit(unit.owner.get() % 10, 10).unwrap_or('?')
            } else if !board.is_passable(cell) {
                '#'
            } else if collectibles.contains(&cell) {
                '*'
            } else if spawn_points.iter().any(|spawn| spawn.cell == cell) {
                's'
            } else {
                '.'
            };
            output.push(glyph);
        }
        output.push('\n');
    }
    output
}
