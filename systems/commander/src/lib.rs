#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-turn decision pipeline for one side's units.
//!
//! The commander is the only stateful piece of the engine: it carries the
//! frontier and spawn-knowledge trackers between turns and owns the seeded
//! RNG that drives random exploration. Each call to
//! [`Commander::plan_turn`] runs the four phases in fixed priority order
//! (collect, explore the frontier, wander, attack), threading one
//! [`TurnContext`] through all of them so later phases only see units and
//! destinations left unclaimed by earlier ones.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skirmish_core::{CellCoord, Command, Direction, PlayerId, TurnSnapshot, UnitSnapshot};
use skirmish_system_frontier::FrontierTracker;
use skirmish_system_movement::{probe, try_reserve, TurnContext};
use skirmish_system_routing::{generate_routes, resolve};
use skirmish_system_spawn_intel::SpawnIntel;
use skirmish_world::Board;

/// Configuration parameters required to construct the commander.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    player: PlayerId,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration for the provided side and RNG seed.
    #[must_use]
    pub const fn new(player: PlayerId, rng_seed: u64) -> Self {
        Self { player, rng_seed }
    }
}

/// Stateful decision engine driving one side for the duration of a match.
#[derive(Clone, Debug)]
pub struct Commander {
    player: PlayerId,
    rng: ChaCha8Rng,
    frontier: FrontierTracker,
    spawn_intel: SpawnIntel,
    turn: u64,
}

impl Commander {
    /// Creates a new commander using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            player: config.player,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            frontier: FrontierTracker::new(),
            spawn_intel: SpawnIntel::new(config.player),
            turn: 0,
        }
    }

    /// Side this commander plays for.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// Read access to the cross-turn frontier tracker.
    #[must_use]
    pub const fn frontier(&self) -> &FrontierTracker {
        &self.frontier
    }

    /// Read access to the cross-turn spawn knowledge tracker.
    #[must_use]
    pub const fn spawn_intel(&self) -> &SpawnIntel {
        &self.spawn_intel
    }

    /// Computes the full move list for one turn.
    ///
    /// Every emitted command names a distinct unit, and no two commands
    /// target the same destination cell. A unit that fails every phase
    /// stays idle this turn and emits no move.
    pub fn plan_turn(&mut self, board: &Board, snapshot: &TurnSnapshot) -> Vec<Command> {
        if self.turn == 0 {
            self.frontier.reinitialize(board);
        }
        self.turn = self.turn.saturating_add(1);

        let own_units: Vec<UnitSnapshot> = snapshot
            .units
            .owned_by(self.player)
            .copied()
            .collect();
        let own_cells: Vec<CellCoord> = own_units.iter().map(|unit| unit.cell).collect();

        self.frontier.observe(&own_cells);
        self.spawn_intel
            .record(&snapshot.spawn_points_sighted, &snapshot.spawn_points_razed);

        let mut ctx = TurnContext::new();
        let mut out = Vec::new();

        let collectibles = canonical_destinations(&snapshot.collectibles);
        assigned_phase(board, &own_units, &collectibles, &mut ctx, &mut out);

        let frontier_cells: Vec<CellCoord> = self.frontier.unseen().collect();
        assigned_phase(board, &own_units, &frontier_cells, &mut ctx, &mut out);

        self.wander_phase(board, &own_units, &mut ctx, &mut out);

        let spawn_cells: Vec<CellCoord> = self.spawn_intel.known().collect();
        assigned_phase(board, &own_units, &spawn_cells, &mut ctx, &mut out);

        out
    }

    /// Moves every still-idle unit one step in a random legal direction.
    ///
    /// All directions are enumerated once and filtered through the guard;
    /// the step is drawn uniformly from the legal subset. A unit boxed in
    /// by the board edge, impassable terrain, and teammates' reservations
    /// simply emits no move.
    fn wander_phase(
        &mut self,
        board: &Board,
        units: &[UnitSnapshot],
        ctx: &mut TurnContext,
        out: &mut Vec<Command>,
    ) {
        for unit in units {
            if !ctx.is_idle(unit.id) {
                continue;
            }

            let legal: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|direction| probe(board, unit.cell, *direction, ctx).is_ok())
                .collect();

            if legal.is_empty() {
                continue;
            }

            let direction = legal[self.rng.gen_range(0..legal.len())];
            let accepted = try_reserve(board, unit.id, unit.cell, direction, ctx);
            debug_assert!(accepted.is_ok(), "probed direction must stay legal");
            out.push(Command::MoveUnit {
                unit: unit.id,
                direction,
            });
        }
    }
}

/// Pairs the still-idle units with the phase's destination set and commits
/// the shortest feasible routes.
fn assigned_phase(
    board: &Board,
    units: &[UnitSnapshot],
    destinations: &[CellCoord],
    ctx: &mut TurnContext,
    out: &mut Vec<Command>,
) {
    if destinations.is_empty() {
        return;
    }

    let idle: Vec<UnitSnapshot> = units
        .iter()
        .filter(|unit| ctx.is_idle(unit.id))
        .copied()
        .collect();
    if idle.is_empty() {
        return;
    }

    let route_set = generate_routes(board, &idle, destinations);
    resolve(board, &route_set, ctx, out);
}

/// Deduplicates a snapshot-sourced destination list into row-major order.
fn canonical_destinations(cells: &[CellCoord]) -> Vec<CellCoord> {
    let mut unique: Vec<CellCoord> = cells.to_vec();
    unique.sort();
    unique.dedup();
    unique
}
