use std::collections::BTreeSet;

use skirmish_core::{CellCoord, Command, Direction, PlayerId, TurnSnapshot, UnitId};
use skirmish_system_commander::{Commander, Config};
use skirmish_world::{self as world, query, Board, World};

fn snapshot_of(world: &World) -> TurnSnapshot {
    TurnSnapshot {
        units: query::unit_view(world),
        collectibles: query::collectible_cells(world),
        spawn_points_sighted: query::spawn_points(world),
        spawn_points_razed: Vec::new(),
    }
}

#[test]
fn lone_unit_walks_toward_the_only_collectible() {
    let board = Board::new(6, 1);
    let mut world = World::new(board.clone());
    let us = PlayerId::new(0);
    let unit = world.spawn_unit(us, CellCoord::new(0, 0));
    world.place_collectible(CellCoord::new(3, 0));

    let mut commander = Commander::new(Config::new(us, 7));
    let commands = commander.plan_turn(&board, &snapshot_of(&world));

    assert_eq!(
        commands,
        vec![Command::MoveUnit {
            unit,
            direction: Direction::East,
        }]
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    assert_eq!(
        query::unit(&world, unit).map(|state| state.cell()),
        Some(CellCoord::new(1, 0))
    );
}

#[test]
fn single_frontier_cell_goes_to_exactly_one_of_two_units() {
    // A 1x17 strip observed from rows 2 and 14 leaves exactly one unseen
    // cell, row 8, equidistant from both units. One unit claims it; the
    // other falls through to the wander phase.
    let board = Board::new(1, 17);
    let mut world = World::new(board.clone());
    let us = PlayerId::new(0);
    let first = world.spawn_unit(us, CellCoord::new(0, 2));
    let second = world.spawn_unit(us, CellCoord::new(0, 14));

    let mut commander = Commander::new(Config::new(us, 3));
    let commands = commander.plan_turn(&board, &snapshot_of(&world));

    assert_eq!(commander.frontier().len(), 1);
    assert!(commander.frontier().contains(CellCoord::new(0, 8)));
    assert_eq!(commands.len(), 2);

    // Tie on distance and destination resolves to the lower unit id.
    assert!(commands.contains(&Command::MoveUnit {
        unit: first,
        direction: Direction::South,
    }));
    let wander = commands
        .iter()
        .find(|command| matches!(command, Command::MoveUnit { unit, .. } if *unit == second))
        .expect("second unit should wander");
    let Command::MoveUnit { direction, .. } = *wander;
    assert!(matches!(direction, Direction::North | Direction::South));
}

#[test]
fn boxed_in_unit_emits_no_move_and_the_turn_terminates() {
    // The boxed unit sits between the board edge, an impassable cell, and
    // the cell reserved by its teammate's collect move.
    let mut board = Board::new(4, 1);
    board.block(CellCoord::new(0, 0));
    let mut world = World::new(board.clone());
    let us = PlayerId::new(0);
    let collector = world.spawn_unit(us, CellCoord::new(3, 0));
    let boxed = world.spawn_unit(us, CellCoord::new(1, 0));
    world.place_collectible(CellCoord::new(2, 0));

    let mut commander = Commander::new(Config::new(us, 11));
    let commands = commander.plan_turn(&board, &snapshot_of(&world));

    assert_eq!(
        commands,
        vec![Command::MoveUnit {
            unit: collector,
            direction: Direction::West,
        }]
    );
    assert!(!commands
        .iter()
        .any(|command| matches!(command, Command::MoveUnit { unit, .. } if *unit == boxed)));
}

#[test]
fn each_unit_moves_at_most_once_per_turn() {
    let board = Board::new(10, 10);
    let mut world = World::new(board.clone());
    let us = PlayerId::new(0);
    for column in 0..5 {
        let _ = world.spawn_unit(us, CellCoord::new(column * 2, 4));
    }
    world.place_collectible(CellCoord::new(9, 9));
    world.place_collectible(CellCoord::new(0, 9));

    let mut commander = Commander::new(Config::new(us, 23));
    let commands = commander.plan_turn(&board, &snapshot_of(&world));

    let mut seen: BTreeSet<UnitId> = BTreeSet::new();
    for command in &commands {
        let Command::MoveUnit { unit, .. } = command;
        assert!(seen.insert(*unit), "unit {} moved twice", unit.get());
    }
}

#[test]
fn moves_never_share_a_destination_cell() {
    let board = Board::new(6, 6);
    let mut world = World::new(board.clone());
    let us = PlayerId::new(0);
    // A tight cluster maximizes collision pressure between wander moves.
    let _ = world.spawn_unit(us, CellCoord::new(2, 2));
    let _ = world.spawn_unit(us, CellCoord::new(3, 2));
    let _ = world.spawn_unit(us, CellCoord::new(2, 3));
    let _ = world.spawn_unit(us, CellCoord::new(3, 3));

    let mut commander = Commander::new(Config::new(us, 5));
    let snapshot = snapshot_of(&world);

    for _ in 0..8 {
        let commands = commander.plan_turn(&board, &snapshot);
        let mut destinations = BTreeSet::new();
        for command in &commands {
            let Command::MoveUnit { unit, direction } = command;
            let origin = query::unit(&world, *unit).expect("unit exists").cell();
            let destination = origin.step(*direction).expect("destination on board");
            assert!(
                destinations.insert(destination),
                "two moves target {destination:?}"
            );
        }
    }
}

#[test]
fn identical_seeds_replay_identical_matches() {
    let commands_of = |seed: u64| -> Vec<Command> {
        let mut board = Board::new(8, 8);
        board.block(CellCoord::new(3, 3));
        board.block(CellCoord::new(4, 3));
        let mut world = World::new(board.clone());
        let us = PlayerId::new(0);
        let them = PlayerId::new(1);
        let _ = world.spawn_unit(us, CellCoord::new(0, 0));
        let _ = world.spawn_unit(us, CellCoord::new(7, 7));
        let _ = world.spawn_unit(them, CellCoord::new(7, 0));
        world.place_collectible(CellCoord::new(5, 5));
        world.place_collectible(CellCoord::new(1, 6));
        world.place_spawn_point(CellCoord::new(6, 1), them);

        let mut commander = Commander::new(Config::new(us, seed));
        let mut log = Vec::new();
        for _ in 0..6 {
            let commands = commander.plan_turn(&board, &snapshot_of(&world));
            for command in &commands {
                let mut events = Vec::new();
                world::apply(&mut world, *command, &mut events);
            }
            log.extend(commands);
        }
        log
    };

    assert_eq!(commands_of(42), commands_of(42));
}
