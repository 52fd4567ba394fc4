#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative battlefield state for the Skirmish demo harness.
//!
//! The world owns the terrain board, the units fielded by every side, the
//! collectible resources, and the spawn points. Adapters mutate it
//! exclusively through [`apply`], which validates each [`Command`] and
//! broadcasts [`Event`] values describing the outcome; decision systems read
//! it exclusively through the [`query`] module.

use std::collections::{BTreeMap, BTreeSet};

use skirmish_core::{CellCoord, Command, Direction, Event, MoveError, PlayerId, UnitId};

mod navigation;

pub use navigation::DistanceField;

/// Immutable terrain description: board dimensions plus impassable cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    columns: u32,
    rows: u32,
    blocked: Vec<bool>,
}

impl Board {
    /// Creates a fully passable board with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let cell_count = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            blocked: vec![false; cell_count],
        }
    }

    /// Number of columns contained in the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Marks the provided cell as impassable terrain.
    pub fn block(&mut self, cell: CellCoord) {
        debug_assert!(self.contains(cell), "blocked cell must lie on the board");
        if let Some(index) = self.index(cell) {
            self.blocked[index] = true;
        }
    }

    /// Reports whether the cell lies within the board bounds.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell is on the board and free of impassable
    /// terrain.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| !self.blocked[index])
    }

    /// Neighboring cell in the provided direction, if it stays on the board.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction).filter(|next| self.contains(*next))
    }

    /// Iterator over every board cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        let rows = self.rows;
        (0..rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// A single unit fielded on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    id: UnitId,
    owner: PlayerId,
    cell: CellCoord,
}

impl Unit {
    /// Unique identifier assigned to the unit.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Side that owns the unit.
    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Grid cell currently occupied by the unit.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }
}

/// Represents the authoritative Skirmish battlefield state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    board: Board,
    units: Vec<Unit>,
    next_unit_id: u32,
    collectibles: BTreeSet<CellCoord>,
    spawn_points: BTreeMap<CellCoord, PlayerId>,
}

impl World {
    /// Creates an empty battlefield over the provided terrain.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            units: Vec::new(),
            next_unit_id: 0,
            collectibles: BTreeSet::new(),
            spawn_points: BTreeMap::new(),
        }
    }

    /// Fields a new unit for the provided side and returns its identifier.
    pub fn spawn_unit(&mut self, owner: PlayerId, cell: CellCoord) -> UnitId {
        debug_assert!(
            self.board.is_passable(cell),
            "units must spawn on passable cells"
        );
        debug_assert!(
            self.occupant(cell).is_none(),
            "units must spawn on free cells"
        );
        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.push(Unit { id, owner, cell });
        id
    }

    /// Places a collectible resource on the provided cell.
    pub fn place_collectible(&mut self, cell: CellCoord) {
        debug_assert!(
            self.board.is_passable(cell),
            "collectibles must sit on passable cells"
        );
        let _ = self.collectibles.insert(cell);
    }

    /// Places a spawn point owned by the provided side.
    pub fn place_spawn_point(&mut self, cell: CellCoord, owner: PlayerId) {
        debug_assert!(
            self.board.is_passable(cell),
            "spawn points must sit on passable cells"
        );
        let _ = self.spawn_points.insert(cell, owner);
    }

    fn unit_mut(&mut self, unit_id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == unit_id)
    }

    fn occupant(&self, cell: CellCoord) -> Option<UnitId> {
        self.units
            .iter()
            .find(|unit| unit.cell == cell)
            .map(|unit| unit.id)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveUnit { unit, direction } => {
            let Some(current) = world.units.iter().find(|state| state.id == unit).copied()
            else {
                out_events.push(Event::MoveRejected {
                    unit,
                    direction,
                    reason: MoveError::UnknownUnit,
                });
                return;
            };

            let Some(destination) = world.board.neighbor(current.cell, direction) else {
                out_events.push(Event::MoveRejected {
                    unit,
                    direction,
                    reason: MoveError::OutOfBounds,
                });
                return;
            };

            if !world.board.is_passable(destination) {
                out_events.push(Event::MoveRejected {
                    unit,
                    direction,
                    reason: MoveError::Impassable,
                });
                return;
            }

            if world.occupant(destination).is_some() {
                out_events.push(Event::MoveRejected {
                    unit,
                    direction,
                    reason: MoveError::Occupied,
                });
                return;
            }

            if let Some(state) = world.unit_mut(unit) {
                state.cell = destination;
            }
            out_events.push(Event::UnitMoved {
                unit,
                from: current.cell,
                to: destination,
            });

            if world.collectibles.remove(&destination) {
                out_events.push(Event::ResourceCollected {
                    unit,
                    cell: destination,
                });
            }

            let razed = world
                .spawn_points
                .get(&destination)
                .copied()
                .filter(|owner| *owner != current.owner);
            if let Some(owner) = razed {
                let _ = world.spawn_points.remove(&destination);
                out_events.push(Event::SpawnPointRazed {
                    cell: destination,
                    owner,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use skirmish_core::{CellCoord, SpawnPoint, UnitId, UnitSnapshot, UnitView};

    use super::{Board, Unit, World};

    /// Provides read-only access to the terrain board.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Captures a read-only view of the units on the battlefield.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        UnitView::from_snapshots(
            world
                .units
                .iter()
                .map(|unit| UnitSnapshot {
                    id: unit.id(),
                    owner: unit.owner(),
                    cell: unit.cell(),
                })
                .collect(),
        )
    }

    /// Retrieves a single unit by identifier.
    #[must_use]
    pub fn unit(world: &World, id: UnitId) -> Option<&Unit> {
        world.units.iter().find(|unit| unit.id() == id)
    }

    /// Enumerates the cells currently holding a collectible resource.
    #[must_use]
    pub fn collectible_cells(world: &World) -> Vec<CellCoord> {
        world.collectibles.iter().copied().collect()
    }

    /// Enumerates every spawn point currently standing on the battlefield.
    #[must_use]
    pub fn spawn_points(world: &World) -> Vec<SpawnPoint> {
        world
            .spawn_points
            .iter()
            .map(|(cell, owner)| SpawnPoint {
                cell: *cell,
                owner: *owner,
            })
            .collect()
    }
}
