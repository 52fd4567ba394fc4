#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Skirmish engine.
//!
//! This crate defines the message surface that connects the demo adapter,
//! the authoritative world, and the pure decision systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what actually happened. Systems consume immutable snapshots and
//! respond exclusively with new command batches.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that a unit advance a single cell in the specified direction.
    MoveUnit {
        /// Identifier of the unit attempting to move.
        unit: UnitId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a unit successfully moved between two cells.
    UnitMoved {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Cell the unit occupied before moving.
        from: CellCoord,
        /// Cell the unit occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that a movement request was rejected by the world.
    MoveRejected {
        /// Identifier of the unit whose move was rejected.
        unit: UnitId,
        /// Direction requested by the rejected command.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveError,
    },
    /// Confirms that a unit picked up a collectible resource.
    ResourceCollected {
        /// Identifier of the unit that collected the resource.
        unit: UnitId,
        /// Cell that held the resource.
        cell: CellCoord,
    },
    /// Confirms that a spawn point was razed by an opposing unit.
    SpawnPointRazed {
        /// Cell that held the spawn point.
        cell: CellCoord,
        /// Side that owned the destroyed spawn point.
        owner: PlayerId,
    },
}

/// Reasons a movement command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveError {
    /// No unit with the provided identifier exists.
    UnknownUnit,
    /// The destination cell lies outside the board.
    OutOfBounds,
    /// The destination cell is impassable terrain.
    Impassable,
    /// The destination cell is already occupied by another unit.
    Occupied,
}

/// Cardinal movement directions available to units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Canonical enumeration order used wherever directions are iterated.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Unique identifier assigned to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a participating side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Ordering is row-major (row first, then column), which is the canonical
/// tie-break order used by every deterministic scan in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Cell one step away in the provided direction, if it stays within the
    /// non-negative coordinate space. Board bounds are checked separately by
    /// the world.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Map cell hosting a base that produces units for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Cell occupied by the spawn point.
    pub cell: CellCoord,
    /// Side that owns the spawn point.
    pub owner: PlayerId,
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Side that owns the unit.
    pub owner: PlayerId,
    /// Grid cell currently occupied by the unit.
    pub cell: CellCoord,
}

/// Read-only snapshot describing all units visible this turn.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured unit snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the snapshots of units owned by the provided side.
    #[must_use]
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| snapshot.owner == player)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Per-turn observation handed to the decision engine.
///
/// Spawn sightings are allowed to repeat across turns; trackers treat
/// re-sighted cells as idempotent additions.
#[derive(Clone, Debug, Default)]
pub struct TurnSnapshot {
    /// All units visible this turn, own side included.
    pub units: UnitView,
    /// Cells currently holding a collectible resource.
    pub collectibles: Vec<CellCoord>,
    /// Spawn points sighted this turn with their owners.
    pub spawn_points_sighted: Vec<SpawnPoint>,
    /// Spawn points observed destroyed this turn.
    pub spawn_points_razed: Vec<SpawnPoint>,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, MoveError, PlayerId, SpawnPoint, UnitId};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn cell_order_is_row_major() {
        let mut cells = vec![
            CellCoord::new(0, 1),
            CellCoord::new(2, 0),
            CellCoord::new(1, 0),
            CellCoord::new(0, 0),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(0, 1),
            ]
        );
    }

    #[test]
    fn step_follows_direction_offsets() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(origin.step(Direction::North), Some(CellCoord::new(3, 2)));
        assert_eq!(origin.step(Direction::East), Some(CellCoord::new(4, 3)));
        assert_eq!(origin.step(Direction::South), Some(CellCoord::new(3, 4)));
        assert_eq!(origin.step(Direction::West), Some(CellCoord::new(2, 3)));
    }

    #[test]
    fn step_rejects_negative_coordinates() {
        assert_eq!(CellCoord::new(0, 0).step(Direction::North), None);
        assert_eq!(CellCoord::new(0, 0).step(Direction::West), None);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn unit_id_round_trips_through_bincode() {
        assert_round_trip(&UnitId::new(42));
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }

    #[test]
    fn spawn_point_round_trips_through_bincode() {
        assert_round_trip(&SpawnPoint {
            cell: CellCoord::new(2, 9),
            owner: PlayerId::new(1),
        });
    }

    #[test]
    fn move_error_round_trips_through_bincode() {
        assert_round_trip(&MoveError::Impassable);
    }
}
