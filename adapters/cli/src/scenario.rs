//! TOML scenario descriptions and their validation into a battlefield.

use serde::Deserialize;
use thiserror::Error;

use skirmish_core::{CellCoord, PlayerId};
use skirmish_world::{Board, World};

/// Declarative description of a battlefield, loadable from a TOML file.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Scenario {
    board: BoardSpec,
    #[serde(default)]
    units: Vec<UnitSpec>,
    #[serde(default)]
    collectibles: Vec<CellSpec>,
    #[serde(default)]
    spawn_points: Vec<SpawnSpec>,
}

#[derive(Clone, Debug, Deserialize)]
struct BoardSpec {
    columns: u32,
    rows: u32,
    #[serde(default)]
    blocked: Vec<CellSpec>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct CellSpec {
    column: u32,
    row: u32,
}

impl CellSpec {
    const fn cell(self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct UnitSpec {
    owner: u32,
    column: u32,
    row: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct SpawnSpec {
    owner: u32,
    column: u32,
    row: u32,
}

/// Reasons a scenario fails to describe a playable battlefield.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub(crate) enum ScenarioError {
    /// The board has a zero dimension.
    #[error("board must have at least one column and one row")]
    EmptyBoard,
    /// A placement references a cell outside the board.
    #[error("cell ({column}, {row}) lies outside the board")]
    CellOutOfBounds {
        /// Column of the offending cell.
        column: u32,
        /// Row of the offending cell.
        row: u32,
    },
    /// A unit, collectible, or spawn point sits on impassable terrain.
    #[error("cell ({column}, {row}) is impassable terrain")]
    ImpassablePlacement {
        /// Column of the offending cell.
        column: u32,
        /// Row of the offending cell.
        row: u32,
    },
    /// Two units share a starting cell.
    #[error("two units start on cell ({column}, {row})")]
    OverlappingUnits {
        /// Column of the shared cell.
        column: u32,
        /// Row of the shared cell.
        row: u32,
    },
}

impl Scenario {
    /// Parses a scenario from TOML text.
    pub(crate) fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Built-in demo battlefield used when no scenario file is provided.
    pub(crate) fn demo() -> Self {
        Self {
            board: BoardSpec {
                columns: 12,
                rows: 9,
                blocked: vec![
                    CellSpec { column: 5, row: 2 },
                    CellSpec { column: 5, row: 3 },
                    CellSpec { column: 5, row: 4 },
                    CellSpec { column: 5, row: 5 },
                    CellSpec { column: 8, row: 6 },
                    CellSpec { column: 9, row: 6 },
                ],
            },
            units: vec![
                UnitSpec {
                    owner: 0,
                    column: 0,
                    row: 0,
                },
                UnitSpec {
                    owner: 0,
                    column: 1,
                    row: 8,
                },
                UnitSpec {
                    owner: 0,
                    column: 0,
                    row: 4,
                },
                UnitSpec {
                    owner: 1,
                    column: 11,
                    row: 0,
                },
                UnitSpec {
                    owner: 1,
                    column: 11,
                    row: 8,
                },
            ],
            collectibles: vec![
                CellSpec { column: 3, row: 6 },
                CellSpec { column: 7, row: 1 },
                CellSpec { column: 10, row: 4 },
            ],
            spawn_points: vec![
                SpawnSpec {
                    owner: 1,
                    column: 11,
                    row: 4,
                },
                SpawnSpec {
                    owner: 0,
                    column: 0,
                    row: 8,
                },
            ],
        }
    }

    /// Validates the description and builds the terrain and match state.
    pub(crate) fn build(&self) -> Result<(Board, World), ScenarioError> {
        if self.board.columns == 0 || self.board.rows == 0 {
            return Err(ScenarioError::EmptyBoard);
        }

        let mut board = Board::new(self.board.columns, self.board.rows);
        for spec in &self.board.blocked {
            let cell = spec.cell();
            if !board.contains(cell) {
                return Err(out_of_bounds(cell));
            }
            board.block(cell);
        }

        let mut world = World::new(board.clone());

        let mut occupied = Vec::new();
        for spec in &self.units {
            let cell = CellCoord::new(spec.column, spec.row);
            check_placement(&board, cell)?;
            if occupied.contains(&cell) {
                return Err(ScenarioError::OverlappingUnits {
                    column: cell.column(),
                    row: cell.row(),
                });
            }
            occupied.push(cell);
            let _ = world.spawn_unit(PlayerId::new(spec.owner), cell);
        }

        for spec in &self.collectibles {
            let cell = spec.cell();
            check_placement(&board, cell)?;
            world.place_collectible(cell);
        }

        for spec in &self.spawn_points {
            let cell = CellCoord::new(spec.column, spec.row);
            check_placement(&board, cell)?;
            world.place_spawn_point(cell, PlayerId::new(spec.owner));
        }

        Ok((board, world))
    }
}

fn check_placement(board: &Board, cell: CellCoord) -> Result<(), ScenarioError> {
    if !board.contains(cell) {
        return Err(out_of_bounds(cell));
    }
    if !board.is_passable(cell) {
        return Err(ScenarioError::ImpassablePlacement {
            column: cell.column(),
            row: cell.row(),
        });
    }
    Ok(())
}

fn out_of_bounds(cell: CellCoord) -> ScenarioError {
    ScenarioError::CellOutOfBounds {
        column: cell.column(),
        row: cell.row(),
    }
}
