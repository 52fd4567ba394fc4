#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tracks which board cells have never been observed by an owned unit.
//!
//! The tracker is the only exploration memory the engine carries across
//! turns. It is seeded once at match start with every board cell and only
//! ever shrinks afterward: a cell observed once stays observed for the rest
//! of the match.

use std::collections::BTreeSet;

use skirmish_core::CellCoord;
use skirmish_world::Board;

/// How far a unit sees, measured in grid steps along the board directions.
pub const VISIBILITY_RANGE: u32 = 5;

/// Persistent set of cells not yet observed by any owned unit.
#[derive(Clone, Debug, Default)]
pub struct FrontierTracker {
    unseen: BTreeSet<CellCoord>,
}

impl FrontierTracker {
    /// Creates a tracker with an empty frontier; call
    /// [`FrontierTracker::reinitialize`] at match start to seed it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the frontier with every cell of the board.
    ///
    /// Called once, at the first turn of a match; calling it again would
    /// discard all exploration progress.
    pub fn reinitialize(&mut self, board: &Board) {
        self.unseen = board.cells().collect();
    }

    /// Removes every cell within [`VISIBILITY_RANGE`] grid steps of any of
    /// the provided unit positions, the occupied cells included.
    ///
    /// Idempotent with respect to already-observed cells.
    pub fn observe(&mut self, unit_cells: &[CellCoord]) {
        if unit_cells.is_empty() {
            return;
        }

        self.unseen.retain(|cell| {
            !unit_cells
                .iter()
                .any(|unit| unit.manhattan_distance(*cell) <= VISIBILITY_RANGE)
        });
    }

    /// Iterator over the unseen cells in row-major order.
    #[must_use]
    pub fn unseen(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.unseen.iter().copied()
    }

    /// Reports whether the cell has never been observed.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.unseen.contains(&cell)
    }

    /// Number of cells still unseen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unseen.len()
    }

    /// Reports whether the whole board has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unseen.is_empty()
    }
}
