#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Accumulates knowledge of enemy spawn points across turns.
//!
//! Sightings arrive incrementally under partial observability, so the
//! tracker keeps whatever it has learned until the harness reports a spawn
//! point destroyed. Own-side spawn points are never recorded.

use std::collections::BTreeSet;

use skirmish_core::{CellCoord, PlayerId, SpawnPoint};

/// Persistent set of known enemy spawn-point cells.
#[derive(Clone, Debug)]
pub struct SpawnIntel {
    side: PlayerId,
    known: BTreeSet<CellCoord>,
}

impl SpawnIntel {
    /// Creates an empty tracker for the provided side.
    #[must_use]
    pub fn new(side: PlayerId) -> Self {
        Self {
            side,
            known: BTreeSet::new(),
        }
    }

    /// Folds one turn's sightings into the knowledge set.
    ///
    /// Newly sighted enemy spawn cells are added (re-sightings are
    /// idempotent, own-side spawns are ignored), then razed cells are
    /// removed. A cell appearing in both lists ends up removed.
    pub fn record(&mut self, sighted: &[SpawnPoint], razed: &[SpawnPoint]) {
        for spawn in sighted {
            if spawn.owner == self.side {
                continue;
            }
            let _ = self.known.insert(spawn.cell);
        }

        for spawn in razed {
            let _ = self.known.remove(&spawn.cell);
        }
    }

    /// Iterator over the known enemy spawn cells in row-major order.
    #[must_use]
    pub fn known(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.known.iter().copied()
    }

    /// Reports whether the cell is a known enemy spawn point.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.known.contains(&cell)
    }

    /// Number of known enemy spawn cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Reports whether no enemy spawn point is currently known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
