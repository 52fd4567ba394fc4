#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-scoped movement bookkeeping and the collision guard.
//!
//! Every phase of the turn pipeline funnels its move candidates through
//! [`try_reserve`], the single point of truth for "is this step legal right
//! now". The guard records accepted destinations in the [`TurnContext`] so
//! later phases automatically avoid cells already claimed by earlier ones.

use std::collections::{BTreeMap, BTreeSet};

use skirmish_core::{CellCoord, Direction, UnitId};
use skirmish_world::Board;

/// Turn-scoped arena threaded through every phase of the pipeline.
///
/// Tracks which units have committed a move this turn, the injective
/// unit-to-destination assignment, and the set of cells already reserved as
/// move targets. A fresh value is built at the start of every turn and
/// discarded at its end.
#[derive(Clone, Debug, Default)]
pub struct TurnContext {
    assignments: BTreeMap<UnitId, CellCoord>,
    claimed: BTreeSet<CellCoord>,
    committed: BTreeSet<UnitId>,
    reserved: BTreeSet<CellCoord>,
}

impl TurnContext {
    /// Creates an empty context for a new turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether the unit has not yet committed a move this turn.
    #[must_use]
    pub fn is_idle(&self, unit: UnitId) -> bool {
        !self.committed.contains(&unit)
    }

    /// Reports whether the destination is already assigned to some unit.
    #[must_use]
    pub fn is_destination_claimed(&self, destination: CellCoord) -> bool {
        self.claimed.contains(&destination)
    }

    /// Reports whether some accepted move already targets the cell.
    #[must_use]
    pub fn is_reserved(&self, cell: CellCoord) -> bool {
        self.reserved.contains(&cell)
    }

    /// Destination assigned to the unit this turn, if any.
    #[must_use]
    pub fn assignment_of(&self, unit: UnitId) -> Option<CellCoord> {
        self.assignments.get(&unit).copied()
    }

    /// Number of unit-to-destination assignments recorded this turn.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of cells reserved by accepted moves this turn.
    #[must_use]
    pub fn reservation_count(&self) -> usize {
        self.reserved.len()
    }

    /// Records an injective unit-to-destination assignment.
    ///
    /// Callers must have checked [`TurnContext::is_destination_claimed`]
    /// first; the assignment map never holds the same destination twice.
    pub fn record_assignment(&mut self, unit: UnitId, destination: CellCoord) {
        debug_assert!(
            !self.claimed.contains(&destination),
            "destination already claimed"
        );
        debug_assert!(
            !self.assignments.contains_key(&unit),
            "unit already assigned"
        );
        let _ = self.assignments.insert(unit, destination);
        let _ = self.claimed.insert(destination);
    }
}

/// Reasons the collision guard rejects a proposed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardRejection {
    /// The step would exit the board.
    OffBoard,
    /// The step would enter impassable terrain.
    Impassable,
    /// Another accepted move already targets the cell this turn.
    AlreadyReserved,
}

/// Checks a proposed step without mutating the context.
///
/// Returns the destination cell the step would enter when legal.
pub fn probe(
    board: &Board,
    from: CellCoord,
    direction: Direction,
    ctx: &TurnContext,
) -> Result<CellCoord, GuardRejection> {
    let Some(destination) = board.neighbor(from, direction) else {
        return Err(GuardRejection::OffBoard);
    };

    if !board.is_passable(destination) {
        return Err(GuardRejection::Impassable);
    }

    if ctx.is_reserved(destination) {
        return Err(GuardRejection::AlreadyReserved);
    }

    Ok(destination)
}

/// Attempts to reserve the cell a step would enter.
///
/// On acceptance the destination is added to the reservation set, the unit
/// is marked committed for the rest of the turn, and the reserved cell is
/// returned. On rejection no state changes.
pub fn try_reserve(
    board: &Board,
    unit: UnitId,
    from: CellCoord,
    direction: Direction,
    ctx: &mut TurnContext,
) -> Result<CellCoord, GuardRejection> {
    let destination = probe(board, from, direction, ctx)?;
    let _ = ctx.reserved.insert(destination);
    let _ = ctx.committed.insert(unit);
    Ok(destination)
}
