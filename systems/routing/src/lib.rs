#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Route generation and greedy unit-to-destination assignment.
//!
//! Each assigned phase of the turn pipeline pairs its idle units with its
//! destination set here: [`generate_routes`] measures every reachable
//! pairing, and [`resolve`] commits the shortest ones first through the
//! collision guard. The pass is greedy, not a global minimum-cost matching;
//! it favors short routes and accepts the first feasible claim.

use std::collections::BTreeMap;

use skirmish_core::{CellCoord, Command, UnitId, UnitSnapshot};
use skirmish_system_movement::{try_reserve, TurnContext};
use skirmish_world::{Board, DistanceField};

/// Candidate pairing of a unit with a destination cell.
///
/// Ephemeral and turn-scoped; recomputed from scratch every phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    unit: UnitId,
    origin: CellCoord,
    destination: CellCoord,
    distance: u16,
}

impl Route {
    /// Unit considered for the pairing.
    #[must_use]
    pub const fn unit(&self) -> UnitId {
        self.unit
    }

    /// Cell the unit currently occupies.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Destination cell of the pairing.
    #[must_use]
    pub const fn destination(&self) -> CellCoord {
        self.destination
    }

    /// Shortest-path distance between origin and destination.
    #[must_use]
    pub const fn distance(&self) -> u16 {
        self.distance
    }
}

/// Routes measured for one phase, plus the distance fields that produced
/// them (reused for first-step selection during resolution).
#[derive(Clone, Debug, Default)]
pub struct RouteSet {
    routes: Vec<Route>,
    fields: BTreeMap<CellCoord, DistanceField>,
}

impl RouteSet {
    /// Measured routes in unspecified order; [`resolve`] sorts its own copy.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Reports whether no reachable pairing exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Measures one route per reachable (unit, destination) pair.
///
/// One breadth-first distance field is built per distinct destination;
/// pairs with no path between them are omitted rather than reported as
/// errors. Cost is proportional to |units| x |destinations| lookups plus
/// one field per destination, so callers keep destination sets small.
#[must_use]
pub fn generate_routes(
    board: &Board,
    units: &[UnitSnapshot],
    destinations: &[CellCoord],
) -> RouteSet {
    let mut fields = BTreeMap::new();
    for destination in destinations {
        if fields.contains_key(destination) {
            continue;
        }
        let _ = fields.insert(*destination, DistanceField::toward(board, *destination));
    }

    let mut routes = Vec::new();
    for unit in units {
        for (destination, field) in &fields {
            let Some(distance) = field.distance(unit.cell) else {
                continue;
            };
            routes.push(Route {
                unit: unit.id,
                origin: unit.cell,
                destination: *destination,
                distance,
            });
        }
    }

    RouteSet { routes, fields }
}

/// Greedily commits the measured routes, shortest first.
///
/// Routes are ordered by the deterministic total order (distance, then
/// row-major destination, then unit identifier) and scanned once. A route
/// is skipped when its unit already committed a move or its destination is
/// already claimed; otherwise the first-step direction is derived from the
/// destination's distance field and submitted to the collision guard. On
/// acceptance the assignment is recorded and the move appended to `out`;
/// on rejection the route is dropped and the unit stays idle for later
/// phases.
pub fn resolve(board: &Board, route_set: &RouteSet, ctx: &mut TurnContext, out: &mut Vec<Command>) {
    let mut ordered = route_set.routes.clone();
    ordered.sort_by_key(|route| (route.distance, route.destination, route.unit));

    for route in ordered {
        if !ctx.is_idle(route.unit) {
            continue;
        }

        if ctx.is_destination_claimed(route.destination) {
            continue;
        }

        let Some(field) = route_set.fields.get(&route.destination) else {
            continue;
        };

        let Some(direction) = field.descend(board, route.origin) else {
            continue;
        };

        if try_reserve(board, route.unit, route.origin, direction, ctx).is_ok() {
            ctx.record_assignment(route.unit, route.destination);
            out.push(Command::MoveUnit {
                unit: route.unit,
                direction,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{Direction, PlayerId};

    fn unit_at(id: u32, cell: CellCoord) -> UnitSnapshot {
        UnitSnapshot {
            id: UnitId::new(id),
            owner: PlayerId::new(0),
            cell,
        }
    }

    #[test]
    fn unreachable_pairs_are_omitted() {
        let mut board = Board::new(3, 1);
        board.block(CellCoord::new(1, 0));
        let units = [unit_at(0, CellCoord::new(0, 0))];
        let destinations = [CellCoord::new(2, 0)];

        let route_set = generate_routes(&board, &units, &destinations);

        assert!(route_set.is_empty());
    }

    #[test]
    fn duplicate_destinations_share_one_field() {
        let board = Board::new(4, 1);
        let units = [unit_at(0, CellCoord::new(0, 0))];
        let destinations = [CellCoord::new(3, 0), CellCoord::new(3, 0)];

        let route_set = generate_routes(&board, &units, &destinations);

        assert_eq!(route_set.routes().len(), 1);
        assert_eq!(route_set.routes()[0].distance(), 3);
    }

    #[test]
    fn shortest_route_is_committed_first() {
        let board = Board::new(5, 1);
        let units = [
            unit_at(0, CellCoord::new(0, 0)),
            unit_at(1, CellCoord::new(4, 0)),
        ];
        let destinations = [CellCoord::new(3, 0)];
        let route_set = generate_routes(&board, &units, &destinations);
        let mut ctx = TurnContext::new();
        let mut out = Vec::new();

        resolve(&board, &route_set, &mut ctx, &mut out);

        // Unit 1 sits one step away and wins the claim; unit 0 stays idle.
        assert_eq!(
            out,
            vec![Command::MoveUnit {
                unit: UnitId::new(1),
                direction: Direction::West,
            }]
        );
        assert_eq!(ctx.assignment_of(UnitId::new(1)), Some(CellCoord::new(3, 0)));
        assert!(ctx.is_idle(UnitId::new(0)));
    }

    #[test]
    fn equidistant_tie_breaks_by_unit_identifier() {
        let board = Board::new(3, 1);
        let units = [
            unit_at(5, CellCoord::new(0, 0)),
            unit_at(2, CellCoord::new(2, 0)),
        ];
        let destinations = [CellCoord::new(1, 0)];
        let route_set = generate_routes(&board, &units, &destinations);
        let mut ctx = TurnContext::new();
        let mut out = Vec::new();

        resolve(&board, &route_set, &mut ctx, &mut out);

        assert_eq!(
            out,
            vec![Command::MoveUnit {
                unit: UnitId::new(2),
                direction: Direction::West,
            }]
        );
    }

    #[test]
    fn rejected_first_step_leaves_unit_idle() {
        let board = Board::new(3, 1);
        let units = [unit_at(0, CellCoord::new(0, 0))];
        let destinations = [CellCoord::new(2, 0)];
        let route_set = generate_routes(&board, &units, &destinations);
        let mut ctx = TurnContext::new();
        // A teammate's accepted move already targets the only first step.
        let _ = try_reserve(
            &board,
            UnitId::new(9),
            CellCoord::new(2, 0),
            Direction::West,
            &mut ctx,
        );
        let mut out = Vec::new();

        resolve(&board, &route_set, &mut ctx, &mut out);

        assert!(out.is_empty());
        assert!(ctx.is_idle(UnitId::new(0)));
        assert_eq!(ctx.assignment_count(), 0);
    }

    #[test]
    fn committed_units_and_claimed_destinations_are_skipped() {
        let board = Board::new(5, 1);
        let units = [
            unit_at(0, CellCoord::new(0, 0)),
            unit_at(1, CellCoord::new(4, 0)),
        ];
        let destinations = [CellCoord::new(2, 0), CellCoord::new(3, 0)];
        let route_set = generate_routes(&board, &units, &destinations);
        let mut ctx = TurnContext::new();
        let mut out = Vec::new();

        resolve(&board, &route_set, &mut ctx, &mut out);

        // Each unit claims exactly one destination.
        assert_eq!(out.len(), 2);
        assert_eq!(ctx.assignment_count(), 2);
        assert_ne!(
            ctx.assignment_of(UnitId::new(0)),
            ctx.assignment_of(UnitId::new(1))
        );
    }
}
