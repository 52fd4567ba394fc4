//! Breadth-first distance fields over the terrain board.

use std::collections::VecDeque;

use skirmish_core::{CellCoord, Direction};

use crate::Board;

/// Dense shortest-path distance grid seeded from a single destination cell.
///
/// The field mirrors the board's dimensions and stores the reverse
/// breadth-first search results that drive route generation and first-step
/// selection. Distances default to `u16::MAX` for unreachable cells so the
/// public accessor can report them as absent rather than as walls with a
/// huge cost.
#[derive(Clone, Debug)]
pub struct DistanceField {
    width: u32,
    height: u32,
    destination: CellCoord,
    distances: Vec<u16>,
}

impl DistanceField {
    /// Builds the distance field for the provided destination using a
    /// reverse breadth-first search over passable cells.
    #[must_use]
    pub fn toward(board: &Board, destination: CellCoord) -> Self {
        let width = board.columns();
        let height = board.rows();
        let width_usize = usize::try_from(width).unwrap_or(0);
        let height_usize = usize::try_from(height).unwrap_or(0);
        let cell_count = width_usize.checked_mul(height_usize).unwrap_or(0);

        let mut field = Self {
            width,
            height,
            destination,
            distances: vec![u16::MAX; cell_count],
        };

        if cell_count == 0 || !board.contains(destination) || !board.is_passable(destination) {
            return field;
        }

        let mut queue = VecDeque::new();
        if let Some(index) = index(width_usize, destination) {
            field.distances[index] = 0;
            queue.push_back(destination);
        }

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = index(width_usize, cell) else {
                continue;
            };
            let current_distance = field.distances[current_index];

            if current_distance >= u16::MAX.saturating_sub(1) {
                continue;
            }

            let next_distance = current_distance + 1;

            for direction in Direction::ALL {
                let Some(neighbor) = board.neighbor(cell, direction) else {
                    continue;
                };

                if !board.is_passable(neighbor) {
                    continue;
                }

                let Some(neighbor_index) = index(width_usize, neighbor) else {
                    continue;
                };

                if field.distances[neighbor_index] <= next_distance {
                    continue;
                }

                field.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        field
    }

    /// Destination cell the field was seeded from.
    #[must_use]
    pub const fn destination(&self) -> CellCoord {
        self.destination
    }

    /// Shortest-path distance from the provided cell to the destination.
    ///
    /// Returns `None` when the cell lies outside the board or no path
    /// exists.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u16> {
        if cell.column() >= self.width || cell.row() >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let stored = index(width, cell).and_then(|offset| self.distances.get(offset).copied())?;
        if stored == u16::MAX {
            None
        } else {
            Some(stored)
        }
    }

    /// First-step direction that strictly reduces the distance toward the
    /// destination.
    ///
    /// Candidate neighbors are ranked by distance with a row-major tie-break
    /// so the chosen step is reproducible. Returns `None` at the destination
    /// itself and when every improving neighbor is off the board or
    /// impassable.
    #[must_use]
    pub fn descend(&self, board: &Board, from: CellCoord) -> Option<Direction> {
        let current = self.distance(from)?;
        let mut best: Option<(u16, CellCoord, Direction)> = None;

        for direction in Direction::ALL {
            let Some(neighbor) = board.neighbor(from, direction) else {
                continue;
            };

            if !board.is_passable(neighbor) {
                continue;
            }

            let Some(distance) = self.distance(neighbor) else {
                continue;
            };

            if distance >= current {
                continue;
            }

            let candidate = (distance, neighbor, direction);
            best = Some(match best {
                None => candidate,
                Some(existing) => {
                    if (candidate.0, candidate.1) < (existing.0, existing.1) {
                        candidate
                    } else {
                        existing
                    }
                }
            });
        }

        best.map(|(_, _, direction)| direction)
    }
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
