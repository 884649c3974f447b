//! Greedy nearest-neighbour tour construction.

use crate::CostMatrix;

use super::Tour;

/// Outcome of [`nearest_neighbour`].
///
/// `unreached` lists, in ascending order, the stops the walk could not reach.
/// It is empty for a full tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourConstruction {
    /// The constructed visiting order, starting at stop 0.
    pub tour: Tour,
    /// Stops left out because no finite edge led to them.
    pub unreached: Vec<usize>,
}

impl TourConstruction {
    /// Whether the walk stopped before visiting every stop.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        !self.unreached.is_empty()
    }
}

/// Build a tour by always moving to the cheapest unvisited stop.
///
/// The walk starts at index 0. Ties go to the smallest index. When no
/// unvisited stop has a finite cost from the current stop, the walk ends
/// early and the result is a partial tour; the skipped stops are listed in
/// [`TourConstruction::unreached`]. An empty matrix yields an empty tour.
///
/// Runs in `O(n²)` and is deterministic for a given matrix.
///
/// # Examples
/// ```
/// use stopwise_core::{CostMatrix, nearest_neighbour};
///
/// let matrix = CostMatrix::from_dense(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])?;
/// let construction = nearest_neighbour(&matrix);
/// assert_eq!(construction.tour.order(), &[0, 1, 2]);
/// assert!(!construction.is_partial());
/// # Ok::<(), stopwise_core::MatrixShapeError>(())
/// ```
#[must_use]
pub fn nearest_neighbour(matrix: &CostMatrix) -> TourConstruction {
    let size = matrix.len();
    if size == 0 {
        return TourConstruction {
            tour: Tour::default(),
            unreached: Vec::new(),
        };
    }

    let mut visited = vec![false; size];
    let mut order = Vec::with_capacity(size);
    let mut current = 0_usize;
    mark(&mut visited, current);
    order.push(current);

    while order.len() < size {
        let Some(next) = cheapest_unvisited(matrix, &visited, current) else {
            break;
        };
        mark(&mut visited, next);
        order.push(next);
        current = next;
    }

    let unreached = visited
        .iter()
        .enumerate()
        .filter_map(|(index, &seen)| (!seen).then_some(index))
        .collect();

    TourConstruction {
        tour: Tour::new(order),
        unreached,
    }
}

fn cheapest_unvisited(matrix: &CostMatrix, visited: &[bool], from: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (candidate, _) in visited.iter().enumerate().filter(|(_, seen)| !**seen) {
        let cost = matrix.cost(from, candidate);
        if !cost.is_finite() {
            continue;
        }
        // Strict comparison keeps the smallest index on ties.
        if best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((candidate, cost));
        }
    }
    best.map(|(index, _)| index)
}

fn mark(visited: &mut [bool], index: usize) {
    if let Some(slot) = visited.get_mut(index) {
        *slot = true;
    }
}
