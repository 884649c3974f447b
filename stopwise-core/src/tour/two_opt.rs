//! 2-opt local search over an open tour with a fixed first stop.
//!
//! Every candidate is costed by walking the whole path again. On asymmetric
//! matrices a reversal changes the cost of every edge inside the segment.

use super::{Tour, path_cost};
use crate::CostMatrix;

/// Result of running [`two_opt`].
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptOutcome {
    /// The locally optimal tour.
    pub tour: Tour,
    /// Cost of the tour passed in.
    pub initial_cost: f64,
    /// Cost of [`TwoOptOutcome::tour`].
    pub cost: f64,
    /// Full sweeps performed, including the final sweep without improvement.
    pub sweeps: usize,
    /// Number of reversals adopted.
    pub improving_moves: usize,
    /// Number of candidate tours costed.
    pub candidates_evaluated: u64,
}

/// Improve `initial` by reversing sub-segments until no reversal helps.
///
/// Each sweep visits every pair `1 <= i < j < len` and costs the tour with
/// `tour[i..=j]` reversed. A strictly cheaper candidate replaces the current
/// tour at once and the sweep carries on from the next pair. Sweeps repeat
/// until one completes without an improvement; there is no iteration cap, so
/// callers bound the work by bounding the number of stops.
///
/// The stop at position 0 is never moved. The returned tour is never more
/// expensive than `initial`, and identical inputs always produce identical
/// outputs.
///
/// # Examples
/// ```
/// use stopwise_core::{CostMatrix, Tour, two_opt};
///
/// let matrix = CostMatrix::from_dense(vec![
///     vec![0.0, 1.0, 2.0, 10.0],
///     vec![1.0, 0.0, 3.0, 4.0],
///     vec![2.0, 3.0, 0.0, 8.0],
///     vec![10.0, 4.0, 8.0, 0.0],
/// ])?;
/// let outcome = two_opt(&matrix, Tour::new(vec![0, 1, 2, 3]));
/// assert_eq!(outcome.tour.order(), &[0, 2, 1, 3]);
/// assert_eq!(outcome.cost, 9.0);
/// # Ok::<(), stopwise_core::MatrixShapeError>(())
/// ```
#[must_use]
pub fn two_opt(matrix: &CostMatrix, initial: Tour) -> TwoOptOutcome {
    let mut best = initial.into_order();
    let initial_cost = path_cost(&best, matrix);
    let mut best_cost = initial_cost;
    let len = best.len();

    let mut sweeps = 0_usize;
    let mut improving_moves = 0_usize;
    let mut candidates_evaluated = 0_u64;

    loop {
        sweeps += 1;
        let mut improved = false;
        for i in 1..len.saturating_sub(1) {
            for j in (i + 1)..len {
                let candidate = reverse_segment(&best, i, j);
                let candidate_cost = path_cost(&candidate, matrix);
                candidates_evaluated += 1;
                if candidate_cost < best_cost {
                    log::trace!("2-opt reversal [{i}..={j}] lowers cost {best_cost} -> {candidate_cost}");
                    best = candidate;
                    best_cost = candidate_cost;
                    improving_moves += 1;
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }

    log::debug!(
        "2-opt finished after {sweeps} sweeps and {improving_moves} moves: cost {initial_cost} -> {best_cost}"
    );

    TwoOptOutcome {
        tour: Tour::new(best),
        initial_cost,
        cost: best_cost,
        sweeps,
        improving_moves,
        candidates_evaluated,
    }
}

fn reverse_segment(order: &[usize], i: usize, j: usize) -> Vec<usize> {
    let mut candidate = order.to_vec();
    if let Some(segment) = candidate.get_mut(i..=j) {
        segment.reverse();
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nearest_neighbour;
    use rstest::{fixture, rstest};

    #[fixture]
    fn triangle() -> CostMatrix {
        CostMatrix::from_dense(vec![
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 20.0],
            vec![15.0, 20.0, 0.0],
        ])
        .expect("square")
    }

    #[fixture]
    fn crossing() -> CostMatrix {
        CostMatrix::from_dense(vec![
            vec![0.0, 1.0, 2.0, 10.0],
            vec![1.0, 0.0, 3.0, 4.0],
            vec![2.0, 3.0, 0.0, 8.0],
            vec![10.0, 4.0, 8.0, 0.0],
        ])
        .expect("square")
    }

    #[rstest]
    fn triangle_is_already_optimal(triangle: CostMatrix) {
        let initial = nearest_neighbour(&triangle).tour;
        assert_eq!(initial.order(), &[0, 1, 2]);

        let outcome = two_opt(&triangle, initial);

        assert_eq!(outcome.tour.order(), &[0, 1, 2]);
        assert_eq!(outcome.cost, 30.0);
        assert_eq!(outcome.improving_moves, 0);
        assert_eq!(outcome.sweeps, 1);
        assert_eq!(outcome.candidates_evaluated, 1);
    }

    #[rstest]
    fn single_reversal_fixes_crossing(crossing: CostMatrix) {
        let initial = nearest_neighbour(&crossing).tour;
        assert_eq!(initial.order(), &[0, 1, 2, 3]);
        assert_eq!(initial.cost(&crossing), 12.0);

        let outcome = two_opt(&crossing, initial);

        assert_eq!(outcome.tour.order(), &[0, 2, 1, 3]);
        assert_eq!(outcome.tour.cost(&crossing), 9.0);
        assert_eq!(outcome.initial_cost, 12.0);
        assert_eq!(outcome.cost, 9.0);
        assert_eq!(outcome.improving_moves, 1);
        assert_eq!(outcome.sweeps, 2);
    }

    #[rstest]
    #[case(vec![0, 1])]
    #[case(vec![1, 0])]
    fn two_stops_are_left_alone(#[case] order: Vec<usize>) {
        let matrix =
            CostMatrix::from_dense(vec![vec![0.0, 7.0], vec![3.0, 0.0]]).expect("square");
        let outcome = two_opt(&matrix, Tour::new(order.clone()));
        assert_eq!(outcome.tour.order(), order.as_slice());
        assert_eq!(outcome.improving_moves, 0);
        assert_eq!(outcome.candidates_evaluated, 0);
    }

    #[rstest]
    fn rerunning_on_output_is_a_fixed_point(crossing: CostMatrix) {
        let first = two_opt(&crossing, Tour::new(vec![0, 3, 2, 1]));
        let second = two_opt(&crossing, first.tour.clone());
        assert_eq!(second.tour, first.tour);
        assert_eq!(second.improving_moves, 0);
    }

    #[rstest]
    fn first_stop_stays_anchored() {
        // Starting anywhere but stop 3 would be cheaper, yet position 0 never moves.
        let matrix = CostMatrix::from_dense(vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![50.0, 50.0, 50.0, 0.0],
        ])
        .expect("square");
        let outcome = two_opt(&matrix, Tour::new(vec![3, 0, 1, 2]));
        assert_eq!(outcome.tour.order().first(), Some(&3));
    }

    #[rstest]
    fn infinite_edges_are_escaped_when_possible() {
        let matrix = CostMatrix::from_rows(vec![
            vec![Some(0.0), None, Some(4.0)],
            vec![Some(1.0), Some(0.0), Some(1.0)],
            vec![Some(1.0), Some(2.0), Some(0.0)],
        ])
        .expect("square");
        let outcome = two_opt(&matrix, Tour::new(vec![0, 1, 2]));
        assert!(outcome.initial_cost.is_infinite());
        assert_eq!(outcome.tour.order(), &[0, 2, 1]);
        assert_eq!(outcome.cost, 6.0);
    }

    #[rstest]
    fn repeated_runs_are_identical(crossing: CostMatrix) {
        let runs: Vec<TwoOptOutcome> = (0..5)
            .map(|_| two_opt(&crossing, Tour::new(vec![0, 3, 1, 2])))
            .collect();
        assert!(runs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
