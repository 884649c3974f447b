//! Visiting orders over a [`CostMatrix`](crate::CostMatrix).
//!
//! A [`Tour`] is an open path: it starts at its first index and ends at its
//! last, without returning. [`nearest_neighbour`] builds an initial tour and
//! [`two_opt`] improves it by reversing sub-segments.

mod construct;
mod two_opt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::CostMatrix;

pub use construct::{TourConstruction, nearest_neighbour};
pub use two_opt::{TwoOptOutcome, two_opt};

/// An ordered, non-repeating sequence of stop indices.
///
/// # Examples
/// ```
/// use stopwise_core::{CostMatrix, Tour};
///
/// let matrix = CostMatrix::from_dense(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])?;
/// let tour = Tour::new(vec![0, 1, 2]);
/// assert_eq!(tour.cost(&matrix), 30.0);
/// # Ok::<(), stopwise_core::MatrixShapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wrap an order of stop indices.
    #[must_use]
    pub const fn new(order: Vec<usize>) -> Self {
        Self(order)
    }

    /// Borrow the indices in visiting order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.0
    }

    /// Consume the tour, returning its indices.
    #[must_use]
    pub fn into_order(self) -> Vec<usize> {
        self.0
    }

    /// Number of stops visited.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tour visits no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total cost of walking the tour as an open path.
    ///
    /// Any unreachable hop makes the whole tour infinitely expensive.
    #[must_use]
    pub fn cost(&self, matrix: &CostMatrix) -> f64 {
        path_cost(&self.0, matrix)
    }

    /// Whether every index is below `size` and appears at most once.
    ///
    /// A full tour additionally has `len() == size`; partial tours produced
    /// from matrices with unreachable stops are shorter.
    #[must_use]
    pub fn is_partial_permutation_of(&self, size: usize) -> bool {
        let mut seen = vec![false; size];
        self.0.iter().all(|&index| {
            seen.get_mut(index)
                .is_some_and(|slot| !std::mem::replace(slot, true))
        })
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self(order)
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

pub(crate) fn path_cost(order: &[usize], matrix: &CostMatrix) -> f64 {
    order
        .windows(2)
        .map(|pair| match pair {
            [from, to] => matrix.cost(*from, *to),
            _ => 0.0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_and_single_stop_tours_cost_nothing() {
        let matrix = CostMatrix::from_dense(vec![vec![0.0]]).expect("square");
        assert_eq!(Tour::default().cost(&matrix), 0.0);
        assert_eq!(Tour::new(vec![0]).cost(&matrix), 0.0);
    }

    #[rstest]
    fn cost_is_directional() {
        let matrix =
            CostMatrix::from_dense(vec![vec![0.0, 1.0], vec![9.0, 0.0]]).expect("square");
        assert_eq!(Tour::new(vec![0, 1]).cost(&matrix), 1.0);
        assert_eq!(Tour::new(vec![1, 0]).cost(&matrix), 9.0);
    }

    #[rstest]
    #[case(vec![2, 0, 1], 3, true)]
    #[case(vec![0, 2], 3, true)]
    #[case(vec![0, 0, 1], 3, false)]
    #[case(vec![0, 3], 3, false)]
    fn detects_permutations(#[case] order: Vec<usize>, #[case] size: usize, #[case] ok: bool) {
        assert_eq!(Tour::new(order).is_partial_permutation_of(size), ok);
    }
}
