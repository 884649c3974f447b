//! Proptest strategies for tour construction and improvement properties.

use proptest::prelude::*;
use stopwise_core::CostMatrix;

/// Strategy for dense asymmetric matrices of `min_size..=max_size` stops.
///
/// Off-diagonal costs are whole numbers so cost comparisons stay exact.
pub fn dense_matrix_strategy(min_size: usize, max_size: usize) -> impl Strategy<Value = CostMatrix> {
    (min_size..=max_size).prop_flat_map(|size| {
        proptest::collection::vec(proptest::collection::vec(1_u16..500, size), size).prop_map(
            |rows| {
                let dense = rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, row)| {
                        row.into_iter()
                            .enumerate()
                            .map(|(j, cost)| if i == j { 0.0 } else { f64::from(cost) })
                            .collect()
                    })
                    .collect();
                CostMatrix::from_dense(dense).expect("generated rows are square")
            },
        )
    })
}

/// Strategy for matrices where roughly one edge in five is unroutable.
pub fn sparse_matrix_strategy(min_size: usize, max_size: usize) -> impl Strategy<Value = CostMatrix> {
    (min_size..=max_size).prop_flat_map(|size| {
        proptest::collection::vec(
            proptest::collection::vec(proptest::option::weighted(0.8, 1_u16..500), size),
            size,
        )
        .prop_map(|rows| {
            let sparse = rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    row.into_iter()
                        .enumerate()
                        .map(|(j, cost)| if i == j { Some(0.0) } else { cost.map(f64::from) })
                        .collect()
                })
                .collect();
            CostMatrix::from_rows(sparse).expect("generated rows are square")
        })
    })
}
