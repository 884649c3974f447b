//! Pairwise travel costs between stops.
//!
//! A [`CostMatrix`] is square and directional: `cost(i, j)` is the cost of
//! driving from stop `i` to stop `j` and need not equal `cost(j, i)`. Entries
//! the provider could not compute are stored as `f64::INFINITY`, so the tour
//! algorithms never have to special-case missing data.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which quantity a cost matrix measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostMetric {
    /// Travel time in seconds.
    #[default]
    Duration,
    /// Travel distance in metres.
    Distance,
}

impl CostMetric {
    /// Wire name used by routing providers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for CostMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`CostMetric`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cost metric {0:?} (expected \"duration\" or \"distance\")")]
pub struct ParseCostMetricError(pub String);

impl FromStr for CostMetric {
    type Err = ParseCostMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duration" => Ok(Self::Duration),
            "distance" => Ok(Self::Distance),
            _ => Err(ParseCostMetricError(s.to_owned())),
        }
    }
}

/// Errors returned when building a [`CostMatrix`] from rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixShapeError {
    /// A row's length differs from the number of rows.
    #[error("row {row} has {actual} columns but the matrix has {expected} rows")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Number of rows, which every row length must match.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
}

/// Square table of directional travel costs.
///
/// # Examples
/// ```
/// use stopwise_core::CostMatrix;
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![Some(0.0), Some(12.0)],
///     vec![None, Some(0.0)],
/// ])?;
/// assert_eq!(matrix.cost(0, 1), 12.0);
/// assert!(matrix.cost(1, 0).is_infinite());
/// # Ok::<(), stopwise_core::MatrixShapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl CostMatrix {
    /// Build a matrix from provider rows.
    ///
    /// `None`, negative, NaN and infinite entries become `f64::INFINITY`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixShapeError::NotSquare`] when any row length differs
    /// from the number of rows.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self, MatrixShapeError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size.saturating_mul(size));
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MatrixShapeError::NotSquare {
                    row: row_index,
                    expected: size,
                    actual: row.len(),
                });
            }
            cells.extend(row.into_iter().map(sanitise));
        }
        Ok(Self { size, cells })
    }

    /// Build a matrix from fully populated rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixShapeError::NotSquare`] for ragged input.
    pub fn from_dense(rows: Vec<Vec<f64>>) -> Result<Self, MatrixShapeError> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    /// Number of stops the matrix covers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix covers no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Cost of travelling directly from `from` to `to`.
    ///
    /// Out-of-range indices and unreachable pairs both report
    /// `f64::INFINITY`.
    #[must_use]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        if from >= self.size || to >= self.size {
            return f64::INFINITY;
        }
        from.checked_mul(self.size)
            .and_then(|offset| offset.checked_add(to))
            .and_then(|index| self.cells.get(index))
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Whether `to` can be reached directly from `from`.
    #[must_use]
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.cost(from, to).is_finite()
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.size.max(1)).take(self.size)
    }
}

fn sanitise(cell: Option<f64>) -> f64 {
    cell.filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_and_invalid_entries_become_infinite() {
        let matrix = CostMatrix::from_rows(vec![
            vec![Some(0.0), None, Some(-1.0)],
            vec![Some(f64::NAN), Some(0.0), Some(f64::INFINITY)],
            vec![Some(100.0), Some(200.0), Some(0.0)],
        ])
        .expect("square");

        assert!(matrix.cost(0, 1).is_infinite());
        assert!(matrix.cost(0, 2).is_infinite());
        assert!(matrix.cost(1, 0).is_infinite());
        assert!(matrix.cost(1, 2).is_infinite());
        assert_eq!(matrix.cost(2, 0), 100.0);
        assert_eq!(matrix.cost(2, 1), 200.0);
        assert!(!matrix.is_reachable(0, 1));
    }

    #[rstest]
    fn ragged_rows_are_rejected() {
        let err = CostMatrix::from_dense(vec![vec![0.0, 1.0], vec![1.0]]).expect_err("ragged");
        assert_eq!(
            err,
            MatrixShapeError::NotSquare {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[rstest]
    fn out_of_range_lookups_are_infinite() {
        let matrix = CostMatrix::from_dense(vec![vec![0.0]]).expect("square");
        assert!(matrix.cost(0, 1).is_infinite());
        assert!(matrix.cost(5, 0).is_infinite());
    }

    #[rstest]
    fn rows_expose_each_line() {
        let matrix =
            CostMatrix::from_dense(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).expect("square");
        let rows: Vec<&[f64]> = matrix.rows().collect();
        assert_eq!(rows, vec![&[0.0, 3.0][..], &[4.0, 0.0][..]]);
        assert_eq!(CostMatrix::from_dense(Vec::new()).expect("empty").rows().count(), 0);
    }

    #[rstest]
    #[case("duration", CostMetric::Duration)]
    #[case(" Distance ", CostMetric::Distance)]
    fn metric_parses_case_insensitively(#[case] input: &str, #[case] expected: CostMetric) {
        assert_eq!(input.parse::<CostMetric>(), Ok(expected));
    }

    #[rstest]
    fn unknown_metric_is_rejected() {
        assert!("speed".parse::<CostMetric>().is_err());
    }
}
