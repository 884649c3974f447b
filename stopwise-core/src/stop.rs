//! Stops and the insertion-ordered stop list handed to the optimizer.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Where a stop came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Provenance {
    /// Added ad hoc for the current plan, e.g. a map click.
    #[default]
    Transient,
    /// Picked from the caller's named or saved places.
    Saved,
}

/// A labelled location the caller wants to visit.
///
/// # Examples
/// ```
/// use stopwise_core::{Coordinate, Provenance, Stop};
///
/// let stop = Stop::unnamed(Coordinate::new(51.50735, -0.12776));
/// assert_eq!(stop.label, "Stop @ 51.507");
/// assert_eq!(stop.provenance, Provenance::Transient);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stop {
    /// Position of the stop.
    pub location: Coordinate,
    /// Human-readable label.
    pub label: String,
    /// Origin of the stop.
    pub provenance: Provenance,
}

impl Stop {
    /// Construct a stop with an explicit label and provenance.
    pub fn new(location: Coordinate, label: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            location,
            label: label.into(),
            provenance,
        }
    }

    /// Construct a transient stop labelled from its latitude.
    #[must_use]
    pub fn unnamed(location: Coordinate) -> Self {
        Self::new(location, default_label(location), Provenance::Transient)
    }
}

/// Label given to a stop that has no better name.
#[must_use]
pub fn default_label(location: Coordinate) -> String {
    format!("Stop @ {:.3}", location.lat)
}

/// Errors returned by [`StopList`] mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StopListError {
    /// A stop already sits on exactly this coordinate.
    #[error("a stop already exists at {location:?}")]
    Duplicate {
        /// The rejected coordinate.
        location: Coordinate,
    },
    /// The index does not address a stop.
    #[error("stop index {index} is out of range for {len} stops")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of stops in the list.
        len: usize,
    },
}

/// Stops in the order the caller added them.
///
/// Order here is insertion order, not visiting order. Use
/// [`StopList::in_visiting_order`] to apply an optimized order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopList {
    stops: Vec<Stop>,
}

impl StopList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Append a stop, rejecting exact coordinate duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`StopListError::Duplicate`] when a stop already exists at the
    /// same latitude and longitude.
    pub fn push(&mut self, stop: Stop) -> Result<(), StopListError> {
        if self.stops.iter().any(|s| s.location == stop.location) {
            return Err(StopListError::Duplicate {
                location: stop.location,
            });
        }
        self.stops.push(stop);
        Ok(())
    }

    /// Remove and return the stop at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StopListError::OutOfRange`] for an invalid index.
    pub fn remove(&mut self, index: usize) -> Result<Stop, StopListError> {
        if index >= self.stops.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.stops.remove(index))
    }

    /// Replace the label of the stop at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StopListError::OutOfRange`] for an invalid index.
    pub fn rename(&mut self, index: usize, label: impl Into<String>) -> Result<(), StopListError> {
        let err = self.out_of_range(index);
        let stop = self.stops.get_mut(index).ok_or(err)?;
        stop.label = label.into();
        Ok(())
    }

    /// Number of stops.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the list holds no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Borrow the stops in insertion order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Coordinates in insertion order, ready for optimization.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.stops.iter().map(|stop| stop.location).collect()
    }

    /// Stops rearranged by an optimization order.
    ///
    /// Indices that no longer address a stop are skipped, so a stale order
    /// never panics.
    #[must_use]
    pub fn in_visiting_order(&self, order: &[usize]) -> Vec<&Stop> {
        order.iter().filter_map(|&index| self.stops.get(index)).collect()
    }

    const fn out_of_range(&self, index: usize) -> StopListError {
        StopListError::OutOfRange {
            index,
            len: self.stops.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn three_stops() -> StopList {
        let mut list = StopList::new();
        for (lat, lon) in [(51.5, -0.1), (51.6, -0.2), (51.7, -0.3)] {
            list.push(Stop::unnamed(Coordinate::new(lat, lon)))
                .expect("distinct stops");
        }
        list
    }

    #[rstest]
    fn default_label_uses_three_decimals() {
        assert_eq!(default_label(Coordinate::new(12.34567, 0.0)), "Stop @ 12.346");
    }

    #[rstest]
    fn push_rejects_exact_duplicates(mut three_stops: StopList) {
        let err = three_stops
            .push(Stop::new(Coordinate::new(51.6, -0.2), "Again", Provenance::Saved))
            .expect_err("duplicate coordinate");
        assert_eq!(
            err,
            StopListError::Duplicate {
                location: Coordinate::new(51.6, -0.2)
            }
        );
        assert_eq!(three_stops.len(), 3);
    }

    #[rstest]
    fn remove_and_rename_check_bounds(mut three_stops: StopList) {
        assert!(matches!(
            three_stops.remove(3),
            Err(StopListError::OutOfRange { index: 3, len: 3 })
        ));
        three_stops.rename(0, "Home").expect("valid index");
        let removed = three_stops.remove(0).expect("valid index");
        assert_eq!(removed.label, "Home");
        assert_eq!(three_stops.len(), 2);
    }

    #[rstest]
    fn visiting_order_skips_stale_indices(three_stops: StopList) {
        let ordered = three_stops.in_visiting_order(&[2, 0, 7, 1]);
        let labels: Vec<&str> = ordered.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Stop @ 51.700", "Stop @ 51.500", "Stop @ 51.600"]);
    }

    #[rstest]
    fn coordinates_follow_insertion_order(three_stops: StopList) {
        let coords = three_stops.coordinates();
        assert_eq!(coords.first(), Some(&Coordinate::new(51.5, -0.1)));
        assert_eq!(coords.last(), Some(&Coordinate::new(51.7, -0.3)));
    }
}
