//! Provider traits and their forwarding impls for shared handles.

use std::sync::Arc;

use super::{FeatureLayer, PlaceCandidate, ProviderError};
use crate::{CostMatrix, CostMetric, Coordinate, Route};

/// Fetch pairwise travel costs for a set of coordinates.
///
/// Implementers must return a square `n×n` matrix where
/// `n == coordinates.len()`, with `cost(i, j)` the cost from
/// `coordinates[i]` to `coordinates[j]`. Pairs the service cannot route are
/// left infinite. Fewer than two coordinates must be rejected with
/// [`ProviderError::InsufficientCoordinates`] without contacting the service.
///
/// # Examples
///
/// ```rust
/// use stopwise_core::{
///     Coordinate, CostMatrix, CostMetric, MatrixProvider, ProviderError,
/// };
///
/// struct UnitProvider;
///
/// impl MatrixProvider for UnitProvider {
///     fn cost_matrix(
///         &self,
///         coordinates: &[Coordinate],
///         _metric: CostMetric,
///     ) -> Result<CostMatrix, ProviderError> {
///         let n = coordinates.len();
///         if n < 2 {
///             return Err(ProviderError::InsufficientCoordinates { required: 2, actual: n });
///         }
///         let rows = (0..n)
///             .map(|i| (0..n).map(|j| Some(if i == j { 0.0 } else { 1.0 })).collect())
///             .collect();
///         CostMatrix::from_rows(rows).map_err(|err| ProviderError::ParseError {
///             message: err.to_string(),
///         })
///     }
/// }
///
/// let stops = [Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)];
/// let matrix = UnitProvider.cost_matrix(&stops, CostMetric::Duration).unwrap();
/// assert_eq!(matrix.cost(0, 1), 1.0);
/// ```
pub trait MatrixProvider {
    /// Compute the cost matrix for `coordinates` measured by `metric`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for invalid input or any transport or
    /// service failure.
    fn cost_matrix(
        &self,
        coordinates: &[Coordinate],
        metric: CostMetric,
    ) -> Result<CostMatrix, ProviderError>;
}

/// Fetch the road route visiting coordinates in the given order.
///
/// Implementers return one [`RouteLeg`](crate::RouteLeg) per consecutive
/// pair and keep step `way_points` exactly as the service reported them.
pub trait DirectionsProvider {
    /// Compute the route through `coordinates` in order.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for fewer than two coordinates or any
    /// transport or service failure.
    fn directions(&self, coordinates: &[Coordinate]) -> Result<Route, ProviderError>;
}

/// Look up named features near a point.
pub trait ReverseGeocoder {
    /// Return candidates of `layer` near `point`, nearest first.
    ///
    /// An empty vector means the service found nothing; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for any transport or service failure.
    fn reverse_geocode(
        &self,
        point: Coordinate,
        layer: FeatureLayer,
    ) -> Result<Vec<PlaceCandidate>, ProviderError>;
}

macro_rules! forward_provider_impls {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl<T: MatrixProvider + ?Sized> MatrixProvider for $wrapper {
                fn cost_matrix(
                    &self,
                    coordinates: &[Coordinate],
                    metric: CostMetric,
                ) -> Result<CostMatrix, ProviderError> {
                    (**self).cost_matrix(coordinates, metric)
                }
            }

            impl<T: DirectionsProvider + ?Sized> DirectionsProvider for $wrapper {
                fn directions(&self, coordinates: &[Coordinate]) -> Result<Route, ProviderError> {
                    (**self).directions(coordinates)
                }
            }

            impl<T: ReverseGeocoder + ?Sized> ReverseGeocoder for $wrapper {
                fn reverse_geocode(
                    &self,
                    point: Coordinate,
                    layer: FeatureLayer,
                ) -> Result<Vec<PlaceCandidate>, ProviderError> {
                    (**self).reverse_geocode(point, layer)
                }
            }
        )+
    };
}

forward_provider_impls!(&T, Box<T>, Arc<T>);
