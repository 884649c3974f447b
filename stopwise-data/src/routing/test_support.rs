//! Test utilities for routing providers.
//!
//! This module provides [`StubRoutingProvider`], a deterministic test double
//! for the provider traits that returns pre-configured responses without
//! making HTTP requests.

use stopwise_core::{
    Coordinate, CostMatrix, CostMetric, DirectionsProvider, FeatureLayer, MatrixProvider,
    PlaceCandidate, ProviderError, ReverseGeocoder, Route,
};

/// Stub routing provider for testing.
///
/// Each API answers with its configured value, or with the configured error
/// when one is set. Unconfigured APIs answer with a parse error, as a real
/// service returning an empty body would. Fewer than two coordinates are
/// rejected by the matrix and directions APIs, matching the HTTP provider.
///
/// # Example
///
/// ```
/// use stopwise_core::{Coordinate, CostMatrix, CostMetric, MatrixProvider};
/// use stopwise_data::routing::test_support::StubRoutingProvider;
///
/// let matrix = CostMatrix::from_dense(vec![vec![0.0, 60.0], vec![60.0, 0.0]])?;
/// let provider = StubRoutingProvider::default().with_matrix(matrix);
///
/// let stops = [Coordinate::new(51.5, -0.1), Coordinate::new(51.6, -0.2)];
/// let result = provider.cost_matrix(&stops, CostMetric::Duration);
/// assert!(result.is_ok());
/// # Ok::<(), stopwise_core::MatrixShapeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubRoutingProvider {
    matrix: Option<CostMatrix>,
    route: Option<Route>,
    candidates: Vec<PlaceCandidate>,
    error: Option<ProviderError>,
}

impl StubRoutingProvider {
    /// Create a provider that fails every call with `error`.
    ///
    /// Input validation still runs first.
    #[must_use]
    pub fn with_error(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Answer matrix requests with `matrix`.
    #[must_use]
    pub fn with_matrix(mut self, matrix: CostMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// Answer directions requests with `route`.
    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    /// Answer reverse-geocode requests with `candidates`.
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<PlaceCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    fn fail_if_configured(&self) -> Result<(), ProviderError> {
        self.error.clone().map_or(Ok(()), Err)
    }
}

fn require_pair(coordinates: &[Coordinate]) -> Result<(), ProviderError> {
    if coordinates.len() < 2 {
        return Err(ProviderError::InsufficientCoordinates {
            required: 2,
            actual: coordinates.len(),
        });
    }
    Ok(())
}

fn unconfigured(api: &str) -> ProviderError {
    ProviderError::ParseError {
        message: format!("stub has no {api} response configured"),
    }
}

impl MatrixProvider for StubRoutingProvider {
    fn cost_matrix(
        &self,
        coordinates: &[Coordinate],
        _metric: CostMetric,
    ) -> Result<CostMatrix, ProviderError> {
        require_pair(coordinates)?;
        self.fail_if_configured()?;
        self.matrix.clone().ok_or_else(|| unconfigured("matrix"))
    }
}

impl DirectionsProvider for StubRoutingProvider {
    fn directions(&self, coordinates: &[Coordinate]) -> Result<Route, ProviderError> {
        require_pair(coordinates)?;
        self.fail_if_configured()?;
        self.route.clone().ok_or_else(|| unconfigured("directions"))
    }
}

impl ReverseGeocoder for StubRoutingProvider {
    fn reverse_geocode(
        &self,
        _point: Coordinate,
        _layer: FeatureLayer,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        self.fail_if_configured()?;
        Ok(self.candidates.clone())
    }
}
