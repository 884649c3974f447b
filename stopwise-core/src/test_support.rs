//! Deterministic provider doubles used by unit, behaviour and doc tests.
//!
//! None of these contact a network. Call counters let tests assert that a
//! provider was, or was not, consulted.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    Coordinate, CostMatrix, CostMetric, DirectionsProvider, FeatureLayer, MatrixProvider,
    PlaceCandidate, ProviderError, ReverseGeocoder, Route, RouteLeg, RouteStep, RouteSummary,
};

/// Distance reported for every leg by [`StraightLineDirections`], in metres.
pub const STRAIGHT_LEG_DISTANCE: f64 = 1_000.0;
/// Duration reported for every leg by [`StraightLineDirections`], in seconds.
pub const STRAIGHT_LEG_DURATION: f64 = 60.0;

fn require_pair(coordinates: &[Coordinate]) -> Result<(), ProviderError> {
    if coordinates.len() < 2 {
        return Err(ProviderError::InsufficientCoordinates {
            required: 2,
            actual: coordinates.len(),
        });
    }
    Ok(())
}

/// `MatrixProvider` that always answers with the same matrix.
#[derive(Debug)]
pub struct FixedMatrixProvider {
    matrix: CostMatrix,
    calls: AtomicUsize,
}

impl FixedMatrixProvider {
    /// Answer every request with `matrix`, whatever the coordinates.
    #[must_use]
    pub const fn new(matrix: CostMatrix) -> Self {
        Self {
            matrix,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MatrixProvider for FixedMatrixProvider {
    fn cost_matrix(
        &self,
        coordinates: &[Coordinate],
        _metric: CostMetric,
    ) -> Result<CostMatrix, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        require_pair(coordinates)?;
        Ok(self.matrix.clone())
    }
}

/// `DirectionsProvider` that joins the stops with straight segments.
///
/// The geometry is the ordered coordinates themselves, so leg `k` covers
/// vertices `k..=k + 1`. Every leg has [`STRAIGHT_LEG_DISTANCE`] and
/// [`STRAIGHT_LEG_DURATION`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineDirections;

impl DirectionsProvider for StraightLineDirections {
    fn directions(&self, coordinates: &[Coordinate]) -> Result<Route, ProviderError> {
        require_pair(coordinates)?;
        let legs: Vec<RouteLeg> = (0..coordinates.len() - 1)
            .map(|k| RouteLeg {
                distance: STRAIGHT_LEG_DISTANCE,
                duration: STRAIGHT_LEG_DURATION,
                steps: vec![RouteStep {
                    distance: STRAIGHT_LEG_DISTANCE,
                    duration: STRAIGHT_LEG_DURATION,
                    instruction: Some(format!("Head to stop {}", k + 1)),
                    name: None,
                    way_points: [k, k + 1],
                }],
            })
            .collect();
        let summary = RouteSummary {
            distance: legs.iter().map(|leg| leg.distance).sum(),
            duration: legs.iter().map(|leg| leg.duration).sum(),
        };
        Ok(Route {
            geometry: coordinates.to_vec(),
            summary,
            legs,
        })
    }
}

/// `DirectionsProvider` that always answers with the same route.
#[derive(Debug, Clone)]
pub struct FixedDirections {
    route: Route,
}

impl FixedDirections {
    /// Answer every request with `route`.
    #[must_use]
    pub const fn new(route: Route) -> Self {
        Self { route }
    }
}

impl DirectionsProvider for FixedDirections {
    fn directions(&self, _coordinates: &[Coordinate]) -> Result<Route, ProviderError> {
        Ok(self.route.clone())
    }
}

/// `ReverseGeocoder` with a canned answer that records requested layers.
#[derive(Debug, Default)]
pub struct FixedGeocoder {
    candidates: Vec<PlaceCandidate>,
    layers: Mutex<Vec<FeatureLayer>>,
}

impl FixedGeocoder {
    /// Answer every query with `candidates`.
    #[must_use]
    pub const fn with_candidates(candidates: Vec<PlaceCandidate>) -> Self {
        Self {
            candidates,
            layers: Mutex::new(Vec::new()),
        }
    }

    /// Layers requested so far, oldest first.
    #[must_use]
    pub fn requested_layers(&self) -> Vec<FeatureLayer> {
        self.layers
            .lock()
            .map(|layers| layers.clone())
            .unwrap_or_default()
    }
}

impl ReverseGeocoder for FixedGeocoder {
    fn reverse_geocode(
        &self,
        _point: Coordinate,
        layer: FeatureLayer,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        if let Ok(mut layers) = self.layers.lock() {
            layers.push(layer);
        }
        Ok(self.candidates.clone())
    }
}

/// Provider that fails every call with the same error.
#[derive(Debug)]
pub struct FailingProvider {
    error: ProviderError,
    calls: AtomicUsize,
}

impl FailingProvider {
    /// Fail every call with `error`.
    #[must_use]
    pub const fn new(error: ProviderError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls received so far, across all traits.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

impl MatrixProvider for FailingProvider {
    fn cost_matrix(
        &self,
        _coordinates: &[Coordinate],
        _metric: CostMetric,
    ) -> Result<CostMatrix, ProviderError> {
        self.fail()
    }
}

impl DirectionsProvider for FailingProvider {
    fn directions(&self, _coordinates: &[Coordinate]) -> Result<Route, ProviderError> {
        self.fail()
    }
}

impl ReverseGeocoder for FailingProvider {
    fn reverse_geocode(
        &self,
        _point: Coordinate,
        _layer: FeatureLayer,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        self.fail()
    }
}
