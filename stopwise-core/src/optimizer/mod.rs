//! The route optimization pipeline.
//!
//! [`TourOptimizer`] fetches a cost matrix, builds a nearest-neighbour tour,
//! improves it with 2-opt and asks the directions provider for the road
//! geometry of the final order. The whole pipeline is one blocking call; the
//! optimizer keeps no state between calls.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Coordinate, CostMatrix, CostMetric, DirectionsProvider, MatrixProvider, ProviderError, Route,
    nearest_neighbour, two_opt,
};

/// Fewest stops an optimization accepts.
pub const MIN_STOPS: usize = 2;

/// Engine settings that do not concern the external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptimizerConfig {
    /// Quantity the tour minimises.
    pub metric: CostMetric,
}

impl OptimizerConfig {
    /// Set the metric the tour minimises.
    #[must_use]
    pub const fn with_metric(mut self, metric: CostMetric) -> Self {
        self.metric = metric;
        self
    }
}

/// Non-fatal conditions reported alongside a result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum OptimizationWarning {
    /// Some stops could not be reached from the start and were left out of
    /// the order. The remaining order is still usable.
    PartialTour {
        /// Input indices missing from the order.
        unreached: Vec<usize>,
    },
}

/// Search statistics for one optimization.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Cost of the nearest-neighbour tour, in the configured metric.
    pub initial_cost: f64,
    /// Cost of the final tour, in the configured metric.
    pub optimized_cost: f64,
    /// 2-opt sweeps performed.
    pub sweeps: usize,
    /// 2-opt reversals adopted.
    pub improving_moves: usize,
    /// Candidate tours costed by 2-opt.
    pub candidates_evaluated: u64,
}

/// Everything the engine returns for a successful optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationResult {
    /// Visiting order as indices into the caller's coordinate list.
    pub order: Vec<usize>,
    /// Road geometry, summary and legs for the visiting order.
    pub route: Route,
    /// Non-fatal conditions met along the way.
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<OptimizationWarning>,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

impl OptimizationResult {
    /// Whether some stops were left out of the order.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.warnings
            .iter()
            .any(|warning| matches!(warning, OptimizationWarning::PartialTour { .. }))
    }
}

/// Errors returned by [`Optimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// Fewer than [`MIN_STOPS`] coordinates were supplied.
    #[error("at least {MIN_STOPS} stops are required to optimize, got {count}")]
    InsufficientStops {
        /// Number of coordinates supplied.
        count: usize,
    },
    /// The cost matrix could not be obtained.
    #[error("cost matrix unavailable: {0}")]
    MatrixUnavailable(#[source] ProviderError),
    /// The start stop cannot reach any other stop.
    #[error("no other stop is reachable from the first stop ({} unreachable)", unreached.len())]
    UnreachableStops {
        /// Input indices that could not be reached.
        unreached: Vec<usize>,
    },
    /// The route geometry for the final order could not be obtained.
    #[error("route unavailable: {0}")]
    RouteUnavailable(#[source] ProviderError),
}

/// Plan a visiting order and road route for a set of stops.
///
/// Optimizers must be `Send + Sync` so one instance can serve concurrent
/// requests.
pub trait Optimizer: Send + Sync {
    /// Optimize the visiting order of `coordinates` (latitude, longitude).
    ///
    /// # Errors
    ///
    /// Returns an [`OptimizeError`] when the input is too small or a provider
    /// call fails. No partial result is returned on error.
    fn optimize(&self, coordinates: &[Coordinate]) -> Result<OptimizationResult, OptimizeError>;
}

/// Nearest-neighbour + 2-opt optimizer over pluggable providers.
///
/// The optimizer is generic over its two service boundaries so tests can
/// swap in deterministic doubles.
///
/// # Examples
/// ```
/// use stopwise_core::test_support::{FixedMatrixProvider, StraightLineDirections};
/// use stopwise_core::{Coordinate, CostMatrix, Optimizer, TourOptimizer};
///
/// let matrix = CostMatrix::from_dense(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])?;
/// let optimizer = TourOptimizer::new(FixedMatrixProvider::new(matrix), StraightLineDirections);
/// let stops = [
///     Coordinate::new(51.50, -0.10),
///     Coordinate::new(51.51, -0.11),
///     Coordinate::new(51.52, -0.12),
/// ];
/// let result = optimizer.optimize(&stops).expect("stub providers succeed");
/// assert_eq!(result.order, vec![0, 1, 2]);
/// assert_eq!(result.route.legs.len(), 2);
/// # Ok::<(), stopwise_core::MatrixShapeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TourOptimizer<M, D>
where
    M: MatrixProvider,
    D: DirectionsProvider,
{
    matrix_provider: M,
    directions_provider: D,
    config: OptimizerConfig,
}

impl<M, D> TourOptimizer<M, D>
where
    M: MatrixProvider,
    D: DirectionsProvider,
{
    /// Construct an optimizer using default configuration.
    #[must_use]
    pub fn new(matrix_provider: M, directions_provider: D) -> Self {
        Self::with_config(matrix_provider, directions_provider, OptimizerConfig::default())
    }

    /// Construct an optimizer with explicit configuration.
    #[must_use]
    pub const fn with_config(
        matrix_provider: M,
        directions_provider: D,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            matrix_provider,
            directions_provider,
            config,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn fetch_matrix(&self, coordinates: &[Coordinate]) -> Result<CostMatrix, OptimizeError> {
        let matrix = self
            .matrix_provider
            .cost_matrix(coordinates, self.config.metric)
            .map_err(OptimizeError::MatrixUnavailable)?;
        if matrix.len() != coordinates.len() {
            return Err(OptimizeError::MatrixUnavailable(
                ProviderError::DimensionMismatch {
                    expected: coordinates.len(),
                    actual: matrix.len(),
                },
            ));
        }
        Ok(matrix)
    }

    fn assemble_route(&self, ordered: &[Coordinate]) -> Result<Route, OptimizeError> {
        let route = self
            .directions_provider
            .directions(ordered)
            .map_err(OptimizeError::RouteUnavailable)?;
        let expected_legs = ordered.len().saturating_sub(1);
        if route.legs.len() != expected_legs {
            return Err(OptimizeError::RouteUnavailable(
                ProviderError::DimensionMismatch {
                    expected: expected_legs,
                    actual: route.legs.len(),
                },
            ));
        }
        Ok(route)
    }
}

impl<M, D> Optimizer for TourOptimizer<M, D>
where
    M: MatrixProvider + Send + Sync,
    D: DirectionsProvider + Send + Sync,
{
    fn optimize(&self, coordinates: &[Coordinate]) -> Result<OptimizationResult, OptimizeError> {
        if coordinates.len() < MIN_STOPS {
            return Err(OptimizeError::InsufficientStops {
                count: coordinates.len(),
            });
        }

        let matrix = self.fetch_matrix(coordinates)?;

        let construction = nearest_neighbour(&matrix);
        let mut warnings = Vec::new();
        if construction.is_partial() {
            log::warn!(
                "nearest-neighbour tour left {} of {} stops unreachable: {:?}",
                construction.unreached.len(),
                coordinates.len(),
                construction.unreached
            );
            if construction.tour.len() < MIN_STOPS {
                return Err(OptimizeError::UnreachableStops {
                    unreached: construction.unreached,
                });
            }
            warnings.push(OptimizationWarning::PartialTour {
                unreached: construction.unreached.clone(),
            });
        }

        let outcome = two_opt(&matrix, construction.tour);
        let order = outcome.tour.into_order();
        let ordered: Vec<Coordinate> = order
            .iter()
            .filter_map(|&index| coordinates.get(index).copied())
            .collect();

        let route = self.assemble_route(&ordered)?;

        log::info!(
            "optimized {} stops: cost {} -> {} in {} sweeps; route {:.0} m, {:.0} s",
            order.len(),
            outcome.initial_cost,
            outcome.cost,
            outcome.sweeps,
            route.summary.distance,
            route.summary.duration
        );

        Ok(OptimizationResult {
            order,
            route,
            warnings,
            diagnostics: Diagnostics {
                initial_cost: outcome.initial_cost,
                optimized_cost: outcome.cost,
                sweeps: outcome.sweeps,
                improving_moves: outcome.improving_moves,
                candidates_evaluated: outcome.candidates_evaluated,
            },
        })
    }
}
