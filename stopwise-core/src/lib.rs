//! Core domain types and algorithms for the Stopwise route planner.
//!
//! Stopwise orders a handful of user-chosen stops into a short drivable trip.
//! This crate holds everything that does not touch the network:
//!
//! - [`Coordinate`], [`Stop`] and [`StopList`] describe what the caller wants
//!   to visit.
//! - [`CostMatrix`], [`nearest_neighbour`] and [`two_opt`] compute a visiting
//!   order.
//! - [`MatrixProvider`], [`DirectionsProvider`] and [`ReverseGeocoder`] are the
//!   seams to a routing service; `stopwise-data` implements them over HTTP.
//! - [`TourOptimizer`] and [`RoadSnapper`] tie the pieces together.

#![forbid(unsafe_code)]

mod coordinate;
mod matrix;
mod optimizer;
mod provider;
mod route;
mod snap;
mod stop;
mod tour;

#[doc(hidden)]
pub mod test_support;

pub use coordinate::Coordinate;
pub use matrix::{CostMatrix, CostMetric, MatrixShapeError, ParseCostMetricError};
pub use optimizer::{
    Diagnostics, MIN_STOPS, OptimizationResult, OptimizationWarning, OptimizeError, Optimizer,
    OptimizerConfig, TourOptimizer,
};
pub use provider::{
    DirectionsProvider, FeatureLayer, MatrixProvider, PlaceCandidate, ProviderError,
    ReverseGeocoder,
};
pub use route::{Route, RouteLeg, RouteStep, RouteSummary};
pub use snap::{RoadSnapper, SnapError, SnappedPoint};
pub use stop::{Provenance, Stop, StopList, StopListError, default_label};
pub use tour::{Tour, TourConstruction, TwoOptOutcome, nearest_neighbour, two_opt};
