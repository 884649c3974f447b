//! Facade crate for the Stopwise route planner.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the HTTP routing provider.

#![forbid(unsafe_code)]

pub use stopwise_core::{
    Coordinate, CostMatrix, CostMetric, Diagnostics, DirectionsProvider, FeatureLayer,
    MatrixProvider, OptimizationResult, OptimizationWarning, OptimizeError, Optimizer,
    OptimizerConfig, PlaceCandidate, Provenance, ProviderError, ReverseGeocoder, RoadSnapper,
    Route, RouteLeg, RouteStep, RouteSummary, SnapError, SnappedPoint, Stop, StopList,
    StopListError, TourOptimizer, default_label,
};

#[cfg(feature = "http")]
pub use stopwise_data::routing::{
    HttpRoutingProvider, HttpRoutingProviderConfig, ProviderBuildError,
};
