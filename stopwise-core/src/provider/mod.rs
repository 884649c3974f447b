//! Boundaries to the external routing and geocoding service.
//!
//! The engine consults the service through three synchronous traits:
//! [`MatrixProvider`] for pairwise costs, [`DirectionsProvider`] for the road
//! geometry of an ordered trip, and [`ReverseGeocoder`] for snapping a point
//! to the street network. Implementations perform at most one outbound call
//! per method and keep no state between calls, so a single instance may be
//! shared by concurrent callers.
//!
//! All methods take and return [`Coordinate`](crate::Coordinate) values; any
//! reordering into the service's wire format happens inside the
//! implementation.

mod error;
mod geocode;
mod traits;

pub use error::ProviderError;
pub use geocode::{FeatureLayer, PlaceCandidate};
pub use traits::{DirectionsProvider, MatrixProvider, ReverseGeocoder};
