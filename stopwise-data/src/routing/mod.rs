//! HTTP routing, directions and geocoding for OpenRouteService-compatible
//! services.
//!
//! This module provides [`HttpRoutingProvider`], which implements
//! [`stopwise_core::MatrixProvider`], [`stopwise_core::DirectionsProvider`]
//! and [`stopwise_core::ReverseGeocoder`] over HTTP.
//!
//! # Architecture
//!
//! The provider makes JSON requests to the Matrix, Directions and reverse
//! Geocode APIs. The core traits are synchronous, so each call blocks on the
//! async HTTP request internally, keeping the engine embeddable in
//! synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use stopwise_core::{Coordinate, Optimizer, TourOptimizer};
//! use stopwise_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
//! use std::sync::Arc;
//!
//! let config = HttpRoutingProviderConfig::default().with_api_key("your-key");
//! let provider = Arc::new(HttpRoutingProvider::with_config(config)?);
//! let optimizer = TourOptimizer::new(Arc::clone(&provider), provider);
//!
//! let stops = [
//!     Coordinate::new(51.5074, -0.1278),
//!     Coordinate::new(51.5155, -0.1410),
//!     Coordinate::new(51.5033, -0.1196),
//! ];
//! let result = optimizer.optimize(&stops)?;
//! println!("visit in order {:?}", result.order);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ors;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    HttpRoutingProvider, HttpRoutingProviderConfig, ProviderBuildError,
};
