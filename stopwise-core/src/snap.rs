//! Snapping user-picked points to the nearest street.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coordinate, FeatureLayer, ProviderError, ReverseGeocoder, default_label};

/// A point moved onto the street network, with a display name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnappedPoint {
    /// Location of the matched street feature.
    pub location: Coordinate,
    /// Human-readable name of the match.
    pub name: String,
}

/// Errors returned by [`RoadSnapper::snap_to_road`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapError {
    /// The geocoder found no street near the point.
    #[error("no street found near ({}, {})", point.lat, point.lon)]
    NoSnapMatch {
        /// The point that was queried.
        point: Coordinate,
    },
    /// The geocoder could not be consulted.
    #[error("reverse geocoding unavailable: {0}")]
    SnapUnavailable(#[source] ProviderError),
}

/// Snaps points to streets using a [`ReverseGeocoder`].
///
/// # Examples
/// ```
/// use stopwise_core::test_support::FixedGeocoder;
/// use stopwise_core::{Coordinate, PlaceCandidate, RoadSnapper};
///
/// let street = PlaceCandidate {
///     name: Some("High Street".into()),
///     ..PlaceCandidate::at(Coordinate::new(51.5012, -0.1201))
/// };
/// let snapper = RoadSnapper::new(FixedGeocoder::with_candidates(vec![street]));
/// let snapped = snapper.snap_to_road(Coordinate::new(51.5, -0.12))?;
/// assert_eq!(snapped.name, "High Street");
/// # Ok::<(), stopwise_core::SnapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RoadSnapper<G> {
    geocoder: G,
}

impl<G: ReverseGeocoder> RoadSnapper<G> {
    /// Wrap a geocoder.
    #[must_use]
    pub const fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Move `point` to the nearest street feature.
    ///
    /// Only the first candidate is used. Its neighbourhood, name or label
    /// becomes the display name, in that order of preference; when all are
    /// blank the name falls back to [`default_label`] of the snapped
    /// location.
    ///
    /// # Errors
    ///
    /// [`SnapError::NoSnapMatch`] when the geocoder returns nothing, and
    /// [`SnapError::SnapUnavailable`] when it fails.
    pub fn snap_to_road(&self, point: Coordinate) -> Result<SnappedPoint, SnapError> {
        let candidates = self
            .geocoder
            .reverse_geocode(point, FeatureLayer::Street)
            .map_err(SnapError::SnapUnavailable)?;
        let Some(candidate) = candidates.into_iter().next() else {
            log::debug!("no street near ({}, {})", point.lat, point.lon);
            return Err(SnapError::NoSnapMatch { point });
        };
        let name = candidate
            .display_name()
            .map_or_else(|| default_label(candidate.location), str::to_owned);
        Ok(SnappedPoint {
            location: candidate.location,
            name,
        })
    }
}
