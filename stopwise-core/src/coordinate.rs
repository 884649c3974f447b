//! Geographic coordinates at the engine boundary.
//!
//! Callers and map front-ends speak `(latitude, longitude)`. Routing
//! providers speak `(longitude, latitude)`. [`Coordinate`] is the only place
//! where one ordering is turned into the other; everything else passes
//! `Coordinate` values around and never reorders raw pairs by hand.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A WGS84 position expressed as latitude and longitude in degrees.
///
/// # Examples
/// ```
/// use stopwise_core::Coordinate;
///
/// let stop = Coordinate::new(51.5, -0.12);
/// assert_eq!(stop.to_lon_lat(), [-0.12, 51.5]);
/// assert_eq!(Coordinate::from_lon_lat([-0.12, 51.5]), stop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate from a provider-ordered `[lon, lat]` pair.
    #[must_use]
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        let [lon, lat] = pair;
        Self { lat, lon }
    }

    /// Return the provider-ordered `[lon, lat]` pair.
    #[must_use]
    pub const fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Return the map-ordered `[lat, lon]` pair.
    #[must_use]
    pub const fn to_lat_lon(self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lon,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lon: value.x,
        }
    }
}
