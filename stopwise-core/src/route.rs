//! Drivable routes through an ordered list of stops.
//!
//! A [`Route`] holds the flattened path geometry for the whole trip plus one
//! [`RouteLeg`] per pair of consecutive stops. Steps inside a leg carry
//! `way_points` offsets into the flattened geometry exactly as the routing
//! provider reported them, so [`Route::leg_path`] can cut the polyline for a
//! single leg.

use geo::{BoundingRect, Coord, LineString, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Total distance and duration of a route or leg.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteSummary {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// A single manoeuvre inside a leg.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteStep {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Turn instruction, when the provider supplies one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub instruction: Option<String>,
    /// Street name, when the provider supplies one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Inclusive `[start, end]` offsets into [`Route::geometry`].
    pub way_points: [usize; 2],
}

/// The drivable path between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteLeg {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Turn-by-turn steps; may be empty when the provider omits them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: Vec<RouteStep>,
}

impl RouteLeg {
    /// Inclusive geometry range covered by the leg.
    ///
    /// Taken from the first step's start and the last step's end. `None` when
    /// the leg has no steps.
    #[must_use]
    pub fn way_point_range(&self) -> Option<(usize, usize)> {
        let first = self.steps.first()?;
        let last = self.steps.last()?;
        let [start, _] = first.way_points;
        let [_, end] = last.way_points;
        Some((start, end))
    }
}

/// Geometry, summary and legs of a route through ordered stops.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    /// Flattened path for the whole route.
    pub geometry: Vec<Coordinate>,
    /// Totals for the whole route.
    pub summary: RouteSummary,
    /// One leg per consecutive pair of stops.
    pub legs: Vec<RouteLeg>,
}

impl Route {
    /// Slice of [`Route::geometry`] travelled by leg `index`.
    ///
    /// Consecutive legs share their boundary vertex. Returns `None` when the
    /// leg does not exist, has no steps, or its way-points fall outside the
    /// geometry.
    #[must_use]
    pub fn leg_path(&self, index: usize) -> Option<&[Coordinate]> {
        let (start, end) = self.legs.get(index)?.way_point_range()?;
        if start > end {
            return None;
        }
        self.geometry.get(start..=end)
    }

    /// Paths for every leg in order; see [`Route::leg_path`].
    #[must_use]
    pub fn leg_paths(&self) -> Vec<Option<&[Coordinate]>> {
        (0..self.legs.len()).map(|index| self.leg_path(index)).collect()
    }

    /// The geometry as a `geo` line string (`x = lon`, `y = lat`).
    #[must_use]
    pub fn line_string(&self) -> LineString<f64> {
        self.geometry
            .iter()
            .map(|&coordinate| Coord::from(coordinate))
            .collect()
    }

    /// Bounding box of the geometry, for fitting a map viewport.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.line_string().bounding_rect()
    }
}
