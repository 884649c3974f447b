//! OpenRouteService request and response types.
//!
//! Only the fields the engine reads are modelled; everything else in the
//! service's responses is ignored. Coordinates on the wire are always
//! `[lon, lat]` pairs.
//!
//! See: <https://openrouteservice.org/dev/#/api-docs>

use serde::{Deserialize, Serialize};
use stopwise_core::{
    Coordinate, CostMatrix, CostMetric, MatrixShapeError, PlaceCandidate, ProviderError, Route,
    RouteLeg, RouteStep, RouteSummary,
};

/// Body of a Matrix API request.
#[derive(Debug, Serialize)]
pub struct MatrixRequest {
    /// Stops as `[lon, lat]` pairs.
    pub locations: Vec<[f64; 2]>,
    /// The single metric to compute.
    pub metrics: [&'static str; 1],
}

impl MatrixRequest {
    /// Build a request for every pair of `coordinates`.
    pub fn new(coordinates: &[Coordinate], metric: CostMetric) -> Self {
        Self {
            locations: coordinates.iter().map(|c| c.to_lon_lat()).collect(),
            metrics: [metric.as_str()],
        }
    }
}

/// Matrix API response.
///
/// Only the table for the requested metric is present. Cells are `None`
/// when the service found no route between a pair.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// Durations in seconds.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
    /// Distances in metres.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl MatrixResponse {
    /// Convert the table for `metric` into an `expected`×`expected` matrix.
    pub fn into_cost_matrix(
        self,
        metric: CostMetric,
        expected: usize,
    ) -> Result<CostMatrix, ProviderError> {
        let rows = match metric {
            CostMetric::Duration => self.durations,
            CostMetric::Distance => self.distances,
        }
        .ok_or_else(|| ProviderError::ParseError {
            message: format!("matrix response missing {metric} table"),
        })?;

        if rows.len() != expected {
            return Err(ProviderError::DimensionMismatch {
                expected,
                actual: rows.len(),
            });
        }

        CostMatrix::from_rows(rows).map_err(|err| match err {
            MatrixShapeError::NotSquare {
                expected: want,
                actual,
                ..
            } => ProviderError::DimensionMismatch {
                expected: want,
                actual,
            },
        })
    }
}

/// Body of a Directions API request.
#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    /// Stops in visiting order as `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl DirectionsRequest {
    /// Build a request through `coordinates` in order.
    pub fn new(coordinates: &[Coordinate]) -> Self {
        Self {
            coordinates: coordinates.iter().map(|c| c.to_lon_lat()).collect(),
        }
    }
}

/// Directions API response in GeoJSON form.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Route features; the first one is the route asked for.
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

/// A single route as a GeoJSON feature.
#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    /// Route polyline.
    pub geometry: LineGeometry,
    /// Summary and per-segment breakdown.
    pub properties: RouteProperties,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Vertices as `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Properties of a route feature.
#[derive(Debug, Deserialize)]
pub struct RouteProperties {
    /// Totals for the route. Empty for zero-length routes.
    #[serde(default)]
    pub summary: Totals,
    /// One segment per consecutive pair of waypoints.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Distance and duration totals; either may be omitted when zero.
#[derive(Debug, Default, Deserialize)]
pub struct Totals {
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

/// Route segment between two waypoints.
#[derive(Debug, Deserialize)]
pub struct Segment {
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    /// Manoeuvres along the segment.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One manoeuvre.
#[derive(Debug, Deserialize)]
pub struct Step {
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    /// Turn instruction.
    pub instruction: Option<String>,
    /// Street name; the service uses `"-"` for unnamed ways.
    pub name: Option<String>,
    /// Inclusive vertex range in the route geometry.
    pub way_points: [usize; 2],
}

impl DirectionsResponse {
    /// Convert into a [`Route`] with `expected_legs` legs.
    pub fn into_route(self, expected_legs: usize) -> Result<Route, ProviderError> {
        let feature = self
            .features
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ParseError {
                message: "directions response contains no route".to_owned(),
            })?;

        let RouteFeature {
            geometry,
            properties,
        } = feature;

        if properties.segments.len() != expected_legs {
            return Err(ProviderError::DimensionMismatch {
                expected: expected_legs,
                actual: properties.segments.len(),
            });
        }

        Ok(Route {
            geometry: geometry
                .coordinates
                .into_iter()
                .map(Coordinate::from_lon_lat)
                .collect(),
            summary: RouteSummary {
                distance: properties.summary.distance,
                duration: properties.summary.duration,
            },
            legs: properties.segments.into_iter().map(Segment::into_leg).collect(),
        })
    }
}

impl Segment {
    fn into_leg(self) -> RouteLeg {
        RouteLeg {
            distance: self.distance,
            duration: self.duration,
            steps: self.steps.into_iter().map(Step::into_route_step).collect(),
        }
    }
}

impl Step {
    fn into_route_step(self) -> RouteStep {
        RouteStep {
            distance: self.distance,
            duration: self.duration,
            instruction: self.instruction,
            name: self.name.filter(|name| name != "-"),
            way_points: self.way_points,
        }
    }
}

/// Reverse-geocode response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Matching features, nearest first.
    #[serde(default)]
    pub features: Vec<PlaceFeature>,
}

/// A geocoded place as a GeoJSON feature.
#[derive(Debug, Deserialize)]
pub struct PlaceFeature {
    /// Point geometry.
    pub geometry: PointGeometry,
    /// Naming properties.
    #[serde(default)]
    pub properties: PlaceProperties,
}

/// GeoJSON `Point` geometry.
#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// `[lon, lat]`.
    pub coordinates: [f64; 2],
}

/// Naming properties of a geocoded place.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceProperties {
    /// Neighbourhood name.
    pub neighbourhood: Option<String>,
    /// Feature name.
    pub name: Option<String>,
    /// Formatted label.
    pub label: Option<String>,
}

impl GeocodeResponse {
    /// Convert features into candidates, preserving order.
    pub fn into_candidates(self) -> Vec<PlaceCandidate> {
        self.features
            .into_iter()
            .map(|feature| PlaceCandidate {
                location: Coordinate::from_lon_lat(feature.geometry.coordinates),
                neighbourhood: feature.properties.neighbourhood,
                name: feature.properties.name,
                label: feature.properties.label,
            })
            .collect()
    }
}

/// Error body returned with non-success statuses.
///
/// Routing endpoints send `{"error": {"code": 2010, "message": "..."}}`;
/// the geocoder sometimes sends `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Error detail.
    pub error: ErrorDetail,
}

/// Structured or plain error detail.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Numeric or string code with a message.
    Structured {
        /// Service error code.
        code: Option<serde_json::Value>,
        /// Human-readable message.
        message: Option<String>,
    },
    /// Bare message.
    Text(String),
}

impl ErrorBody {
    /// Map the body to [`ProviderError::ServiceError`].
    ///
    /// Returns `None` when `body` is not a recognised error document.
    pub fn parse_service_error(body: &str) -> Option<ProviderError> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        let (code, message) = match parsed.error {
            ErrorDetail::Structured { code, message } => (
                code.map_or_else(String::new, |value| match value {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                }),
                message.unwrap_or_default(),
            ),
            ErrorDetail::Text(message) => (String::new(), message),
        };
        Some(ProviderError::ServiceError { code, message })
    }
}
