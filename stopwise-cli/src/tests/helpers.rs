//! Test helpers for request files and offline engine builders.

use std::cell::RefCell;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use stopwise_core::{
    Coordinate, CostMatrix, Optimizer, PlaceCandidate, ReverseGeocoder, Route, RouteLeg,
    RouteSummary, TourOptimizer,
};
use stopwise_data::routing::test_support::StubRoutingProvider;
use tempfile::TempDir;

use crate::CliError;
use crate::optimize::{OptimizeConfig, OptimizerBuilder};
use crate::snap::{GeocoderBuilder, SnapConfig};

pub(super) const STREET: &str = "Victoria Embankment";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write file");
}

/// A temporary directory addressed by a UTF-8 path.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn sample_stops(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            let offset = f64::from(u32::try_from(i).expect("small index")) * 0.01;
            Coordinate::new(51.5 + offset, -0.1 - offset)
        })
        .collect()
}

/// JSON request body for `count` stops.
pub(super) fn request_json(count: usize) -> String {
    let coordinates: Vec<serde_json::Value> = sample_stops(count)
        .into_iter()
        .map(|point| serde_json::json!({ "lat": point.lat, "lon": point.lon }))
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "coordinates": coordinates }))
        .expect("serialize request")
}

/// Stop 0 is closest to stop 2, which is closest to stop 1.
fn three_stop_matrix() -> CostMatrix {
    CostMatrix::from_dense(vec![
        vec![0.0, 30.0, 10.0],
        vec![30.0, 0.0, 12.0],
        vec![10.0, 12.0, 0.0],
    ])
    .expect("square")
}

fn two_leg_route() -> Route {
    let leg = RouteLeg {
        distance: 500.0,
        duration: 45.0,
        steps: Vec::new(),
    };
    Route {
        geometry: sample_stops(3),
        summary: RouteSummary {
            distance: 1_000.0,
            duration: 90.0,
        },
        legs: vec![leg.clone(), leg],
    }
}

/// Builds a real optimizer over a stub routing service.
#[derive(Debug, Default)]
pub(super) struct StubOptimizerBuilder {
    pub(super) seen: RefCell<Option<OptimizeConfig>>,
}

impl OptimizerBuilder for StubOptimizerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn Optimizer>, CliError> {
        self.seen.replace(Some(config.clone()));
        let routing = StubRoutingProvider::default()
            .with_matrix(three_stop_matrix())
            .with_route(two_leg_route());
        Ok(Box::new(TourOptimizer::with_config(
            routing.clone(),
            routing,
            config.optimizer,
        )))
    }
}

/// Builds a stub geocoder that knows zero or one street.
#[derive(Debug, Default)]
pub(super) struct StubGeocoderBuilder {
    pub(super) knows_street: bool,
}

impl GeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &SnapConfig) -> Result<Box<dyn ReverseGeocoder>, CliError> {
        let candidates = if self.knows_street {
            vec![PlaceCandidate {
                name: Some(STREET.to_owned()),
                ..PlaceCandidate::at(Coordinate::new(51.5081, -0.1195))
            }]
        } else {
            Vec::new()
        };
        Ok(Box::new(
            StubRoutingProvider::default().with_candidates(candidates),
        ))
    }
}
