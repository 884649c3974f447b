//! Focused unit tests covering snap CLI configuration and output.

use super::helpers::{STREET, StubGeocoderBuilder};
use super::*;
use crate::snap::{SnapConfig, config_from_layers_for_test};
use rstest::rstest;
use stopwise_core::{Coordinate, SnapError};

fn args_at(lat: f64, lon: f64) -> SnapArgs {
    SnapArgs {
        lat: Some(lat),
        lon: Some(lon),
        ..SnapArgs::default()
    }
}

#[rstest]
#[case::no_latitude(None, Some(-0.12), ARG_LAT, ENV_SNAP_LAT)]
#[case::no_longitude(Some(51.5), None, ARG_LON, ENV_SNAP_LON)]
fn converting_without_point_errors(
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = SnapArgs {
        lat,
        lon,
        ..SnapArgs::default()
    };
    let err = SnapConfig::try_from(args).expect_err("missing component should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(f64::NAN, -0.12)]
#[case(51.5, f64::INFINITY)]
fn non_finite_point_is_rejected(#[case] lat: f64, #[case] lon: f64) {
    let err = SnapConfig::try_from(args_at(lat, lon)).expect_err("non-finite point");
    assert!(
        matches!(err, CliError::InvalidCoordinate { .. }),
        "found {err:?}"
    );
}

#[rstest]
fn negative_coordinates_parse_from_flags() {
    let cli = Cli::try_parse_from(["stopwise", "snap", "--lat", "-33.86", "--lon", "-70.65"])
        .expect("negative numbers are values");
    match cli.command {
        Command::Snap(args) => {
            assert_eq!(args.lat, Some(-33.86));
            assert_eq!(args.lon, Some(-70.65));
        }
        Command::Optimize(_) => panic!("expected snap command"),
    }
}

#[rstest]
fn merge_layers_takes_point_from_environment_and_cli() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "lat": 1.0, "timeout_secs": 5 }), None);
    composer.push_environment(json!({ "lat": 51.5 }));
    composer.push_cli(json!({ "lon": -0.12 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.point, Coordinate::new(51.5, -0.12));
    assert_eq!(config.routing.timeout.as_secs(), 5);
}

#[rstest]
fn run_snap_prints_the_snapped_point() {
    let builder = StubGeocoderBuilder { knows_street: true };
    let mut stdout = Vec::new();

    run_snap_with(args_at(51.508, -0.12), &builder, &mut stdout).expect("snap should succeed");

    let output: serde_json::Value = serde_json::from_slice(&stdout).expect("JSON output");
    assert_eq!(output["name"], STREET);
    assert_eq!(output["location"]["lat"], 51.5081);
    assert_eq!(output["location"]["lon"], -0.1195);
}

#[rstest]
fn run_snap_reports_no_street() {
    let builder = StubGeocoderBuilder::default();

    let err = run_snap_with(args_at(51.508, -0.12), &builder, &mut Vec::new())
        .expect_err("no street nearby");

    match err {
        CliError::Snap { source } => assert_eq!(
            source,
            SnapError::NoSnapMatch {
                point: Coordinate::new(51.508, -0.12)
            }
        ),
        other => panic!("expected Snap, found {other:?}"),
    }
}
