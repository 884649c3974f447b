//! Behaviour-driven step definitions driving the snap CLI scenarios.

use super::helpers::{STREET, StubGeocoderBuilder};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use stopwise_core::SnapError;

#[derive(Debug, Default)]
struct SnapWorld {
    cli_args: RefCell<Vec<String>>,
    knows_street: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

#[fixture]
fn world() -> SnapWorld {
    SnapWorld::default()
}

#[given("the routing service knows a nearby street")]
fn service_knows_street(#[from(world)] world: &SnapWorld) {
    *world.knows_street.borrow_mut() = true;
}

#[given("the routing service knows no streets")]
fn service_knows_nothing(#[from(world)] world: &SnapWorld) {
    *world.knows_street.borrow_mut() = false;
}

#[given("I pass a latitude and longitude")]
fn pass_point(#[from(world)] world: &SnapWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_LAT}"),
        "51.508".to_owned(),
        format!("--{ARG_LON}"),
        "-0.12".to_owned(),
    ]);
}

#[given("I pass only a longitude")]
fn pass_longitude_only(#[from(world)] world: &SnapWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_LON}"), "-0.12".to_owned()]);
}

#[when("I run the snap command")]
fn run_snap_command(#[from(world)] world: &SnapWorld) {
    let mut argv = vec!["stopwise".to_owned(), "snap".to_owned()];
    argv.extend(world.cli_args.borrow().iter().cloned());
    let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Snap(args) => {
            let builder = StubGeocoderBuilder {
                knows_street: *world.knows_street.borrow(),
            };
            let mut buffer = world.stdout.borrow_mut();
            run_snap_with(args, &builder, &mut *buffer)
        }
        Command::Optimize(_) => panic!("expected snap command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command prints the street name")]
fn prints_street_name(#[from(world)] world: &SnapWorld) {
    let borrowed = world.result.borrow();
    borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success");
    let output: serde_json::Value =
        serde_json::from_slice(&world.stdout.borrow()).expect("output should be JSON");
    assert_eq!(output["name"], STREET);
}

#[then("the command fails because no street was found")]
fn fails_no_street(#[from(world)] world: &SnapWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    assert!(
        matches!(
            error,
            CliError::Snap {
                source: SnapError::NoSnapMatch { .. }
            }
        ),
        "expected NoSnapMatch, found {error:?}"
    );
}

#[then("the command fails because the latitude is missing")]
fn fails_missing_latitude(#[from(world)] world: &SnapWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_LAT);
            assert_eq!(*env, ENV_SNAP_LAT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_snap_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/snap_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SnapWorld) {
            let _ = world;
        }
    };
}

register_snap_scenario!(snap_happy_path, "snapping a point to a named street");
register_snap_scenario!(snap_no_street, "reporting that no street is nearby");
register_snap_scenario!(snap_missing_latitude, "rejecting a missing latitude");
