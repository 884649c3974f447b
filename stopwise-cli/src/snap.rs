//! Snap command implementation for the Stopwise CLI.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use stopwise_core::{Coordinate, ReverseGeocoder, RoadSnapper, SnappedPoint};
use stopwise_data::routing::HttpRoutingProviderConfig;

use crate::service::{ServiceOptions, build_provider, require_finite};
use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_LAT, ARG_LON, ARG_PROFILE, ARG_TIMEOUT_SECS, CliError,
    ENV_SNAP_LAT, ENV_SNAP_LON, write_json,
};

/// CLI arguments for the `snap` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Move a point onto the nearest street using the routing \
                 service's reverse geocoder, and print the snapped location \
                 with a display name as JSON.",
    about = "Snap a point to the nearest street"
)]
#[ortho_config(prefix = "STOPWISE")]
pub(crate) struct SnapArgs {
    /// Latitude of the point in decimal degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the point in decimal degrees.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Base URL of the routing service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// API key sent in the `Authorization` header.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Routing profile, e.g. "driving-car".
    #[arg(long = ARG_PROFILE, value_name = "name")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SnapArgs {
    pub(crate) fn into_config(self) -> Result<SnapConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SnapConfig::try_from(merged)
    }
}

/// Resolved `snap` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SnapConfig {
    /// Point to snap.
    pub(crate) point: Coordinate,
    /// Routing service settings.
    pub(crate) routing: HttpRoutingProviderConfig,
}

impl TryFrom<SnapArgs> for SnapConfig {
    type Error = CliError;

    fn try_from(args: SnapArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_SNAP_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LON,
            env: ENV_SNAP_LON,
        })?;
        let point = require_finite(Coordinate::new(lat, lon))?;
        let routing = ServiceOptions {
            base_url: args.base_url,
            api_key: args.api_key,
            profile: args.profile,
            timeout_secs: args.timeout_secs,
        }
        .into_provider_config();
        Ok(Self { point, routing })
    }
}

/// Builds a reverse geocoder for the current snap invocation.
pub(super) trait GeocoderBuilder {
    fn build(&self, config: &SnapConfig) -> Result<Box<dyn ReverseGeocoder>, CliError>;
}

pub(super) struct DefaultGeocoderBuilder;

impl GeocoderBuilder for DefaultGeocoderBuilder {
    fn build(&self, config: &SnapConfig) -> Result<Box<dyn ReverseGeocoder>, CliError> {
        Ok(Box::new(build_provider(&config.routing)?))
    }
}

pub(super) fn run_snap_with(
    args: SnapArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let snapped = execute_snap(args, builder)?;
    write_json(writer, &snapped)
}

fn execute_snap(args: SnapArgs, builder: &dyn GeocoderBuilder) -> Result<SnappedPoint, CliError> {
    let config = args.into_config()?;
    let snapper = RoadSnapper::new(builder.build(&config)?);
    snapper
        .snap_to_road(config.point)
        .map_err(|source| CliError::Snap { source })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SnapConfig, CliError> {
    let merged = SnapArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SnapConfig::try_from(merged)
}
