//! Optimize command implementation for the Stopwise CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use stopwise_core::{
    Coordinate, CostMetric, OptimizationResult, Optimizer, OptimizerConfig, TourOptimizer,
};
use stopwise_data::routing::HttpRoutingProviderConfig;

use crate::fs::{file_is_file, open_utf8_file};
use crate::service::{ServiceOptions, build_provider, require_finite};
use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_METRIC, ARG_PROFILE, ARG_REQUEST, ARG_TIMEOUT_SECS, CliError,
    ENV_OPTIMIZE_REQUEST, write_json,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the stops in a JSON request file into a short trip. \
                 The request lists coordinates as {\"lat\": .., \"lon\": ..} \
                 objects; the first coordinate is where the trip starts. \
                 Prints the visiting order, road geometry and diagnostics \
                 as JSON.",
    about = "Optimize the visiting order of a set of stops"
)]
#[ortho_config(prefix = "STOPWISE")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing the stops to visit.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
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
    /// Cost to minimise: "duration" or "distance".
    #[arg(long = ARG_METRIC, value_name = "metric")]
    #[serde(default)]
    pub(crate) metric: Option<String>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Routing service settings.
    pub(crate) routing: HttpRoutingProviderConfig,
    /// Optimizer settings.
    pub(crate) optimizer: OptimizerConfig,
}

impl OptimizeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_OPTIMIZE_REQUEST,
        })?;
        let metric = args
            .metric
            .as_deref()
            .map(str::parse::<CostMetric>)
            .transpose()?
            .unwrap_or_default();
        let routing = ServiceOptions {
            base_url: args.base_url,
            api_key: args.api_key,
            profile: args.profile,
            timeout_secs: args.timeout_secs,
        }
        .into_provider_config();
        Ok(Self {
            request_path,
            routing,
            optimizer: OptimizerConfig::default().with_metric(metric),
        })
    }
}

/// Stops to optimize, as read from the request file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OptimizeRequest {
    /// Stops in input order; index 0 starts the trip.
    pub(crate) coordinates: Vec<Coordinate>,
}

/// Builds an optimizer for the current optimize invocation.
pub(super) trait OptimizerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn Optimizer>, CliError>;
}

pub(super) struct DefaultOptimizerBuilder;

impl OptimizerBuilder for DefaultOptimizerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn Optimizer>, CliError> {
        let provider = Arc::new(build_provider(&config.routing)?);
        Ok(Box::new(TourOptimizer::with_config(
            Arc::clone(&provider),
            provider,
            config.optimizer,
        )))
    }
}

pub(super) fn run_optimize_with(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let result = execute_optimize(args, builder)?;
    write_json(writer, &result)
}

fn execute_optimize(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
) -> Result<OptimizationResult, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_optimize_request(&config.request_path)?;
    for point in &request.coordinates {
        require_finite(*point)?;
    }
    log::debug!(
        "optimizing {} stops by {}",
        request.coordinates.len(),
        config.optimizer.metric
    );
    let optimizer = builder.build(&config)?;
    optimizer
        .optimize(&request.coordinates)
        .map_err(|source| CliError::Optimize { source })
}

/// Loads a JSON-encoded [`OptimizeRequest`] from disk.
pub(super) fn load_optimize_request(path: &Utf8Path) -> Result<OptimizeRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
