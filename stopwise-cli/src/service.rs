//! Routing service options shared by every subcommand.

use std::time::Duration;

use stopwise_core::Coordinate;
use stopwise_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};

use crate::CliError;

/// Routing options as they stand after configuration merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ServiceOptions {
    pub(crate) base_url: Option<String>,
    pub(crate) api_key: Option<String>,
    pub(crate) profile: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
}

impl ServiceOptions {
    /// Fill unset options from [`HttpRoutingProviderConfig::default`].
    pub(crate) fn into_provider_config(self) -> HttpRoutingProviderConfig {
        let defaults = HttpRoutingProviderConfig::default();
        HttpRoutingProviderConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            api_key: self.api_key.filter(|key| !key.trim().is_empty()),
            profile: self.profile.unwrap_or(defaults.profile),
            timeout: self
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
            user_agent: defaults.user_agent,
        }
    }
}

/// Build the HTTP provider for `config`.
pub(crate) fn build_provider(
    config: &HttpRoutingProviderConfig,
) -> Result<HttpRoutingProvider, CliError> {
    HttpRoutingProvider::with_config(config.clone()).map_err(|source| {
        CliError::BuildRoutingProvider {
            base_url: config.base_url.clone(),
            source,
        }
    })
}

/// Reject NaN and infinite components.
pub(crate) fn require_finite(point: Coordinate) -> Result<Coordinate, CliError> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(CliError::InvalidCoordinate {
            lat: point.lat,
            lon: point.lon,
        })
    }
}
