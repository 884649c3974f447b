//! HTTP routing provider for OpenRouteService-compatible services.
//!
//! [`HttpRoutingProvider`] implements the synchronous provider traits from
//! `stopwise-core` by blocking on async `reqwest` calls internally. One
//! provider answers matrix, directions and reverse-geocode requests against
//! the same base URL and credentials.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use stopwise_core::{Coordinate, CostMetric, MatrixProvider};
//! use stopwise_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
//!
//! let config = HttpRoutingProviderConfig::new("http://localhost:8080/ors")
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(5));
//! let provider = HttpRoutingProvider::with_config(config)?;
//! let stops = [Coordinate::new(51.5, -0.1), Coordinate::new(51.6, -0.2)];
//! let matrix = provider.cost_matrix(&stops, CostMetric::Duration)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stopwise_core::{
    Coordinate, CostMatrix, CostMetric, DirectionsProvider, FeatureLayer, MatrixProvider,
    PlaceCandidate, ProviderError, ReverseGeocoder, Route,
};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::ors::{
    DirectionsRequest, DirectionsResponse, ErrorBody, GeocodeResponse, MatrixRequest,
    MatrixResponse,
};

/// Error type for [`HttpRoutingProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The base URL cannot carry API paths.
    BaseUrl {
        /// The configured base URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BaseUrl { url, message } => write!(f, "invalid base URL {url}: {message}"),
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BaseUrl { .. } => None,
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "stopwise-routing/0.1";

/// Public OpenRouteService endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Routing profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "driving-car";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for [`HttpRoutingProvider`].
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRoutingProviderConfig {
    /// Base URL of the service, e.g. `"https://api.openrouteservice.org"`.
    ///
    /// A path prefix is kept, so self-hosted instances mounted under a
    /// sub-path work.
    pub base_url: String,
    /// Sent verbatim in the `Authorization` header when set.
    pub api_key: Option<String>,
    /// Routing profile path segment, e.g. `"driving-car"`.
    pub profile: String,
    /// Connect and overall request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpRoutingProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoutingProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRoutingProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRoutingProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP routing provider for the matrix, directions and geocode APIs.
///
/// The provider owns a Tokio runtime that is reused across calls and a
/// `reqwest` client whose connection pool is shared by concurrent callers.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the provider blocks on its own runtime. Inside a
/// multi-threaded runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]) it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// Inside a `current_thread` runtime it falls back to its own runtime. This
/// avoids the `block_in_place` panic but may deadlock if the caller's runtime
/// is driving IO or timers the request depends on.
pub struct HttpRoutingProvider {
    client: Client,
    config: HttpRoutingProviderConfig,
    base_url: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRoutingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoutingProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpRoutingProvider {
    /// Create a provider for `base_url` with otherwise default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRoutingProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpRoutingProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            base_url,
            runtime,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HttpRoutingProviderConfig {
        &self.config
    }

    /// Append `segments` to the base URL path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::InvalidEndpoint {
                url: self.config.base_url.clone(),
                message: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn matrix_url(&self) -> Result<Url, ProviderError> {
        self.endpoint(&["v2", "matrix", self.config.profile.as_str()])
    }

    fn directions_url(&self) -> Result<Url, ProviderError> {
        self.endpoint(&["v2", "directions", self.config.profile.as_str(), "geojson"])
    }

    fn reverse_geocode_url(
        &self,
        point: Coordinate,
        layer: FeatureLayer,
    ) -> Result<Url, ProviderError> {
        let mut url = self.endpoint(&["geocode", "reverse"])?;
        url.query_pairs_mut()
            .append_pair("point.lon", &point.lon.to_string())
            .append_pair("point.lat", &point.lat.to_string())
            .append_pair("layers", layer.as_str())
            .append_pair("sources", "osm");
        Ok(url)
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header(header::AUTHORIZATION, key),
            None => request,
        }
    }

    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        log::debug!("POST {url}");
        let request = self.client.post(url.clone()).json(body);
        self.send(request, url.as_str()).await
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, ProviderError> {
        log::debug!("GET {url}");
        let request = self.client.get(url.clone());
        self.send(request, url.as_str()).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<R, ProviderError> {
        let response = self
            .authorise(request)
            .header(header::ACCEPT, "application/json, application/geo+json")
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::debug!("{url} answered {status}: {body}");
            return Err(ErrorBody::parse_service_error(&body).unwrap_or_else(|| {
                ProviderError::HttpError {
                    url: url.to_owned(),
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .map_or_else(|| status.to_string(), str::to_owned),
                }
            }));
        }

        response.json().await.map_err(|err| {
            if err.is_timeout() {
                self.convert_reqwest_error(&err, url)
            } else {
                ProviderError::ParseError {
                    message: err.to_string(),
                }
            }
        })
    }

    /// Convert a reqwest error to a `ProviderError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ProviderError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ProviderError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Run `future` to completion from synchronous code.
    ///
    /// When called from within an existing Tokio runtime, that runtime must
    /// be multi-threaded; see the type-level docs.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ProviderBuildError> {
    let url = Url::parse(base_url).map_err(|err| ProviderBuildError::BaseUrl {
        url: base_url.to_owned(),
        message: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ProviderBuildError::BaseUrl {
            url: base_url.to_owned(),
            message: "URL cannot carry a path".to_owned(),
        });
    }
    Ok(url)
}

fn require_pair(coordinates: &[Coordinate]) -> Result<(), ProviderError> {
    if coordinates.len() < 2 {
        return Err(ProviderError::InsufficientCoordinates {
            required: 2,
            actual: coordinates.len(),
        });
    }
    Ok(())
}

impl MatrixProvider for HttpRoutingProvider {
    fn cost_matrix(
        &self,
        coordinates: &[Coordinate],
        metric: CostMetric,
    ) -> Result<CostMatrix, ProviderError> {
        require_pair(coordinates)?;
        let url = self.matrix_url()?;
        let body = MatrixRequest::new(coordinates, metric);
        let response: MatrixResponse = self.block_on(self.post_json(url, &body))?;
        response.into_cost_matrix(metric, coordinates.len())
    }
}

impl DirectionsProvider for HttpRoutingProvider {
    fn directions(&self, coordinates: &[Coordinate]) -> Result<Route, ProviderError> {
        require_pair(coordinates)?;
        let url = self.directions_url()?;
        let body = DirectionsRequest::new(coordinates);
        let response: DirectionsResponse = self.block_on(self.post_json(url, &body))?;
        response.into_route(coordinates.len() - 1)
    }
}

impl ReverseGeocoder for HttpRoutingProvider {
    fn reverse_geocode(
        &self,
        point: Coordinate,
        layer: FeatureLayer,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let url = self.reverse_geocode_url(point, layer)?;
        let response: GeocodeResponse = self.block_on(self.get_json(url))?;
        Ok(response.into_candidates())
    }
}
