//! Shared harness running a mock routing service beside a blocking provider.

use std::time::Duration;

use stopwise_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

/// API key the harness configures on every provider.
pub const API_KEY: &str = "test-key";

/// A mock service driven by its own multi-threaded runtime.
///
/// The provider under test blocks the calling thread, so the server must
/// make progress on other threads.
pub struct MockService {
    // Declared first so the server shuts down before its runtime.
    server: MockServer,
    runtime: Runtime,
}

impl MockService {
    /// Start an empty mock service.
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("test runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    /// Register a mock response.
    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Requests received so far.
    pub fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// Provider configuration pointing at this service.
    pub fn config(&self) -> HttpRoutingProviderConfig {
        HttpRoutingProviderConfig::new(self.server.uri())
            .with_api_key(API_KEY)
            .with_timeout(Duration::from_secs(2))
    }

    /// Provider pointing at this service.
    pub fn provider(&self) -> HttpRoutingProvider {
        HttpRoutingProvider::with_config(self.config()).expect("provider should build")
    }

    /// Run `f` from inside the service's multi-threaded runtime.
    pub fn inside_runtime<T>(&self, f: impl FnOnce() -> T) -> T {
        self.runtime.block_on(async { f() })
    }
}
