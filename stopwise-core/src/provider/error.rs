use thiserror::Error;

/// Errors raised by routing and geocoding providers.
///
/// Variants carry enough context (URL, status, provider code) for the caller
/// to log a useful message; the engine wraps them in
/// [`OptimizeError`](crate::OptimizeError) or [`SnapError`](crate::SnapError)
/// depending on which step failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Too few coordinates were supplied for the operation.
    #[error("at least {required} coordinates are required, got {actual}")]
    InsufficientCoordinates {
        /// Minimum number of coordinates.
        required: usize,
        /// Number supplied.
        actual: usize,
    },

    /// The endpoint URL could not be built from the configured base URL.
    #[error("invalid endpoint {url}: {message}")]
    InvalidEndpoint {
        /// The URL that failed to parse.
        url: String,
        /// Parser message.
        message: String,
    },

    /// A network error occurred while contacting the service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// The request URL.
        url: String,
        /// Transport error message.
        message: String,
    },

    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// The request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// The request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The service reported an application-level error.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Provider error code.
        code: String,
        /// Provider error message.
        message: String,
    },

    /// The response body could not be decoded or lacked required fields.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder message.
        message: String,
    },

    /// A matrix or route did not match the number of requested coordinates.
    #[error("expected {expected} entries from the routing service, got {actual}")]
    DimensionMismatch {
        /// Expected count.
        expected: usize,
        /// Count received.
        actual: usize,
    },
}
