//! Error handling in [`kubent`][crate]
use thiserror::Error;

pub use kubent_core::ErrorResponse;

/// Possible errors when working with [`kubent`][crate]
#[derive(Error, Debug)]
pub enum Error {
    /// The resource type carries an unusable entity declaration
    #[error("invalid resource declaration: {0}")]
    Descriptor(#[source] kubent_core::descriptor::Error),

    /// ApiError for when things fail
    ///
    /// This can be parsed into as an error handling fallback.
    /// It's also used in `WatchEvent` from watch calls.
    #[error("ApiError: {0} ({0:?})")]
    Api(#[source] ErrorResponse),

    /// The server rejected a write because the resource version was stale
    ///
    /// Every `409 Conflict` response maps here. Nothing is retried.
    #[error("Conflict: {0}")]
    Conflict(#[source] ErrorResponse),

    /// Hyper error
    #[error("HyperError: {0}")]
    HyperError(#[source] hyper::Error),

    /// Service error
    #[error("ServiceError: {0}")]
    Service(#[source] tower::BoxError),

    /// UTF-8 Error
    #[error("UTF-8 Error: {0}")]
    FromUtf8(#[source] std::string::FromUtf8Error),

    /// Returned when failed to find a newline character within max length.
    /// Only returned by `Client::request_events` and this should never happen as
    /// the max is `usize::MAX`.
    #[error("Error finding newline character")]
    LinesCodecMaxLineLengthExceeded,

    /// Returned on `std::io::Error` when reading event stream.
    #[error("Error reading events stream: {0}")]
    ReadEvents(#[source] std::io::Error),

    /// Http based error
    #[error("HttpError: {0}")]
    HttpError(#[source] http::Error),

    /// Failed to construct a URI.
    #[error("InvalidUri: {0}")]
    InvalidUri(#[source] http::uri::InvalidUri),

    /// Common error case when requesting parsing into own structs
    #[error("Error deserializing response: {0}")]
    SerdeError(#[source] serde_json::Error),

    /// Failed to build request
    #[error("Failed to build request: {0}")]
    BuildRequest(#[source] kubent_core::request::Error),

    /// The default stack only speaks plain http
    #[error("the default client stack cannot connect to {0}: provide a TLS capable service to Client::new")]
    TlsRequired(http::Uri),
}

impl Error {
    /// Whether the server answered `404 Not Found`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(e) if e.code == 404)
    }

    /// Whether the server rejected the call as a version conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }
}

impl From<kubent_core::descriptor::Error> for Error {
    fn from(e: kubent_core::descriptor::Error) -> Self {
        Error::Descriptor(e)
    }
}

impl From<kubent_core::request::Error> for Error {
    fn from(e: kubent_core::request::Error) -> Self {
        Error::BuildRequest(e)
    }
}
