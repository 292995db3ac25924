//! A basic API client for interacting with a Kubernetes-style API
//!
//! The [`Client`] uses standard kubent error handling.
//!
//! This client can be used on its own or in conjunction with the [`Api`][crate::api::Api]
//! type for more structured interaction with typed resources.
use futures::{Stream, StreamExt, TryStreamExt};
use http::{Request, Response, StatusCode};
use kubent_core::{version, ErrorResponse, WatchEvent};
use serde::de::DeserializeOwned;
use tokio_util::{
    codec::{FramedRead, LinesCodec, LinesCodecError},
    io::StreamReader,
};
use tower::{buffer::Buffer, util::BoxService, BoxError, Layer, Service, ServiceExt};
use tower_http::map_response_body::MapResponseBodyLayer;

use crate::{namespace::NamespaceResolver, Config, Error, Result};

mod body;
mod builder;
mod config_ext;
pub mod middleware;

pub use body::{Body, BodyDataStream};
pub use builder::{ClientBuilder, DynBody, GenericService};
pub use config_ext::ConfigExt;

/// Client for connecting with a Kubernetes-style API server.
///
/// Instantiate it from an explicit [`Config`] using [`Client::try_from`],
/// or around any tower service with [`Client::new`].
#[derive(Clone)]
pub struct Client {
    // - `Buffer` for cheap clone
    // - `BoxService` for dynamic response future type
    inner: Buffer<Request<Body>, <BoxService<Request<Body>, Response<Body>, BoxError> as Service<Request<Body>>>::Future>,
    default_ns: Option<String>,
}

impl Client {
    /// Create a [`Client`] using a custom `Service` stack.
    ///
    /// [`ConfigExt`](crate::client::ConfigExt) provides extensions for
    /// building a custom stack.
    ///
    /// To create with the default stack with a [`Config`], use
    /// [`Client::try_from`].
    ///
    /// ```rust
    /// # async fn doc() -> Result<(), Box<dyn std::error::Error>> {
    /// use kubent_client::{client::{Body, ConfigExt}, Client, Config};
    /// use tower::{BoxError, ServiceBuilder};
    /// use hyper_util::rt::TokioExecutor;
    ///
    /// let config = Config::from_url("http://127.0.0.1:8001")?;
    /// let service = ServiceBuilder::new()
    ///     .layer(config.base_uri_layer())
    ///     .option_layer(config.auth_layer()?)
    ///     .map_err(BoxError::from)
    ///     .service(hyper_util::client::legacy::Client::builder(TokioExecutor::new()).build_http::<Body>());
    /// let client = Client::new(service, "default");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<S, B, T>(service: S, default_namespace: T) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = bytes::Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
        T: Into<String>,
    {
        Self::from_parts(service, Some(default_namespace.into()))
    }

    pub(crate) fn from_parts<S, B>(service: S, default_ns: Option<String>) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = bytes::Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        // Transform response body to `crate::client::Body` and use type erased error to avoid type parameters.
        let service = MapResponseBodyLayer::new(Body::wrap_body)
            .layer(service)
            .map_err(|e| e.into());
        Self {
            inner: Buffer::new(BoxService::new(service), 1024),
            default_ns,
        }
    }

    /// The namespace configured on this client, if any
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_ns.as_deref()
    }

    /// The namespace this process should act in.
    ///
    /// Later sources override earlier ones:
    /// `"default"`, the client's configured namespace, the `POD_NAMESPACE` environment variable,
    /// and the mounted service account namespace file. Never fails.
    pub fn current_namespace(&self) -> String {
        NamespaceResolver::default().resolve(self.default_namespace())
    }

    /// Like [`Client::current_namespace`], reading a different environment variable
    pub fn current_namespace_from(&self, env_var: &str) -> String {
        NamespaceResolver::default()
            .env_var(env_var)
            .resolve(self.default_namespace())
    }

    /// Perform a raw HTTP request against the API and return the raw response back.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        let mut svc = self.inner.clone();
        let res = svc
            .ready()
            .await
            .map_err(Error::Service)?
            .call(request)
            .await
            .map_err(|err| {
                // Error decorating request
                err.downcast::<Error>()
                    .map(|e| *e)
                    // Error requesting
                    .or_else(|err| err.downcast::<hyper::Error>().map(|err| Error::HyperError(*err)))
                    // Error from another middleware
                    .unwrap_or_else(Error::Service)
            })?;
        Ok(res)
    }

    /// Perform a raw HTTP request against the API and deserialize the response
    /// as JSON to some known type.
    pub async fn request<T>(&self, request: Request<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.request_text(request).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("{}, {:?}", text, e);
            Error::SerdeError(e)
        })
    }

    /// Perform a raw HTTP request against the API and get back the response
    /// as a string
    pub async fn request_text(&self, request: Request<Vec<u8>>) -> Result<String> {
        tracing::trace!(method = %request.method(), uri = %request.uri(), "dispatching");
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        let body_bytes = res.into_body().collect_bytes().await?;
        let text = String::from_utf8(body_bytes.to_vec()).map_err(Error::FromUtf8)?;
        handle_api_errors(&text, status)?;

        Ok(text)
    }

    /// Perform a raw request and get back a stream of [`WatchEvent`] objects
    ///
    /// A line that fails to decode yields `Err(Error::SerdeError)` and the stream carries on.
    /// Reading failures of the underlying connection yield `Err(Error::ReadEvents)`.
    pub async fn request_events<T>(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<impl Stream<Item = Result<WatchEvent<T>>>>
    where
        T: Clone + DeserializeOwned,
    {
        tracing::trace!(uri = %request.uri(), "opening watch");
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            let body_bytes = res.into_body().collect_bytes().await?;
            let text = String::from_utf8(body_bytes.to_vec()).map_err(Error::FromUtf8)?;
            return Err(api_error(&text, status));
        }
        tracing::trace!("headers: {:?}", res.headers());

        let frames = FramedRead::new(
            StreamReader::new(res.into_body().into_data_stream().map_err(std::io::Error::other)),
            LinesCodec::new(),
        );

        Ok(frames.filter_map(|res| async {
            match res {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => match serde_json::from_str::<WatchEvent<T>>(&line) {
                    Ok(event) => Some(Ok(event)),
                    Err(e) => {
                        // Ignore EOF error that can happen for incomplete line from `decode_eof`.
                        if e.is_eof() {
                            return None;
                        }

                        // Got general error response
                        if let Ok(e_resp) = serde_json::from_str::<ErrorResponse>(&line) {
                            return Some(Err(Error::Api(e_resp)));
                        }
                        tracing::warn!("undecodable watch event {}: {}", line, e);
                        Some(Err(Error::SerdeError(e)))
                    }
                },

                // A body cut off mid-chunk or a client read timeout is a broken connection,
                // not a clean end of stream.
                Err(LinesCodecError::Io(e)) => {
                    tracing::warn!("watch stream broke: {}", e);
                    Some(Err(Error::ReadEvents(e)))
                }

                // Reached the maximum line length without finding a newline.
                // This should never happen because we're using the default `usize::MAX`.
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    Some(Err(Error::LinesCodecMaxLineLengthExceeded))
                }
            }
        }))
    }

    /// Returns apiserver version.
    pub async fn apiserver_version(&self) -> Result<version::Info> {
        self.request(
            Request::builder()
                .uri("/version")
                .body(vec![])
                .map_err(Error::HttpError)?,
        )
        .await
    }
}

/// Kubernetes returned error handling
///
/// Either the server returned an explicit status envelope,
/// or it somehow returned something we couldn't parse as one.
fn handle_api_errors(text: &str, s: StatusCode) -> Result<()> {
    if s.is_client_error() || s.is_server_error() {
        Err(api_error(text, s))
    } else {
        Ok(())
    }
}

/// `409` becomes [`Error::Conflict`], everything else [`Error::Api`]
fn api_error(text: &str, s: StatusCode) -> Error {
    let errdata = if let Ok(errdata) = serde_json::from_str::<ErrorResponse>(text) {
        tracing::debug!("Unsuccessful: {errdata:?}");
        errdata
    } else {
        tracing::warn!("Unsuccessful data error parse: {}", text);
        let ae = ErrorResponse {
            status: s.to_string(),
            code: s.as_u16(),
            message: format!("{text:?}"),
            reason: "Failed to parse error data".into(),
            details: None,
        };
        tracing::debug!("Unsuccessful: {ae:?} (reconstruct)");
        ae
    };
    if s == StatusCode::CONFLICT {
        Error::Conflict(errdata)
    } else {
        Error::Api(errdata)
    }
}

impl TryFrom<Config> for Client {
    type Error = Error;

    /// Builds a default [`Client`] from a [`Config`], see [`ClientBuilder`] if more customization is required
    fn try_from(config: Config) -> Result<Self> {
        Ok(ClientBuilder::try_from(config)?.build())
    }
}
