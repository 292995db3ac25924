//! Client configuration.
//!
//! There is no implicit default client; a [`Config`] is always passed explicitly,
//! either to [`Client::try_from`](crate::Client::try_from) or to a [`ClientBuilder`](crate::client::ClientBuilder).
use std::time::Duration;

use http::{HeaderName, HeaderValue};
use secrecy::SecretString;

use crate::{Error, Result};

/// Default timeout for establishing a connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default timeout for reads, above the usual server-side watch limit
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(295);

/// Configuration object detailing things like cluster url, default namespace and credentials.
#[derive(Debug, Clone)]
pub struct Config {
    /// The configured cluster url
    pub cluster_url: http::Uri,
    /// The namespace configured for this client, if any
    ///
    /// This takes part in [`Client::current_namespace`](crate::Client::current_namespace)
    /// resolution but does not pick the endpoint of individual calls.
    pub default_namespace: Option<String>,
    /// Timeout for establishing a connection. `None` means no timeout.
    pub connect_timeout: Option<Duration>,
    /// Timeout for reading from the connection. `None` means no timeout.
    ///
    /// Watch connections are held open by the server, keep this above watch timeouts.
    pub read_timeout: Option<Duration>,
    /// Timeout for writing to the connection. `None` means no timeout.
    pub write_timeout: Option<Duration>,
    /// Stores information to tell the cluster who you are.
    pub auth_info: AuthInfo,
    /// Extra headers sent with every request
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

/// Credentials of the caller
#[derive(Debug, Clone, Default)]
pub struct AuthInfo {
    /// Bearer token sent as `Authorization: Bearer <token>`
    pub token: Option<SecretString>,
}

impl Config {
    /// Construct a new config where only the `cluster_url` is set by the user,
    /// and everything else receives a default value.
    pub fn new(cluster_url: http::Uri) -> Self {
        Self {
            cluster_url,
            default_namespace: None,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            write_timeout: None,
            auth_info: AuthInfo::default(),
            headers: Vec::new(),
        }
    }

    /// Parse the cluster url from a string
    pub fn from_url(url: &str) -> Result<Self> {
        let cluster_url = url.parse::<http::Uri>().map_err(Error::InvalidUri)?;
        Ok(Self::new(cluster_url))
    }

    /// Set the client-level default namespace
    #[must_use]
    pub fn default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth_info.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the read timeout
    #[must_use]
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the connect timeout
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the write timeout
    #[must_use]
    pub fn write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}
