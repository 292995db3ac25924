use http::HeaderValue;
use secrecy::ExposeSecret;

use super::middleware::{AddAuthorizationLayer, BaseUriLayer, ExtraHeadersLayer};
use crate::{Config, Error, Result};

/// Extensions to [`Config`](crate::Config) for custom [`Client`](crate::Client).
///
/// These are the layers [`ClientBuilder::try_from`](crate::client::ClientBuilder) assembles,
/// exposed for building a custom stack around a TLS capable service.
///
/// This trait is sealed and cannot be implemented.
pub trait ConfigExt: private::Sealed {
    /// Layer to set the base URI of requests to the configured server.
    fn base_uri_layer(&self) -> BaseUriLayer;

    /// Optional layer to set up the `Authorization` header from the configured token.
    fn auth_layer(&self) -> Result<Option<AddAuthorizationLayer>>;

    /// Layer to add the configured extra headers.
    fn extra_headers_layer(&self) -> ExtraHeadersLayer;
}

mod private {
    pub trait Sealed {}
    impl Sealed for crate::Config {}
}

impl ConfigExt for Config {
    fn base_uri_layer(&self) -> BaseUriLayer {
        BaseUriLayer::new(self.cluster_url.clone())
    }

    fn auth_layer(&self) -> Result<Option<AddAuthorizationLayer>> {
        let Some(token) = &self.auth_info.token else {
            return Ok(None);
        };
        let token = token.expose_secret();
        // AddAuthorizationLayer panics on values that are not valid header values
        HeaderValue::try_from(format!("Bearer {token}")).map_err(|e| Error::HttpError(e.into()))?;
        Ok(Some(AddAuthorizationLayer::bearer(token).as_sensitive(true)))
    }

    fn extra_headers_layer(&self) -> ExtraHeadersLayer {
        ExtraHeadersLayer::new(self.headers.clone())
    }
}
