//! API helpers for structured interaction with a resource API

mod core_methods;
pub mod watch;

pub use kubent_core::{
    metadata::{ListMeta, ObjectMeta, TypeMeta},
    object::EntityList,
    request::Request,
    watch::WatchEvent,
    Expression, Resource, ResourceDescriptor, ResourceExt, Selector,
};
pub use kubent_core::params::{DeleteParams, ListParams, PostParams, PropagationPolicy, WatchParams};
pub use watch::{WatchHandle, WatchHandlers, WatchState, Watcher};

use crate::{Client, Result};

/// The generic Api abstraction
///
/// This pairs a [`Client`] with the resolved [`ResourceDescriptor`] of a type `K`
/// so that we get automatic serialization/deserialization on the api calls.
///
/// The namespace is chosen per call: a non-blank namespace selects the
/// namespaced endpoints, anything else the cluster-wide endpoints.
#[derive(Clone)]
pub struct Api<K> {
    /// The client to use (from this library)
    pub(crate) client: Client,
    descriptor: ResourceDescriptor,
    post_params: PostParams,
    /// Note: Using `iter::Empty` over `PhantomData`, because we never actually keep any
    /// `K` objects, so `Empty` better models our constraints (in particular, `Empty<K>`
    /// is `Send`, even if `K` may not be).
    pub(crate) _phantom: std::iter::Empty<K>,
}

impl<K: Resource> Api<K> {
    /// Create an Api for `K`, resolving its entity declaration.
    ///
    /// Fails with [`Error::Descriptor`](crate::Error::Descriptor) when the declaration is unusable.
    pub fn new(client: Client) -> Result<Self> {
        let descriptor = K::descriptor()?;
        Ok(Self::with_descriptor(client, descriptor))
    }
}

impl<K> Api<K> {
    /// Create an Api from an already resolved descriptor
    pub fn with_descriptor(client: Client, descriptor: ResourceDescriptor) -> Self {
        Self {
            client,
            descriptor,
            post_params: PostParams::default(),
            _phantom: std::iter::empty(),
        }
    }

    /// Use these parameters for every create and update call
    #[must_use]
    pub fn with_post_params(mut self, pp: PostParams) -> Self {
        self.post_params = pp;
        self
    }

    /// The resolved wire identity of `K`
    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// Return the collection path used for a namespace
    pub fn resource_url(&self, namespace: Option<&str>) -> String {
        self.descriptor.url_path(namespace)
    }

    /// Consume self and return the [`Client`]
    pub fn into_client(self) -> Client {
        self.into()
    }

    pub(crate) fn request(&self, namespace: Option<&str>) -> Request {
        Request::new(self.descriptor.url_path(namespace))
    }
}

impl<K> From<Api<K>> for Client {
    fn from(api: Api<K>) -> Self {
        api.client
    }
}

impl Client {
    /// Create an [`Api`] for a resource type
    pub fn api<K: Resource>(&self) -> Result<Api<K>> {
        Api::new(self.clone())
    }
}
