use std::fmt::Debug;

use futures::{future, Stream};
use serde::{de::DeserializeOwned, Serialize};

use crate::{api::Api, Error, Result};
use kubent_core::{object::EntityList, params::*, Resource, WatchEvent};

/// PUT/POST/GET abstractions
impl<K> Api<K>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    /// Get a named resource, returning [`None`] if it does not exist
    ///
    /// ```no_run
    /// # use kubent_client::Api;
    /// # use kubent_core::{ObjectMeta, Resource};
    /// # #[derive(Clone, Debug, serde::Deserialize, kubent_derive::Resource)]
    /// # #[resource(version = "v1", crates(kubent_core = "::kubent_core"))]
    /// # struct Widget { metadata: ObjectMeta }
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: kubent_client::Client = todo!();
    /// let widgets: Api<Widget> = Api::new(client)?;
    /// if let Some(w) = widgets.get("blog", Some("apps")).await? {
    ///     println!("found {w:?}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// Only `404 Not Found` becomes [`None`], every other failure is returned.
    pub async fn get(&self, name: &str, namespace: Option<&str>) -> Result<Option<K>> {
        let req = self.request(namespace).get(name)?;
        match self.client.request::<K>(req).await {
            Ok(obj) => Ok(Some(obj)),
            Err(err) if err.is_not_found() => {
                tracing::debug!(name, kind = %self.descriptor().kind, "not found");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// List the resources in a namespace, or across the cluster
    ///
    /// Only the items are returned, see [`Api::list_page`] for the list metadata.
    pub async fn list(&self, namespace: Option<&str>, lp: &ListParams) -> Result<Vec<K>> {
        Ok(self.list_page(namespace, lp).await?.items)
    }

    /// Get a page of resources along with the continue token and list version
    ///
    /// ```no_run
    /// # use kubent_client::{api::ListParams, Api};
    /// # use kubent_core::{ObjectMeta, Resource};
    /// # #[derive(Clone, Debug, serde::Deserialize, kubent_derive::Resource)]
    /// # #[resource(version = "v1", crates(kubent_core = "::kubent_core"))]
    /// # struct Widget { metadata: ObjectMeta }
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: kubent_client::Client = todo!();
    /// let widgets: Api<Widget> = Api::new(client)?;
    /// let mut lp = ListParams::default().limit(50);
    /// loop {
    ///     let page = widgets.list_page(None, &lp).await?;
    ///     for w in page.iter() {
    ///         println!("{w:?}");
    ///     }
    ///     match page.continue_token() {
    ///         Some(token) => lp = lp.continue_token(token),
    ///         None => break,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_page(&self, namespace: Option<&str>, lp: &ListParams) -> Result<EntityList<K>> {
        let req = self.request(namespace).list(lp)?;
        self.client.request::<EntityList<K>>(req).await
    }

    /// Watch the resources in a namespace, or across the cluster
    ///
    /// Returns the raw event stream. Lines that cannot be decoded surface as
    /// `Err(Error::SerdeError)` and the stream carries on.
    /// See [`Api::watch`](Api::watch) for the callback driven variant.
    pub async fn watch_events(
        &self,
        namespace: Option<&str>,
        wp: &WatchParams,
    ) -> Result<impl Stream<Item = Result<WatchEvent<K>>>> {
        let req = self.request(namespace).watch(wp)?;
        self.client.request_events::<K>(req).await
    }
}

/// Writes
impl<K> Api<K>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    /// Create a resource
    ///
    /// The object is submitted as-is to the endpoint family picked by its namespace.
    /// The server response carries the assigned `uid` and `resourceVersion`.
    pub async fn create(&self, data: &K) -> Result<K> {
        let meta = data.meta();
        let bytes = serde_json::to_vec(data).map_err(Error::SerdeError)?;
        let req = self
            .request(meta.namespace.as_deref())
            .create(&self.post_params, bytes)?;
        self.client.request::<K>(req).await
    }

    /// Replace a resource entirely with a new one
    ///
    /// The `resourceVersion` on `data` must match the server's current version,
    /// otherwise this fails with [`Error::Conflict`]. Nothing is retried.
    pub async fn update(&self, data: &K) -> Result<K> {
        let meta = data.meta();
        let name = meta.name.as_deref().unwrap_or_default();
        let bytes = serde_json::to_vec(data).map_err(Error::SerdeError)?;
        let req = self
            .request(meta.namespace.as_deref())
            .replace(name, &self.post_params, bytes)?;
        self.client.request::<K>(req).await
    }

    /// Create the resource if it is absent, otherwise update it
    ///
    /// When the object exists its `uid` and `resourceVersion` are copied onto `data`
    /// before the update, overwriting whatever version the caller held.
    /// A concurrent writer between the lookup and the update produces [`Error::Conflict`].
    pub async fn save(&self, data: &mut K) -> Result<K> {
        let name = data.meta().name.clone().unwrap_or_default();
        let namespace = data.meta().namespace.clone();
        match self.get(&name, namespace.as_deref()).await? {
            None => self.create(data).await,
            Some(current) => {
                let meta = data.meta_mut();
                meta.uid.clone_from(&current.meta().uid);
                meta.resource_version.clone_from(&current.meta().resource_version);
                self.update(data).await
            }
        }
    }

    /// Replace the status subresource
    ///
    /// On success only the `resourceVersion` of `data` is refreshed.
    pub async fn update_status(&self, data: &mut K) -> Result<()> {
        let meta = data.meta();
        let name = meta.name.as_deref().unwrap_or_default();
        let bytes = serde_json::to_vec(&*data).map_err(Error::SerdeError)?;
        let req = self
            .request(meta.namespace.as_deref())
            .replace_status(name, &self.post_params, bytes)?;
        let updated = self.client.request::<K>(req).await?;
        data.meta_mut().resource_version = updated.meta().resource_version.clone();
        Ok(())
    }
}

/// Deletes
impl<K> Api<K>
where
    K: Resource,
{
    /// Delete a resource
    ///
    /// Deleting an object that is already gone succeeds.
    pub async fn delete(&self, data: &K) -> Result<()> {
        let meta = data.meta();
        let name = meta.name.as_deref().unwrap_or_default();
        self.delete_named(name, meta.namespace.as_deref()).await
    }

    /// Delete a resource by name
    pub async fn delete_named(&self, name: &str, namespace: Option<&str>) -> Result<()> {
        self.delete_opts(name, namespace, &DeleteParams::default()).await
    }

    /// Delete a resource by name with explicit [`DeleteParams`]
    pub async fn delete_opts(&self, name: &str, namespace: Option<&str>, dp: &DeleteParams) -> Result<()> {
        let req = self.request(namespace).delete(name, dp)?;
        match self.client.request_text(req).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => {
                tracing::debug!(name, kind = %self.descriptor().kind, "already deleted");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Delete several resources concurrently
    ///
    /// Every delete runs to completion regardless of the others.
    /// The outcomes are returned in the order of `items`.
    pub async fn delete_all<'a, I>(&self, items: I) -> Vec<Result<()>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        future::join_all(items.into_iter().map(|item| self.delete(item))).await
    }
}
