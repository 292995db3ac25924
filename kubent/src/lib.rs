//! Typed client for Kubernetes-style resource APIs
//!
//! This crate re-exports the pieces of the kubent workspace:
//!
//! - [`core`] for the client-less types: resource declarations, metadata, selectors, watch events
//! - [`Client`] and [`Config`] for talking to an api server
//! - [`Api`] for typed create/read/update/delete and watch calls
//! - `#[derive(Resource)]` for attaching an entity declaration to a struct
//!
//! # Example
//!
//! ```rust,no_run
//! use kubent::{
//!     api::{ListParams, WatchHandlers, WatchParams},
//!     core::{ObjectMeta, WatchEvent},
//!     Api, Client, Config, Resource, ResourceExt,
//! };
//! use serde::{Deserialize, Serialize};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
//! #[resource(group = "demo.kubent.rs", version = "v1")]
//! struct Widget {
//!     metadata: ObjectMeta,
//!     size: u32,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::try_from(Config::from_url("http://127.0.0.1:8001")?)?;
//!     let widgets: Api<Widget> = Api::new(client)?;
//!
//!     let mut widget = Widget {
//!         metadata: ObjectMeta {
//!             name: Some("blue".into()),
//!             namespace: Some("apps".into()),
//!             ..ObjectMeta::default()
//!         },
//!         size: 3,
//!     };
//!     widgets.save(&mut widget).await?;
//!
//!     for w in widgets.list(Some("apps"), &ListParams::default().labels("app=demo")).await? {
//!         println!("found widget {}", w.name_any());
//!     }
//!
//!     let handlers = WatchHandlers::new(|event: WatchEvent<Widget>| println!("{event:?}"));
//!     let handle = widgets.watch(Some("apps"), &WatchParams::default().timeout(30), handlers, CancellationToken::new());
//!     handle.join().await?;
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

macro_rules! cfg_client {
    ($($item:item)*) => {
        $(
            #[cfg_attr(docsrs, doc(cfg(feature = "client")))]
            #[cfg(feature = "client")]
            $item
        )*
    }
}

cfg_client! {
    pub use kubent_client::api;
    pub use kubent_client::client;
    pub use kubent_client::config;
    pub use kubent_client::error;
    pub use kubent_client::namespace;

    #[doc(inline)]
    pub use api::Api;
    #[doc(inline)]
    pub use client::Client;
    #[doc(inline)]
    pub use config::Config;
    #[doc(inline)]
    pub use error::Error;
    /// Convient alias for `Result<T, Error>`
    pub type Result<T, E = Error> = std::result::Result<T, E>;
}

/// Re-exports from [`kubent-derive`](kubent_derive)
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use kubent_derive::Resource;

pub use crate::core::{Resource, ResourceExt};
/// Re-exports from [`kubent_core`](kubent_core)
#[doc(inline)]
pub use kubent_core as core;

#[cfg(all(test, feature = "client", feature = "derive"))]
mod mock_tests;
