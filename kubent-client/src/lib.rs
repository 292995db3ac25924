//! Typed client for Kubernetes-style resource APIs
//!
//! This crate contains the transport [`Client`], its [`Config`],
//! and the generic [`Api`] for create/read/update/delete and watch calls on
//! types implementing [`Resource`](kubent_core::Resource).
//!
//! # Example
//!
//! ```rust,no_run
//! use kubent_client::{Api, Client, Config};
//! use kubent_core::{params::ListParams, ObjectMeta, Resource, ResourceExt};
//! use kubent_derive::Resource;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Default, Serialize, Deserialize, Resource)]
//! #[resource(version = "v1", kind = "ConfigMap", crates(kubent_core = "::kubent_core"))]
//! struct ConfigMap {
//!     metadata: ObjectMeta,
//!     #[serde(default)]
//!     data: std::collections::BTreeMap<String, String>,
//! }
//!
//! # async fn doc() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_url("http://127.0.0.1:8001")?.default_namespace("apps");
//! let client = Client::try_from(config)?;
//! let configmaps: Api<ConfigMap> = Api::new(client)?;
//!
//! for cm in configmaps.list(Some("apps"), &ListParams::default()).await? {
//!     println!("found {}", cm.name_any());
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod namespace;

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

pub use kubent_core as core;
