//! Crate with types and traits necessary for interacting with a Kubernetes-style API
//!
//! This crate is available as a minimal alternative to `kubent` where a client is not available.
//! The same information here is always re-exported from `kubent` under `kubent::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod codec;

pub mod descriptor;
pub use descriptor::{EntityAttributes, EntityScope, ResourceDescriptor};

pub mod labels;
pub use labels::{Expression, Selector};

pub mod metadata;
pub use metadata::{ListMeta, ObjectMeta, OwnerReference, TypeMeta};

pub mod object;
pub use object::EntityList;

pub mod params;

pub mod request;
pub use request::Request;

mod resource;
pub use resource::{Resource, ResourceExt};

pub mod version;

pub mod watch;
pub use watch::{WatchEvent, WatchEventType};

mod error;
pub use error::{ErrorResponse, StatusCause, StatusDetails};
