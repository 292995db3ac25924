//! A crate for kubent's derive macros.
#![deny(unsafe_code)]
#![deny(missing_docs)]
extern crate proc_macro;

mod resource;

/// A custom derive attaching an entity declaration to a struct.
///
/// The struct must have a named `metadata` field of type `ObjectMeta`.
/// The derive implements `kubent::core::Resource`, so the type can be used with `kubent::Api`.
///
/// # Example
///
/// ```rust,ignore
/// use kubent::core::ObjectMeta;
/// use kubent::Resource;
///
/// #[derive(Resource, Clone, Debug, Serialize, Deserialize)]
/// #[resource(group = "demo.kubent.rs", version = "v1", kind = "Widget", namespaced)]
/// struct Widget {
///     metadata: ObjectMeta,
///     spec: WidgetSpec,
/// }
/// ```
///
/// ## Required properties
///
/// ### `#[resource(version = "v1")]`
/// The api version of the resource.
///
/// ## Optional properties
///
/// ### `#[resource(group = "mygroup.tld")]`
/// The api group, omitted for the core group.
///
/// ### `#[resource(kind = "Kind")]`
/// Defaults to the name of the struct.
///
/// ### `#[resource(plural = "kinds")]`
/// Defaults to the lowercased kind with an `s` appended.
///
/// ### `#[resource(namespaced)]` / `#[resource(cluster)]`
/// Scope of the resource, namespaced when unspecified.
///
/// ### `#[resource(crates(kubent_core = "::kubent_core"))]`
/// Path to the core crate, for users not depending on the `kubent` facade.
#[proc_macro_derive(Resource, attributes(resource))]
pub fn derive_resource(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    resource::derive(proc_macro2::TokenStream::from(input)).into()
}
