use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    descriptor::{self, EntityAttributes, ResourceDescriptor},
    metadata::ObjectMeta,
};

/// An accessor trait for a typed API resource.
///
/// The entity declaration is associated with the type and resolved into a
/// [`ResourceDescriptor`] before any request is made.
/// Most implementations come from `#[derive(Resource)]`.
pub trait Resource {
    /// Static entity declaration for this type
    const ENTITY: EntityAttributes;

    /// Metadata that all persisted resources must have
    fn meta(&self) -> &ObjectMeta;
    /// Metadata that all persisted resources must have
    fn meta_mut(&mut self) -> &mut ObjectMeta;

    /// Resolve the wire identity of this type
    fn descriptor() -> Result<ResourceDescriptor, descriptor::Error>
    where
        Self: Sized,
    {
        ResourceDescriptor::from_attributes(&Self::ENTITY)
    }
}

/// Helper methods for resources.
pub trait ResourceExt: Resource {
    /// Returns the most useful name identifier available
    ///
    /// This tries `name`, then `generateName`, and falls back on an empty string when neither is set.
    fn name_any(&self) -> String;
    /// The namespace the resource is in
    fn namespace(&self) -> Option<String>;
    /// The resource version
    fn resource_version(&self) -> Option<String>;
    /// Unique ID assigned by the server
    fn uid(&self) -> Option<String>;
    /// Returns the creation timestamp
    fn creation_timestamp(&self) -> Option<DateTime<Utc>>;
    /// Returns resource labels
    fn labels(&self) -> &BTreeMap<String, String>;
    /// Provides mutable access to the labels
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String>;
    /// Returns resource annotations
    fn annotations(&self) -> &BTreeMap<String, String>;
    /// Provides mutable access to the annotations
    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String>;
    /// Returns resource finalizers
    fn finalizers(&self) -> &[String];
    /// Provides mutable access to the finalizers
    fn finalizers_mut(&mut self) -> &mut Vec<String>;
}

static EMPTY_MAP: BTreeMap<String, String> = BTreeMap::new();

impl<K: Resource> ResourceExt for K {
    fn name_any(&self) -> String {
        self.meta()
            .name
            .clone()
            .or_else(|| self.meta().generate_name.clone())
            .unwrap_or_default()
    }

    fn namespace(&self) -> Option<String> {
        self.meta().namespace.clone()
    }

    fn resource_version(&self) -> Option<String> {
        self.meta().resource_version.clone()
    }

    fn uid(&self) -> Option<String> {
        self.meta().uid.clone()
    }

    fn creation_timestamp(&self) -> Option<DateTime<Utc>> {
        self.meta().creation_timestamp
    }

    fn labels(&self) -> &BTreeMap<String, String> {
        self.meta().labels.as_ref().unwrap_or(&EMPTY_MAP)
    }

    fn labels_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.meta_mut().labels.get_or_insert_with(BTreeMap::new)
    }

    fn annotations(&self) -> &BTreeMap<String, String> {
        self.meta().annotations.as_ref().unwrap_or(&EMPTY_MAP)
    }

    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.meta_mut().annotations.get_or_insert_with(BTreeMap::new)
    }

    fn finalizers(&self) -> &[String] {
        self.meta().finalizers.as_deref().unwrap_or_default()
    }

    fn finalizers_mut(&mut self) -> &mut Vec<String> {
        self.meta_mut().finalizers.get_or_insert_with(Vec::new)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EntityScope;

    struct Lease {
        metadata: ObjectMeta,
    }

    impl Resource for Lease {
        const ENTITY: EntityAttributes = EntityAttributes {
            type_name: "Lease",
            group: "coordination.k8s.io",
            version: "v1",
            kind: None,
            plural: None,
            scope: EntityScope::Namespaced,
        };

        fn meta(&self) -> &ObjectMeta {
            &self.metadata
        }

        fn meta_mut(&mut self) -> &mut ObjectMeta {
            &mut self.metadata
        }
    }

    #[test]
    fn manual_impl_resolves() {
        let d = Lease::descriptor().unwrap();
        assert_eq!(d.kind, "Lease");
        assert_eq!(d.plural, "leases");
        assert_eq!(
            d.url_path(Some("kube-system")),
            "/apis/coordination.k8s.io/v1/namespaces/kube-system/leases"
        );
    }

    #[test]
    fn ext_accessors() {
        let mut lease = Lease {
            metadata: ObjectMeta {
                generate_name: Some("leader-".into()),
                ..ObjectMeta::default()
            },
        };
        assert_eq!(lease.name_any(), "leader-");
        assert!(lease.labels().is_empty());
        lease.labels_mut().insert("app".into(), "ctl".into());
        assert_eq!(lease.labels().get("app").map(String::as_str), Some("ctl"));
        lease.finalizers_mut().push("kubent.rs/cleanup".into());
        assert_eq!(lease.finalizers(), ["kubent.rs/cleanup".to_string()]);
    }
}
