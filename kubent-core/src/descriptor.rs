//! Wire identity of a typed resource and the endpoint paths it maps to.
use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Everything but the unreserved characters of a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Whether a resource lives inside a namespace or at cluster level.
///
/// Only namespaced resources have namespaced endpoints; the scope is carried
/// for callers that want to avoid passing a namespace for cluster resources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntityScope {
    /// Objects are stored per namespace
    #[default]
    Namespaced,
    /// Objects are stored once per cluster
    Cluster,
}

/// Static entity declaration attached to a type.
///
/// This is usually generated by `#[derive(Resource)]`, but can be written by hand.
/// Optional members are resolved into a [`ResourceDescriptor`] on first use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityAttributes {
    /// The bare name of the implementing type, used when no kind is declared
    pub type_name: &'static str,
    /// API group, empty for the core group
    pub group: &'static str,
    /// API version
    pub version: &'static str,
    /// Declared kind
    pub kind: Option<&'static str>,
    /// Declared plural, derived from the kind when absent
    pub plural: Option<&'static str>,
    /// Scope of the entity
    pub scope: EntityScope,
}

/// Errors raised when an entity declaration cannot be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The declaration carries no api version
    #[error("{type_name} does not declare an api version")]
    MissingVersion {
        /// Name of the offending type
        type_name: String,
    },

    /// Neither a kind nor a usable type name was provided
    #[error("entity declaration does not name a kind")]
    MissingKind,
}

/// The fully resolved wire identity of a resource type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    /// Resource kind, e.g. `ConfigMap`
    pub kind: String,
    /// Kind of the list envelope, e.g. `ConfigMapList`
    pub list_kind: String,
    /// API group, empty for the core group
    pub group: String,
    /// API version
    pub version: String,
    /// Lowercased kind
    pub singular: String,
    /// URL segment used in endpoint paths
    pub plural: String,
    /// Scope of the resource
    pub scope: EntityScope,
}

impl ResourceDescriptor {
    /// Resolve an entity declaration.
    ///
    /// A blank kind falls back to the type name, a missing plural becomes the
    /// lowercased kind with an `s` appended.
    pub fn from_attributes(attrs: &EntityAttributes) -> Result<Self, Error> {
        let kind = match attrs.kind.map(str::trim) {
            Some(kind) if !kind.is_empty() => kind,
            _ => attrs.type_name.trim(),
        };
        if kind.is_empty() {
            return Err(Error::MissingKind);
        }
        let version = attrs.version.trim();
        if version.is_empty() {
            return Err(Error::MissingVersion {
                type_name: kind.to_string(),
            });
        }
        let singular = kind.to_ascii_lowercase();
        let plural = match attrs.plural.map(str::trim) {
            Some(plural) if !plural.is_empty() => plural.to_string(),
            _ => to_plural(&singular),
        };
        Ok(Self {
            kind: kind.to_string(),
            list_kind: format!("{kind}List"),
            group: attrs.group.trim().to_string(),
            version: version.to_string(),
            singular,
            plural,
            scope: attrs.scope,
        })
    }

    /// The `apiVersion` string: `group/version`, or just `version` for the core group
    pub fn api_version(&self) -> Cow<'_, str> {
        if self.group.is_empty() {
            Cow::Borrowed(&self.version)
        } else {
            Cow::Owned(format!("{}/{}", self.group, self.version))
        }
    }

    /// Collection path for this resource.
    ///
    /// The namespaced family is used whenever `namespace` is non-blank,
    /// otherwise the cluster-wide family.
    pub fn url_path(&self, namespace: Option<&str>) -> String {
        let prefix = if self.group.is_empty() {
            format!("/api/{}", self.version)
        } else {
            format!("/apis/{}/{}", self.group, self.version)
        };
        match non_blank(namespace) {
            Some(ns) => format!("{prefix}/namespaces/{}/{}", encode_segment(ns), self.plural),
            None => format!("{prefix}/{}", self.plural),
        }
    }
}

/// Naive English plural used when no plural is declared
pub fn to_plural(singular: &str) -> String {
    format!("{singular}s")
}

/// Trim a namespace, filtering out empty and whitespace-only ones
pub fn non_blank(namespace: Option<&str>) -> Option<&str> {
    namespace.map(str::trim).filter(|ns| !ns.is_empty())
}

/// Percent-encode a single path segment such as a namespace or object name
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, SEGMENT).into()
}
