//! Typed list envelope.
use serde::{Deserialize, Serialize};

use crate::metadata::ListMeta;

/// A typed page of objects as returned by a list query
///
/// This is iterable, and is produced by [`Request::list`](crate::Request::list) responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EntityList<T> {
    /// List metadata, carrying the continue token for pagination
    #[serde(default)]
    pub metadata: ListMeta,

    /// The items of this page
    ///
    /// Required: a body without `items` is not a list.
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T> EntityList<T> {
    /// Returns an iterator over the items
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Returns an iterator of mutable references to the items
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// The continue token for the next page, if the server has more items
    pub fn continue_token(&self) -> Option<&str> {
        self.metadata.continue_.as_deref().filter(|t| !t.is_empty())
    }
}

impl<T> IntoIterator for EntityList<T> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type IntoIter = ::std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
