//! A port of request parameter *Optionals from apimachinery/types.go
use serde::Serialize;

use crate::{labels::Selector, request::Error, Expression};

/// Common query parameters used in list calls
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    /// A selector to restrict returned objects by their labels.
    ///
    /// Defaults to everything if `None`.
    pub label_selector: Option<String>,

    /// A selector to restrict returned objects by their fields.
    ///
    /// Defaults to everything if `None`.
    pub field_selector: Option<String>,

    /// Limit the number of results.
    ///
    /// If there are more results, the server will respond with a continue token
    /// which can be used to fetch the next page.
    pub limit: Option<u32>,

    /// Fetch a second page of results.
    ///
    /// After listing results with a limit, a continue token can be used to fetch another page of results.
    pub continue_token: Option<String>,
}

impl ListParams {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.limit == Some(0) {
            return Err(Error::Validation("ListParams::limit must be positive".into()));
        }
        Ok(())
    }

    pub(crate) fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<String>) {
        if let Some(fields) = &self.field_selector {
            qp.append_pair("fieldSelector", fields);
        }
        if let Some(labels) = &self.label_selector {
            qp.append_pair("labelSelector", labels);
        }
        if let Some(limit) = &self.limit {
            qp.append_pair("limit", &limit.to_string());
        }
        if let Some(continue_token) = &self.continue_token {
            qp.append_pair("continue", continue_token);
        }
    }
}

/// Builder interface to ListParams
impl ListParams {
    /// Configure the selector to restrict the list of returned objects by their fields.
    ///
    /// Supports `=`, `==`, `!=`, and can be comma separated: `key1=value1,key2=value2`.
    #[must_use]
    pub fn fields(mut self, field_selector: &str) -> Self {
        self.field_selector = Some(field_selector.to_string());
        self
    }

    /// Configure the selector to restrict the list of returned objects by their labels.
    ///
    /// Takes a raw selector string, e.g. `app=web,!canary`.
    #[must_use]
    pub fn labels(mut self, label_selector: &str) -> Self {
        self.label_selector = Some(label_selector.to_string());
        self
    }

    /// Configure the label selector from expressions, joined as a conjunction.
    ///
    /// An empty set of expressions clears the selector.
    #[must_use]
    pub fn selector(mut self, expressions: &[Expression]) -> Self {
        self.label_selector = selector_string(expressions);
        self
    }

    /// Sets a result limit.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets a continue token.
    #[must_use]
    pub fn continue_token(mut self, token: &str) -> Self {
        self.continue_token = Some(token.to_string());
        self
    }
}

fn selector_string(expressions: &[Expression]) -> Option<String> {
    let selector = Selector::from(expressions);
    (!selector.selects_all()).then(|| selector.to_selector_string())
}

/// Common query parameters used in watch calls
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WatchParams {
    /// A selector to restrict returned objects by their labels.
    pub label_selector: Option<String>,

    /// A selector to restrict returned objects by their fields.
    pub field_selector: Option<String>,

    /// Server-side upper bound on the lifetime of the watch connection, in seconds.
    ///
    /// The server closes the stream when it elapses, regardless of activity.
    pub timeout: Option<u32>,

    /// Ask the server to send periodic `BOOKMARK` events.
    pub bookmarks: bool,

    /// Resource version to start watching from.
    pub resource_version: Option<String>,
}

impl WatchParams {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.timeout == Some(0) {
            return Err(Error::Validation("WatchParams::timeout must be positive".into()));
        }
        Ok(())
    }

    pub(crate) fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<String>) {
        qp.append_pair("watch", "true");
        if let Some(timeout) = &self.timeout {
            qp.append_pair("timeoutSeconds", &timeout.to_string());
        }
        if let Some(fields) = &self.field_selector {
            qp.append_pair("fieldSelector", fields);
        }
        if let Some(labels) = &self.label_selector {
            qp.append_pair("labelSelector", labels);
        }
        if self.bookmarks {
            qp.append_pair("allowWatchBookmarks", "true");
        }
        if let Some(rv) = &self.resource_version {
            qp.append_pair("resourceVersion", rv);
        }
    }
}

/// Builder interface to WatchParams
impl WatchParams {
    /// Configure the timeout for watch calls
    ///
    /// This limits the duration of the call, regardless of any activity or inactivity.
    #[must_use]
    pub fn timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout = Some(timeout_secs);
        self
    }

    /// Configure the timeout from a duration, truncated to whole seconds.
    #[must_use]
    pub fn timeout_duration(self, timeout: std::time::Duration) -> Self {
        let secs = u32::try_from(timeout.as_secs()).unwrap_or(u32::MAX);
        self.timeout(secs)
    }

    /// Configure the selector to restrict the list of returned objects by their fields.
    #[must_use]
    pub fn fields(mut self, field_selector: &str) -> Self {
        self.field_selector = Some(field_selector.to_string());
        self
    }

    /// Configure the selector to restrict the list of returned objects by their labels.
    #[must_use]
    pub fn labels(mut self, label_selector: &str) -> Self {
        self.label_selector = Some(label_selector.to_string());
        self
    }

    /// Configure the label selector from expressions, joined as a conjunction.
    #[must_use]
    pub fn selector(mut self, expressions: &[Expression]) -> Self {
        self.label_selector = selector_string(expressions);
        self
    }

    /// Enables watch bookmarks
    #[must_use]
    pub fn bookmarks(mut self) -> Self {
        self.bookmarks = true;
        self
    }

    /// Start watching after the given resource version
    #[must_use]
    pub fn at(mut self, resource_version: &str) -> Self {
        self.resource_version = Some(resource_version.into());
        self
    }
}

/// Common query parameters for put/post calls
#[derive(Default, Clone, Debug, PartialEq)]
pub struct PostParams {
    /// Whether to run this as a dry run
    pub dry_run: bool,
    /// fieldManager is a name of the actor that is making changes
    pub field_manager: Option<String>,
}

impl PostParams {
    pub(crate) fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<String>) {
        if self.dry_run {
            qp.append_pair("dryRun", "All");
        }
        if let Some(ref fm) = self.field_manager {
            qp.append_pair("fieldManager", fm);
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if let Some(field_manager) = &self.field_manager {
            if field_manager.len() > 128 {
                return Err(Error::Validation(
                    "Failed to validate PostParams::field_manager!".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Parameters for delete calls, sent as the `DeleteOptions` body
#[derive(Default, Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    /// When present, indicates that modifications should not be persisted.
    #[serde(serialize_with = "dry_run_all_ser", skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,

    /// The duration in seconds before the object should be deleted.
    ///
    /// Zero means delete immediately; `None` uses the default grace period of the type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period_seconds: Option<u32>,

    /// Whether or how garbage collection is performed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagation_policy: Option<PropagationPolicy>,
}

impl DeleteParams {
    /// Construct with `PropagationPolicy::Background`.
    pub fn background() -> Self {
        Self {
            propagation_policy: Some(PropagationPolicy::Background),
            ..Self::default()
        }
    }

    /// Construct with `PropagationPolicy::Foreground`.
    pub fn foreground() -> Self {
        Self {
            propagation_policy: Some(PropagationPolicy::Foreground),
            ..Self::default()
        }
    }

    /// Perform a dryRun only
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Set the duration in seconds before the object should be deleted.
    #[must_use]
    pub fn grace_period(mut self, secs: u32) -> Self {
        self.grace_period_seconds = Some(secs);
        self
    }

    pub(crate) fn is_default(&self) -> bool {
        !self.dry_run && self.grace_period_seconds.is_none() && self.propagation_policy.is_none()
    }
}

// The body form of dryRun only accepts a missing field or ["All"]
fn dry_run_all_ser<S>(t: &bool, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    use serde::ser::SerializeTuple;
    match t {
        true => {
            let mut map = s.serialize_tuple(1)?;
            map.serialize_element("All")?;
            map.end()
        }
        false => s.serialize_none(),
    }
}

/// Propagation policy when deleting single objects
#[derive(Clone, Debug, Serialize, PartialEq)]
pub enum PropagationPolicy {
    /// Orphan dependents
    Orphan,
    /// Allow the garbage collector to delete the dependents in the background
    Background,
    /// A cascading policy that deletes all dependents in the foreground
    Foreground,
}
