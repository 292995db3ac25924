//! Request builder type for arbitrary api types
use thiserror::Error;

use crate::params::{DeleteParams, ListParams, PostParams, WatchParams};

pub(crate) const JSON_MIME: &str = "application/json";

/// Possible errors when building a request.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to build a request.
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),
    /// Failed to serialize body.
    #[error("failed to serialize body: {0}")]
    SerializeBody(#[source] serde_json::Error),
    /// Failed to validate request.
    #[error("failed to validate request: {0}")]
    Validation(String),
}

/// A request builder
///
/// Takes a collection path and supplies constructors for the operations on it.
/// The operations all return `http::Request` objects.
#[derive(Debug, Clone)]
pub struct Request {
    /// The path component of a url
    pub url_path: String,
}

impl Request {
    /// New request with a resource's url path
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }

    fn target(&self, segments: &[&str], populate: impl FnOnce(&mut form_urlencoded::Serializer<String>)) -> String {
        let mut path = self.url_path.clone();
        for segment in segments {
            path.push('/');
            path.push_str(&crate::descriptor::encode_segment(segment));
        }
        let mut qp = form_urlencoded::Serializer::new(String::new());
        populate(&mut qp);
        let query = qp.finish();
        if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        }
    }
}

fn require_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::Validation("A non-empty name is required".into()));
    }
    Ok(())
}

/// Convenience methods found from API conventions
impl Request {
    /// List a collection of a resource
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>, Error> {
        lp.validate()?;
        let urlstr = self.target(&[], |qp| lp.populate_qp(qp));
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Watch a collection of a resource
    pub fn watch(&self, wp: &WatchParams) -> Result<http::Request<Vec<u8>>, Error> {
        wp.validate()?;
        let urlstr = self.target(&[], |qp| wp.populate_qp(qp));
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Get a single instance
    pub fn get(&self, name: &str) -> Result<http::Request<Vec<u8>>, Error> {
        require_name(name)?;
        let urlstr = self.target(&[name], |_| {});
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Create an instance of a resource
    pub fn create(&self, pp: &PostParams, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        pp.validate()?;
        let urlstr = self.target(&[], |qp| pp.populate_qp(qp));
        let req = http::Request::post(urlstr).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(data).map_err(Error::BuildRequest)
    }

    /// Replace an instance of a resource
    ///
    /// Requires `metadata.resourceVersion` set in data
    pub fn replace(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        require_name(name)?;
        pp.validate()?;
        let urlstr = self.target(&[name], |qp| pp.populate_qp(qp));
        let req = http::Request::put(urlstr).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(data).map_err(Error::BuildRequest)
    }

    /// Delete an instance of a resource
    pub fn delete(&self, name: &str, dp: &DeleteParams) -> Result<http::Request<Vec<u8>>, Error> {
        require_name(name)?;
        let urlstr = self.target(&[name], |_| {});
        let req = http::Request::delete(urlstr);
        if dp.is_default() {
            return req.body(vec![]).map_err(Error::BuildRequest);
        }
        let body = serde_json::to_vec(&dp).map_err(Error::SerializeBody)?;
        req.header(http::header::CONTENT_TYPE, JSON_MIME)
            .body(body)
            .map_err(Error::BuildRequest)
    }
}

/// Subresources
impl Request {
    /// Replace an instance of the subresource
    pub fn replace_subresource(
        &self,
        subresource_name: &str,
        name: &str,
        pp: &PostParams,
        data: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        require_name(name)?;
        pp.validate()?;
        let urlstr = self.target(&[name, subresource_name], |qp| pp.populate_qp(qp));
        let req = http::Request::put(urlstr).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(data).map_err(Error::BuildRequest)
    }

    /// Replace the status subresource of an instance
    pub fn replace_status(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        self.replace_subresource("status", name, pp, data)
    }
}
