//! The directory API seam.
//!
//! This module provides:
//! - `CallHandle`: A prepared request that can be executed any number of times
//! - `CallFactory`: Builds the handle for a payload
//! - `DirectoryApi`: Executes handles against the directory services
//! - `SheetSource`: Fetches spreadsheet ranges for `gsheet` input
//! - `classify_status`: Maps HTTP failures onto transient and permanent kinds
//! - `http::HttpGateway`: The reqwest-backed production gateway (feature `http`)

mod classify;
mod factory;
#[cfg(feature = "http")]
pub mod http;

pub use classify::classify_status;
pub use factory::CallFactory;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;

/// The service a call is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Admin SDK Directory API
    Directory,
    GroupsSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Patch => write!(f, "PATCH"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A prepared request.
///
/// Path segments are stored unencoded; the gateway encodes each one when it
/// builds the URL.
#[derive(Debug, Clone, PartialEq)]
pub struct CallHandle {
    pub service: Service,
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl CallHandle {
    pub fn new(service: Service, method: Method) -> Self {
        Self {
            service,
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Append a slash-separated path such as an orgunit path.
    pub fn path_segments(mut self, path: &str) -> Self {
        self.segments.extend(
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The request path relative to the service root, e.g. `/users/a@x.io`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for CallHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path())
    }
}

/// Executes prepared calls. Shared by all workers of a batch.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn execute(&self, call: &CallHandle) -> Result<Value, UpstreamError>;
}

/// Source of spreadsheet ranges.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Rows of the range, each a list of cell strings.
    async fn values(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, UpstreamError>;
}
