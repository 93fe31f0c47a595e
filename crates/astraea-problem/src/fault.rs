//! Canonical faults raised by host adapters.
//!
//! These errors represent failures that happen before a route handler runs:
//! content negotiation rejecting the request body type, and routing finding
//! no match at all. Adapters construct them and feed them through the same
//! resolution pipeline as everything else.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// The request carries a content type the endpoint does not support.
#[derive(Debug, Default)]
pub struct UnsupportedMediaType {
    content_type: Option<String>,
}

impl UnsupportedMediaType {
    /// Creates a fault for a request without a usable content type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fault naming the rejected content type.
    #[must_use]
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
        }
    }

    /// Returns the rejected content type, if the request carried one.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl fmt::Display for UnsupportedMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content_type {
            Some(content_type) => write!(f, r#"unsupported content type "{content_type}""#),
            None => write!(f, "unsupported content type"),
        }
    }
}

impl StdError for UnsupportedMediaType {}

/// No route matched the request.
#[derive(Debug, Error)]
#[error("no route matched {method} {path}")]
pub struct RouteNotFound {
    method: String,
    path: String,
}

impl RouteNotFound {
    /// Creates a fault for an unmatched request.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}
