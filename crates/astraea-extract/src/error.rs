//! Parameter extraction failures.
//!
//! Extraction raises exactly two kinds of failure: a parameter that is
//! absent (or empty after trimming), and a parameter whose raw value cannot
//! be converted to the requested type. Both name the location and the
//! parameter so the resulting error response tells the caller what to fix.

use http::StatusCode;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The request location a parameter was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// A path variable matched by the router (e.g. `/users/{id}`).
    Path,
    /// A query string parameter.
    Query,
    /// A URL-encoded form field from the request body.
    Form,
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Form => write!(f, "form"),
        }
    }
}

/// Failure raised by the typed parameter accessors.
///
/// # Example
///
/// ```rust
/// use astraea_extract::{ParamError, ParamSource};
/// use http::StatusCode;
///
/// let err = ParamError::missing(ParamSource::Query, "page");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.to_string(), r#"parameter "page" in query is missing or empty"#);
/// ```
#[derive(Debug, Error)]
pub enum ParamError {
    /// The parameter is absent, or empty after optional trimming.
    #[error(r#"parameter "{name}" in {location} is missing or empty"#)]
    Missing {
        /// Location the parameter was looked up in.
        location: ParamSource,
        /// Name of the parameter.
        name: String,
    },

    /// The parameter is present but its raw value cannot be converted to
    /// the requested type.
    #[error(r#"parameter "{name}" in {location} is malformed: {reason}"#)]
    Malformed {
        /// Location the parameter was looked up in.
        location: ParamSource,
        /// Name of the parameter.
        name: String,
        /// Conversion failure description, including the offending value.
        reason: String,
    },
}

impl ParamError {
    /// Creates a missing-parameter failure.
    #[must_use]
    pub fn missing(location: ParamSource, name: impl Into<String>) -> Self {
        Self::Missing {
            location,
            name: name.into(),
        }
    }

    /// Creates a malformed-parameter failure.
    #[must_use]
    pub fn malformed(
        location: ParamSource,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            location,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the location the parameter was read from.
    #[must_use]
    pub const fn location(&self) -> ParamSource {
        match self {
            Self::Missing { location, .. } | Self::Malformed { location, .. } => *location,
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name, .. } | Self::Malformed { name, .. } => name,
        }
    }

    /// Returns the HTTP status for this failure. Both kinds are client
    /// errors.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
