//! Error-response payloads.
//!
//! [`Problem`] is the framework-neutral result a handler produces: status,
//! business code, message, optional developer message and optional details.
//! [`RestProblem`] is the full wire payload the responder assembles around a
//! `Problem` for one failed request.

use astraea_core::BizCode;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::Serialize;

/// The outcome of resolving one error: what the client should be told.
///
/// # Example
///
/// ```rust
/// use astraea_core::BizCode;
/// use astraea_problem::Problem;
///
/// let problem = Problem::from_code(BizCode::NOT_FOUND)
///     .with_developer_message("user 42 does not exist");
///
/// assert_eq!(problem.status, 404);
/// assert_eq!(problem.code, 404);
/// assert_eq!(problem.message, "resource not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    /// HTTP status for the response.
    pub status: u16,
    /// Business error code.
    pub code: u32,
    /// Client-facing message.
    pub message: String,
    /// Diagnostic message for developers; excluded when diagnostics are
    /// disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
    /// Structured details, e.g. per-field validation violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Problem {
    /// Creates a problem with the mandatory fields.
    #[must_use]
    pub fn new(status: u16, code: u32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            developer_message: None,
            details: None,
        }
    }

    /// Creates a problem whose status, code and message come from a
    /// [`BizCode`].
    #[must_use]
    pub fn from_code(code: BizCode) -> Self {
        Self::new(code.status(), code.code(), code.message())
    }

    /// Attaches a developer-facing message.
    #[must_use]
    pub fn with_developer_message(mut self, message: impl Into<String>) -> Self {
        self.developer_message = Some(message.into());
        self
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns the HTTP status, falling back to 500 for values outside the
    /// valid range.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// The serialized error payload for one failed request.
///
/// `developer_message`, `details` and `stacktrace` are omitted from the
/// JSON entirely when absent, never serialized as null.
#[derive(Debug, Clone, Serialize)]
pub struct RestProblem {
    /// When the failure was resolved.
    pub timestamp: DateTime<Utc>,
    /// Trace id correlating the response with server-side log entries.
    pub trace_id: String,
    /// Request path.
    pub path: String,
    /// Request HTTP method.
    pub method: String,
    /// HTTP status, mirrored by the response status line.
    pub status: u16,
    /// Business error code.
    pub code: u32,
    /// Client-facing message.
    pub message: String,
    /// Diagnostic message for developers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
    /// Structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Rendered error chain, present only when diagnostics allow it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<Vec<String>>,
}

impl RestProblem {
    /// Returns a copy with the diagnostic-only fields cleared, suitable for
    /// server-side logging.
    #[must_use]
    pub fn log_view(&self) -> Self {
        Self {
            developer_message: None,
            details: None,
            stacktrace: None,
            ..self.clone()
        }
    }
}
