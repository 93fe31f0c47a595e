//! Business error codes and the carrier error type.
//!
//! A [`BizCode`] identifies a failure category; a [`BizError`] carries one
//! code up the call stack together with optional context. Codes are meant to
//! let both clients and operators identify a failure cause without reading
//! server logs.

use http::StatusCode;
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;

/// Result type alias using [`BizError`].
pub type BizResult<T> = Result<T, BizError>;

/// A business error code: a numeric identifier, a human-readable message and
/// the HTTP status the code maps to.
///
/// Codes must be unique within a business domain. The same numeric code may
/// be reused across domains only when it keeps the same status and meaning.
/// Codes below [`BizCode::RESERVED_LIMIT`] are reserved for the generic
/// catalog defined here; domain extensions start at 1000.
///
/// # Example
///
/// ```rust
/// use astraea_core::BizCode;
///
/// const ORDER_EXPIRED: BizCode = BizCode::new(1604, "order expired", 409);
///
/// assert_eq!(BizCode::NOT_FOUND.code(), 404);
/// assert_eq!(BizCode::NOT_FOUND.status(), 404);
/// assert_eq!(ORDER_EXPIRED.status(), 409);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BizCode {
    code: u32,
    message: &'static str,
    status: u16,
}

impl BizCode {
    /// Codes below this value are reserved for the generic catalog.
    pub const RESERVED_LIMIT: u32 = 1000;

    /// Bad request: a parameter is missing or does not meet the interface
    /// contract.
    pub const BAD_REQUEST: BizCode = BizCode::new(400, "bad request", 400);

    /// Unauthenticated, or the credentials have expired.
    pub const UNAUTHORIZED: BizCode =
        BizCode::new(401, "unauthenticated or expired credentials", 401);

    /// Access to the resource is denied.
    pub const FORBIDDEN: BizCode = BizCode::new(403, "access denied", 403);

    /// The requested resource does not exist.
    pub const NOT_FOUND: BizCode = BizCode::new(404, "resource not found", 404);

    /// The resource conflicts with existing state.
    pub const CONFLICT: BizCode = BizCode::new(409, "resource conflict", 409);

    /// The request content type is not supported.
    pub const UNSUPPORTED_MEDIA_TYPE: BizCode =
        BizCode::new(415, "unsupported media type", 415);

    /// Uncaught or unexpected server-side failure. Unclassified errors
    /// resolve to this code; the detailed cause belongs in the server log,
    /// never in the client-facing message.
    pub const INTERNAL: BizCode = BizCode::new(500, "internal server error", 500);

    /// A request parameter has the wrong type, e.g. a string where a number
    /// is expected in a structured body.
    pub const PARAM_TYPE: BizCode = BizCode::new(998, "request parameter type error", 400);

    /// A request parameter is missing or malformed.
    pub const PARAM: BizCode = BizCode::new(999, "request parameter error", 400);

    /// Creates a new code. Use values of [`Self::RESERVED_LIMIT`] or above
    /// for domain-specific codes.
    #[must_use]
    pub const fn new(code: u32, message: &'static str, status: u16) -> Self {
        Self {
            code,
            message,
            status,
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Returns the human-readable message for this code.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Returns the HTTP status as a plain number.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the HTTP status, falling back to 500 for values outside the
    /// valid status range.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for BizCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// The carrier error raised when a business rule is violated.
///
/// Pairs exactly one [`BizCode`] with an optional developer-facing message
/// and an optional wrapped cause. Constructed at the point of violation,
/// propagated with `?`, and consumed once by the problem-handler chain.
///
/// # Example
///
/// ```rust
/// use astraea_core::{BizCode, BizError};
///
/// let err = BizError::with_message(BizCode::CONFLICT, "username already taken");
/// assert_eq!(err.code().status(), 409);
/// assert_eq!(
///     err.to_string(),
///     "BizError: [409] resource conflict => username already taken",
/// );
/// ```
#[derive(Debug)]
pub struct BizError {
    code: BizCode,
    developer_message: Option<String>,
    source: Option<anyhow::Error>,
}

impl BizError {
    /// Creates an error carrying only a code.
    #[must_use]
    pub fn new(code: BizCode) -> Self {
        Self {
            code,
            developer_message: None,
            source: None,
        }
    }

    /// Creates an error with a developer-facing message.
    #[must_use]
    pub fn with_message(code: BizCode, message: impl Into<String>) -> Self {
        Self {
            code,
            developer_message: Some(message.into()),
            source: None,
        }
    }

    /// Creates an error wrapping a cause. The cause's rendering becomes the
    /// developer message.
    #[must_use]
    pub fn from_source(code: BizCode, source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        Self {
            code,
            developer_message: Some(source.to_string()),
            source: Some(source),
        }
    }

    /// Creates an error with both a developer-facing message and a cause.
    #[must_use]
    pub fn with_message_and_source(
        code: BizCode,
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            developer_message: Some(message.into()),
            source: Some(source.into()),
        }
    }

    /// Returns the business code.
    #[must_use]
    pub const fn code(&self) -> BizCode {
        self.code
    }

    /// Returns the developer-facing message, if one was supplied.
    #[must_use]
    pub fn developer_message(&self) -> Option<&str> {
        self.developer_message.as_deref()
    }

    /// Returns the display message: the developer message when present,
    /// otherwise the code's catalog message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.developer_message
            .as_deref()
            .unwrap_or(self.code.message())
    }
}

impl fmt::Display for BizError {
    // Rendered as `BizError: [<code>] <message>` with an optional
    // ` => <developer message>` suffix; log parsers depend on this shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BizError: {}", self.code)?;
        if let Some(message) = &self.developer_message {
            write!(f, " => {message}")?;
        }
        Ok(())
    }
}

impl StdError for BizError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_catalog_is_stable() {
        let reserved = [
            (BizCode::BAD_REQUEST, 400, 400),
            (BizCode::UNAUTHORIZED, 401, 401),
            (BizCode::FORBIDDEN, 403, 403),
            (BizCode::NOT_FOUND, 404, 404),
            (BizCode::CONFLICT, 409, 409),
            (BizCode::UNSUPPORTED_MEDIA_TYPE, 415, 415),
            (BizCode::INTERNAL, 500, 500),
            (BizCode::PARAM_TYPE, 998, 400),
            (BizCode::PARAM, 999, 400),
        ];

        for (code, number, status) in reserved {
            assert_eq!(code.code(), number);
            assert_eq!(code.status(), status);
            assert!(!code.message().is_empty());
            assert!(code.code() < BizCode::RESERVED_LIMIT);
        }
    }

    #[test]
    fn test_http_status_conversion() {
        assert_eq!(BizCode::NOT_FOUND.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(BizCode::PARAM.http_status(), StatusCode::BAD_REQUEST);

        let bogus = BizCode::new(1200, "bogus", 9999);
        assert_eq!(bogus.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_code_extension() {
        const QUOTA_EXCEEDED: BizCode = BizCode::new(1301, "quota exceeded", 409);

        assert_eq!(QUOTA_EXCEEDED.code(), 1301);
        assert_eq!(QUOTA_EXCEEDED.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_biz_error_code_only() {
        let err = BizError::new(BizCode::INTERNAL);

        assert_eq!(err.code(), BizCode::INTERNAL);
        assert_eq!(err.developer_message(), None);
        assert_eq!(err.message(), "internal server error");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_biz_error_message_overrides_catalog() {
        let err = BizError::with_message(BizCode::INTERNAL, "custom exception message");

        assert_eq!(err.developer_message(), Some("custom exception message"));
        assert_eq!(err.message(), "custom exception message");
    }

    #[test]
    fn test_biz_error_from_source_adopts_cause_message() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = BizError::from_source(BizCode::INTERNAL, cause);

        assert_eq!(err.developer_message(), Some("disk on fire"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_biz_error_message_and_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err =
            BizError::with_message_and_source(BizCode::INTERNAL, "write failed", cause);

        assert_eq!(err.developer_message(), Some("write failed"));
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_display_without_custom_message() {
        let err = BizError::new(BizCode::NOT_FOUND);
        assert_eq!(err.to_string(), "BizError: [404] resource not found");
    }

    #[test]
    fn test_display_with_custom_message() {
        let err = BizError::with_message(BizCode::NOT_FOUND, "user 42 does not exist");
        assert_eq!(
            err.to_string(),
            "BizError: [404] resource not found => user 42 does not exist",
        );
    }

    #[test]
    fn test_biz_code_serializes_fields() {
        let json = serde_json::to_value(BizCode::PARAM).unwrap();
        assert_eq!(json["code"], 999);
        assert_eq!(json["status"], 400);
    }
}
