//! The HTTP responder.
//!
//! [`ProblemResponder`] is the single entry point an adapter calls when an
//! uncaught error surfaces during request handling. It resolves the error
//! through the handler chain, assembles the [`RestProblem`] payload, emits
//! the server-side log entry, and builds the HTTP response value.
//!
//! The responder itself never fails: if the payload cannot be serialized it
//! degrades to an empty-body 500 and logs the secondary failure with the
//! request's trace id. Detecting an already-committed response (and
//! skipping the write) remains the adapter's responsibility — this type
//! only produces a response value.

use crate::diagnostics::{error_chain, Diagnostics, PROBLEM_MEDIA_TYPE, TRACE_QUERY_FLAG};
use crate::problem::RestProblem;
use crate::resolver::ProblemResolver;
use astraea_extract::RequestContext;
use bytes::Bytes;
use chrono::Utc;
use http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::Full;
use std::error::Error as StdError;
use tracing::{debug, error};

/// Response type produced by the responder.
pub type ProblemResponse = http::Response<Full<Bytes>>;

/// Turns uncaught errors into problem responses.
///
/// # Example
///
/// ```rust
/// use astraea_core::{BizCode, BizError};
/// use astraea_extract::RequestContextBuilder;
/// use astraea_problem::{ProblemResolver, ProblemResponder};
/// use http::{Method, Uri};
///
/// let responder = ProblemResponder::new(
///     ProblemResolver::with_default_handlers().build(),
/// );
///
/// let ctx = RequestContextBuilder::new()
///     .method(Method::GET)
///     .uri(Uri::from_static("/orders/7"))
///     .build();
/// let err = BizError::new(BizCode::NOT_FOUND);
///
/// let response = responder.respond(&ctx, &err);
/// assert_eq!(response.status(), 404);
/// assert_eq!(
///     response.headers()["content-type"],
///     "application/problem+json",
/// );
/// ```
pub struct ProblemResponder {
    resolver: ProblemResolver,
    diagnostics: Diagnostics,
}

impl ProblemResponder {
    /// Creates a responder with the default diagnostics policy.
    #[must_use]
    pub fn new(resolver: ProblemResolver) -> Self {
        Self {
            resolver,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Replaces the diagnostics policy.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Returns the underlying resolver.
    #[must_use]
    pub fn resolver(&self) -> &ProblemResolver {
        &self.resolver
    }

    /// Resolves `error` and builds the problem response for `request`.
    #[must_use]
    pub fn respond(
        &self,
        request: &RequestContext,
        error: &(dyn StdError + 'static),
    ) -> ProblemResponse {
        let problem = self.resolver.resolve(error);
        let trace_requested = request.query_flag(TRACE_QUERY_FLAG);

        let rest = RestProblem {
            timestamp: Utc::now(),
            trace_id: request.trace_id().to_string(),
            path: request.path().to_string(),
            method: request.method().to_string(),
            status: problem.status,
            code: problem.code,
            message: problem.message,
            developer_message: problem.developer_message,
            details: problem.details,
            stacktrace: self.diagnostics.stacktrace(trace_requested, error),
        };

        self.log(&rest, error);

        match serde_json::to_vec(&rest) {
            Ok(body) => problem_response(rest.status, Bytes::from(body), true),
            Err(err) => {
                error!(
                    trace_id = %rest.trace_id,
                    cause = %err,
                    "failed to serialize problem response"
                );
                problem_response(500, Bytes::new(), false)
            }
        }
    }

    fn log(&self, rest: &RestProblem, error: &(dyn StdError + 'static)) {
        // The diagnostic-only fields never reach the log entry; the full
        // cause chain is logged separately.
        let summary = serde_json::to_string(&rest.log_view())
            .unwrap_or_else(|_| rest.message.clone());
        if rest.status >= 500 {
            error!(
                trace_id = %rest.trace_id,
                problem = %summary,
                cause = %error_chain(error).join("; "),
                "request resolved to server error"
            );
        } else {
            debug!(
                trace_id = %rest.trace_id,
                problem = %summary,
                cause = %error,
                "request resolved to client error"
            );
        }
    }
}

fn problem_response(status: u16, body: Bytes, with_content_type: bool) -> ProblemResponse {
    let mut response = http::Response::new(Full::new(body));
    *response.status_mut() =
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let headers = response.headers_mut();
    if with_content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(PROBLEM_MEDIA_TYPE));
    }
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use astraea_core::{BizCode, BizError};
    use astraea_extract::RequestContextBuilder;
    use http::{Method, Uri};
    use http_body_util::BodyExt;

    fn responder() -> ProblemResponder {
        ProblemResponder::new(ProblemResolver::with_default_handlers().build())
    }

    fn make_ctx(uri: &'static str) -> RequestContext {
        RequestContextBuilder::new()
            .method(Method::GET)
            .uri(Uri::from_static(uri))
            .build()
    }

    async fn body_json(response: ProblemResponse) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mirrors_problem() {
        let response = responder().respond(&make_ctx("/x"), &BizError::new(BizCode::FORBIDDEN));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_headers_always_set() {
        let response = responder().respond(&make_ctx("/x"), &BizError::new(BizCode::NOT_FOUND));

        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "application/problem+json",
        );
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn test_payload_shape() {
        let ctx = RequestContextBuilder::new()
            .method(Method::DELETE)
            .uri(Uri::from_static("/orders/7"))
            .header("x-request-id", "deadbeefdeadbeefdeadbeefdeadbeef")
            .build();
        let err = BizError::with_message(BizCode::CONFLICT, "order already shipped");

        let json = body_json(responder().respond(&ctx, &err)).await;

        assert_eq!(json["trace_id"], "deadbeefdeadbeefdeadbeefdeadbeef");
        assert_eq!(json["path"], "/orders/7");
        assert_eq!(json["method"], "DELETE");
        assert_eq!(json["status"], 409);
        assert_eq!(json["code"], 409);
        assert_eq!(json["message"], "resource conflict");
        assert_eq!(json["developer_message"], "order already shipped");
        assert!(json["timestamp"].is_string());
        assert!(json.get("details").is_none());
        assert!(json.get("stacktrace").is_none());
    }

    #[tokio::test]
    async fn test_trace_flag_includes_stacktrace() {
        let json = body_json(
            responder().respond(&make_ctx("/x?trace"), &BizError::new(BizCode::INTERNAL)),
        )
        .await;
        assert!(json["stacktrace"].is_array());
    }

    #[tokio::test]
    async fn test_force_disable_beats_trace_flag() {
        let responder = responder()
            .with_diagnostics(Diagnostics::new().enable_trace(true).force_disable_trace(true));

        let json = body_json(
            responder.respond(&make_ctx("/x?trace"), &BizError::new(BizCode::INTERNAL)),
        )
        .await;
        assert!(json.get("stacktrace").is_none());
    }

    #[tokio::test]
    async fn test_global_enable_without_flag() {
        let responder = responder().with_diagnostics(Diagnostics::new().enable_trace(true));

        let json =
            body_json(responder.respond(&make_ctx("/x"), &BizError::new(BizCode::INTERNAL))).await;
        assert!(json["stacktrace"].is_array());
    }

    #[tokio::test]
    async fn test_unclassified_error_is_generic_500() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "connection pool exhausted");
        let json = body_json(responder().respond(&make_ctx("/x"), &err)).await;

        assert_eq!(json["status"], 500);
        assert_eq!(json["message"], "internal server error");
        assert_eq!(json["developer_message"], "connection pool exhausted");
    }
}
