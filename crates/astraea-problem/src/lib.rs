//! # Astraea Problem
//!
//! The error-resolution pipeline: an ordered chain of problem handlers that
//! maps arbitrary runtime failures to a canonical error-response payload
//! ("problem" documents, `application/problem+json`).
//!
//! ## Pipeline
//!
//! ```text
//! error → ProblemResolver (root-cause unwrap → handler chain → fallback)
//!       → Problem
//!       → ProblemResponder (trace id, diagnostics gating, logging)
//!       → http::Response
//! ```
//!
//! The resolver owns the handler chain: handlers are registered once at
//! startup through [`ProblemResolverBuilder`] — explicitly, with typed
//! keys — sorted by priority, and consulted in order until one claims the
//! error. Unclaimed errors fall back to a generic internal-error problem
//! that never leaks the original message into the client-facing text.
//!
//! ## Example
//!
//! ```rust
//! use astraea_core::{BizCode, BizError};
//! use astraea_extract::RequestContextBuilder;
//! use astraea_problem::{ProblemResolver, ProblemResponder};
//! use http::{Method, Uri};
//!
//! let responder = ProblemResponder::new(
//!     ProblemResolver::with_default_handlers().build(),
//! );
//!
//! let ctx = RequestContextBuilder::new()
//!     .method(Method::GET)
//!     .uri(Uri::from_static("/users/42"))
//!     .build();
//!
//! let err = BizError::with_message(BizCode::NOT_FOUND, "user 42 does not exist");
//! let response = responder.respond(&ctx, &err);
//!
//! assert_eq!(response.status(), 404);
//! assert_eq!(response.headers()["cache-control"], "no-store");
//! ```
//!
//! ## Extending
//!
//! Implement [`ProblemHandler`] for your own error types and register them
//! on top of the defaults; a registration for an already-claimed type wins
//! and the replacement is logged:
//!
//! ```rust
//! use astraea_problem::{Problem, ProblemHandler, ProblemResolver};
//! use std::error::Error;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("tenant suspended")]
//! struct TenantSuspended;
//!
//! struct TenantSuspendedHandler;
//!
//! impl ProblemHandler for TenantSuspendedHandler {
//!     fn name(&self) -> &'static str {
//!         "tenant_suspended"
//!     }
//!
//!     fn handle(&self, error: &(dyn Error + 'static)) -> Option<Problem> {
//!         error.downcast_ref::<TenantSuspended>()?;
//!         Some(Problem::new(403, 1403, "tenant suspended"))
//!     }
//! }
//!
//! let resolver = ProblemResolver::with_default_handlers()
//!     .register::<TenantSuspended>(TenantSuspendedHandler)
//!     .build();
//!
//! assert_eq!(resolver.resolve(&TenantSuspended).code, 1403);
//! ```

#![doc(html_root_url = "https://docs.rs/astraea-problem/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod diagnostics;
pub mod fault;
mod handler;
pub mod handlers;
mod problem;
mod resolver;
mod responder;

pub use diagnostics::{
    error_chain, Diagnostics, PROBLEM_MEDIA_TYPE, TRACE_ENABLED_ENV, TRACE_FORCE_DISABLED_ENV,
    TRACE_QUERY_FLAG,
};
pub use handler::{ProblemHandler, HIGHEST_PRECEDENCE, LOWEST_PRECEDENCE};
pub use problem::{Problem, RestProblem};
pub use resolver::{ProblemResolver, ProblemResolverBuilder};
pub use responder::{ProblemResponder, ProblemResponse};
