//! # Astraea
//!
//! **REST helper utilities for Themis services**
//!
//! Astraea is the thin layer between a host HTTP framework and service
//! code: typed request-parameter extraction, pagination and sort parsing, a
//! business error-code taxonomy, and an ordered handler chain that converts
//! uncaught errors into `application/problem+json` responses.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use astraea::prelude::*;
//! use http::{Method, Uri};
//!
//! // Built once at startup, shared read-only across requests.
//! let responder = ProblemResponder::new(
//!     ProblemResolver::with_default_handlers().build(),
//! );
//!
//! // Per request: the adapter snapshots the request...
//! let ctx = RequestContextBuilder::new()
//!     .method(Method::GET)
//!     .uri(Uri::from_static("/orders?page=0&size=10"))
//!     .build();
//!
//! // ...handlers extract typed input...
//! let err = ctx.pageable().unwrap_err();
//!
//! // ...and any uncaught failure becomes a problem response.
//! let response = responder.respond(&ctx, &err);
//! assert_eq!(response.status(), 400);
//! ```
//!
//! ## Data flow
//!
//! ```text
//! request → parameter extraction → business logic
//!                                        ↓ (uncaught error)
//!                              ProblemResponder
//!                  root-cause unwrap → handler chain → fallback
//!                                        ↓
//!                      problem JSON + structured log entry
//! ```

#![doc(html_root_url = "https://docs.rs/astraea/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use astraea_core as core;

// Re-export extraction types
pub use astraea_extract as extract;

// Re-export problem resolution types
pub use astraea_problem as problem;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use astraea::prelude::*;
/// ```
pub mod prelude {
    pub use astraea_core::{trace, BizCode, BizError, BizResult};

    // Re-export extraction types
    pub use astraea_extract::{
        Direction, Order, Page, Pageable, ParamError, ParamSource, PathParams, RequestContext,
        RequestContextBuilder, Sort,
    };

    // Re-export problem resolution types
    pub use astraea_problem::{
        Diagnostics, Problem, ProblemHandler, ProblemResolver, ProblemResolverBuilder,
        ProblemResponder, ProblemResponse, RestProblem,
    };
}
