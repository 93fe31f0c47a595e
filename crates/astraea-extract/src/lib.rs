//! # Astraea Extract
//!
//! Typed extraction of named request parameters, plus the pagination and
//! sort-order values built on top of it.
//!
//! A [`RequestContext`] snapshots the parts of an HTTP request the helpers
//! need (method, URI, headers, decoded query and form pairs, matched path
//! parameters). The typed accessors convert a named raw string from one of
//! three locations — `path`, `query` or `form` — into a `bool`, `i32`,
//! `i64`, `f64` or string, raising a precise [`ParamError`] for missing or
//! malformed input.
//!
//! ## Example
//!
//! ```rust
//! use astraea_extract::{ParamError, ParamSource, RequestContextBuilder};
//! use http::{Method, Uri};
//!
//! let ctx = RequestContextBuilder::new()
//!     .method(Method::GET)
//!     .uri(Uri::from_static("/users?active=true&limit=oops"))
//!     .path_param("user_id", "42")
//!     .build();
//!
//! assert_eq!(ctx.path_i64("user_id").unwrap(), 42);
//! assert!(ctx.query_bool("active").unwrap());
//!
//! // Non-defaulted extraction raises a typed failure...
//! assert!(matches!(
//!     ctx.query_i32("limit"),
//!     Err(ParamError::Malformed { location: ParamSource::Query, .. }),
//! ));
//! // ...while the defaulted variant treats malformed input as absent.
//! assert_eq!(ctx.query_i32_or("limit", 20), 20);
//! ```
//!
//! ## Pagination and sorting
//!
//! [`Pageable`] validates 1-based `page`/`size` query values against a
//! configurable maximum, [`Page`] wraps a result slice with its totals, and
//! [`Sort`] parses comma-separated `sort` expressions where a leading `-`
//! selects descending order.

#![doc(html_root_url = "https://docs.rs/astraea-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod pagination;
mod param;
mod sort;

pub use context::{PathParams, RequestContext, RequestContextBuilder};
pub use error::{ParamError, ParamSource};
pub use pagination::{Page, Pageable, DEFAULT_MAX_PAGE_SIZE};
pub use sort::{Direction, Order, Sort};
