//! Built-in problem handlers.
//!
//! Each handler claims exactly one error type and returns `None` for
//! everything else. They are registered by
//! [`ProblemResolver::with_default_handlers`](crate::ProblemResolver::with_default_handlers);
//! the narrow, frequently hit handlers sort near the front of the chain and
//! the catch-all protocol handlers sort last.

mod biz;
mod json;
mod media_type;
mod param;
mod route;
mod validation;

pub use biz::BizErrorHandler;
pub use json::JsonErrorHandler;
pub use media_type::UnsupportedMediaTypeHandler;
pub use param::ParamErrorHandler;
pub use route::RouteNotFoundHandler;
pub use validation::ValidationErrorsHandler;
