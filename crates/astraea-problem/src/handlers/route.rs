//! Handler for routing failures.

use crate::fault::RouteNotFound;
use crate::handler::{ProblemHandler, LOWEST_PRECEDENCE};
use crate::problem::Problem;
use astraea_core::BizCode;
use std::error::Error as StdError;

/// Maps [`RouteNotFound`] to a generic 404 response. Sorts last in the
/// chain. The unmatched method and path stay in the developer message; the
/// client-facing message is deliberately generic.
pub struct RouteNotFoundHandler;

impl ProblemHandler for RouteNotFoundHandler {
    fn name(&self) -> &'static str {
        "route_not_found"
    }

    fn priority(&self) -> i32 {
        LOWEST_PRECEDENCE
    }

    fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
        let err = error.downcast_ref::<RouteNotFound>()?;
        Some(Problem::from_code(BizCode::NOT_FOUND).with_developer_message(err.to_string()))
    }
}
