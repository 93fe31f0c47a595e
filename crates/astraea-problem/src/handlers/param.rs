//! Handler for request-parameter extraction failures.

use crate::handler::{ProblemHandler, HIGHEST_PRECEDENCE};
use crate::problem::Problem;
use astraea_core::BizCode;
use astraea_extract::ParamError;
use std::error::Error as StdError;

/// Maps missing and malformed parameter failures to 400 responses whose
/// message names the location and the parameter.
pub struct ParamErrorHandler;

impl ProblemHandler for ParamErrorHandler {
    fn name(&self) -> &'static str {
        "param_error"
    }

    fn priority(&self) -> i32 {
        HIGHEST_PRECEDENCE + 1000
    }

    fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
        let err = error.downcast_ref::<ParamError>()?;
        Some(Problem::new(
            err.status_code().as_u16(),
            BizCode::PARAM.code(),
            err.to_string(),
        ))
    }
}
