//! Handler for JSON body deserialization failures.

use crate::handler::{ProblemHandler, HIGHEST_PRECEDENCE};
use crate::problem::Problem;
use astraea_core::BizCode;
use std::error::Error as StdError;

/// Maps [`serde_json::Error`] to a 400 response with the type-error code.
/// The parser's own message stays in the developer message.
pub struct JsonErrorHandler;

impl ProblemHandler for JsonErrorHandler {
    fn name(&self) -> &'static str {
        "json_error"
    }

    fn priority(&self) -> i32 {
        HIGHEST_PRECEDENCE + 1000
    }

    fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
        let err = error.downcast_ref::<serde_json::Error>()?;
        Some(
            Problem::new(400, BizCode::PARAM_TYPE.code(), "malformed request body")
                .with_developer_message(err.to_string()),
        )
    }
}
