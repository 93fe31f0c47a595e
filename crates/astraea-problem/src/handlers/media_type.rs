//! Handler for content negotiation failures.

use crate::fault::UnsupportedMediaType;
use crate::handler::{ProblemHandler, LOWEST_PRECEDENCE};
use crate::problem::Problem;
use astraea_core::BizCode;
use std::error::Error as StdError;

/// Maps [`UnsupportedMediaType`] to a 415 response. Sorts last in the
/// chain.
pub struct UnsupportedMediaTypeHandler;

impl ProblemHandler for UnsupportedMediaTypeHandler {
    fn name(&self) -> &'static str {
        "unsupported_media_type"
    }

    fn priority(&self) -> i32 {
        LOWEST_PRECEDENCE
    }

    fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
        let err = error.downcast_ref::<UnsupportedMediaType>()?;
        Some(
            Problem::from_code(BizCode::UNSUPPORTED_MEDIA_TYPE)
                .with_developer_message(err.to_string()),
        )
    }
}
