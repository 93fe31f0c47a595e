//! Handler for [`BizError`].

use crate::handler::{ProblemHandler, HIGHEST_PRECEDENCE};
use crate::problem::Problem;
use astraea_core::BizError;
use std::error::Error as StdError;

/// Maps a [`BizError`] 1:1 to its code's status, code and message.
pub struct BizErrorHandler;

impl ProblemHandler for BizErrorHandler {
    fn name(&self) -> &'static str {
        "biz_error"
    }

    fn priority(&self) -> i32 {
        HIGHEST_PRECEDENCE + 1000
    }

    fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
        let err = error.downcast_ref::<BizError>()?;
        let code = err.code();

        let mut problem = Problem::from_code(code);
        if let Some(message) = err.developer_message() {
            problem = problem.with_developer_message(message);
        }
        Some(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astraea_core::BizCode;

    #[test]
    fn test_maps_code_fields() {
        let err = BizError::with_message(BizCode::CONFLICT, "username already taken");
        let problem = BizErrorHandler.handle(&err).unwrap();

        assert_eq!(problem.status, 409);
        assert_eq!(problem.code, 409);
        assert_eq!(problem.message, "resource conflict");
        assert_eq!(
            problem.developer_message.as_deref(),
            Some("username already taken"),
        );
    }

    #[test]
    fn test_no_developer_message_without_custom_message() {
        let err = BizError::new(BizCode::NOT_FOUND);
        let problem = BizErrorHandler.handle(&err).unwrap();

        assert_eq!(problem.developer_message, None);
    }

    #[test]
    fn test_passes_on_other_errors() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(BizErrorHandler.handle(&err).is_none());
    }
}
