//! The problem-handler contract.

use crate::problem::Problem;
use std::error::Error as StdError;

/// Priority for handlers that must be consulted before everything else.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Priority for handlers that must be consulted last, e.g. catch-all
/// protocol handlers.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// A handler that can claim responsibility for one error type and turn it
/// into a [`Problem`].
///
/// Handlers claim their type with `downcast_ref` and return `None` for
/// anything else; they must be side-effect-free apart from constructing the
/// problem. The chain consults handlers in ascending [`priority`] order
/// (ties keep registration order) and the first non-`None` result wins.
///
/// [`priority`]: ProblemHandler::priority
///
/// # Example
///
/// ```rust
/// use astraea_problem::{Problem, ProblemHandler};
/// use std::error::Error;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("quota exhausted")]
/// struct QuotaExhausted;
///
/// struct QuotaHandler;
///
/// impl ProblemHandler for QuotaHandler {
///     fn name(&self) -> &'static str {
///         "quota"
///     }
///
///     fn handle(&self, error: &(dyn Error + 'static)) -> Option<Problem> {
///         error.downcast_ref::<QuotaExhausted>()?;
///         Some(Problem::new(409, 1510, "quota exhausted"))
///     }
/// }
/// ```
pub trait ProblemHandler: Send + Sync {
    /// Returns a short name identifying this handler in logs.
    fn name(&self) -> &'static str;

    /// Returns the sort priority; lower values are consulted first.
    fn priority(&self) -> i32 {
        0
    }

    /// Produces a problem for a claimed error, or `None` to pass.
    fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem>;
}
