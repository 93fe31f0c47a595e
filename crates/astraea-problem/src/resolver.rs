//! The ordered problem-handler chain.
//!
//! A [`ProblemResolver`] owns an immutable, priority-sorted set of
//! [`ProblemHandler`]s and produces exactly one [`Problem`] for any error.
//! The set is assembled once through [`ProblemResolverBuilder`] — a
//! single-writer initialization phase — and is only read afterwards, so
//! `resolve` is safe to call concurrently from any number of request tasks.

use crate::diagnostics::same_error_instance;
use crate::handler::ProblemHandler;
use crate::handlers;
use crate::problem::Problem;
use astraea_core::{BizCode, BizError};
use indexmap::IndexMap;
use std::any::TypeId;
use std::error::Error as StdError;
use tracing::warn;

struct Registration {
    type_name: &'static str,
    priority: i32,
    handler: Box<dyn ProblemHandler>,
}

/// Builder assembling a [`ProblemResolver`].
///
/// Exactly one handler is associated with an error type at a time:
/// registering a second handler under the same type replaces the first (the
/// entry keeps its original position) and the replacement is logged at warn
/// level and counted in [`conflict_count`].
///
/// [`conflict_count`]: ProblemResolverBuilder::conflict_count
#[derive(Default)]
pub struct ProblemResolverBuilder {
    entries: IndexMap<TypeId, Registration>,
    conflicts: usize,
}

impl ProblemResolverBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for the error type `E`.
    ///
    /// `E` must be the type the handler claims via `downcast_ref`; the type
    /// keys replacement, the handler's own claim drives dispatch.
    #[must_use]
    pub fn register<E>(mut self, handler: impl ProblemHandler + 'static) -> Self
    where
        E: StdError + 'static,
    {
        let type_name = std::any::type_name::<E>();
        let registration = Registration {
            type_name,
            priority: handler.priority(),
            handler: Box::new(handler),
        };
        let new_name = registration.handler.name();

        if let Some(previous) = self.entries.insert(TypeId::of::<E>(), registration) {
            self.conflicts += 1;
            warn!(
                error_type = type_name,
                replaced = previous.handler.name(),
                replacement = new_name,
                "problem handler already registered, replacing"
            );
        }
        self
    }

    /// Returns how many registrations replaced an existing handler.
    #[must_use]
    pub fn conflict_count(&self) -> usize {
        self.conflicts
    }

    /// Sorts the handlers by priority (ties keep registration order) and
    /// returns the immutable resolver.
    #[must_use]
    pub fn build(self) -> ProblemResolver {
        let mut entries: Vec<Registration> = self.entries.into_values().collect();
        entries.sort_by_key(|registration| registration.priority);
        ProblemResolver { entries }
    }
}

/// Resolves arbitrary errors to [`Problem`]s through the handler chain.
///
/// # Example
///
/// ```rust
/// use astraea_core::{BizCode, BizError};
/// use astraea_problem::ProblemResolver;
///
/// let resolver = ProblemResolver::with_default_handlers().build();
///
/// let err = BizError::with_message(BizCode::CONFLICT, "username already taken");
/// let problem = resolver.resolve(&err);
///
/// assert_eq!(problem.status, 409);
/// assert_eq!(problem.code, 409);
/// ```
pub struct ProblemResolver {
    entries: Vec<Registration>,
}

impl ProblemResolver {
    /// Returns an empty builder.
    #[must_use]
    pub fn builder() -> ProblemResolverBuilder {
        ProblemResolverBuilder::new()
    }

    /// Returns a builder preloaded with the built-in handlers. Handlers
    /// registered afterwards win on type collision.
    #[must_use]
    pub fn with_default_handlers() -> ProblemResolverBuilder {
        ProblemResolverBuilder::new()
            .register::<BizError>(handlers::BizErrorHandler)
            .register::<astraea_extract::ParamError>(handlers::ParamErrorHandler)
            .register::<serde_json::Error>(handlers::JsonErrorHandler)
            .register::<validator::ValidationErrors>(handlers::ValidationErrorsHandler)
            .register::<crate::fault::UnsupportedMediaType>(handlers::UnsupportedMediaTypeHandler)
            .register::<crate::fault::RouteNotFound>(handlers::RouteNotFoundHandler)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the registered error type names in dispatch order.
    pub fn registered_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .map(|registration| registration.type_name)
    }

    /// Resolves an error to a problem.
    ///
    /// A [`BizError`] at the top level is authoritative and is dispatched
    /// directly. Any other error is first unwrapped to its deepest cause;
    /// if a handler claims the root cause its problem wins, otherwise the
    /// original error is dispatched. Errors nobody claims fall back to the
    /// generic internal-error problem, preserving the error's rendering as
    /// the developer message only.
    #[must_use]
    pub fn resolve(&self, error: &(dyn StdError + 'static)) -> Problem {
        if let Some(root) = root_cause(error) {
            if let Some(problem) = self.dispatch(root) {
                return problem;
            }
        }
        self.dispatch(error)
            .unwrap_or_else(|| internal_fallback(error))
    }

    fn dispatch(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
        self.entries
            .iter()
            .find_map(|registration| registration.handler.handle(error))
    }
}

/// Returns the deepest cause of `error`, or `None` when there is none.
///
/// A `BizError` is never unwrapped: wrapping layers may nest it, but its
/// own identity is authoritative. The walk stops when a cause points back
/// at the previously seen one, so self-referential chains terminate.
fn root_cause<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    if error.is::<BizError>() {
        return None;
    }

    let mut root: Option<&(dyn StdError + 'static)> = None;
    let mut cause = error.source();
    while let Some(next) = cause {
        if let Some(previous) = root {
            if same_error_instance(previous, next) {
                break;
            }
        }
        root = Some(next);
        cause = next.source();
    }
    root
}

fn internal_fallback(error: &(dyn StdError + 'static)) -> Problem {
    Problem::from_code(BizCode::INTERNAL).with_developer_message(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{HIGHEST_PRECEDENCE, LOWEST_PRECEDENCE};
    use std::fmt;

    #[derive(Debug)]
    struct Wrapper {
        label: &'static str,
        cause: Option<Box<dyn StdError + 'static>>,
    }

    impl Wrapper {
        fn plain(label: &'static str) -> Self {
            Self { label, cause: None }
        }

        fn around(label: &'static str, cause: impl StdError + 'static) -> Self {
            Self {
                label,
                cause: Some(Box::new(cause)),
            }
        }
    }

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.label)
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.cause.as_deref()
        }
    }

    struct StaticHandler {
        name: &'static str,
        priority: i32,
        code: u32,
    }

    impl ProblemHandler for StaticHandler {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
            error.downcast_ref::<Wrapper>()?;
            Some(Problem::new(400, self.code, "wrapper"))
        }
    }

    #[test]
    fn test_biz_error_resolves_to_its_code() {
        let resolver = ProblemResolver::with_default_handlers().build();
        let err = BizError::with_message(BizCode::PARAM, "page must be greater than 0");

        let problem = resolver.resolve(&err);

        assert_eq!(problem.status, 400);
        assert_eq!(problem.code, 999);
        assert_eq!(problem.message, "request parameter error");
        assert_eq!(
            problem.developer_message.as_deref(),
            Some("page must be greater than 0"),
        );
    }

    #[test]
    fn test_nested_biz_error_is_found_via_root_cause() {
        let resolver = ProblemResolver::with_default_handlers().build();
        let err = Wrapper::around(
            "outer",
            Wrapper::around("middle", BizError::new(BizCode::NOT_FOUND)),
        );

        let problem = resolver.resolve(&err);

        assert_eq!(problem.status, 404);
        assert_eq!(problem.code, 404);
    }

    #[test]
    fn test_top_level_and_nested_biz_error_agree() {
        let resolver = ProblemResolver::with_default_handlers().build();

        let direct = resolver.resolve(&BizError::new(BizCode::FORBIDDEN));
        let nested = resolver.resolve(&Wrapper::around(
            "outer",
            Wrapper::around("middle", BizError::new(BizCode::FORBIDDEN)),
        ));

        assert_eq!(direct.status, nested.status);
        assert_eq!(direct.code, nested.code);
        assert_eq!(direct.message, nested.message);
    }

    #[test]
    fn test_unregistered_error_falls_back_to_internal() {
        let resolver = ProblemResolver::with_default_handlers().build();
        let err = Wrapper::plain("something odd happened");

        let problem = resolver.resolve(&err);

        assert_eq!(problem.status, 500);
        assert_eq!(problem.code, 500);
        assert_eq!(problem.message, "internal server error");
        assert_eq!(
            problem.developer_message.as_deref(),
            Some("something odd happened"),
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = ProblemResolver::with_default_handlers().build();
        let err = BizError::new(BizCode::CONFLICT);

        let first = resolver.resolve(&err);
        let second = resolver.resolve(&err);

        assert_eq!(first.status, second.status);
        assert_eq!(first.code, second.code);
        assert_eq!(first.message, second.message);
    }

    #[test]
    fn test_duplicate_registration_replaces_and_is_counted() {
        let builder = ProblemResolver::builder()
            .register::<Wrapper>(StaticHandler {
                name: "first",
                priority: 0,
                code: 1,
            })
            .register::<Wrapper>(StaticHandler {
                name: "second",
                priority: 0,
                code: 2,
            });

        assert_eq!(builder.conflict_count(), 1);

        let resolver = builder.build();
        assert_eq!(resolver.handler_count(), 1);

        // The replacement is observable: dispatch reaches the second handler.
        let problem = resolver.resolve(&Wrapper::plain("boom"));
        assert_eq!(problem.code, 2);
    }

    #[test]
    fn test_user_registration_wins_over_defaults() {
        struct CustomBizHandler;

        impl ProblemHandler for CustomBizHandler {
            fn name(&self) -> &'static str {
                "custom-biz"
            }

            fn priority(&self) -> i32 {
                HIGHEST_PRECEDENCE + 1000
            }

            fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
                error.downcast_ref::<BizError>()?;
                Some(Problem::new(418, 1999, "teapot"))
            }
        }

        let builder =
            ProblemResolver::with_default_handlers().register::<BizError>(CustomBizHandler);
        assert_eq!(builder.conflict_count(), 1);

        let resolver = builder.build();
        let problem = resolver.resolve(&BizError::new(BizCode::CONFLICT));

        assert_eq!(problem.status, 418);
        assert_eq!(problem.code, 1999);
    }

    #[test]
    fn test_priority_orders_dispatch() {
        // Both handlers claim Wrapper; the lower priority value must win.
        #[derive(Debug, thiserror::Error)]
        #[error("other")]
        struct Other;

        let resolver = ProblemResolver::builder()
            .register::<Other>(StaticHandler {
                name: "late",
                priority: LOWEST_PRECEDENCE,
                code: 9,
            })
            .register::<Wrapper>(StaticHandler {
                name: "early",
                priority: HIGHEST_PRECEDENCE,
                code: 7,
            })
            .build();

        let types: Vec<_> = resolver.registered_types().collect();
        assert!(types[0].contains("Wrapper"));

        let problem = resolver.resolve(&Wrapper::plain("boom"));
        assert_eq!(problem.code, 7);
    }

    #[test]
    fn test_self_referential_cause_chain_terminates() {
        // A chain whose last element reports itself as its own cause.
        #[derive(Debug)]
        struct Cyclic;

        impl fmt::Display for Cyclic {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "cyclic")
            }
        }

        impl StdError for Cyclic {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(self)
            }
        }

        let resolver = ProblemResolver::with_default_handlers().build();
        let err = Wrapper::around("outer", Cyclic);

        let problem = resolver.resolve(&err);
        assert_eq!(problem.status, 500);
    }

    #[test]
    fn test_default_handler_set_is_complete() {
        let resolver = ProblemResolver::with_default_handlers().build();
        assert_eq!(resolver.handler_count(), 6);
    }
}
