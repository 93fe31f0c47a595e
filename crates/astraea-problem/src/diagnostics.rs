//! Diagnostic disclosure policy.
//!
//! Whether an error response may include its rendered error chain is a
//! tri-state decision: a process-wide force-disable always wins; otherwise
//! either the per-request opt-in (the [`TRACE_QUERY_FLAG`] query parameter)
//! or the process-wide enable includes the chain; the default is off.

use std::error::Error as StdError;

/// Media type of problem payloads.
pub const PROBLEM_MEDIA_TYPE: &str = "application/problem+json";

/// Query parameter whose mere presence requests stack-trace inclusion.
pub const TRACE_QUERY_FLAG: &str = "trace";

/// Environment variable enabling trace inclusion process-wide.
pub const TRACE_ENABLED_ENV: &str = "ASTRAEA_TRACE_ENABLED";

/// Environment variable disabling trace inclusion unconditionally,
/// overriding both the process-wide enable and per-request opt-ins.
pub const TRACE_FORCE_DISABLED_ENV: &str = "ASTRAEA_TRACE_FORCE_DISABLED";

/// Diagnostic disclosure configuration for a responder.
///
/// # Example
///
/// ```rust
/// use astraea_problem::Diagnostics;
///
/// let diagnostics = Diagnostics::new().force_disable_trace(true);
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
///
/// // Force-disable wins even over a per-request opt-in.
/// assert!(diagnostics.stacktrace(true, &err).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    trace_enabled: bool,
    trace_force_disabled: bool,
}

impl Diagnostics {
    /// Creates the default policy: traces only on per-request opt-in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the policy from [`TRACE_ENABLED_ENV`] and
    /// [`TRACE_FORCE_DISABLED_ENV`]; any value, including empty, counts as
    /// set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            trace_enabled: std::env::var_os(TRACE_ENABLED_ENV).is_some(),
            trace_force_disabled: std::env::var_os(TRACE_FORCE_DISABLED_ENV).is_some(),
        }
    }

    /// Sets the process-wide enable.
    #[must_use]
    pub fn enable_trace(mut self, enabled: bool) -> Self {
        self.trace_enabled = enabled;
        self
    }

    /// Sets the unconditional disable.
    #[must_use]
    pub fn force_disable_trace(mut self, disabled: bool) -> Self {
        self.trace_force_disabled = disabled;
        self
    }

    /// Returns the rendered error chain when disclosure is allowed.
    ///
    /// `request_enabled` is the per-request opt-in signal. Precedence:
    /// force-disable beats everything, then request opt-in or the
    /// process-wide enable, then off.
    #[must_use]
    pub fn stacktrace(
        &self,
        request_enabled: bool,
        error: &(dyn StdError + 'static),
    ) -> Option<Vec<String>> {
        if self.trace_force_disabled {
            return None;
        }
        if request_enabled || self.trace_enabled {
            return Some(error_chain(error));
        }
        None
    }
}

/// Renders an error and its cause chain, one line per cause.
///
/// Stops when a cause points back at the previously seen one, so
/// self-referential chains cannot loop.
#[must_use]
pub fn error_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    let mut lines = vec![error.to_string()];
    let mut previous = error;
    let mut cause = error.source();
    while let Some(next) = cause {
        if same_error_instance(previous, next) {
            break;
        }
        lines.push(format!("caused by: {next}"));
        previous = next;
        cause = next.source();
    }
    lines
}

/// Pointer identity of two error references, ignoring vtable metadata.
pub(crate) fn same_error_instance(
    a: &(dyn StdError + 'static),
    b: &(dyn StdError + 'static),
) -> bool {
    std::ptr::eq(
        (a as *const dyn StdError).cast::<()>(),
        (b as *const dyn StdError).cast::<()>(),
    )
}
