//! Trace identifier generation.
//!
//! Error responses and server-side log entries carry a per-request trace id
//! so that a client-reported failure can be matched to its log records. The
//! id is taken from the inbound [`TRACE_ID_HEADER`] when present and
//! generated here otherwise.

use uuid::Uuid;

/// Conventional header carrying an inbound trace id.
pub const TRACE_ID_HEADER: &str = "x-request-id";

/// Generates a new trace id: a random UUID rendered as 32 lowercase hex
/// digits without hyphens.
#[must_use]
pub fn trace_id() -> String {
    Uuid::new_v4().simple().to_string()
}
