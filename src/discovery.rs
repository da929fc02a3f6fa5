//! Trace-parent discovery from ambient signals.
//!
//! Discovery looks for the trace parent of the current execution scope in a
//! fixed order and stops at the first source that yields a valid value:
//!
//! 1. The inbound W3C carrier, already decoded upstream
//! 2. Document `<meta name="Request-Id">` elements
//! 3. `Request-Id` server-timing metrics on the first navigation entry
//!
//! Within a source every candidate is tried before moving on, so a malformed
//! first `Request-Id` does not hide a valid second one.

use crate::domain::{parse_request_id, TraceParent};
use crate::environment::Environment;

/// Name of the metadata element and server-timing metric carrying the token.
pub const REQUEST_ID_NAME: &str = "Request-Id";

/// Searches the environment for the trace parent of the current scope.
///
/// Absent sources are skipped silently. Returns `None` when nothing valid is
/// found.
///
/// # Example
///
/// ```
/// use telemetry_context::discovery::discover_trace_parent;
/// use telemetry_context::environment::{Document, HostEnvironment, MetaElement};
///
/// let env = HostEnvironment::interactive().with_document(Document {
///     meta: vec![MetaElement::new(
///         "Request-Id",
///         "|4bf92f3577b34da6a3ce929d0e0e4736.00f067aa0ba902b7.",
///     )],
/// });
///
/// let parent = discover_trace_parent(&env).unwrap();
/// assert_eq!(parent.span_id(), "00f067aa0ba902b7");
/// ```
#[must_use]
pub fn discover_trace_parent(env: &dyn Environment) -> Option<TraceParent> {
    // The current-span carrier must be read before this function's span is entered.
    let inbound = from_inbound_carrier(env);
    let _span =
        tracing::debug_span!("discover_trace_parent", inbound = inbound.is_some()).entered();

    let found = inbound
        .or_else(|| from_document(env))
        .or_else(|| from_server_timing(env));

    match &found {
        Some(parent) => tracing::debug!(
            trace_id = %parent.trace_id(),
            span_id = %parent.span_id(),
            "discovered trace parent"
        ),
        None => tracing::debug!("no trace parent found in environment"),
    }

    found
}

fn from_inbound_carrier(env: &dyn Environment) -> Option<TraceParent> {
    env.inbound_carrier()?.trace_parent()
}

fn from_document(env: &dyn Environment) -> Option<TraceParent> {
    env.document()?
        .meta_contents(REQUEST_ID_NAME)
        .find_map(|content| parse_request_id(content))
}

fn from_server_timing(env: &dyn Environment) -> Option<TraceParent> {
    env.performance()?
        .navigation
        .first()?
        .server_timing
        .iter()
        .filter(|timing| timing.name == REQUEST_ID_NAME)
        .find_map(|timing| parse_request_id(timing.description.as_str()))
}
