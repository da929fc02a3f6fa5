//! Operation identity provider.
//!
//! The telemetry trace names the operation every item belongs to. It is
//! created once per execution scope. Its trace id is always its own: when a
//! trace parent was discovered, only the parent's span id is adopted.

use super::ids;
use crate::domain::{is_valid_span_id, is_valid_trace_id};

/// Trace id, parent span id and name of the current operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryTrace {
    pub trace_id: String,
    pub parent_id: Option<String>,
    pub name: Option<String>,
}

impl TelemetryTrace {
    /// Creates the operation identity.
    ///
    /// A supplied trace id that fails validation is reported and replaced by
    /// a generated one. A supplied parent id that fails validation is
    /// reported and dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use telemetry_context::providers::TelemetryTrace;
    ///
    /// let trace = TelemetryTrace::new(None, Some("00f067aa0ba902b7"), Some("/home"));
    /// assert_eq!(trace.trace_id.len(), 32);
    /// assert_eq!(trace.parent_id.as_deref(), Some("00f067aa0ba902b7"));
    /// ```
    #[must_use]
    pub fn new(trace_id: Option<&str>, parent_id: Option<&str>, name: Option<&str>) -> Self {
        let trace_id = match trace_id {
            Some(id) if is_valid_trace_id(id) => id.to_string(),
            Some(id) => {
                tracing::warn!(trace_id = %id, "invalid operation trace id, generating a new one");
                ids::new_trace_id()
            }
            None => ids::new_trace_id(),
        };

        let parent_id = parent_id.and_then(|id| {
            if is_valid_span_id(id) {
                Some(id.to_string())
            } else {
                tracing::warn!(parent_id = %id, "invalid operation parent id, ignoring it");
                None
            }
        });

        Self {
            trace_id,
            parent_id,
            name: name.map(String::from),
        }
    }
}
