//! Random identifier generation backed by the OpenTelemetry SDK generator.

use opentelemetry_sdk::trace::{IdGenerator, RandomIdGenerator};

/// A fresh 32-char lowercase hex trace id.
pub(crate) fn new_trace_id() -> String {
    format!("{:032x}", RandomIdGenerator::default().new_trace_id())
}

/// A fresh 16-char lowercase hex id, used for span-sized identifiers such as sessions.
pub(crate) fn new_short_id() -> String {
    format!("{:016x}", RandomIdGenerator::default().new_span_id())
}
