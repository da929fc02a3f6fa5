//! Domain layer: the data types every other layer speaks.
//!
//! Nothing in here knows about the hosting environment or the context
//! providers. It holds the error type, the telemetry item being enriched and
//! the trace-parent value type with its parser.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: The mutable telemetry item and its well-known keys
//! - [`trace_parent`]: Trace-parent value type, id validators and the `Request-Id` parser
//!
//! # Examples
//!
//! ```
//! use telemetry_context::domain::{parse_request_id, TraceParent};
//!
//! let parent = parse_request_id("|4bf92f3577b34da6a3ce929d0e0e4736.00f067aa0ba902b7.");
//! assert_eq!(
//!     parent.map(|p| p.span_id().to_string()),
//!     Some("00f067aa0ba902b7".to_string())
//! );
//! ```

pub mod error;
pub mod item;
pub mod trace_parent;

pub use error::{ContextError, Result};
pub use item::{base_types, ext_keys, tag_keys, TelemetryItem};
pub use trace_parent::{is_valid_span_id, is_valid_trace_id, parse_request_id, RawRequestId, TraceParent};
