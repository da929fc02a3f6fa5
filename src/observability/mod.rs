//! Diagnostics for the enrichment pipeline.
//!
//! The crate logs through `tracing` macros. This module installs the
//! subscriber: an `EnvFilter` for levels and an OpenTelemetry layer so spans
//! carry W3C-compatible ids.
//!
//! ```text
//! tracing macros → EnvFilter → tracing-opentelemetry → OpenTelemetry SDK tracer
//! ```
//!
//! # Configuration
//!
//! The level comes from `trace_level` in [`crate::Config`], default `"info"`.
//! Filter directives such as `"telemetry_context=debug"` are accepted.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider construction

mod init;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME};
