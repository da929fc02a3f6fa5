//! Inbound W3C trace-context carriers.
//!
//! A carrier is the already-decoded form of an incoming `traceparent`: either
//! raw request headers extracted through the OpenTelemetry propagator, or the
//! OpenTelemetry context attached to the current `tracing` span.

use crate::domain::TraceParent;
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry::trace::{SpanContext, TraceContextExt};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::collections::HashMap;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Source of an inbound W3C trace context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCarrier {
    /// Incoming request headers. Keys are matched case-insensitively.
    Headers(HashMap<String, String>),

    /// The OpenTelemetry context of `tracing::Span::current()`.
    CurrentSpan,
}

impl InboundCarrier {
    /// Builds a header carrier from `(name, value)` pairs.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::Headers(
            headers
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
        )
    }

    /// Decodes the carrier into a trace parent.
    ///
    /// Returns `None` when the carrier holds no valid span context, or when
    /// its ids do not pass the trace-parent validators.
    #[must_use]
    pub fn trace_parent(&self) -> Option<TraceParent> {
        let context = match self {
            Self::Headers(headers) => {
                TraceContextPropagator::new().extract(&HeaderExtractor(headers))
            }
            Self::CurrentSpan => tracing::Span::current().context(),
        };
        let span = context.span();

        from_span_context(span.span_context())
    }
}

fn from_span_context(span_context: &SpanContext) -> Option<TraceParent> {
    if !span_context.is_valid() {
        tracing::debug!("inbound span context is not valid");
        return None;
    }

    TraceParent::new(
        &format!("{:032x}", span_context.trace_id()),
        &format!("{:016x}", span_context.span_id()),
    )
}

struct HeaderExtractor<'a>(&'a HashMap<String, String>);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .or_else(|| {
                self.0
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}
