//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros to an `EnvFilter` and to the OpenTelemetry layer, so
//! the crate's diagnostics are filtered by level and every span carries an
//! OpenTelemetry context.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported in the tracer resource and used as the tracer name.
pub const SERVICE_NAME: &str = "telemetry-context";

/// Initializes the global tracing subscriber.
///
/// # Trace Level Resolution
///
/// 1. `config.trace_level` if set
/// 2. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: only the first call installs a subscriber. Later calls, or a
/// subscriber installed by the host, leave the existing one in place.
///
/// # Example
///
/// ```rust
/// use telemetry_context::observability::init_tracing;
/// use telemetry_context::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let provider = tracer::create_tracer_provider(resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    if subscriber.try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
