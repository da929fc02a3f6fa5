//! OpenTelemetry tracer provider for the crate's own diagnostics.
//!
//! The provider has no exporter attached. Its job is to give every `tracing`
//! span a real OpenTelemetry span context, which is what the
//! [`InboundCarrier::CurrentSpan`](crate::environment::InboundCarrier::CurrentSpan)
//! carrier reads when discovery runs inside an instrumented request.

use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler, TracerProvider};

/// Creates a tracer provider carrying the given resource.
///
/// Spans are always sampled and ids come from the SDK random generator.
///
/// # Example
///
/// ```rust,ignore
/// use opentelemetry::KeyValue;
/// use opentelemetry_sdk::resource::Resource;
///
/// let resource = Resource::new(vec![KeyValue::new("service.name", "my-app")]);
/// let provider = create_tracer_provider(resource);
/// ```
pub fn create_tracer_provider(resource: Resource) -> TracerProvider {
    TracerProvider::builder()
        .with_config(
            opentelemetry_sdk::trace::Config::default()
                .with_resource(resource)
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default()),
        )
        .build()
}
