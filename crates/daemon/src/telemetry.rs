//! Telemetry setup for OpenTelemetry integration
//!
//! # Environment Variables
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP/HTTP endpoint (e.g., http://localhost:4318)
//! - `OTEL_SERVICE_NAME`: Service name (default: petadoption-daemon)

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Outcome of telemetry setup, reported once logging is up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryStatus {
    /// No endpoint configured
    Disabled,
    /// Endpoint configured but the binary was built without `telemetry`
    FeatureMissing { endpoint: String },
    Enabled { endpoint: String, service_name: String },
}

impl TelemetryStatus {
    pub fn report(&self) {
        match self {
            TelemetryStatus::Disabled => {
                tracing::debug!("OpenTelemetry not configured (OTEL_EXPORTER_OTLP_ENDPOINT not set)")
            }
            TelemetryStatus::FeatureMissing { endpoint } => {
                tracing::warn!(
                    endpoint = %endpoint,
                    "OpenTelemetry endpoint set but feature 'telemetry' not enabled"
                );
            }
            TelemetryStatus::Enabled {
                endpoint,
                service_name,
            } => {
                tracing::info!(
                    endpoint = %endpoint,
                    service_name = %service_name,
                    "OpenTelemetry export enabled"
                );
            }
        }
    }
}

/// Build the OTLP export layer when an endpoint is configured
pub fn otel_layer<S>() -> Result<(Option<BoxedLayer<S>>, TelemetryStatus)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        return Ok((None, TelemetryStatus::Disabled));
    };

    build_layer(endpoint)
}

#[cfg(not(feature = "telemetry"))]
fn build_layer<S>(endpoint: String) -> Result<(Option<BoxedLayer<S>>, TelemetryStatus)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    Ok((None, TelemetryStatus::FeatureMissing { endpoint }))
}

#[cfg(feature = "telemetry")]
fn build_layer<S>(endpoint: String) -> Result<(Option<BoxedLayer<S>>, TelemetryStatus)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "petadoption-daemon".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(&endpoint)
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            service_name.clone(),
        )]))
        .build();

    let tracer = provider.tracer(service_name.clone());
    opentelemetry::global::set_tracer_provider(provider);

    let layer = tracing_opentelemetry::layer().with_tracer(tracer).boxed();

    Ok((
        Some(layer),
        TelemetryStatus::Enabled {
            endpoint,
            service_name,
        },
    ))
}
