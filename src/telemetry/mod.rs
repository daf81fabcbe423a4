//! OpenTelemetry plumbing: an explicitly owned tracer provider and the
//! [`RecordSpan`] trait used to write domain values onto spans.
//!
//! Nothing here installs global state. Callers create a [`TelemetryProvider`]
//! at startup, hand its tracer to the guardrail wrapper, and call
//! [`TelemetryProvider::shutdown`] before exit so buffered spans are flushed.

pub mod record;

use std::collections::HashMap;

use opentelemetry::KeyValue;
use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry_otlp::{SpanExporter, WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{Tracer, TracerProvider};
use opentelemetry_semantic_conventions::resource::SERVICE_NAME;
use tracing::{debug, warn};

pub use record::RecordSpan;

use crate::config::models::Config;

pub const TRACER_NAME: &str = "openllmtelemetry";

pub struct TelemetryProvider {
    provider: TracerProvider,
}

impl TelemetryProvider {
    /// Build an OTLP/HTTP exporter towards `config.trace_endpoint`, tagging
    /// every span batch with the dataset it belongs to.
    ///
    /// Must be called from within a Tokio runtime; the batch processor runs on it.
    pub fn init(config: &Config, dataset_id: &str, service_name: &str) -> Result<Self, TraceError> {
        let mut headers = HashMap::new();
        match &config.whylabs_api_key {
            Some(api_key) => {
                headers.insert("X-API-Key".to_string(), api_key.clone());
            }
            None => warn!("WHYLABS_API_KEY not set; trace export will likely be rejected"),
        }
        headers.insert("X-WHYLABS-RESOURCE".to_string(), dataset_id.to_string());

        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(config.trace_endpoint.clone())
            .with_headers(headers)
            .build()?;

        let resource = Resource::new(vec![KeyValue::new(SERVICE_NAME, service_name.to_string())]);
        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
            .build();

        debug!(
            endpoint = %config.trace_endpoint,
            dataset_id,
            service_name,
            "OpenTelemetry tracer provider initialized"
        );

        Ok(Self { provider })
    }

    /// Wrap an already configured provider, e.g. one with an in-memory exporter.
    pub fn from_provider(provider: TracerProvider) -> Self {
        Self { provider }
    }

    pub fn tracer(&self) -> Tracer {
        self.provider.tracer(TRACER_NAME)
    }

    /// Flush buffered spans and stop the exporter.
    pub fn shutdown(self) -> Result<(), TraceError> {
        self.provider.shutdown()
    }
}
