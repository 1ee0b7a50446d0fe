// Logging and trace export for SkillVerify binaries
//
// Console output goes through tracing-subscriber (plain or JSON lines).
// When an OTLP endpoint is configured, spans are also batched to a collector.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
    Resource,
};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Span field names used across the workflow services
pub mod fields {
    pub const NOTIFICATION_ID: &str = "notification.id";
    pub const NOTIFICATION_STATUS: &str = "notification.status";
}

const DEFAULT_SERVICE_NAME: &str = "skillverify";
const DEFAULT_LOG_FILTER: &str = "info";
const OTLP_EXPORT_TIMEOUT: Duration = Duration::from_secs(10);

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Plain
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `service.name` resource attribute
    pub service_name: String,
    pub service_version: Option<String>,
    /// Collector address; `None` keeps tracing local
    pub otlp_endpoint: Option<String>,
    /// `deployment.environment` resource attribute
    pub environment: Option<String>,
    /// EnvFilter directive string
    pub log_filter: Option<String>,
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_version: None,
            otlp_endpoint: None,
            environment: None,
            log_filter: None,
            log_format: LogFormat::default(),
        }
    }
}

impl TelemetryConfig {
    /// Read `OTEL_SERVICE_NAME`, `OTEL_SERVICE_VERSION`,
    /// `OTEL_EXPORTER_OTLP_ENDPOINT`, `OTEL_ENVIRONMENT`,
    /// `RUST_LOG` (falling back to `LOG_LEVEL`) and `LOG_FORMAT`.
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            service_name: env_value("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            service_version: env_value("OTEL_SERVICE_VERSION"),
            otlp_endpoint: env_value("OTEL_EXPORTER_OTLP_ENDPOINT"),
            environment: env_value("OTEL_ENVIRONMENT"),
            log_filter: env_value("RUST_LOG").or_else(|| env_value("LOG_LEVEL")),
            log_format: env_value("LOG_FORMAT")
                .map(|s| LogFormat::from_str(&s))
                .unwrap_or_default(),
        }
    }

    fn resource(&self) -> Resource {
        let mut attributes = vec![KeyValue::new("service.name", self.service_name.clone())];
        if let Some(version) = &self.service_version {
            attributes.push(KeyValue::new("service.version", version.clone()));
        }
        if let Some(environment) = &self.environment {
            attributes.push(KeyValue::new("deployment.environment", environment.clone()));
        }
        Resource::builder().with_attributes(attributes).build()
    }

    fn env_filter(&self) -> EnvFilter {
        self.log_filter
            .as_deref()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Flushes and stops span export on drop. Hold it until shutdown.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        let Some(provider) = self.provider.take() else {
            return;
        };
        // The subscriber may already be gone here
        if let Err(e) = provider.shutdown() {
            eprintln!("telemetry shutdown failed: {e:?}");
        }
    }
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init_telemetry(config: TelemetryConfig) -> TelemetryGuard {
    let export = config
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| (endpoint, otlp_provider(endpoint, config.resource())));

    let provider = match &export {
        Some((_, Ok(provider))) => Some(provider.clone()),
        _ => None,
    };
    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(DEFAULT_SERVICE_NAME)));

    let (plain, json) = match config.log_format {
        LogFormat::Plain => (Some(tracing_subscriber::fmt::layer().with_target(true)), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(plain)
        .with(json)
        .with(otel_layer)
        .init();

    // Reported only now that a subscriber exists
    match export {
        Some((endpoint, Ok(_))) => tracing::info!(endpoint, "Exporting traces over OTLP"),
        Some((endpoint, Err(e))) => {
            tracing::warn!(endpoint, error = %e, "OTLP exporter unavailable, traces stay local")
        }
        None => tracing::debug!("OTLP export off"),
    }

    TelemetryGuard { provider }
}

fn otlp_provider(endpoint: &str, resource: Resource) -> anyhow::Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_timeout(OTLP_EXPORT_TIMEOUT)
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .with_batch_exporter(exporter)
        .build();

    Ok(provider)
}
