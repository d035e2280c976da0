//! Global tracing subscriber for helpbot binaries.
//!
//! Log lines go to stderr through a `fmt` layer. Optionally, spans are also
//! bridged to OpenTelemetry and dumped by the stdout span exporter; that
//! exporter has no configurable writer, so callers printing machine-readable
//! output on stdout must not enable it.
//!
//! ```no_run
//! use tracing_subscriber::EnvFilter;
//!
//! helpbot_observe::tracing_setup::init_tracing_with_filter(EnvFilter::new("info"), false)
//!     .expect("tracing already initialized");
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Kept so `shutdown_tracing` can flush spans before exit.
static OTEL_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Install the subscriber, filtering with `RUST_LOG`.
pub fn init_tracing(enable_otel: bool) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_with_filter(EnvFilter::from_default_env(), enable_otel)
}

/// Install the subscriber with an explicit filter.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing_with_filter(
    env_filter: EnvFilter,
    enable_otel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    // `Option<Layer>` is itself a layer; `None` is a no-op.
    let span_export = enable_otel.then(|| {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("helpbot");
        let _ = OTEL_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer)
        .with(span_export)
        .try_init()?;
    Ok(())
}

/// Flush and stop span export. No-op when OpenTelemetry was never enabled.
pub fn shutdown_tracing() {
    let Some(provider) = OTEL_PROVIDER.get() else {
        return;
    };
    if let Err(e) = provider.shutdown() {
        eprintln!("Warning: span exporter shutdown failed: {e}");
    }
}
