//! Observability setup for helpbot: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
