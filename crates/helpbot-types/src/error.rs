use thiserror::Error;

/// Errors from loading knowledge packs and configuration files.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("failed to parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("unsupported knowledge file format: '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),
}

/// Errors returned by an external answer resolver.
///
/// The widget never propagates these: a failed resolution is logged and
/// answered with the not-found message.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("resolver backend error: {0}")]
    Backend(String),

    #[error("resolver returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("resolver unavailable")]
    Unavailable,
}

/// Errors from widget operations.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("quick reply {index} out of range ({len} available)")]
    QuickReplyOutOfRange { index: usize, len: usize },
}
