//! External answer resolution.
//!
//! A host application can replace local knowledge lookup with its own
//! asynchronous resolver (an HTTP API, an LLM, a database). The widget calls
//! it once per turn instead of the matcher.

pub mod box_resolver;
pub mod fn_resolver;

pub use box_resolver::BoxAnswerResolver;
pub use fn_resolver::FnResolver;

use helpbot_types::error::ResolverError;

/// Trait for external answer backends.
///
/// Uses native async fn in traits (RPITIT). `Ok(None)` means "no answer";
/// the widget treats it, an empty answer, and any `Err` as not found.
///
/// There is no timeout: a resolver that never completes stalls the turn, so
/// implementations must bound their own latency.
pub trait AnswerResolver: Send + Sync {
    /// Human-readable resolver name, used in logs.
    fn name(&self) -> &str;

    /// Resolve a trimmed, non-empty question.
    fn resolve(
        &self,
        question: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, ResolverError>> + Send;
}
