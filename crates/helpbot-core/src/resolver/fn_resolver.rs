//! Closure-backed resolver.

use std::future::Future;

use helpbot_types::error::ResolverError;

use super::AnswerResolver;

/// Adapts an async closure `Fn(String) -> Future` into an [`AnswerResolver`].
///
/// ```
/// use helpbot_core::resolver::{BoxAnswerResolver, FnResolver};
/// use helpbot_types::error::ResolverError;
///
/// let resolver = FnResolver::new("upper", |question: String| async move {
///     Ok::<_, ResolverError>(Some(question.to_uppercase()))
/// });
/// let boxed = BoxAnswerResolver::new(resolver);
/// assert_eq!(boxed.name(), "upper");
/// ```
pub struct FnResolver<F> {
    name: String,
    f: F,
}

impl<F> FnResolver<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F, Fut> AnswerResolver for FnResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>, ResolverError>> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(
        &self,
        question: &str,
    ) -> impl Future<Output = Result<Option<String>, ResolverError>> + Send {
        (self.f)(question.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_receives_question() {
        let resolver = FnResolver::new("len", |question: String| async move {
            Ok::<_, ResolverError>(Some(question.len().to_string()))
        });
        assert_eq!(resolver.resolve("four").await.unwrap().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_closure_error() {
        let resolver = FnResolver::new("broken", |_question: String| async move {
            Err::<Option<String>, _>(ResolverError::Backend("HTTP 503".to_string()))
        });
        let err = resolver.resolve("hi").await.unwrap_err();
        assert_eq!(err.to_string(), "resolver backend error: HTTP 503");
    }
}
