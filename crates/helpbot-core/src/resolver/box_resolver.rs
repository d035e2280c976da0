//! BoxAnswerResolver -- object-safe dynamic dispatch wrapper for AnswerResolver.
//!
//! 1. Define an object-safe `AnswerResolverDyn` trait with boxed futures
//! 2. Blanket-impl `AnswerResolverDyn` for all `T: AnswerResolver`
//! 3. `BoxAnswerResolver` wraps `Box<dyn AnswerResolverDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use helpbot_types::error::ResolverError;

use super::AnswerResolver;

/// Object-safe version of [`AnswerResolver`] with boxed futures.
pub trait AnswerResolverDyn: Send + Sync {
    fn name(&self) -> &str;

    fn resolve_boxed<'a>(
        &'a self,
        question: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, ResolverError>> + Send + 'a>>;
}

impl<T: AnswerResolver> AnswerResolverDyn for T {
    fn name(&self) -> &str {
        AnswerResolver::name(self)
    }

    fn resolve_boxed<'a>(
        &'a self,
        question: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, ResolverError>> + Send + 'a>> {
        Box::pin(self.resolve(question))
    }
}

/// Type-erased answer resolver, so a widget is not generic over its backend.
pub struct BoxAnswerResolver {
    inner: Box<dyn AnswerResolverDyn + Send + Sync>,
}

impl BoxAnswerResolver {
    pub fn new<T: AnswerResolver + 'static>(resolver: T) -> Self {
        Self {
            inner: Box::new(resolver),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn resolve(&self, question: &str) -> Result<Option<String>, ResolverError> {
        self.inner.resolve_boxed(question).await
    }
}

impl std::fmt::Debug for BoxAnswerResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxAnswerResolver")
            .field("name", &self.name())
            .finish()
    }
}
