//! Failover AI Provider - Wrapper that provides automatic failover between providers.
//!
//! When the primary provider fails with a transient error (rate limit, unavailable,
//! network, timeout), the request is retried once on the fallback provider if one
//! is configured.
//!
//! # Example
//!
//! ```ignore
//! let primary = Arc::new(GeminiProvider::new(gemini_config)?);
//! let fallback = Arc::new(OpenAIProvider::new(openai_config)?);
//!
//! let provider = FailoverAIProvider::new(primary).with_fallback(fallback);
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{AIProvider, CompletionRequest, CompletionResponse, OracleError, ProviderInfo};

/// AI provider wrapper with automatic failover support.
pub struct FailoverAIProvider {
    primary: Arc<dyn AIProvider>,
    fallback: Option<Arc<dyn AIProvider>>,
}

impl FailoverAIProvider {
    /// Creates a new failover provider with only a primary provider.
    pub fn new(primary: Arc<dyn AIProvider>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Adds a fallback provider.
    pub fn with_fallback(mut self, fallback: Arc<dyn AIProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Returns true if a fallback is configured.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[async_trait]
impl AIProvider for FailoverAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, OracleError> {
        let err = match self.primary.complete(request.clone()).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        match &self.fallback {
            Some(fallback) if err.is_retryable() => {
                tracing::warn!(
                    trace_id = %request.trace_id,
                    primary = %self.primary.provider_info().name,
                    fallback = %fallback.provider_info().name,
                    reason = %err,
                    "Primary completion provider failed, using fallback"
                );
                fallback.complete(request).await
            }
            _ => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn request() -> CompletionRequest {
        CompletionRequest::new("User: hi\nAssistant:")
    }

    #[tokio::test]
    async fn uses_primary_when_successful() {
        let primary = MockAIProvider::new().with_response("Primary response");
        let fallback = MockAIProvider::new().with_response("Fallback response");

        let provider = FailoverAIProvider::new(Arc::new(primary.clone()))
            .with_fallback(Arc::new(fallback.clone()));

        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "Primary response");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn falls_back_on_retryable_error() {
        let primary = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 30,
        });
        let fallback = MockAIProvider::new().with_response("Fallback response");

        let provider = FailoverAIProvider::new(Arc::new(primary.clone()))
            .with_fallback(Arc::new(fallback.clone()));

        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "Fallback response");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn does_not_fall_back_on_authentication_failure() {
        let primary = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let fallback = MockAIProvider::new().with_response("Fallback response");

        let provider = FailoverAIProvider::new(Arc::new(primary))
            .with_fallback(Arc::new(fallback.clone()));

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, OracleError::AuthenticationFailed));
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn returns_error_without_fallback() {
        let primary = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });

        let provider = FailoverAIProvider::new(Arc::new(primary));

        assert!(!provider.has_fallback());
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, OracleError::Unavailable { .. }));
    }

    #[test]
    fn reports_primary_provider_info() {
        let primary = MockAIProvider::new()
            .with_provider_info(ProviderInfo::new("gemini", "gemini-pro"));
        let provider = FailoverAIProvider::new(Arc::new(primary));

        assert_eq!(provider.provider_info().name, "gemini");
    }
}
