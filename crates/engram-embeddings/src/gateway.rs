//! Fail-soft gateway over the provider registry.

use crate::provider::EmbeddingProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Registry of embedding providers keyed by provider id.
///
/// The gateway never raises: an unknown provider, a transport failure, or
/// a malformed response all log a warning and come back as `None`, leaving
/// the caller to store or search without a vector. The registry is
/// consulted on every call, so a provider that was missing earlier is
/// picked up on the next invocation without any cache invalidation.
#[derive(Default)]
pub struct EmbeddingGateway {
    providers: HashMap<String, Arc<dyn EmbeddingProvider>>,
}

impl EmbeddingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own name.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.providers.insert(provider.name().to_string(), provider);
        self
    }

    /// Register a provider under an explicit id.
    pub fn register(&mut self, id: impl Into<String>, provider: Arc<dyn EmbeddingProvider>) {
        self.providers.insert(id.into(), provider);
    }

    /// Convert text to a vector, or absent on any failure.
    pub async fn embed(&self, provider_id: &str, model_id: &str, text: &str) -> Option<Vec<f32>> {
        let Some(provider) = self.providers.get(provider_id) else {
            warn!(provider = provider_id, "Embedding provider not registered");
            return None;
        };

        match provider.embed(model_id, text).await {
            Ok(vector) => Some(vector),
            Err(error) => {
                warn!(
                    provider = provider_id,
                    model = model_id,
                    error = %error,
                    "Embedding generation failed"
                );
                None
            }
        }
    }
}
