use anyhow::Result;
use async_trait::async_trait;

/// Capability contract for an external embedding provider.
///
/// Given a model identifier and input text, an implementation returns the
/// embedding vector or fails. Wire-format validation happens inside the
/// provider: a response without at least one embedding is an error here,
/// so callers above the gateway never inspect response shapes.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Stable provider identifier used for registry lookup (e.g. "openai").
    fn name(&self) -> &str;

    /// Generate an embedding for a single text.
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for a batch of texts.
    async fn embed_batch(&self, model: &str, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Normalize text before embedding (optional).
    ///
    /// Splits on whitespace first so newline- or tab-separated words stay
    /// separate, then strips any remaining control characters inside each
    /// word.
    fn normalize_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
