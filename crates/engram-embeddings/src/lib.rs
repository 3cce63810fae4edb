//! Engram Embeddings - text-to-vector gateway.
//!
//! Providers speak to an external embedding API and return a vector or an
//! error; the [`EmbeddingGateway`] wraps a registry of providers and
//! converts any failure into a logged absence so memory operations degrade
//! instead of breaking.

mod gateway;
mod openai;
mod provider;
mod voyage;

pub use gateway::EmbeddingGateway;
pub use openai::OpenAiEmbedding;
pub use provider::EmbeddingProvider;
pub use voyage::VoyageEmbedding;
