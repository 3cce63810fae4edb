use anyhow::{Context, Result};
use engram_core::MemoryStore;
use engram_embeddings::{EmbeddingGateway, OpenAiEmbedding, VoyageEmbedding};
use engram_storage::Storage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Resolve the database path, creating the data directory if needed.
pub fn resolve_db_path(override_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_dir()
        .context("Could not determine data directory")?
        .join("engram");
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("engram.db"))
}

/// Build the embedding gateway from provider API keys in the environment.
///
/// Providers without a key are simply not registered; the store degrades
/// gracefully when a configured provider is missing.
pub fn build_gateway() -> EmbeddingGateway {
    let mut gateway = EmbeddingGateway::new();

    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        gateway = gateway.with_provider(Arc::new(OpenAiEmbedding::new(api_key)));
        debug!("Registered openai embedding provider");
    }
    if let Ok(api_key) = std::env::var("VOYAGE_API_KEY") {
        gateway = gateway.with_provider(Arc::new(VoyageEmbedding::new(api_key)));
        debug!("Registered voyage embedding provider");
    }

    gateway
}

/// Open the database and load the memory store.
pub fn prepare_store(db_path: Option<&str>) -> Result<MemoryStore> {
    let path = resolve_db_path(db_path)?;
    let storage = Storage::new(path.to_str().context("Database path is not valid UTF-8")?)?;
    let gateway = Arc::new(build_gateway());
    MemoryStore::new(storage.state, gateway)
}
