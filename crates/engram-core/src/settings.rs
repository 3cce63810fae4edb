//! Typed settings over the storage surface's scalar keys.

use anyhow::Result;
use engram_models::MemorySettings;
use engram_storage::{StateStorage, keys};

/// Load settings from the scalar keys.
///
/// Missing keys fall back to the disabled defaults, so a fresh database
/// reads as "memory off" without any initialization step.
pub fn load_settings(state: &StateStorage) -> Result<MemorySettings> {
    Ok(MemorySettings {
        enabled: read_scalar(state, keys::ENABLED)?.unwrap_or(false),
        embedding_provider: read_scalar(state, keys::EMBEDDING_PROVIDER)?.unwrap_or_default(),
        embedding_model: read_scalar(state, keys::EMBEDDING_MODEL)?.unwrap_or_default(),
        memory_provider: read_scalar(state, keys::MEMORY_PROVIDER)?.unwrap_or_default(),
        memory_model: read_scalar(state, keys::MEMORY_MODEL)?.unwrap_or_default(),
    })
}

/// Persist settings to the scalar keys.
pub fn save_settings(state: &StateStorage, settings: &MemorySettings) -> Result<()> {
    write_scalar(state, keys::ENABLED, &settings.enabled)?;
    write_scalar(state, keys::EMBEDDING_PROVIDER, &settings.embedding_provider)?;
    write_scalar(state, keys::EMBEDDING_MODEL, &settings.embedding_model)?;
    write_scalar(state, keys::MEMORY_PROVIDER, &settings.memory_provider)?;
    write_scalar(state, keys::MEMORY_MODEL, &settings.memory_model)?;
    Ok(())
}

fn read_scalar<T: serde::de::DeserializeOwned>(
    state: &StateStorage,
    key: &str,
) -> Result<Option<T>> {
    match state.get_raw(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

fn write_scalar<T: serde::Serialize>(state: &StateStorage, key: &str, value: &T) -> Result<()> {
    state.put_raw(key, &serde_json::to_vec(value)?)
}
