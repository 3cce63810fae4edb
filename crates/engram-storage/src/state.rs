//! Memory state storage - byte-level API over fixed well-known keys.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("memory_state");

/// Well-known keys on the state surface.
pub mod keys {
    /// The full entry collection, serialized as one JSON array.
    pub const MEMORIES: &str = "memories";
    /// Master switch for the memory subsystem.
    pub const ENABLED: &str = "memory.enabled";
    /// Embedding provider identifier.
    pub const EMBEDDING_PROVIDER: &str = "memory.embedding_provider";
    /// Embedding model identifier.
    pub const EMBEDDING_MODEL: &str = "memory.embedding_model";
    /// Reserved: future non-embedding memory provider.
    pub const MEMORY_PROVIDER: &str = "memory.provider";
    /// Reserved: future non-embedding memory model.
    pub const MEMORY_MODEL: &str = "memory.model";
}

/// Key-value storage with a byte-level API.
///
/// Values are opaque bytes; serialization belongs to the typed layer.
/// Missing keys read back as `None`, which the typed layer interprets as
/// an empty collection or disabled settings.
#[derive(Clone)]
pub struct StateStorage {
    db: Arc<Database>,
}

impl StateStorage {
    /// Create a new StateStorage instance, initializing the table.
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(STATE_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Store raw bytes under a key.
    pub fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.insert(key, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get raw bytes by key.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;

        if let Some(value) = table.get(key)? {
            Ok(Some(value.value().to_vec()))
        } else {
            Ok(None)
        }
    }

    /// Delete by key, returns true if the key existed.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        Ok(table.get(key)?.is_some())
    }

    /// List all keys with an optional prefix filter.
    pub fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        let mut found = Vec::new();

        for entry in table.iter()? {
            let (key, _) = entry?;
            let key_str = key.value();
            if prefix.is_none() || key_str.starts_with(prefix.unwrap()) {
                found.push(key_str.to_string());
            }
        }

        Ok(found)
    }
}
