//! Engram Storage - durable key-value surface for the memory subsystem.
//!
//! This crate provides the persistence layer, using redb as the embedded
//! database. It exposes a byte-level API addressed by fixed string keys so
//! the typed layer above it (engram-core) stays free of storage concerns
//! and the two crates avoid a circular dependency.
//!
//! # Keys
//!
//! - `memories` - the full entry collection as one JSON array
//! - `memory.enabled` - master switch
//! - `memory.embedding_provider` / `memory.embedding_model` - embedding ids
//! - `memory.provider` / `memory.model` - reserved for a future
//!   non-embedding memory backend; persisted but unused

pub mod state;

use anyhow::Result;
use redb::Database;
use std::sync::Arc;

pub use state::{StateStorage, keys};

/// Central storage manager that initializes the state table.
pub struct Storage {
    db: Arc<Database>,
    pub state: StateStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will create the database file if it doesn't exist and
    /// initialize the required table.
    pub fn new(path: &str) -> Result<Self> {
        let db = Arc::new(Database::create(path)?);
        let state = StateStorage::new(db.clone())?;

        Ok(Self { db, state })
    }

    /// Get a reference to the underlying database
    pub fn get_db(&self) -> Arc<Database> {
        self.db.clone()
    }
}
