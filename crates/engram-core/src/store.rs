//! The memory store: entry lifecycle, persistence, and semantic retrieval.
//!
//! The store owns the in-memory entry collection (insertion order) and
//! mirrors every mutation to the `memories` key on the storage surface.
//! Embedding acquisition is best-effort through the gateway: a memory that
//! cannot be embedded is still stored, a query that cannot be embedded
//! matches nothing. None of the degradation cases raise; they are logged
//! and reported through [`StoreOutcome`].

use crate::{importance, settings, similarity};
use anyhow::Result;
use engram_embeddings::EmbeddingGateway;
use engram_models::{
    ChatRole, MemoryEntry, MemoryMetadataPatch, MemorySettings, SearchOptions, SearchResult,
};
use engram_storage::{StateStorage, keys};
use std::sync::Arc;
use tracing::{debug, warn};

/// Parameters for storing a memory.
#[derive(Debug, Clone)]
pub struct StoreParams {
    /// Free-form origin tag
    pub source: String,
    /// Importance score in [0, 1]
    pub importance: Option<f32>,
    /// Tags for categorization
    pub tags: Vec<String>,
    /// Conversation partition key
    pub session_id: Option<String>,
}

impl Default for StoreParams {
    fn default() -> Self {
        Self {
            source: "chat".to_string(),
            importance: None,
            tags: Vec::new(),
            session_id: None,
        }
    }
}

/// Result of a store operation.
///
/// Callers that only care about fail-open behavior can ignore this;
/// callers that need to distinguish "stored without a vector" from
/// "not stored at all" inspect the variant.
#[derive(Debug, Clone)]
pub enum StoreOutcome {
    /// Entry persisted with an embedding
    Stored(MemoryEntry),
    /// Entry persisted, but embedding generation failed or was absent
    StoredWithoutEmbedding(MemoryEntry),
    /// Store is disabled or unconfigured; nothing was persisted
    Disabled,
}

impl StoreOutcome {
    /// The persisted entry, if anything was stored.
    pub fn entry(&self) -> Option<&MemoryEntry> {
        match self {
            StoreOutcome::Stored(entry) | StoreOutcome::StoredWithoutEmbedding(entry) => {
                Some(entry)
            }
            StoreOutcome::Disabled => None,
        }
    }
}

/// Statistics about the stored collection.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MemoryStats {
    pub total: usize,
    pub embedded: usize,
    pub oldest: Option<i64>,
    pub newest: Option<i64>,
}

/// Semantic memory store for a conversational agent.
pub struct MemoryStore {
    entries: Vec<MemoryEntry>,
    settings: MemorySettings,
    gateway: Arc<EmbeddingGateway>,
    state: StateStorage,
}

impl MemoryStore {
    /// Load the store from the storage surface.
    ///
    /// A fresh database yields an empty, disabled store.
    pub fn new(state: StateStorage, gateway: Arc<EmbeddingGateway>) -> Result<Self> {
        let settings = settings::load_settings(&state)?;
        let entries = Self::load_entries(&state)?;

        Ok(Self {
            entries,
            settings,
            gateway,
            state,
        })
    }

    fn load_entries(state: &StateStorage) -> Result<Vec<MemoryEntry>> {
        match state.get_raw(keys::MEMORIES)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Mirror the collection to the storage surface.
    ///
    /// Persistence failures are absorbed: the in-memory collection stays
    /// authoritative for the life of the process and the failure is logged.
    fn persist(&self) {
        let result = serde_json::to_vec(&self.entries)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| self.state.put_raw(keys::MEMORIES, &bytes));

        if let Err(error) = result {
            warn!(error = %error, "Failed to persist memory collection");
        }
    }

    pub fn settings(&self) -> &MemorySettings {
        &self.settings
    }

    /// Replace the settings and persist them to the scalar keys.
    pub fn update_settings(&mut self, settings: MemorySettings) -> Result<()> {
        settings::save_settings(&self.state, &settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Whether memories can be stored and searched.
    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    /// Store a memory with a best-effort embedding.
    pub async fn store_memory(&mut self, content: &str, params: StoreParams) -> StoreOutcome {
        if !self.is_configured() {
            warn!("Memory store is disabled or unconfigured; dropping memory");
            return StoreOutcome::Disabled;
        }

        let mut entry = MemoryEntry::new(content, params.source).with_tags(params.tags);
        if let Some(importance) = params.importance {
            entry = entry.with_importance(importance);
        }
        if let Some(session_id) = params.session_id {
            entry = entry.with_session(session_id);
        }

        let embedding = self
            .gateway
            .embed(
                &self.settings.embedding_provider,
                &self.settings.embedding_model,
                content,
            )
            .await;
        let embedded = embedding.is_some();
        entry.embedding = embedding;

        self.entries.push(entry.clone());
        self.persist();
        debug!(id = %entry.id, embedded, "Stored memory");

        if embedded {
            StoreOutcome::Stored(entry)
        } else {
            StoreOutcome::StoredWithoutEmbedding(entry)
        }
    }

    /// Store a structured chat message, scoring importance from its
    /// content and role.
    pub async fn store_chat_message(
        &mut self,
        content: &str,
        role: ChatRole,
        session_id: Option<String>,
    ) -> StoreOutcome {
        let params = StoreParams {
            importance: Some(importance::score(content, role)),
            tags: vec!["chat".to_string(), role.tag().to_string()],
            session_id,
            ..Default::default()
        };
        self.store_memory(content, params).await
    }

    /// Search memories by semantic similarity to the query text.
    ///
    /// Returns empty when unconfigured, when the collection is empty, or
    /// when the query cannot be embedded (a query without a vector cannot
    /// be matched; that is policy, not an error).
    pub async fn search_memories(&self, options: &SearchOptions) -> Vec<SearchResult> {
        if !self.is_configured() {
            debug!("Memory store is disabled or unconfigured; empty search result");
            return Vec::new();
        }
        if self.entries.is_empty() {
            return Vec::new();
        }

        let Some(query) = self
            .gateway
            .embed(
                &self.settings.embedding_provider,
                &self.settings.embedding_model,
                &options.query,
            )
            .await
        else {
            warn!("Query embedding failed; returning no matches");
            return Vec::new();
        };

        match &options.session_id {
            Some(session_id) => {
                let scoped: Vec<MemoryEntry> = self
                    .entries
                    .iter()
                    .filter(|entry| entry.session_id.as_deref() == Some(session_id.as_str()))
                    .cloned()
                    .collect();
                similarity::rank(&scoped, &query, options.threshold, options.limit)
            }
            None => similarity::rank(&self.entries, &query, options.threshold, options.limit),
        }
    }

    /// Most recent entries first, optionally scoped to a session.
    ///
    /// Pure read; no embedding cost.
    pub fn get_recent_memories(&self, limit: usize, session_id: Option<&str>) -> Vec<MemoryEntry> {
        let mut recent: Vec<MemoryEntry> = self
            .entries
            .iter()
            .filter(|entry| session_id.is_none() || entry.session_id.as_deref() == session_id)
            .cloned()
            .collect();

        recent.sort_by_key(|entry| std::cmp::Reverse(entry.metadata.timestamp));
        recent.truncate(limit);
        recent
    }

    /// Remove the entry with the given id. No-op when absent.
    pub fn delete_memory(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Remove entries for one session, or everything when no session is
    /// given.
    pub fn clear_memories(&mut self, session_id: Option<&str>) {
        match session_id {
            Some(session_id) => self
                .entries
                .retain(|entry| entry.session_id.as_deref() != Some(session_id)),
            None => self.entries.clear(),
        }
        self.persist();
    }

    /// Look up an entry by id.
    pub fn get_memory_by_id(&self, id: &str) -> Option<&MemoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Merge a partial metadata update into an entry. No-op when absent.
    pub fn update_memory_metadata(&mut self, id: &str, patch: &MemoryMetadataPatch) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            patch.apply(&mut entry.metadata);
            self.persist();
        }
    }

    /// Collection statistics.
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            total: self.entries.len(),
            embedded: self.entries.iter().filter(|e| e.has_embedding()).count(),
            oldest: self.entries.iter().map(|e| e.metadata.timestamp).min(),
            newest: self.entries.iter().map(|e| e.metadata.timestamp).max(),
        }
    }
}
