//! Memory entry model for conversational recall.
//!
//! A memory is a short piece of conversation text with an optional semantic
//! embedding and a small mutable metadata block. Entries live in a single
//! ordered collection (insertion order) that is persisted as a whole to the
//! storage surface.

use serde::{Deserialize, Serialize};

/// Role of the chat participant that produced a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Tag used when a memory is stored for this role.
    pub fn tag(&self) -> &'static str {
        match self {
            ChatRole::User => "user-message",
            ChatRole::Assistant => "assistant-response",
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, ChatRole::User)
    }
}

/// Mutable metadata attached to a memory entry.
///
/// Everything except the metadata block is immutable after creation; the
/// block itself is updated only through an explicit partial merge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryMetadata {
    /// Unix timestamp in milliseconds when the entry was created
    pub timestamp: i64,

    /// Free-form origin tag (e.g. "chat")
    pub source: String,

    /// Heuristic importance score in [0, 1]
    #[serde(default)]
    pub importance: Option<f32>,

    /// Tags for categorization and filtering
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for a [`MemoryMetadata`] block.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMetadataPatch {
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub importance: Option<f32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl MemoryMetadataPatch {
    /// Merge the set fields of this patch into `metadata`.
    pub fn apply(&self, metadata: &mut MemoryMetadata) {
        if let Some(timestamp) = self.timestamp {
            metadata.timestamp = timestamp;
        }
        if let Some(source) = &self.source {
            metadata.source = source.clone();
        }
        if let Some(importance) = self.importance {
            metadata.importance = Some(importance.clamp(0.0, 1.0));
        }
        if let Some(tags) = &self.tags {
            metadata.tags = tags.clone();
        }
    }
}

/// A single remembered piece of conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryEntry {
    /// Unique identifier, generated at creation
    pub id: String,

    /// The remembered text, immutable after creation
    pub content: String,

    /// Semantic embedding; absent when generation failed or was disabled.
    /// Once set it is never mutated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Mutable metadata block
    pub metadata: MemoryMetadata,

    /// Optional conversation partition key
    #[serde(default)]
    pub session_id: Option<String>,
}

impl MemoryEntry {
    /// Create a new entry with a fresh ID and the current timestamp.
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        use crate::time_utils;

        Self {
            id: format!("mem-{}", uuid::Uuid::new_v4()),
            content: content.into(),
            embedding: None,
            metadata: MemoryMetadata {
                timestamp: time_utils::now_ms(),
                source: source.into(),
                importance: None,
                tags: Vec::new(),
            },
            session_id: None,
        }
    }

    /// Create an entry with a specific ID (for deserialization/testing)
    #[must_use]
    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    /// Set the session partition key
    #[must_use]
    pub fn with_session(mut self, session_id: String) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Set the importance score, clamped to [0, 1]
    #[must_use]
    pub fn with_importance(mut self, importance: f32) -> Self {
        self.metadata.importance = Some(importance.clamp(0.0, 1.0));
        self
    }

    /// Set the tags
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.metadata.tags = tags;
        self
    }

    /// Attach an embedding vector
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Set the creation timestamp (for testing)
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.metadata.timestamp = timestamp;
        self
    }

    /// Check if this entry carries an embedding
    #[must_use]
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}

/// Parameters for a semantic memory search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Query text to embed and match against
    pub query: String,

    /// Maximum number of results to return
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Inclusive similarity lower bound
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Restrict the search to one session
    #[serde(default)]
    pub session_id: Option<String>,
}

fn default_limit() -> usize {
    5
}

fn default_threshold() -> f32 {
    0.7
}

impl SearchOptions {
    /// Create options with the default limit and threshold.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: default_limit(),
            threshold: default_threshold(),
            session_id: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn in_session(mut self, session_id: String) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// One ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub entry: MemoryEntry,
    /// Cosine similarity against the query embedding (1 = identical,
    /// 0 = orthogonal, -1 = opposite)
    pub similarity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_entry_new() {
        let entry = MemoryEntry::new("What is the capital of France?", "chat");

        assert!(entry.id.starts_with("mem-"));
        assert_eq!(entry.content, "What is the capital of France?");
        assert_eq!(entry.metadata.source, "chat");
        assert!(entry.embedding.is_none());
        assert!(entry.metadata.importance.is_none());
        assert!(entry.metadata.tags.is_empty());
        assert!(entry.session_id.is_none());
        assert!(entry.metadata.timestamp > 0);
    }

    #[test]
    fn test_memory_entry_builder() {
        let entry = MemoryEntry::new("content", "chat")
            .with_session("session-1".to_string())
            .with_importance(0.8)
            .with_tags(vec!["chat".to_string(), "user-message".to_string()])
            .with_embedding(vec![0.1, 0.2, 0.3]);

        assert_eq!(entry.session_id, Some("session-1".to_string()));
        assert_eq!(entry.metadata.importance, Some(0.8));
        assert_eq!(entry.metadata.tags, vec!["chat", "user-message"]);
        assert!(entry.has_embedding());
    }

    #[test]
    fn test_importance_is_clamped() {
        let entry = MemoryEntry::new("content", "chat").with_importance(1.7);
        assert_eq!(entry.metadata.importance, Some(1.0));

        let entry = MemoryEntry::new("content", "chat").with_importance(-0.5);
        assert_eq!(entry.metadata.importance, Some(0.0));
    }

    #[test]
    fn test_unique_ids() {
        let a = MemoryEntry::new("same", "chat");
        let b = MemoryEntry::new("same", "chat");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_metadata_patch_partial_merge() {
        let mut entry = MemoryEntry::new("content", "chat")
            .with_importance(0.5)
            .with_tags(vec!["old".to_string()]);

        let patch = MemoryMetadataPatch {
            importance: Some(0.9),
            ..Default::default()
        };
        patch.apply(&mut entry.metadata);

        assert_eq!(entry.metadata.importance, Some(0.9));
        assert_eq!(entry.metadata.tags, vec!["old"]);
        assert_eq!(entry.metadata.source, "chat");
    }

    #[test]
    fn test_metadata_patch_clamps_importance() {
        let mut entry = MemoryEntry::new("content", "chat");
        let patch = MemoryMetadataPatch {
            importance: Some(3.0),
            ..Default::default()
        };
        patch.apply(&mut entry.metadata);
        assert_eq!(entry.metadata.importance, Some(1.0));
    }

    #[test]
    fn test_search_options_defaults() {
        let options = SearchOptions::new("query");
        assert_eq!(options.limit, 5);
        assert!((options.threshold - 0.7).abs() < f32::EPSILON);
        assert!(options.session_id.is_none());
    }

    #[test]
    fn test_search_options_builder() {
        let options = SearchOptions::new("query")
            .with_limit(10)
            .with_threshold(0.5)
            .in_session("session-1".to_string());

        assert_eq!(options.limit, 10);
        assert!((options.threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(options.session_id, Some("session-1".to_string()));
    }

    #[test]
    fn test_entry_serialization_round_trip() {
        let entry = MemoryEntry::new("Round trip", "chat")
            .with_id("mem-test".to_string())
            .with_embedding(vec![0.5, -0.25, 0.125])
            .with_importance(0.6)
            .with_tags(vec!["chat".to_string()])
            .with_session("session-1".to_string());

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: MemoryEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_entry_without_embedding_omits_field() {
        let entry = MemoryEntry::new("No vector", "chat");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("embedding"));

        let parsed: MemoryEntry = serde_json::from_str(&json).unwrap();
        assert!(parsed.embedding.is_none());
    }

    #[test]
    fn test_chat_role_serialization() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(ChatRole::User.tag(), "user-message");
        assert_eq!(ChatRole::Assistant.tag(), "assistant-response");
    }
}
