//! Chat lifecycle integration: event bus, memory bridge, and context
//! formatting.
//!
//! The bridge observes conversation events and feeds the store. It uses a
//! flat importance heuristic of its own (0.6 for user messages, 0.7 for
//! long assistant replies, 0.5 otherwise) rather than [`crate::importance`];
//! the two paths are intentionally distinct and only the structured
//! `store_chat_message` entry point goes through the scorer.

use crate::store::{MemoryStore, StoreParams};
use async_trait::async_trait;
use chrono::DateTime;
use engram_models::SearchResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

const CONTEXT_HEADER: &str = "Relevant memories from previous conversations:";
const CONTEXT_FOOTER: &str = "End of relevant memories.";

/// Conversation lifecycle events raised by the host application.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The user sent a message.
    MessageSent {
        content: String,
        session_id: Option<String>,
    },
    /// The assistant finished producing a response.
    ResponseCompleted {
        content: String,
        session_id: Option<String>,
    },
}

/// A subscriber to conversation lifecycle events.
#[async_trait]
pub trait ChatEventHandler: Send + Sync {
    async fn handle(&self, event: &ChatEvent);
}

/// Fan-out bus for chat events. Handlers run sequentially in subscription
/// order.
#[derive(Default)]
pub struct ChatEventBus {
    handlers: Vec<Arc<dyn ChatEventHandler>>,
}

impl ChatEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Arc<dyn ChatEventHandler>) {
        self.handlers.push(handler);
    }

    pub async fn publish(&self, event: &ChatEvent) {
        for handler in &self.handlers {
            handler.handle(event).await;
        }
    }
}

/// Bridges chat events into the memory store.
pub struct ChatMemoryBridge {
    store: Arc<Mutex<MemoryStore>>,
    registered: AtomicBool,
}

impl ChatMemoryBridge {
    pub fn new(store: Arc<Mutex<MemoryStore>>) -> Self {
        Self {
            store,
            registered: AtomicBool::new(false),
        }
    }

    /// Subscribe this bridge to the bus. Idempotent: the first call wins
    /// no matter how often the enabling condition toggles afterwards.
    pub fn register(self: &Arc<Self>, bus: &mut ChatEventBus) {
        if self
            .registered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            bus.subscribe(self.clone());
        } else {
            debug!("Chat memory bridge already registered; ignoring");
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatEventHandler for ChatMemoryBridge {
    async fn handle(&self, event: &ChatEvent) {
        let mut store = self.store.lock().await;
        if !store.settings().enabled {
            return;
        }

        let (content, session_id, importance, role_tag) = match event {
            ChatEvent::MessageSent {
                content,
                session_id,
            } => (content, session_id, 0.6, "user-message"),
            ChatEvent::ResponseCompleted {
                content,
                session_id,
            } => {
                let importance = if content.len() > 500 { 0.7 } else { 0.5 };
                (content, session_id, importance, "assistant-response")
            }
        };

        let params = StoreParams {
            importance: Some(importance),
            tags: vec!["chat".to_string(), role_tag.to_string()],
            session_id: session_id.clone(),
            ..Default::default()
        };
        store.store_memory(content, params).await;
    }
}

/// Render search results as a plain-text block for prompt inclusion.
///
/// Returns an empty string when there are no results.
pub fn format_memories_as_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut context = String::new();
    context.push_str(CONTEXT_HEADER);
    context.push('\n');

    for (index, result) in results.iter().enumerate() {
        let timestamp = DateTime::from_timestamp_millis(result.entry.metadata.timestamp)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        context.push_str(&format!(
            "{}. [{}] (similarity {:.2}) {}\n",
            index + 1,
            timestamp,
            result.similarity,
            result.entry.content
        ));
    }

    context.push_str(CONTEXT_FOOTER);
    context.push('\n');
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use engram_embeddings::{EmbeddingGateway, EmbeddingProvider};
    use engram_models::{MemoryEntry, MemorySettings};
    use engram_storage::StateStorage;
    use tempfile::tempdir;

    struct UnitProvider;

    #[async_trait]
    impl EmbeddingProvider for UnitProvider {
        fn name(&self) -> &str {
            "unit"
        }

        async fn embed(&self, _model: &str, _text: &str) -> anyhow::Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(
            &self,
            _model: &str,
            texts: &[String],
        ) -> anyhow::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    fn create_store() -> (Arc<Mutex<MemoryStore>>, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(redb::Database::create(db_path).unwrap());
        let state = StateStorage::new(db).unwrap();
        let gateway = Arc::new(EmbeddingGateway::new().with_provider(Arc::new(UnitProvider)));
        let store = MemoryStore::new(state, gateway).unwrap();
        (Arc::new(Mutex::new(store)), temp_dir)
    }

    async fn enable(store: &Arc<Mutex<MemoryStore>>) {
        let settings = MemorySettings {
            enabled: true,
            embedding_provider: "unit".to_string(),
            embedding_model: "unit-model".to_string(),
            ..Default::default()
        };
        store.lock().await.update_settings(settings).unwrap();
    }

    #[tokio::test]
    async fn test_bridge_skips_events_while_disabled() {
        let (store, _dir) = create_store();
        let bridge = Arc::new(ChatMemoryBridge::new(store.clone()));
        let mut bus = ChatEventBus::new();
        bridge.register(&mut bus);

        bus.publish(&ChatEvent::MessageSent {
            content: "remember me".to_string(),
            session_id: None,
        })
        .await;

        assert_eq!(store.lock().await.stats().total, 0);
    }

    #[tokio::test]
    async fn test_bridge_stores_user_message_with_flat_importance() {
        let (store, _dir) = create_store();
        enable(&store).await;
        let bridge = Arc::new(ChatMemoryBridge::new(store.clone()));
        let mut bus = ChatEventBus::new();
        bridge.register(&mut bus);

        bus.publish(&ChatEvent::MessageSent {
            content: "What is the capital of France?".to_string(),
            session_id: Some("s1".to_string()),
        })
        .await;

        let store = store.lock().await;
        let entries = store.get_recent_memories(10, Some("s1"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].metadata.importance, Some(0.6));
        assert_eq!(entries[0].metadata.tags, vec!["chat", "user-message"]);
    }

    #[tokio::test]
    async fn test_bridge_scores_long_assistant_response_higher() {
        let (store, _dir) = create_store();
        enable(&store).await;
        let bridge = Arc::new(ChatMemoryBridge::new(store.clone()));
        let mut bus = ChatEventBus::new();
        bridge.register(&mut bus);

        bus.publish(&ChatEvent::ResponseCompleted {
            content: "short answer".to_string(),
            session_id: None,
        })
        .await;
        bus.publish(&ChatEvent::ResponseCompleted {
            content: "a".repeat(600),
            session_id: None,
        })
        .await;

        let store = store.lock().await;
        let entries = store.get_recent_memories(10, None);
        let importances: Vec<Option<f32>> =
            entries.iter().map(|e| e.metadata.importance).collect();
        assert!(importances.contains(&Some(0.5)));
        assert!(importances.contains(&Some(0.7)));
        assert_eq!(
            entries[0].metadata.tags,
            vec!["chat", "assistant-response"]
        );
    }

    #[tokio::test]
    async fn test_register_is_once_only() {
        let (store, _dir) = create_store();
        enable(&store).await;
        let bridge = Arc::new(ChatMemoryBridge::new(store.clone()));
        let mut bus = ChatEventBus::new();

        bridge.register(&mut bus);
        bridge.register(&mut bus);
        assert!(bridge.is_registered());

        bus.publish(&ChatEvent::MessageSent {
            content: "only once".to_string(),
            session_id: None,
        })
        .await;

        assert_eq!(store.lock().await.stats().total, 1);
    }

    #[test]
    fn test_format_empty_results() {
        assert_eq!(format_memories_as_context(&[]), "");
    }

    #[test]
    fn test_format_renders_indexed_block() {
        let entry = MemoryEntry::new("Paris is the capital of France", "chat")
            .with_timestamp(1_700_000_000_000);
        let results = vec![SearchResult {
            entry,
            similarity: 0.923,
        }];

        let context = format_memories_as_context(&results);

        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines[0], CONTEXT_HEADER);
        assert_eq!(
            lines[1],
            "1. [2023-11-14 22:13 UTC] (similarity 0.92) Paris is the capital of France"
        );
        assert_eq!(lines[2], CONTEXT_FOOTER);
    }
}
