//! Engram Core - semantic memory store for conversational agents.
//!
//! The store keeps a bounded collection of short conversation memories,
//! attaches embedding vectors through the gateway when configured, and
//! answers nearest-neighbor queries by cosine similarity. The chat bridge
//! listens to conversation lifecycle events and feeds the store.

pub mod chat;
pub mod importance;
pub mod settings;
pub mod similarity;
pub mod store;

pub use chat::{ChatEvent, ChatEventBus, ChatEventHandler, ChatMemoryBridge};
pub use settings::{load_settings, save_settings};
pub use similarity::{cosine_similarity, rank};
pub use store::{MemoryStats, MemoryStore, StoreOutcome, StoreParams};
