//! Engram Models - shared data model for conversational memory.
//!
//! This crate defines the types that flow between the storage surface, the
//! embedding gateway, and the memory store: entries, search options and
//! results, chat roles, and the persisted settings block.

pub mod memory;
pub mod settings;
pub mod time_utils;

pub use memory::{
    ChatRole, MemoryEntry, MemoryMetadata, MemoryMetadataPatch, SearchOptions, SearchResult,
};
pub use settings::MemorySettings;
