//! Persisted memory settings.

use serde::{Deserialize, Serialize};

/// Configuration for the memory subsystem.
///
/// Persisted as individual scalar keys on the storage surface. A fresh
/// database reads back as the default: disabled with empty identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemorySettings {
    /// Master switch for storing and retrieving memories
    pub enabled: bool,

    /// Embedding provider identifier (e.g. "openai")
    pub embedding_provider: String,

    /// Embedding model identifier (e.g. "text-embedding-3-small")
    pub embedding_model: String,

    /// Reserved for a future non-embedding memory provider; persisted but unused
    pub memory_provider: String,

    /// Reserved for a future non-embedding memory model; persisted but unused
    pub memory_model: String,
}

impl MemorySettings {
    /// Whether the store can embed and therefore accept memories.
    ///
    /// Derived on demand from the underlying fields; there is no cached or
    /// reactive state behind this.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.embedding_provider.is_empty() && !self.embedding_model.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let settings = MemorySettings::default();
        assert!(!settings.enabled);
        assert!(settings.embedding_provider.is_empty());
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_is_configured_requires_all_fields() {
        let mut settings = MemorySettings {
            enabled: true,
            ..Default::default()
        };
        assert!(!settings.is_configured());

        settings.embedding_provider = "openai".to_string();
        assert!(!settings.is_configured());

        settings.embedding_model = "text-embedding-3-small".to_string();
        assert!(settings.is_configured());

        settings.enabled = false;
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_settings_serialization_round_trip() {
        let settings = MemorySettings {
            enabled: true,
            embedding_provider: "voyage".to_string(),
            embedding_model: "voyage-3".to_string(),
            memory_provider: String::new(),
            memory_model: String::new(),
        };

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: MemorySettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
