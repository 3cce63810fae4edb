use anyhow::Result;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::utils::print_json;
use engram_core::MemoryStore;
use engram_models::MemorySettings;

pub fn show(store: &MemoryStore, format: OutputFormat) -> Result<()> {
    let settings = store.settings();

    if format.is_json() {
        return print_json(settings);
    }

    println!("Enabled:    {}", settings.enabled);
    println!("Provider:   {}", display_or_unset(&settings.embedding_provider));
    println!("Model:      {}", display_or_unset(&settings.embedding_model));
    println!("Configured: {}", settings.is_configured());
    Ok(())
}

pub fn enable(
    store: &mut MemoryStore,
    provider: String,
    model: String,
    format: OutputFormat,
) -> Result<()> {
    let settings = MemorySettings {
        enabled: true,
        embedding_provider: provider,
        embedding_model: model,
        ..store.settings().clone()
    };
    store.update_settings(settings)?;

    if format.is_json() {
        return print_json(store.settings());
    }

    println!(
        "Memory enabled with provider {} and model {}",
        store.settings().embedding_provider,
        store.settings().embedding_model
    );
    Ok(())
}

pub fn disable(store: &mut MemoryStore, format: OutputFormat) -> Result<()> {
    let settings = MemorySettings {
        enabled: false,
        ..store.settings().clone()
    };
    store.update_settings(settings)?;

    if format.is_json() {
        return print_json(&json!({ "enabled": false }));
    }

    println!("Memory disabled");
    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}
