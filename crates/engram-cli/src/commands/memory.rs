use anyhow::{Result, bail};
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::utils::{format_timestamp, preview_text, print_json};
use engram_core::{MemoryStore, StoreOutcome, StoreParams};
use engram_models::{MemoryEntry, SearchOptions};

pub async fn store(
    store: &mut MemoryStore,
    content: String,
    source: String,
    importance: Option<f32>,
    tags: Vec<String>,
    session: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let params = StoreParams {
        source,
        importance,
        tags,
        session_id: session,
    };
    let outcome = store.store_memory(&content, params).await;

    match &outcome {
        StoreOutcome::Stored(entry) => {
            if format.is_json() {
                return print_json(entry);
            }
            println!("Stored {}", entry.id);
        }
        StoreOutcome::StoredWithoutEmbedding(entry) => {
            if format.is_json() {
                return print_json(entry);
            }
            println!("Stored {} (no embedding; it will not match searches)", entry.id);
        }
        StoreOutcome::Disabled => {
            bail!("Memory store is disabled or unconfigured; run `engram config enable`")
        }
    }

    Ok(())
}

pub async fn search(
    store: &MemoryStore,
    query: String,
    limit: usize,
    threshold: f32,
    session: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut options = SearchOptions::new(query)
        .with_limit(limit)
        .with_threshold(threshold);
    if let Some(session) = session {
        options = options.in_session(session);
    }

    let results = store.search_memories(&options).await;

    if format.is_json() {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No matching memories");
        return Ok(());
    }

    for (index, result) in results.iter().enumerate() {
        println!("{}. {}", index + 1, result.entry.id);
        println!("   Similarity: {:.2}", result.similarity);
        println!(
            "   Created:    {}",
            format_timestamp(Some(result.entry.metadata.timestamp))
        );
        println!("   {}", preview_text(&result.entry.content, 120));
        println!();
    }

    Ok(())
}

pub fn recent(
    store: &MemoryStore,
    limit: usize,
    session: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let entries = store.get_recent_memories(limit, session.as_deref());

    if format.is_json() {
        return print_json(&entries);
    }

    render_entries_table(&entries)
}

pub fn get(store: &MemoryStore, id: String, format: OutputFormat) -> Result<()> {
    let Some(entry) = store.get_memory_by_id(&id) else {
        bail!("No memory with id {id}");
    };

    if format.is_json() {
        return print_json(entry);
    }

    println!("Id:       {}", entry.id);
    println!("Created:  {}", format_timestamp(Some(entry.metadata.timestamp)));
    println!("Source:   {}", entry.metadata.source);
    if let Some(importance) = entry.metadata.importance {
        println!("Importance: {importance:.2}");
    }
    if !entry.metadata.tags.is_empty() {
        println!("Tags:     {}", entry.metadata.tags.join(", "));
    }
    if let Some(session) = &entry.session_id {
        println!("Session:  {session}");
    }
    println!("Embedded: {}", if entry.has_embedding() { "yes" } else { "no" });
    println!();
    println!("{}", entry.content);
    Ok(())
}

pub fn delete(store: &mut MemoryStore, id: String, format: OutputFormat) -> Result<()> {
    store.delete_memory(&id);

    if format.is_json() {
        return print_json(&json!({ "deleted": id }));
    }

    println!("Deleted {id} (if it existed)");
    Ok(())
}

pub fn clear(store: &mut MemoryStore, session: Option<String>, format: OutputFormat) -> Result<()> {
    let before = store.stats().total;
    store.clear_memories(session.as_deref());
    let removed = before - store.stats().total;

    if format.is_json() {
        return print_json(&json!({ "removed": removed }));
    }

    match session {
        Some(session) => println!("Removed {removed} memories from session {session}"),
        None => println!("Removed {removed} memories"),
    }
    Ok(())
}

pub fn stats(store: &MemoryStore, format: OutputFormat) -> Result<()> {
    let stats = store.stats();

    if format.is_json() {
        return print_json(&stats);
    }

    println!("Memories: {}", stats.total);
    println!("Embedded: {}", stats.embedded);
    println!("Oldest:   {}", format_timestamp(stats.oldest));
    println!("Newest:   {}", format_timestamp(stats.newest));
    Ok(())
}

fn render_entries_table(entries: &[MemoryEntry]) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Created", "Session", "Tags", "Preview"]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id.clone()),
            Cell::new(format_timestamp(Some(entry.metadata.timestamp))),
            Cell::new(entry.session_id.clone().unwrap_or_default()),
            Cell::new(entry.metadata.tags.join(", ")),
            Cell::new(preview_text(&entry.content, 60)),
        ]);
    }

    println!("{table}");
    Ok(())
}
