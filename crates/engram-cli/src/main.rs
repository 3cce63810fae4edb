mod cli;
mod commands;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut store = setup::prepare_store(cli.db_path.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Store {
            content,
            source,
            importance,
            tags,
            session,
        } => {
            commands::memory::store(&mut store, content, source, importance, tags, session, format)
                .await
        }
        Commands::Search {
            query,
            limit,
            threshold,
            session,
        } => commands::memory::search(&store, query, limit, threshold, session, format).await,
        Commands::Recent { limit, session } => {
            commands::memory::recent(&store, limit, session, format)
        }
        Commands::Get { id } => commands::memory::get(&store, id, format),
        Commands::Delete { id } => commands::memory::delete(&mut store, id, format),
        Commands::Clear { session } => commands::memory::clear(&mut store, session, format),
        Commands::Stats => commands::memory::stats(&store, format),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show(&store, format),
            ConfigCommands::Enable { provider, model } => {
                commands::config::enable(&mut store, provider, model, format)
            }
            ConfigCommands::Disable => commands::config::disable(&mut store, format),
        },
    }
}
