use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Parser)]
#[command(name = "engram")]
#[command(version, about = "Engram - semantic memory for conversational agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (defaults to ~/.local/share/engram/engram.db)
    #[arg(long, global = true, env = "ENGRAM_DB_PATH")]
    pub db_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a memory
    Store {
        /// Text to remember
        content: String,

        /// Origin tag
        #[arg(long, default_value = "cli")]
        source: String,

        /// Importance score in [0, 1]
        #[arg(long)]
        importance: Option<f32>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Session partition key
        #[arg(long)]
        session: Option<String>,
    },

    /// Search memories by semantic similarity
    Search {
        /// Query text
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 5)]
        limit: usize,

        /// Inclusive similarity lower bound
        #[arg(long, default_value_t = 0.7)]
        threshold: f32,

        /// Restrict to one session
        #[arg(long)]
        session: Option<String>,
    },

    /// List the most recent memories
    Recent {
        /// Maximum number of entries
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Restrict to one session
        #[arg(long)]
        session: Option<String>,
    },

    /// Show a single memory by id
    Get {
        /// Memory id
        id: String,
    },

    /// Delete a memory by id
    Delete {
        /// Memory id
        id: String,
    },

    /// Remove memories
    Clear {
        /// Only remove memories from this session
        #[arg(long)]
        session: Option<String>,
    },

    /// Show collection statistics
    Stats,

    /// Memory configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current settings
    Show,

    /// Enable the memory store with an embedding provider and model
    Enable {
        /// Embedding provider id (e.g. "openai", "voyage")
        #[arg(long)]
        provider: String,

        /// Embedding model id (e.g. "text-embedding-3-small")
        #[arg(long)]
        model: String,
    },

    /// Disable the memory store
    Disable,
}
