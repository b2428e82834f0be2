//! CLI mode implementation
//!
//! Flags and `OFICIOS_*` environment variables for the server and the one-off
//! search, suggestion and category commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Oficios search service
#[derive(Parser, Debug)]
#[command(name = "oficios")]
#[command(about = "Search and rank Bahía Blanca tradespeople", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Path to a JSON config file (defaults to <config dir>/oficios/config.json)
    #[arg(long, global = true, env = "OFICIOS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP search service (default when no arguments are given)
    Serve(ServiceArgs),
    /// Run one search and print the results as JSON
    Search(SearchArgs),
    /// Suggest trade categories for a problem description
    Suggest(SuggestArgs),
    /// List the category table
    Categories,
}

/// Settings shared by every command that builds the search service.
/// Each one overrides the config file.
#[derive(Parser, Clone, Debug, Default, PartialEq)]
pub struct ServiceArgs {
    /// Address to listen on
    #[arg(long, env = "OFICIOS_BIND")]
    pub bind: Option<String>,

    /// JSON file with professional records (built-in seed data when unset)
    #[arg(long, env = "OFICIOS_PROFESSIONALS")]
    pub professionals: Option<PathBuf>,

    /// JSON-lines file receiving zero-result queries
    #[arg(long, env = "OFICIOS_FAILED_SEARCHES")]
    pub failed_searches: Option<PathBuf>,

    /// Fuzzy-match threshold (0 exact .. 1 anything)
    #[arg(long, env = "OFICIOS_THRESHOLD")]
    pub threshold: Option<f64>,

    /// OpenAI-compatible chat-completions URL for category suggestions
    #[arg(long, env = "OFICIOS_LLM_ENDPOINT")]
    pub llm_endpoint: Option<String>,

    /// Model name sent to the LLM endpoint
    #[arg(long, env = "OFICIOS_LLM_MODEL")]
    pub llm_model: Option<String>,

    /// Bearer token for the LLM endpoint
    #[arg(long, env = "OFICIOS_LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,
}

/// One-off search arguments
#[derive(Parser, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms (case- and accent-insensitive)
    #[arg(short = 'q', long)]
    pub query: String,

    #[command(flatten)]
    pub service: ServiceArgs,
}

/// Suggestion arguments
#[derive(Parser, Clone, Debug)]
pub struct SuggestArgs {
    /// Free-text problem description
    #[arg(short = 'q', long)]
    pub query: String,

    #[command(flatten)]
    pub service: ServiceArgs,
}
