//! oficios search service & CLI
//!
//! Dual-mode application:
//! - Server Mode (default): HTTP search service for the Bahía Blanca trades directory
//! - CLI Mode: one-off search, category suggestion and category listing
//!
//! The search pipeline: normalize the query, fuzzy-match eligible
//! professionals, fall back to category matching when nothing matches, rank,
//! and record zero-result queries.

mod catalog;
mod cli;
mod config;
mod error;
mod failed_search;
mod http;
mod search;
mod server;
mod store;
mod suggest;

#[cfg(test)]
mod tests_api;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ServiceArgs};
use config::Config;
use error::AppError;
use tracing::{info, warn};

use catalog::Catalog;
use failed_search::{FailedSearchLogger, JsonLinesSink};
use search::{SearchPipeline, SearchService};
use server::AppState;
use store::{JsonFileStore, MemoryStore, ProfessionalStore};
use suggest::{LlmClient, Suggester};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags; RUST_LOG wins when set
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let config_path = cli.config.clone();
    let result = match cli.command {
        // No subcommand: serve with settings from the environment and config file
        None => run_server(config_path.as_deref(), ServiceArgs::parse_from(["oficios"])).await,
        Some(Commands::Serve(args)) => run_server(config_path.as_deref(), args).await,
        Some(Commands::Search(args)) => {
            print_output(execute_search_cli(config_path.as_deref(), args).await)
        }
        Some(Commands::Suggest(args)) => {
            print_output(execute_suggest_cli(config_path.as_deref(), args).await)
        }
        Some(Commands::Categories) => print_output(execute_categories_cli()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(get_exit_code(&e));
    }
}

fn print_output(result: Result<String>) -> Result<()> {
    let output = result?;
    println!("{}", output);
    Ok(())
}

/// Everything a command needs, built once
struct ServiceContext {
    config: Config,
    state: AppState,
}

fn build_context(config_path: Option<&Path>, args: &ServiceArgs) -> Result<ServiceContext> {
    let mut config = Config::load(config_path)?;
    config.apply(args);
    config
        .validate()
        .map_err(|e| AppError::ConfigError(format!("{:#}", e)))?;

    let catalog = Arc::new(Catalog::builtin());

    let store: Arc<dyn ProfessionalStore> = match &config.professionals {
        Some(path) => {
            let store = JsonFileStore::new(path);
            info!("Reading professionals from {}", store.path().display());
            Arc::new(store)
        }
        None => {
            warn!("No professionals file configured, serving built-in seed data");
            Arc::new(MemoryStore::seeded())
        }
    };

    let sink = JsonLinesSink::new(&config.failed_searches);
    info!("Failed searches are recorded in {}", sink.path().display());
    let logger = FailedSearchLogger::new(Arc::new(sink));
    let pipeline = SearchPipeline::new(catalog.clone(), config.fuzzy());
    let search = Arc::new(SearchService::new(store, pipeline, logger));

    let llm = match config.llm_settings() {
        Some(settings) => Some(
            LlmClient::new(settings).map_err(|e| AppError::ConfigError(e.to_string()))?,
        ),
        None => None,
    };
    let suggester = Arc::new(Suggester::new(catalog, llm));

    Ok(ServiceContext {
        config,
        state: AppState { search, suggester },
    })
}

async fn run_server(config_path: Option<&Path>, args: ServiceArgs) -> Result<()> {
    let ctx = build_context(config_path, &args)?;
    info!("Starting oficios search service");
    server::serve(&ctx.config.bind, ctx.state).await
}

/// Execute search command in CLI mode
async fn execute_search_cli(config_path: Option<&Path>, args: cli::SearchArgs) -> Result<String> {
    let ctx = build_context(config_path, &args.service)?;
    let search = &ctx.state.search;
    let outcome = search.search(&args.query).await?;
    let hits = outcome.hits(search.catalog());

    // A one-shot process must not exit before the failed-search write lands
    if let Some(handle) = outcome.failed_search_log {
        wait_for_failed_search_log(handle).await;
    }

    serde_json::to_string_pretty(&hits).context("Failed to serialize results")
}

/// Wait for a scheduled failed-search write; a crashed task is logged, never fatal
async fn wait_for_failed_search_log(handle: tokio::task::JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed-search write task did not complete: {}", e);
            false
        }
    }
}

/// Execute suggest command in CLI mode
async fn execute_suggest_cli(config_path: Option<&Path>, args: cli::SuggestArgs) -> Result<String> {
    let ctx = build_context(config_path, &args.service)?;
    let categories = ctx.state.suggester.suggest(&args.query).await;
    serde_json::to_string_pretty(&server::SuggestResponse { categories })
        .context("Failed to serialize suggestions")
}

fn execute_categories_cli() -> Result<String> {
    let catalog = Catalog::builtin();
    let mut output = format!("Categories ({}):\n", catalog.categories().len());
    for category in catalog.categories() {
        if category.specialties.is_empty() {
            output.push_str(&format!("  {:>2}  {}\n", category.id, category.name));
        } else {
            output.push_str(&format!(
                "  {:>2}  {} ({})\n",
                category.id,
                category.name,
                category.specialties.join(", ")
            ));
        }
    }
    Ok(output)
}

/// Map errors to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(AppError::InvalidInput(_)) | Some(AppError::ConfigError(_)) => 1,
        Some(AppError::SearchFailed(_)) => 2,
        Some(AppError::Internal(_)) => 5,
        None => {
            let err_str = err.to_string().to_lowercase();
            if err_str.contains("invalid") || err_str.contains("config") {
                1 // Invalid arguments or usage error
            } else if err_str.contains("network") || err_str.contains("connection") {
                2 // Network or store error
            } else {
                5 // Other application errors
            }
        }
    }
}
