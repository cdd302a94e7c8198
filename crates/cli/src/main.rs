//! CorpusQA CLI
//!
//! Main entry point for the corpusqa command-line tool.
//! Answers questions over a private PDF corpus plus live web results, with
//! verifiable citations and session memory.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand};
use corpusqa_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// CorpusQA - grounded question answering with verifiable citations
#[derive(Parser, Debug)]
#[command(name = "corpusqa")]
#[command(about = "Grounded Q&A over a document corpus and the web", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "CORPUSQA_CONFIG")]
    config: Option<PathBuf>,

    /// Generator provider (ollama, openai)
    #[arg(short, long, global = true, env = "CORPUSQA_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "CORPUSQA_MODEL")]
    model: Option<String>,

    /// Document retrieval sidecar endpoint
    #[arg(long, global = true, env = "CORPUSQA_INDEX_ENDPOINT")]
    index_endpoint: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive question-answering session
    Chat(ChatCommand),

    /// Ask a single question and exit
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.provider,
        cli.model,
        cli.index_endpoint,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("CorpusQA starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Index endpoint: {}", config.index_endpoint);

    let command_name = match &cli.command {
        Commands::Chat(_) => "chat",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
