//! Command handlers for the CorpusQA CLI.

pub mod ask;
pub mod chat;

use corpusqa_core::{AppConfig, AppError, AppResult};
use corpusqa_llm::create_generator;
use corpusqa_retrieval::{HttpDocumentIndex, SerpApiClient, SourceLocator};
use corpusqa_session::{Orchestrator, OrchestratorConfig};
use std::sync::Arc;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;

/// Wire an orchestrator from the application configuration.
pub fn build_orchestrator(config: &AppConfig) -> AppResult<Orchestrator> {
    let index = Arc::new(HttpDocumentIndex::new(config.index_endpoint.clone()));

    let serpapi_key = config.serpapi_key.clone().unwrap_or_default();
    if serpapi_key.is_empty() {
        tracing::warn!(
            "No SerpAPI key configured; web retrieval will fail and queries \
             will be answered from the document corpus only"
        );
    }
    let web = Arc::new(SerpApiClient::new(serpapi_key));

    let generator = create_generator(
        &config.provider,
        config.generator_endpoint.as_deref(),
        config.api_key.as_deref(),
    )
    .map_err(AppError::Config)?;

    let orchestrator_config = OrchestratorConfig {
        model: config.model.clone(),
        top_k: config.top_k,
        web_results: config.web_results,
        history_window: config.history_window,
        recent_window: config.recent_window,
        memory_capacity: config.memory_capacity,
        generation_timeout: config.generation_timeout(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    Ok(Orchestrator::new(
        index,
        web,
        generator,
        orchestrator_config,
    ))
}

/// Print cited sources the way the session displays them.
pub fn print_sources(sources: &[SourceLocator]) {
    if sources.is_empty() {
        return;
    }

    println!("\nSources:");
    for source in sources {
        match source {
            SourceLocator::Pdf { filename, page } => {
                println!("  PDF: {} (page {})", filename, page);
            }
            SourceLocator::Web { url, title } => {
                println!("  Web: {} ({})", title, url);
            }
        }
    }
}
