//! Chat command handler.
//!
//! Interactive question-answering loop over stdin. An optional memory file
//! carries the conversation log across sessions via the plain interchange
//! records.

use clap::Args;
use corpusqa_core::{AppConfig, AppError, AppResult};
use corpusqa_session::{ConversationEntry, Orchestrator};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Interactive question-answering session
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Load the conversation log from this JSON file at startup and save it
    /// back on exit
    #[arg(long)]
    pub memory_file: Option<PathBuf>,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let mut orchestrator = build_session(config, self.memory_file.as_deref())?;

        println!("CorpusQA (type 'exit' or an empty line to quit)\n");

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("Ask a question: ");
            std::io::stdout().flush()?;

            let question = match lines.next() {
                Some(line) => line?,
                None => break, // stdin closed
            };
            let question = question.trim().to_string();

            if question.is_empty() || question.eq_ignore_ascii_case("exit") {
                break;
            }

            println!("\nThinking...");
            let response = orchestrator.handle_question(&question).await?;

            println!("\n{}", response.answer);
            super::print_sources(&response.sources);
            println!();
        }

        if let Some(ref path) = self.memory_file {
            save_memory(&orchestrator, path)?;
        }

        println!("Goodbye!");
        Ok(())
    }
}

/// Build the orchestrator, importing a previously saved log when present.
fn build_session(config: &AppConfig, memory_file: Option<&Path>) -> AppResult<Orchestrator> {
    let mut orchestrator = super::build_orchestrator(config)?;

    if let Some(path) = memory_file {
        if path.exists() {
            let records = load_memory(path)?;
            tracing::info!("Loaded {} conversation entries from {:?}", records.len(), path);
            orchestrator.memory_mut().import(records);
        }
    }

    Ok(orchestrator)
}

/// Read interchange records from a JSON memory file.
fn load_memory(path: &Path) -> AppResult<Vec<ConversationEntry>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("Failed to read memory file {:?}: {}", path, e)))?;
    let records: Vec<ConversationEntry> = serde_json::from_str(&contents)?;
    Ok(records)
}

/// Write the session's log back out as interchange records.
fn save_memory(orchestrator: &Orchestrator, path: &Path) -> AppResult<()> {
    let records = orchestrator.memory().export();
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::Config(format!("Failed to write memory file {:?}: {}", path, e)))?;
    tracing::info!("Saved {} conversation entries to {:?}", records.len(), path);
    Ok(())
}
