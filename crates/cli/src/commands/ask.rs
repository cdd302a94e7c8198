//! Ask command handler.
//!
//! One-shot question answering: wire a fresh session, run the single query,
//! print the answer and its sources.

use clap::Args;
use corpusqa_core::{AppConfig, AppResult};

use super::{build_orchestrator, print_sources};

/// Ask a single question and exit
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output the full structured response as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let mut orchestrator = build_orchestrator(config)?;
        let response = orchestrator.handle_question(&self.question).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", response.answer);
            print_sources(&response.sources);
        }

        Ok(())
    }
}
