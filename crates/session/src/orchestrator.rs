//! Query orchestration.
//!
//! Runs one question through the full pipeline:
//! meta-check → retrieve (parallel fan-out) → assemble → generate → resolve,
//! with short-circuits for meta-questions, empty context, and generator
//! failure. Every path records the outcome in memory exactly once before
//! returning, so displayed history always matches what the user saw.

use crate::citations::CitationResolver;
use crate::context;
use crate::memory::ConversationMemory;
use crate::meta::MetaQuestionInterpreter;
use crate::types::SessionResponse;
use corpusqa_core::{AppError, AppResult};
use corpusqa_llm::{GenerationRequest, Generator};
use corpusqa_retrieval::{DocumentIndex, Passage, SourceLocator, WebSearch};
use std::sync::Arc;
use std::time::Duration;

/// Fixed user-visible answer when no usable passages were retrieved.
pub const NO_INFORMATION_ANSWER: &str =
    "I could not find any relevant information to answer this question.";

/// Fixed user-visible answer when generation fails or times out.
pub const GENERATION_ERROR_ANSWER: &str =
    "Sorry, an error occurred while generating the answer.";

/// Tuning knobs for a session.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Model identifier passed to the generator
    pub model: String,

    /// Document passages retrieved per query
    pub top_k: usize,

    /// Web results retrieved per query (1..=10)
    pub web_results: usize,

    /// Prior turns embedded into the generation prompt
    pub history_window: usize,

    /// Recent entries returned with each response
    pub recent_window: usize,

    /// Conversation log capacity; `None` keeps the full session
    pub memory_capacity: Option<usize>,

    /// Deadline for one generator call; expiry is treated as a generator
    /// failure
    pub generation_timeout: Duration,

    /// Sampling temperature for generation
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model: "llama3.2".to_string(),
            top_k: 4,
            web_results: 3,
            history_window: 3,
            recent_window: 3,
            memory_capacity: None,
            generation_timeout: Duration::from_secs(60),
            temperature: 0.1,
            max_tokens: 400,
        }
    }
}

/// Top-level control flow for a single question-answering session.
///
/// Holds the three external capabilities behind trait objects plus the
/// session-local state. `&mut self` on [`Orchestrator::handle_question`]
/// enforces one query at a time; callers that need concurrent queries must
/// route them through a single lock.
pub struct Orchestrator {
    index: Arc<dyn DocumentIndex>,
    web: Arc<dyn WebSearch>,
    generator: Arc<dyn Generator>,
    interpreter: MetaQuestionInterpreter,
    resolver: CitationResolver,
    memory: ConversationMemory,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator over the given capabilities.
    pub fn new(
        index: Arc<dyn DocumentIndex>,
        web: Arc<dyn WebSearch>,
        generator: Arc<dyn Generator>,
        config: OrchestratorConfig,
    ) -> Self {
        let memory = match config.memory_capacity {
            Some(capacity) => ConversationMemory::with_capacity(capacity),
            None => ConversationMemory::new(),
        };

        Self {
            index,
            web,
            generator,
            interpreter: MetaQuestionInterpreter::new(),
            resolver: CitationResolver::new(),
            memory,
            config,
        }
    }

    /// Access the conversation memory (for export and inspection).
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Mutable access to the conversation memory (for import and clear).
    pub fn memory_mut(&mut self) -> &mut ConversationMemory {
        &mut self.memory
    }

    /// Handle one user question and return the structured response.
    ///
    /// # Errors
    /// Only rejects an empty question. Collaborator failures never surface:
    /// they degrade to empty retrieval lists or canned answers, and the
    /// outcome is recorded in memory either way.
    pub async fn handle_question(&mut self, question: &str) -> AppResult<SessionResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Session("Question must not be empty".to_string()));
        }

        tracing::info!("Handling question");

        // Meta-questions are answered from history alone, before the current
        // turn is recorded.
        let history = self.memory.get_history(None);
        if let Some(answer) = self.interpreter.interpret(question, &history) {
            tracing::info!("Answered as meta-question; no external calls made");
            return Ok(self.finish(question, answer, Vec::new()));
        }

        // Retrieval fan-out: the two sources are independent reads; either
        // may fail without aborting the query.
        let (pdf_result, web_result) = tokio::join!(
            self.index.retrieve(question, self.config.top_k),
            self.web.search(question, self.config.web_results),
        );

        let pdf_passages = pdf_result.unwrap_or_else(|e| {
            tracing::error!("Document retrieval failed: {}", e);
            Vec::new()
        });
        let web_passages = web_result.unwrap_or_else(|e| {
            tracing::error!("Web retrieval failed: {}", e);
            Vec::new()
        });

        // Empty-context guard: without usable text there is nothing to
        // ground an answer in, so generation is skipped entirely.
        let usable = pdf_passages
            .iter()
            .chain(web_passages.iter())
            .any(Passage::has_usable_text);
        if !usable {
            tracing::warn!(
                "{}",
                AppError::EmptyContext(question.to_string())
            );
            return Ok(self.finish(question, NO_INFORMATION_ANSWER.to_string(), Vec::new()));
        }

        // Assemble the citation-addressable context and the prompt.
        let merged = context::merge(pdf_passages, web_passages);
        let prompt_history = self.memory.get_history(Some(self.config.history_window));
        let prompt = context::build_prompt(question, &merged, &prompt_history);

        // Generate under a deadline; failure and timeout both degrade to the
        // canned answer.
        let request = GenerationRequest::new(prompt, &self.config.model)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        let answer = match tokio::time::timeout(
            self.config.generation_timeout,
            self.generator.complete(&request),
        )
        .await
        {
            Ok(Ok(response)) => response.content.trim().to_string(),
            Ok(Err(e)) => {
                tracing::error!("Generator failed: {}", e);
                GENERATION_ERROR_ANSWER.to_string()
            }
            Err(_) => {
                tracing::error!(
                    "{}",
                    AppError::GeneratorFailure(format!(
                        "Deadline of {:?} exceeded",
                        self.config.generation_timeout
                    ))
                );
                GENERATION_ERROR_ANSWER.to_string()
            }
        };

        // Resolve whatever answer resulted against the passages that were
        // actually sent to the generator.
        let sources = self.resolver.resolve(&answer, &merged);

        Ok(self.finish(question, answer, sources))
    }

    /// Record the outcome and assemble the response. Called exactly once per
    /// query, on every path.
    fn finish(
        &mut self,
        question: &str,
        answer: String,
        sources: Vec<SourceLocator>,
    ) -> SessionResponse {
        self.memory.add(question, answer.clone(), sources.clone());

        SessionResponse {
            answer,
            sources,
            memory: self.memory.get_history(Some(self.config.recent_window)),
        }
    }
}
