//! Question-answering session crate for CorpusQA.
//!
//! This crate is the orchestration core: it merges independently retrieved
//! document and web passages into a single citation-addressable context,
//! validates every citation a generated answer carries against that context,
//! and maintains the bounded conversational memory that introspective
//! ("meta") questions are answered from without ever invoking generation.
//!
//! The entry point is [`Orchestrator::handle_question`], which runs one query
//! through the full pipeline and records the outcome in memory on every
//! path.

pub mod citations;
pub mod context;
pub mod memory;
pub mod meta;
pub mod orchestrator;
pub mod types;

// Re-export main types
pub use citations::CitationResolver;
pub use memory::ConversationMemory;
pub use meta::MetaQuestionInterpreter;
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use types::{CitationToken, ConversationEntry, SessionResponse};
