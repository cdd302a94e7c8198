//! Text generation crate for CorpusQA.
//!
//! This crate provides a provider-agnostic abstraction for the text
//! generation capability: the session layer hands a fully assembled prompt to
//! a [`Generator`] and receives completed text back. Generators are
//! stateless; all conversational state lives in the session crate.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **OpenAI**: Chat completions API (requires API key)
//!
//! # Example
//! ```no_run
//! use corpusqa_llm::{Generator, GenerationRequest, providers::OllamaGenerator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = OllamaGenerator::new();
//! let request = GenerationRequest::new("Hello, world!", "llama3.2");
//! let response = generator.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{GenerationRequest, GenerationResponse, GenerationUsage, Generator};
pub use factory::create_generator;
pub use providers::{OllamaGenerator, OpenAiGenerator};
