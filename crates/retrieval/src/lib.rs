//! Passage retrieval crate for CorpusQA.
//!
//! This crate defines the two retrieval capabilities the session layer draws
//! evidence from, as trait seams with HTTP-backed implementations:
//! - [`DocumentIndex`]: semantic passage retrieval over the private corpus,
//!   served by a retrieval sidecar (indexing and embeddings live there, not
//!   here).
//! - [`WebSearch`]: live web passage retrieval via SerpAPI.
//!
//! Both produce [`Passage`] values: a unit of text plus the
//! [`SourceLocator`] needed to cite it.

pub mod index;
pub mod types;
pub mod web;

// Re-export main types
pub use index::{DocumentIndex, HttpDocumentIndex};
pub use types::{Passage, SourceLocator, SourceType};
pub use web::{SerpApiClient, WebSearch};
