//! Answer citation resolution.
//!
//! Parses a generated answer for citation markers and validates them against
//! the passages that were actually sent to the generator. Markers with no
//! matching passage are hallucinated or out of range; they are dropped,
//! never surfaced, and never abort resolution of the remaining citations.

use crate::types::CitationToken;
use corpusqa_core::{AppError, AppResult};
use corpusqa_retrieval::{Passage, SourceLocator, SourceType};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Resolves citation markers in answer text to source locators.
pub struct CitationResolver {
    /// Matches `[3]` and `[W12]`; the optional `W` selects the web namespace.
    pattern: Regex,
}

impl CitationResolver {
    /// Create a resolver with the compiled marker pattern.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\[(W?)(\d+)\]").expect("citation marker pattern is valid"),
        }
    }

    /// Resolve the citations in `answer` against the generation context.
    ///
    /// Walks the text left to right, keeps the first occurrence of each
    /// distinct `(source type, ordinal)` pair, and maps it to the
    /// corresponding passage's locator. The output order is the order a
    /// reader encounters the citations, not the order of passages in the
    /// context. Never fails: invalid markers are logged and skipped.
    pub fn resolve(
        &self,
        answer: &str,
        merged: &[(CitationToken, Passage)],
    ) -> Vec<SourceLocator> {
        let by_token: HashMap<CitationToken, &SourceLocator> = merged
            .iter()
            .map(|(token, passage)| (*token, &passage.locator))
            .collect();

        let mut seen: HashSet<CitationToken> = HashSet::new();
        let mut sources = Vec::new();

        for captures in self.pattern.captures_iter(answer) {
            let source_type = if captures[1].is_empty() {
                SourceType::Pdf
            } else {
                SourceType::Web
            };

            // A digit run too long for usize cannot name a real passage
            let Ok(ordinal) = captures[2].parse::<usize>() else {
                continue;
            };

            let token = CitationToken {
                source_type,
                ordinal,
            };

            if !seen.insert(token) {
                continue; // later repeat of an already-resolved pair
            }

            match Self::lookup(&by_token, token) {
                Ok(locator) => sources.push(locator),
                Err(e) => tracing::debug!("Dropping citation: {}", e),
            }
        }

        sources
    }

    /// Look up the locator for a token in the generation context.
    fn lookup(
        by_token: &HashMap<CitationToken, &SourceLocator>,
        token: CitationToken,
    ) -> AppResult<SourceLocator> {
        by_token
            .get(&token)
            .map(|locator| (*locator).clone())
            .ok_or_else(|| AppError::InvalidCitation(token.label()))
    }
}

impl Default for CitationResolver {
    fn default() -> Self {
        Self::new()
    }
}
