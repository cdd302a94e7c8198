//! Session type definitions.

use corpusqa_retrieval::{SourceLocator, SourceType};
use serde::{Deserialize, Serialize};

/// Identifies a passage within a single query's context.
///
/// Ordinals are 1-based and assigned independently per source type in
/// retrieval order, so the pdf and web namespaces never collide: pdf tokens
/// render as `[n]`, web tokens as `[Wn]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitationToken {
    /// Which namespace the ordinal belongs to
    pub source_type: SourceType,

    /// 1-based position within that namespace
    pub ordinal: usize,
}

impl CitationToken {
    /// Create a pdf token.
    pub fn pdf(ordinal: usize) -> Self {
        Self {
            source_type: SourceType::Pdf,
            ordinal,
        }
    }

    /// Create a web token.
    pub fn web(ordinal: usize) -> Self {
        Self {
            source_type: SourceType::Web,
            ordinal,
        }
    }

    /// The marker this token renders as in context blocks and answers.
    pub fn label(&self) -> String {
        match self.source_type {
            SourceType::Pdf => format!("[{}]", self.ordinal),
            SourceType::Web => format!("[W{}]", self.ordinal),
        }
    }
}

/// One recorded question/answer/sources triple.
///
/// Created once per query after resolution completes and never mutated
/// afterwards. Serde round-trips it as the storage-agnostic interchange
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// The question as asked
    pub question: String,

    /// The answer as shown to the user (generated or canned)
    pub answer: String,

    /// Cited source locators, in reader order
    #[serde(default)]
    pub sources: Vec<SourceLocator>,
}

impl ConversationEntry {
    /// Create a new entry.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<SourceLocator>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            sources,
        }
    }
}

/// Structured response from [`crate::Orchestrator::handle_question`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The answer shown to the user
    pub answer: String,

    /// Cited source locators, in reader order (empty for meta and canned
    /// answers)
    pub sources: Vec<SourceLocator>,

    /// Snapshot of the most recent conversation entries, current query
    /// included
    pub memory: Vec<ConversationEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_labels() {
        assert_eq!(CitationToken::pdf(1).label(), "[1]");
        assert_eq!(CitationToken::pdf(12).label(), "[12]");
        assert_eq!(CitationToken::web(3).label(), "[W3]");
    }

    #[test]
    fn test_entry_record_shape() {
        let entry = ConversationEntry::new(
            "How does dopamine affect motivation?",
            "Dopamine increases motivation [1].",
            vec![SourceLocator::Pdf {
                filename: "a.pdf".to_string(),
                page: 2,
            }],
        );

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "question": "How does dopamine affect motivation?",
                "answer": "Dopamine increases motivation [1].",
                "sources": [{"filename": "a.pdf", "page": 2}]
            })
        );

        let back: ConversationEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
