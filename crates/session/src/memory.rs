//! Conversational memory.
//!
//! A bounded, ordered log of question/answer/sources entries for a single
//! session. Insertion order is chronological order, entries are never
//! mutated after append, and the oldest entry is evicted first when a
//! capacity bound is configured.

use crate::types::ConversationEntry;
use corpusqa_retrieval::SourceLocator;
use std::collections::VecDeque;

/// Bounded FIFO log of conversation entries.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    entries: VecDeque<ConversationEntry>,
    capacity: Option<usize>,
}

impl ConversationMemory {
    /// Create an unbounded memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory keeping only the latest `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: Some(capacity),
        }
    }

    /// Append an entry, evicting the oldest when over capacity.
    pub fn add(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<SourceLocator>,
    ) {
        self.entries
            .push_back(ConversationEntry::new(question, answer, sources));

        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                let removed = self.entries.pop_front();
                tracing::debug!("Capacity exceeded; evicted oldest entry: {:?}", removed);
            }
        }

        tracing::info!("Added memory entry. Total entries: {}", self.entries.len());
    }

    /// Return the last `n` entries (all when `None`) as an independent
    /// snapshot. Mutating the returned vector never affects internal state.
    pub fn get_history(&self, n: Option<usize>) -> Vec<ConversationEntry> {
        match n {
            None => self.entries.iter().cloned().collect(),
            Some(n) => {
                let skip = self.entries.len().saturating_sub(n);
                self.entries.iter().skip(skip).cloned().collect()
            }
        }
    }

    /// The most recent question, or `None` when the log is empty.
    pub fn last_question(&self) -> Option<&str> {
        self.entries.back().map(|entry| entry.question.as_str())
    }

    /// The most recent answer, or `None` when the log is empty.
    pub fn last_answer(&self) -> Option<&str> {
        self.entries.back().map(|entry| entry.answer.as_str())
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the log.
    pub fn clear(&mut self) {
        tracing::info!("Memory cleared. {} entries removed.", self.entries.len());
        self.entries.clear();
    }

    /// The full log as plain interchange records (deep copy).
    pub fn export(&self) -> Vec<ConversationEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Replace the log with the provided records.
    ///
    /// Taking the records by value means no aliasing with caller-owned data
    /// survives the call. The capacity bound still applies.
    pub fn import(&mut self, records: Vec<ConversationEntry>) {
        self.entries = records.into_iter().collect();

        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                self.entries.pop_front();
            }
        }

        tracing::info!("Memory imported with {} entries.", self.entries.len());
    }
}
