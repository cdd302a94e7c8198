//! Meta-question interpretation.
//!
//! Answers questions *about* the conversation itself purely from structured
//! history, bypassing generation entirely. This prevents hallucinated
//! history and avoids external calls for questions the log already answers.
//!
//! The interpreter is an ordered table of (pattern, handler) pairs evaluated
//! over the lowercased question; the first matching rule wins, so new
//! meta-question forms are added by extending the table.
//!
//! It runs before the current query is recorded, so "the most recent entry"
//! is always the previous turn.

use crate::types::ConversationEntry;
use regex::{Captures, Regex};

/// Handler for one matched meta-question form.
type Handler = fn(&Captures, &[ConversationEntry]) -> String;

/// One (pattern, handler) rule in the table.
struct MetaRule {
    pattern: Regex,
    handler: Handler,
}

/// Interprets questions about the conversation history.
pub struct MetaQuestionInterpreter {
    rules: Vec<MetaRule>,
}

/// Ordinal words recognized by the first rule, in 1-based order.
const ORDINAL_WORDS: [&str; 10] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

impl MetaQuestionInterpreter {
    /// Build the interpreter with its rule table.
    ///
    /// Rule order is the precedence order: word ordinals, numeric ordinals,
    /// "last question", "last answer", then question listing.
    pub fn new() -> Self {
        let rule = |pattern: &str, handler: Handler| MetaRule {
            pattern: Regex::new(pattern).expect("meta-question pattern is valid"),
            handler,
        };

        Self {
            rules: vec![
                rule(
                    r"\b(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\s+question",
                    handle_word_ordinal,
                ),
                rule(r"\b(\d+)(?:st|nd|rd|th)?\s+question", handle_numeric_ordinal),
                rule(r"\blast\s+question", handle_last_question),
                rule(r"\blast\s+answer", handle_last_answer),
                rule(
                    r"\bprevious\s+questions\b|\blist\s+questions\b",
                    handle_list_questions,
                ),
            ],
        }
    }

    /// Interpret `question` against the accumulated history.
    ///
    /// Returns `Some(answer)` when a rule matches, `None` when the question
    /// is not about the conversation and must go through retrieval and
    /// generation. Meta answers carry no citations.
    pub fn interpret(&self, question: &str, history: &[ConversationEntry]) -> Option<String> {
        let normalized = question.to_lowercase();

        for rule in &self.rules {
            if let Some(captures) = rule.pattern.captures(&normalized) {
                tracing::debug!("Meta-question matched: {}", rule.pattern.as_str());
                return Some((rule.handler)(&captures, history));
            }
        }

        None
    }
}

impl Default for MetaQuestionInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up the question at 1-based index `n`, or the out-of-range message.
fn question_at(history: &[ConversationEntry], n: usize) -> String {
    if n == 0 || n > history.len() {
        format!("There is no question number {}.", n)
    } else {
        history[n - 1].question.clone()
    }
}

fn handle_word_ordinal(captures: &Captures, history: &[ConversationEntry]) -> String {
    let word = &captures[1];
    let n = ORDINAL_WORDS
        .iter()
        .position(|candidate| *candidate == word)
        .map(|i| i + 1)
        .unwrap_or(0);
    question_at(history, n)
}

fn handle_numeric_ordinal(captures: &Captures, history: &[ConversationEntry]) -> String {
    match captures[1].parse::<usize>() {
        Ok(n) => question_at(history, n),
        Err(_) => format!("There is no question number {}.", &captures[1]),
    }
}

// "last" lookups read position len - 2: the interpreter runs before the
// current turn is appended, so the newest recorded entry is the turn that
// just completed.
fn handle_last_question(_: &Captures, history: &[ConversationEntry]) -> String {
    if history.len() < 2 {
        "There is not enough history yet.".to_string()
    } else {
        history[history.len() - 2].question.clone()
    }
}

fn handle_last_answer(_: &Captures, history: &[ConversationEntry]) -> String {
    if history.len() < 2 {
        "There is not enough history yet.".to_string()
    } else {
        history[history.len() - 2].answer.clone()
    }
}

fn handle_list_questions(_: &Captures, history: &[ConversationEntry]) -> String {
    if history.len() < 2 {
        return "No previous questions.".to_string();
    }

    history[..history.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry.question))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(questions: &[&str]) -> Vec<ConversationEntry> {
        questions
            .iter()
            .enumerate()
            .map(|(i, q)| ConversationEntry::new(*q, format!("A{}", i + 1), Vec::new()))
            .collect()
    }

    #[test]
    fn test_first_question_lookup() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1", "Q2"]);

        let answer = interpreter.interpret("what was my first question?", &history);
        assert_eq!(answer.as_deref(), Some("Q1"));
    }

    #[test]
    fn test_first_question_on_empty_history() {
        let interpreter = MetaQuestionInterpreter::new();

        let answer = interpreter.interpret("what was my first question?", &[]);
        assert_eq!(answer.as_deref(), Some("There is no question number 1."));
    }

    #[test]
    fn test_word_ordinal_out_of_range() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1"]);

        let answer = interpreter.interpret("what was my third question?", &history);
        assert_eq!(answer.as_deref(), Some("There is no question number 3."));
    }

    #[test]
    fn test_numeric_ordinal_forms() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1", "Q2", "Q3"]);

        assert_eq!(
            interpreter.interpret("show me my 2nd question", &history).as_deref(),
            Some("Q2")
        );
        assert_eq!(
            interpreter.interpret("what was question... the 3 question", &history).as_deref(),
            Some("Q3")
        );
        assert_eq!(
            interpreter.interpret("what was my 7th question?", &history).as_deref(),
            Some("There is no question number 7.")
        );
    }

    #[test]
    fn test_word_ordinal_precedes_numeric() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1", "Q2"]);

        // "first question" must hit the word rule even with a digit elsewhere
        let answer = interpreter.interpret("in 2024, what was my first question?", &history);
        assert_eq!(answer.as_deref(), Some("Q1"));
    }

    #[test]
    fn test_last_question_reads_second_to_last() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1", "Q2", "Q3"]);

        let answer = interpreter.interpret("what was my last question?", &history);
        assert_eq!(answer.as_deref(), Some("Q2"));
    }

    #[test]
    fn test_last_question_needs_two_entries() {
        let interpreter = MetaQuestionInterpreter::new();

        let answer = interpreter.interpret("what was my last question?", &history(&["Q1"]));
        assert_eq!(answer.as_deref(), Some("There is not enough history yet."));
    }

    #[test]
    fn test_last_answer() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1", "Q2", "Q3"]);

        let answer = interpreter.interpret("and my last answer?", &history);
        assert_eq!(answer.as_deref(), Some("A2"));
    }

    #[test]
    fn test_list_previous_questions() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1", "Q2", "Q3"]);

        let answer = interpreter.interpret("list questions please", &history);
        assert_eq!(answer.as_deref(), Some("1. Q1\n2. Q2"));

        let answer = interpreter.interpret("what were my previous questions?", &history);
        assert_eq!(answer.as_deref(), Some("1. Q1\n2. Q2"));
    }

    #[test]
    fn test_list_questions_none_qualify() {
        let interpreter = MetaQuestionInterpreter::new();

        let answer = interpreter.interpret("list questions", &history(&["Q1"]));
        assert_eq!(answer.as_deref(), Some("No previous questions."));
    }

    #[test]
    fn test_domain_question_passes_through() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1"]);

        assert!(interpreter
            .interpret("How does dopamine affect motivation?", &history)
            .is_none());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let interpreter = MetaQuestionInterpreter::new();
        let history = history(&["Q1", "Q2"]);

        let answer = interpreter.interpret("What Was My FIRST Question?", &history);
        assert_eq!(answer.as_deref(), Some("Q1"));
    }
}
