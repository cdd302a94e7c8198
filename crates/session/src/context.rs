//! Context assembly.
//!
//! Merges document and web passages into a single citation-addressable
//! context and builds the generation prompt from it. The orchestrator never
//! calls into this module with an empty passage set; the empty-context guard
//! fires first.

use crate::types::{CitationToken, ConversationEntry};
use corpusqa_retrieval::Passage;

/// Merge pdf and web passages into one token-addressed context.
///
/// Pdf passages are numbered `1..=P` and web passages `1..=W` independently,
/// each in retrieval order. The output holds all pdf entries followed by all
/// web entries, insertion order preserved within each group. Deterministic:
/// identical inputs yield identical token assignments.
pub fn merge(pdf: Vec<Passage>, web: Vec<Passage>) -> Vec<(CitationToken, Passage)> {
    let mut merged = Vec::with_capacity(pdf.len() + web.len());

    for (i, passage) in pdf.into_iter().enumerate() {
        merged.push((CitationToken::pdf(i + 1), passage));
    }
    for (i, passage) in web.into_iter().enumerate() {
        merged.push((CitationToken::web(i + 1), passage));
    }

    merged
}

/// Render the context block, one line per passage:
/// `<label> <locator description>: <text>` with newlines collapsed to
/// spaces. Passages with empty text still render.
pub fn render_context(merged: &[(CitationToken, Passage)]) -> String {
    let lines: Vec<String> = merged
        .iter()
        .map(|(token, passage)| {
            let text = passage.text.replace('\n', " ");
            format!("{} {}: {}", token.label(), passage.locator.describe(), text)
        })
        .collect();

    lines.join("\n")
}

/// Build the generation prompt.
///
/// The template is deterministic: instructions first, prior turns verbatim as
/// `Q:`/`A:` pairs when history is non-empty, then the context block and the
/// question.
pub fn build_prompt(
    question: &str,
    merged: &[(CitationToken, Passage)],
    history: &[ConversationEntry],
) -> String {
    let mut prompt = String::from(
        "You are an expert research assistant. \
         Given the following extracts from research papers and web sources, \
         answer the user's question. \
         Cite PDF sources as [1], [2], etc., and web sources as [W1], [W2], etc., \
         using the numbers provided in the context. \
         If you don't know, say so honestly. \
         Do not cite outside or non-existent sources.\n\n",
    );

    if !history.is_empty() {
        prompt.push_str("Previous conversation:\n");
        for entry in history {
            prompt.push_str(&format!("Q: {}\nA: {}\n", entry.question, entry.answer));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("Context:\n{}\n\n", render_context(merged)));
    prompt.push_str(&format!("Question: {}\n\n", question));
    prompt.push_str("Answer (with citations):");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpusqa_retrieval::SourceType;

    fn sample_passages() -> (Vec<Passage>, Vec<Passage>) {
        let pdf = vec![
            Passage::pdf("Dopamine increases motivation.", "a.pdf", 2),
            Passage::pdf("Reward prediction errors.", "b.pdf", 7),
        ];
        let web = vec![Passage::web(
            "Dopamine is a neurotransmitter.",
            "https://example.com/dopamine",
            "Dopamine",
        )];
        (pdf, web)
    }

    #[test]
    fn test_merge_numbering() {
        let (pdf, web) = sample_passages();
        let merged = merge(pdf, web);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].0, CitationToken::pdf(1));
        assert_eq!(merged[1].0, CitationToken::pdf(2));
        assert_eq!(merged[2].0, CitationToken::web(1));

        // pdf entries first, insertion order preserved
        assert!(merged[0].1.text.contains("motivation"));
        assert_eq!(merged[2].0.source_type, SourceType::Web);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let (pdf, web) = sample_passages();
        let first = merge(pdf.clone(), web.clone());
        let second = merge(pdf, web);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_collapses_newlines() {
        let merged = merge(
            vec![Passage::pdf("line one\nline two", "a.pdf", 1)],
            Vec::new(),
        );
        let block = render_context(&merged);
        assert_eq!(block, "[1] a.pdf, page 1: line one line two");
    }

    #[test]
    fn test_render_keeps_empty_passages() {
        let merged = merge(
            vec![
                Passage::pdf("has text", "a.pdf", 1),
                Passage::pdf("", "b.pdf", 3),
            ],
            Vec::new(),
        );
        let block = render_context(&merged);
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "[2] b.pdf, page 3: ");
    }

    #[test]
    fn test_prompt_without_history() {
        let (pdf, web) = sample_passages();
        let merged = merge(pdf, web);
        let prompt = build_prompt("How does dopamine affect motivation?", &merged, &[]);

        assert!(prompt.contains("Do not cite outside or non-existent sources."));
        assert!(!prompt.contains("Previous conversation:"));
        assert!(prompt.contains("[1] a.pdf, page 2: Dopamine increases motivation."));
        assert!(prompt.contains("[W1] Dopamine (https://example.com/dopamine)"));
        assert!(prompt.contains("Question: How does dopamine affect motivation?"));
        assert!(prompt.ends_with("Answer (with citations):"));
    }

    #[test]
    fn test_prompt_embeds_history_verbatim() {
        let (pdf, web) = sample_passages();
        let merged = merge(pdf, web);
        let history = vec![ConversationEntry::new(
            "What is dopamine?",
            "A neurotransmitter [W1].",
            Vec::new(),
        )];
        let prompt = build_prompt("And motivation?", &merged, &history);

        assert!(prompt.contains("Previous conversation:\nQ: What is dopamine?\nA: A neurotransmitter [W1].\n"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let (pdf, web) = sample_passages();
        let merged = merge(pdf, web);
        let a = build_prompt("q", &merged, &[]);
        let b = build_prompt("q", &merged, &[]);
        assert_eq!(a, b);
    }
}
