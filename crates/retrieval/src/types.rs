//! Retrieval type definitions.

use serde::{Deserialize, Serialize};

/// Where a passage came from, in citable form.
///
/// Serialized untagged so exported records keep the plain
/// `{filename, page}` / `{url, title}` shapes of the interchange format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceLocator {
    /// A page of a PDF in the private corpus
    Pdf { filename: String, page: u32 },

    /// A live web result
    Web { url: String, title: String },
}

impl SourceLocator {
    /// The source namespace this locator belongs to.
    pub fn source_type(&self) -> SourceType {
        match self {
            SourceLocator::Pdf { .. } => SourceType::Pdf,
            SourceLocator::Web { .. } => SourceType::Web,
        }
    }

    /// Human-readable description used in context blocks and CLI output.
    ///
    /// Pdf: `a.pdf, page 2` — Web: `Title (url)`, falling back to the bare
    /// url when the result carried no title.
    pub fn describe(&self) -> String {
        match self {
            SourceLocator::Pdf { filename, page } => format!("{}, page {}", filename, page),
            SourceLocator::Web { url, title } => {
                if title.is_empty() {
                    url.clone()
                } else {
                    format!("{} ({})", title, url)
                }
            }
        }
    }
}

/// The two independent citation namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Pdf,
    Web,
}

/// A retrieved unit of text plus its source locator.
///
/// Produced by [`crate::DocumentIndex`] or [`crate::WebSearch`] for a single
/// query; immutable and scoped to that query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// The passage text
    pub text: String,

    /// Where the text came from
    #[serde(flatten)]
    pub locator: SourceLocator,
}

impl Passage {
    /// Create a passage from a PDF page.
    pub fn pdf(text: impl Into<String>, filename: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            locator: SourceLocator::Pdf {
                filename: filename.into(),
                page,
            },
        }
    }

    /// Create a passage from a web result.
    pub fn web(text: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            locator: SourceLocator::Web {
                url: url.into(),
                title: title.into(),
            },
        }
    }

    /// Whether the passage carries any non-whitespace text.
    pub fn has_usable_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_record_shapes() {
        let pdf = SourceLocator::Pdf {
            filename: "a.pdf".to_string(),
            page: 2,
        };
        let json = serde_json::to_value(&pdf).unwrap();
        assert_eq!(json, serde_json::json!({"filename": "a.pdf", "page": 2}));

        let web = SourceLocator::Web {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
        };
        let json = serde_json::to_value(&web).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://example.com", "title": "Example"})
        );
    }

    #[test]
    fn test_locator_round_trip() {
        let locators = vec![
            SourceLocator::Pdf {
                filename: "a.pdf".to_string(),
                page: 2,
            },
            SourceLocator::Web {
                url: "u".to_string(),
                title: "t".to_string(),
            },
        ];

        let json = serde_json::to_string(&locators).unwrap();
        let parsed: Vec<SourceLocator> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, locators);
    }

    #[test]
    fn test_describe() {
        let pdf = Passage::pdf("text", "a.pdf", 2);
        assert_eq!(pdf.locator.describe(), "a.pdf, page 2");

        let web = Passage::web("text", "https://example.com", "Example");
        assert_eq!(web.locator.describe(), "Example (https://example.com)");

        let untitled = Passage::web("text", "https://example.com", "");
        assert_eq!(untitled.locator.describe(), "https://example.com");
    }

    #[test]
    fn test_usable_text() {
        assert!(Passage::pdf("some text", "a.pdf", 1).has_usable_text());
        assert!(!Passage::pdf("", "a.pdf", 1).has_usable_text());
        assert!(!Passage::pdf("   \n", "a.pdf", 1).has_usable_text());
    }
}
