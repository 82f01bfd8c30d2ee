// src/models/article.rs

//! Article and article index data structures.

use serde::{Deserialize, Serialize};

/// An entry of the published article index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Document name, unique within the index
    pub filename: String,

    /// Article title
    pub title: String,
}

impl ArticleRecord {
    pub fn new(filename: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
        }
    }
}

/// One campaign line of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleEntry {
    pub title: String,
    /// Affiliate-tagged link
    pub url: String,
}

/// Structured article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDocument {
    pub title: String,
    pub intro: Vec<String>,
    pub list_heading: String,
    pub entries: Vec<ArticleEntry>,
    pub summary_heading: String,
    pub summary: Vec<String>,
    pub notes: Vec<String>,
}

impl ArticleDocument {
    /// Render the document as Markdown.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}", self.title));
        lines.push(String::new());
        lines.extend(self.intro.iter().cloned());
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(format!("## {}", self.list_heading));
        lines.push(String::new());
        for entry in &self.entries {
            lines.push(format!("- [{}]({})", entry.title, entry.url));
        }
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(format!("## {}", self.summary_heading));
        lines.extend(self.summary.iter().cloned());
        lines.push(String::new());
        lines.extend(self.notes.iter().map(|note| format!("> {note}")));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Output of article assembly.
#[derive(Debug, Clone)]
pub struct Article {
    /// Date-derived document name
    pub filename: String,

    /// Article title
    pub title: String,

    pub document: ArticleDocument,
}

impl Article {
    /// Index entry describing this article.
    pub fn record(&self) -> ArticleRecord {
        ArticleRecord::new(&self.filename, &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ArticleDocument {
        ArticleDocument {
            title: "Weekly".to_string(),
            intro: vec!["Hello".to_string()],
            list_heading: "Campaigns".to_string(),
            entries: vec![ArticleEntry {
                title: "Big Sale".to_string(),
                url: "https://example.com/sale".to_string(),
            }],
            summary_heading: "Summary".to_string(),
            summary: vec!["Bye".to_string()],
            notes: vec!["Auto-generated".to_string()],
        }
    }

    #[test]
    fn render_lists_entries_as_links() {
        let rendered = sample_document().render();
        assert!(rendered.starts_with("# Weekly\n"));
        assert!(rendered.contains("## Campaigns\n\n- [Big Sale](https://example.com/sale)\n"));
        assert!(rendered.ends_with("> Auto-generated\n"));
    }

    #[test]
    fn record_copies_filename_and_title() {
        let article = Article {
            filename: "2026-10-17-rakuten-summary.md".to_string(),
            title: "Weekly".to_string(),
            document: sample_document(),
        };
        assert_eq!(
            article.record(),
            ArticleRecord::new("2026-10-17-rakuten-summary.md", "Weekly")
        );
    }
}
