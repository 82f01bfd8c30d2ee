// src/pipeline/index.rs

//! Published article index and listing document.
//!
//! The index is an ordered map keyed by filename, newest article first.
//! Re-publishing an identical `(filename, title)` pair leaves it untouched.

use indexmap::IndexMap;

use crate::models::ArticleRecord;

const LISTING_TITLE: &str = "楽天経済圏キャンペーン情報ブログ";
const LISTING_INTRO: &str = "楽天経済圏のお得なキャンペーン情報を毎日お届けします！";
const LISTING_HEADING: &str = "最新記事";
const LISTING_NOTES: [&str; 2] = [
    "※本ブログはAIによって自動生成されています。最新の情報は各キャンペーンの公式サイトをご確認ください。",
    "※本ブログにはアフィリエイトリンクが含まれています。",
];

/// What a merge did to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The exact pair was already present
    Unchanged,
    /// A new filename was added at the head
    Inserted,
    /// A known filename got a new title and moved to the head
    Replaced,
}

/// Ordered, deduplicated list of published articles.
#[derive(Debug, Clone, Default)]
pub struct ArticleIndex {
    /// filename -> title, position 0 is the newest article
    entries: IndexMap<String, String>,
}

impl ArticleIndex {
    /// Build from a persisted list. Later duplicates of a filename are dropped.
    pub fn from_records(records: impl IntoIterator<Item = ArticleRecord>) -> Self {
        let mut entries = IndexMap::new();
        for record in records {
            entries.entry(record.filename).or_insert(record.title);
        }
        Self { entries }
    }

    /// Add an article at the head unless the exact pair is already present.
    pub fn merge(&mut self, record: ArticleRecord) -> MergeOutcome {
        let outcome = match self.entries.get(&record.filename) {
            Some(title) if *title == record.title => return MergeOutcome::Unchanged,
            Some(_) => MergeOutcome::Replaced,
            None => MergeOutcome::Inserted,
        };

        if outcome == MergeOutcome::Replaced {
            self.entries.shift_remove(&record.filename);
        }
        self.entries.shift_insert(0, record.filename, record.title);
        outcome
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest article, if any.
    pub fn latest(&self) -> Option<ArticleRecord> {
        self.entries
            .first()
            .map(|(filename, title)| ArticleRecord::new(filename, title))
    }

    /// Materialize the index in list order for persistence.
    pub fn to_records(&self) -> Vec<ArticleRecord> {
        self.entries
            .iter()
            .map(|(filename, title)| ArticleRecord::new(filename, title))
            .collect()
    }

    /// Render the listing document enumerating every article in order.
    pub fn render_listing(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("# {LISTING_TITLE}"),
            String::new(),
            LISTING_INTRO.to_string(),
            String::new(),
            "---".to_string(),
            String::new(),
            format!("## {LISTING_HEADING}"),
            String::new(),
        ];
        lines.extend(
            self.entries
                .iter()
                .map(|(filename, title)| format!("- [{title}]({filename})")),
        );
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
        lines.extend(LISTING_NOTES.iter().map(|note| format!("> {note}")));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(pairs: &[(&str, &str)]) -> ArticleIndex {
        ArticleIndex::from_records(pairs.iter().map(|(f, t)| ArticleRecord::new(*f, *t)))
    }

    fn filenames(index: &ArticleIndex) -> Vec<String> {
        index.to_records().into_iter().map(|r| r.filename).collect()
    }

    #[test]
    fn new_article_is_prepended() {
        let mut idx = index(&[("b.md", "B"), ("a.md", "A")]);
        assert_eq!(idx.merge(ArticleRecord::new("c.md", "C")), MergeOutcome::Inserted);
        assert_eq!(filenames(&idx), vec!["c.md", "b.md", "a.md"]);
        assert_eq!(idx.latest(), Some(ArticleRecord::new("c.md", "C")));
    }

    #[test]
    fn exact_duplicate_keeps_position() {
        let mut idx = index(&[("b.md", "B"), ("a.md", "A")]);
        assert_eq!(idx.merge(ArticleRecord::new("a.md", "A")), MergeOutcome::Unchanged);
        assert_eq!(idx.merge(ArticleRecord::new("a.md", "A")), MergeOutcome::Unchanged);
        assert_eq!(filenames(&idx), vec!["b.md", "a.md"]);
    }

    #[test]
    fn publishing_twice_yields_one_entry() {
        let mut idx = ArticleIndex::default();
        idx.merge(ArticleRecord::new("a.md", "A"));
        idx.merge(ArticleRecord::new("b.md", "B"));
        idx.merge(ArticleRecord::new("a.md", "A"));
        assert_eq!(idx.len(), 2);
        assert_eq!(filenames(&idx), vec!["b.md", "a.md"]);
    }

    #[test]
    fn retitled_filename_moves_to_head_without_duplicate() {
        let mut idx = index(&[("b.md", "B"), ("a.md", "A")]);
        assert_eq!(
            idx.merge(ArticleRecord::new("a.md", "A2")),
            MergeOutcome::Replaced
        );
        assert_eq!(
            idx.to_records(),
            vec![ArticleRecord::new("a.md", "A2"), ArticleRecord::new("b.md", "B")]
        );
    }

    #[test]
    fn duplicate_filenames_in_storage_are_collapsed() {
        let idx = index(&[("a.md", "new"), ("a.md", "old"), ("b.md", "B")]);
        assert_eq!(
            idx.to_records(),
            vec![ArticleRecord::new("a.md", "new"), ArticleRecord::new("b.md", "B")]
        );
    }

    #[test]
    fn listing_enumerates_articles_in_order() {
        let idx = index(&[("2026-10-17.md", "Latest"), ("2026-10-10.md", "Older")]);
        let listing = idx.render_listing();

        assert!(listing.starts_with("# 楽天経済圏キャンペーン情報ブログ\n"));
        let latest = listing.find("- [Latest](2026-10-17.md)").unwrap();
        let older = listing.find("- [Older](2026-10-10.md)").unwrap();
        assert!(latest < older);
        assert!(listing.contains("> ※本ブログにはアフィリエイトリンクが含まれています。"));
    }

    #[test]
    fn empty_index_still_renders_framing() {
        let listing = ArticleIndex::default().render_listing();
        assert!(listing.contains("## 最新記事"));
        assert!(ArticleIndex::default().is_empty());
    }
}
