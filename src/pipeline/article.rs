// src/pipeline/article.rs

//! Article assembly from the persisted campaign records.

use chrono::NaiveDateTime;

use crate::models::{Article, ArticleConfig, ArticleDocument, ArticleEntry, CampaignRecord};
use crate::services::AffiliateRewriter;

const GREETING: &str = "こんにちは！AIアシスタントです。";
const ENTRY_REMINDER: &str = "エントリーが必要なものも多いので、お見逃しなく！";
const LIST_HEADING: &str = "注目のキャンペーン一覧";
const SUMMARY_HEADING: &str = "まとめ";
const SUMMARY: [&str; 3] = [
    "今週もたくさんのキャンペーンが開催されていますね。",
    "特に、大型のセールイベントは見逃せません。",
    "この記事が、皆さんのポイ活の助けになれば幸いです。",
];
const NOTES: [&str; 2] = [
    "※本記事はAIによって自動生成されています。最新の情報は各キャンペーンの公式サイトをご確認ください。",
    "※本記事にはアフィリエイトリンクが含まれています。",
];

/// Builds dated digest articles.
pub struct ArticleAssembler {
    config: ArticleConfig,
    rewriter: AffiliateRewriter,
}

impl ArticleAssembler {
    pub fn new(config: &ArticleConfig, rewriter: AffiliateRewriter) -> Self {
        Self {
            config: config.clone(),
            rewriter,
        }
    }

    /// Assemble the article for `records` generated at `generated_at`.
    ///
    /// Records with a blank title or URL are left out.
    pub fn assemble(&self, records: &[CampaignRecord], generated_at: NaiveDateTime) -> Article {
        let display_date = generated_at.format("%Y年%m月%d日").to_string();
        let title = self.config.title_template.replace("{date}", &display_date);

        let entries: Vec<ArticleEntry> = records
            .iter()
            .filter(|record| {
                let keep = record.is_publishable();
                if !keep {
                    log::debug!("Skipping incomplete record from {}", record.source);
                }
                keep
            })
            .map(|record| ArticleEntry {
                title: record.title.trim().to_string(),
                url: self.rewriter.rewrite(record.url.trim()),
            })
            .collect();

        let document = ArticleDocument {
            title: title.clone(),
            intro: vec![
                GREETING.to_string(),
                format!(
                    "今週も楽天経済圏で開催されているお得なキャンペーン情報を集めてきました。（{display_date}時点）"
                ),
                ENTRY_REMINDER.to_string(),
            ],
            list_heading: LIST_HEADING.to_string(),
            entries,
            summary_heading: SUMMARY_HEADING.to_string(),
            summary: SUMMARY.iter().map(|s| s.to_string()).collect(),
            notes: NOTES.iter().map(|s| s.to_string()).collect(),
        };

        Article {
            filename: self.filename(generated_at),
            title,
            document,
        }
    }

    /// `YYYY-MM-DD-<suffix>.md`, with `-HHMM` after the date when configured.
    pub fn filename(&self, generated_at: NaiveDateTime) -> String {
        let stamp = if self.config.include_time {
            generated_at.format("%Y-%m-%d-%H%M")
        } else {
            generated_at.format("%Y-%m-%d")
        };
        format!("{}-{}.md", stamp, self.config.filename_suffix)
    }
}
