// src/services/harvester.rs

//! Link harvester service.
//!
//! Walks every anchor of a fetched seed page and turns it into a
//! [`CampaignCandidate`] with an absolute URL and a best-effort label.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::CampaignCandidate;

/// Extracts campaign candidates from seed page HTML.
pub struct LinkHarvester {
    anchor_sel: Selector,
    image_sel: Selector,
}

impl LinkHarvester {
    /// Create a new harvester.
    pub fn new() -> Result<Self> {
        Ok(Self {
            anchor_sel: Self::parse_selector("a[href]")?,
            image_sel: Self::parse_selector("img")?,
        })
    }

    /// Lazily yield candidates for every usable anchor in `document`.
    ///
    /// Same-page fragment links, links that do not resolve to an http(s) URL
    /// and links without any label are skipped.
    pub fn harvest<'a>(
        &'a self,
        source: &'a str,
        base_url: &'a Url,
        document: &'a Html,
    ) -> impl Iterator<Item = CampaignCandidate> + 'a {
        document
            .select(&self.anchor_sel)
            .filter_map(move |anchor| self.candidate(source, base_url, anchor))
    }

    fn candidate(
        &self,
        source: &str,
        base_url: &Url,
        anchor: ElementRef<'_>,
    ) -> Option<CampaignCandidate> {
        let href = anchor.value().attr("href")?.trim();
        if href.starts_with('#') {
            return None;
        }

        let absolute = match base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Skipping unresolvable href {href:?} on {base_url}: {e}");
                return None;
            }
        };
        if !matches!(absolute.scheme(), "http" | "https") {
            return None;
        }

        let label = self.label(anchor);
        if label.is_empty() {
            return None;
        }

        Some(CampaignCandidate::new(source, label, absolute.to_string()))
    }

    /// Visible text, then `title`, then the first enclosed image's `alt`.
    fn label(&self, anchor: ElementRef<'_>) -> String {
        let text = anchor.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }

        if let Some(title) = anchor.value().attr("title") {
            let title = title.trim();
            if !title.is_empty() {
                return title.to_string();
            }
        }

        anchor
            .select(&self.image_sel)
            .next()
            .and_then(|img| img.value().attr("alt"))
            .map(|alt| alt.trim().to_string())
            .unwrap_or_default()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harvest(html: &str, page_url: &str) -> Vec<CampaignCandidate> {
        let harvester = LinkHarvester::new().unwrap();
        let base = Url::parse(page_url).unwrap();
        let document = Html::parse_document(html);
        harvester.harvest("test", &base, &document).collect()
    }

    #[test]
    fn resolves_relative_links_against_page() {
        let html = r#"<a href="/campaign/summer/">夏の大感謝祭キャンペーン</a>
                      <a href="spring.html">春のポイントアップ祭り</a>"#;
        let candidates = harvest(html, "https://point.rakuten.co.jp/campaign/");

        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0].absolute_url,
            "https://point.rakuten.co.jp/campaign/summer/"
        );
        assert_eq!(
            candidates[1].absolute_url,
            "https://point.rakuten.co.jp/campaign/spring.html"
        );
        assert_eq!(candidates[0].source, "test");
    }

    #[test]
    fn skips_fragment_only_links() {
        let html = r##"<a href="#top">ページの先頭へ戻る</a>
                       <a href="/event/">イベント情報まとめページ</a>"##;
        let candidates = harvest(html, "https://www.rakuten.co.jp/");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].absolute_url, "https://www.rakuten.co.jp/event/");
    }

    #[test]
    fn label_falls_back_to_title_then_alt() {
        let html = r#"
            <a href="/a" title="  タイトル属性  "><span> </span></a>
            <a href="/b"><img src="x.png" alt="画像の代替テキスト"></a>
            <a href="/c"><img src="y.png"></a>
        "#;
        let candidates = harvest(html, "https://www.rakuten.co.jp/");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].label, "タイトル属性");
        assert_eq!(candidates[1].label, "画像の代替テキスト");
    }

    #[test]
    fn visible_text_is_trimmed_only_at_the_ends() {
        let html = "<a href=\"/x\">\n  楽天カード\n  新規入会キャンペーン \n</a>\
                    <a href=\"/y\"> ポイント   2倍 セール </a>";
        let candidates = harvest(html, "https://www.rakuten-card.co.jp/campaign/");
        assert_eq!(candidates[0].label, "楽天カード\n  新規入会キャンペーン");
        assert_eq!(candidates[1].label, "ポイント   2倍 セール");
        assert_eq!(candidates[1].label.chars().count(), 13);
    }

    #[test]
    fn drops_non_http_targets() {
        let html = r#"<a href="javascript:void(0)">メニューを開く</a>
                      <a href="mailto:info@example.com">メールで問い合わせる</a>"#;
        assert!(harvest(html, "https://www.rakuten.co.jp/").is_empty());
    }

    #[test]
    fn ignores_anchors_without_href() {
        let html = r#"<a name="anchor">名前付きアンカー</a>"#;
        assert!(harvest(html, "https://www.rakuten.co.jp/").is_empty());
    }
}
