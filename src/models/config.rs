// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP fetching behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Seed pages scanned for campaign links
    #[serde(default = "defaults::sources")]
    pub sources: Vec<SeedSource>,

    /// Campaign filtering rules
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Affiliate link rewriting
    #[serde(default)]
    pub affiliate: AffiliateConfig,

    /// Article naming and titling
    #[serde(default)]
    pub article: ArticleConfig,

    /// Storage file locations, relative to the storage directory
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.max_concurrent == 0 {
            return Err(AppError::validation("fetcher.max_concurrent must be > 0"));
        }
        if self.sources.is_empty() {
            return Err(AppError::validation("No seed sources defined"));
        }
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(AppError::validation("Seed source with empty name"));
            }
            url::Url::parse(&source.url).map_err(|e| {
                AppError::validation(format!("Seed {} has invalid url: {e}", source.name))
            })?;
        }
        if self.classifier.campaign_marker.trim().is_empty() {
            return Err(AppError::validation("classifier.campaign_marker is empty"));
        }
        if self.affiliate.affiliate_id.trim().is_empty() {
            return Err(AppError::validation("affiliate.affiliate_id is empty"));
        }
        if self.affiliate.tracking_key.trim().is_empty() {
            return Err(AppError::validation("affiliate.tracking_key is empty"));
        }
        if self.affiliate.merchant_domains.is_empty() {
            return Err(AppError::validation("No merchant domains defined"));
        }
        if !self.article.title_template.contains("{date}") {
            return Err(AppError::validation(
                "article.title_template must contain {date}",
            ));
        }
        if self.article.filename_suffix.trim().is_empty() {
            return Err(AppError::validation("article.filename_suffix is empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            sources: defaults::sources(),
            classifier: ClassifierConfig::default(),
            affiliate: AffiliateConfig::default(),
            article: ArticleConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

/// HTTP client settings for seed page fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-fetch deadline in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum seed pages fetched at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// A named seed page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedSource {
    /// Source tag recorded on every campaign found on this page
    pub name: String,

    /// Page URL, also the base for relative links
    pub url: String,
}

impl SeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Campaign filtering rules, applied in order by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// URL substrings that mark a link as campaign-likely
    #[serde(default = "defaults::valid_url_patterns")]
    pub valid_url_patterns: Vec<String>,

    /// Label term that marks a link as a campaign
    #[serde(default = "defaults::campaign_marker")]
    pub campaign_marker: String,

    /// URL or label substrings that veto inclusion
    #[serde(default = "defaults::exclude_keywords")]
    pub exclude_keywords: Vec<String>,

    /// Labels too generic to describe a campaign
    #[serde(default = "defaults::generic_labels")]
    pub generic_labels: Vec<String>,

    /// Minimum label length in characters
    #[serde(default = "defaults::min_label_chars")]
    pub min_label_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            valid_url_patterns: defaults::valid_url_patterns(),
            campaign_marker: defaults::campaign_marker(),
            exclude_keywords: defaults::exclude_keywords(),
            generic_labels: defaults::generic_labels(),
            min_label_chars: defaults::min_label_chars(),
        }
    }
}

/// Affiliate rewriting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateConfig {
    /// Affiliate identifier written into the tracking parameter
    #[serde(default = "defaults::affiliate_id")]
    pub affiliate_id: String,

    /// Query key carrying the affiliate identifier
    #[serde(default = "defaults::tracking_key")]
    pub tracking_key: String,

    /// Host fragments eligible for rewriting
    #[serde(default = "defaults::merchant_domains")]
    pub merchant_domains: Vec<String>,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            affiliate_id: defaults::affiliate_id(),
            tracking_key: defaults::tracking_key(),
            merchant_domains: defaults::merchant_domains(),
        }
    }
}

/// Article naming settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleConfig {
    /// Article title; `{date}` is replaced by the generation date
    #[serde(default = "defaults::title_template")]
    pub title_template: String,

    /// Filename suffix after the date prefix
    #[serde(default = "defaults::filename_suffix")]
    pub filename_suffix: String,

    /// Add an HHMM component so same-day runs get distinct files
    #[serde(default)]
    pub include_time: bool,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            title_template: defaults::title_template(),
            filename_suffix: defaults::filename_suffix(),
            include_time: false,
        }
    }
}

/// Storage file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Campaign record store (CSV)
    #[serde(default = "defaults::records_file")]
    pub records_file: String,

    /// Published article index (JSON)
    #[serde(default = "defaults::index_file")]
    pub index_file: String,

    /// Directory receiving article and listing documents
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Listing document name inside `output_dir`
    #[serde(default = "defaults::listing_file")]
    pub listing_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            records_file: defaults::records_file(),
            index_file: defaults::index_file(),
            output_dir: defaults::output_dir(),
            listing_file: defaults::listing_file(),
        }
    }
}

impl PathsConfig {
    /// Storage key of a published document.
    pub fn document_key(&self, filename: &str) -> String {
        if self.output_dir.is_empty() || self.output_dir == "." {
            filename.to_string()
        } else {
            PathBuf::from(&self.output_dir)
                .join(filename)
                .to_string_lossy()
                .into_owned()
        }
    }
}

mod defaults {
    use super::SeedSource;

    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Seed defaults
    pub fn sources() -> Vec<SeedSource> {
        vec![
            SeedSource::new("rakuten_top", "https://www.rakuten.co.jp/"),
            SeedSource::new("pointclub", "https://point.rakuten.co.jp/campaign/"),
            SeedSource::new("card", "https://www.rakuten-card.co.jp/campaign/"),
        ]
    }

    // Classifier defaults
    pub fn valid_url_patterns() -> Vec<String> {
        [
            "/campaign/",
            "/event/",
            "/sale/",
            "feature.co.jp",
            "campaign.rakuten.co.jp",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn campaign_marker() -> String {
        "キャンペーン".into()
    }
    pub fn exclude_keywords() -> Vec<String> {
        [
            "規約",
            "プライバシー",
            "policy",
            "個人情報",
            "サイトマップ",
            "sitemap",
            "企業情報",
            "corp",
            "採用",
            "recruit",
            "お問い合わせ",
            "contact",
            "help",
            "ガイド",
            "guide",
            "一覧",
            "list",
            "ログイン",
            "login",
            "登録",
            "register",
            "ランキング",
            "ranking",
            "カテゴリ",
            "category",
            "会社概要",
            "about",
            "楽天グループ",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn generic_labels() -> Vec<String> {
        [
            "詳細はこちら",
            "もっと見る",
            "こちら",
            "click here",
            "see more",
            "details",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn min_label_chars() -> usize {
        10
    }

    // Affiliate defaults
    pub fn affiliate_id() -> String {
        "1fc07efc.c2f2c7d2.1fc07efd.9f17bb92".into()
    }
    pub fn tracking_key() -> String {
        "scid".into()
    }
    pub fn merchant_domains() -> Vec<String> {
        [
            "rakuten.co.jp",
            "rakuten.com",
            "rebates.jp",
            "rakuten-card.co.jp",
            "rakuten-bank.co.jp",
            "rakuten-wallet.co.jp",
            "books.rakuten.co.jp",
            "travel.rakuten.co.jp",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // Article defaults
    pub fn title_template() -> String {
        "【{date}更新】楽天経済圏 今週のお得キャンペーン総まとめ！".into()
    }
    pub fn filename_suffix() -> String {
        "rakuten-summary".into()
    }

    // Path defaults
    pub fn records_file() -> String {
        "rakuten_campaigns.csv".into()
    }
    pub fn index_file() -> String {
        "articles.json".into()
    }
    pub fn output_dir() -> String {
        "posts".into()
    }
    pub fn listing_file() -> String {
        "index.md".into()
    }
}
