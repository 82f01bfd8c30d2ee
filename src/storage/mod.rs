// src/storage/mod.rs

//! Storage abstractions for campaign and article persistence.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml              # Application configuration
//! ├── rakuten_campaigns.csv    # Campaign record store (replaced every discovery)
//! ├── articles.json            # Published article index, newest first
//! └── posts/
//!     ├── index.md             # Listing document (regenerated every publish)
//!     └── 2026-10-17-rakuten-summary.md
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ArticleRecord, CampaignRecord};

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for storage backends used by the discovery and publish pipelines.
///
/// Every write fully replaces its target and must be atomic, so an
/// interrupted run never leaves a partially written file behind.
#[async_trait]
pub trait PublishStorage: Send + Sync {
    /// Replace the campaign record store.
    async fn write_records(&self, key: &str, records: &[CampaignRecord]) -> Result<()>;

    /// Load the campaign record store, `None` if it does not exist.
    async fn load_records(&self, key: &str) -> Result<Option<Vec<CampaignRecord>>>;

    /// Load the article index. A missing index is an empty one.
    async fn load_index(&self, key: &str) -> Result<Vec<ArticleRecord>>;

    /// Replace the article index.
    async fn write_index(&self, key: &str, articles: &[ArticleRecord]) -> Result<()>;

    /// Replace a published text document.
    async fn write_document(&self, key: &str, content: &str) -> Result<()>;

    /// Human-readable location of a key, for reports.
    fn location(&self, key: &str) -> String;
}
