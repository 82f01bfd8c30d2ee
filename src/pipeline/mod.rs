// src/pipeline/mod.rs

//! Pipeline entry points for campaign digest operations.
//!
//! - `run_discovery`: Fetch seed pages and persist the campaign record set
//! - `run_publish`: Turn the persisted records into an article and update the index
//! - `run_all`: Discovery followed by publishing

pub mod article;
pub mod dedup;
pub mod discover;
pub mod index;
pub mod publish;

pub use article::ArticleAssembler;
pub use dedup::dedup_campaigns;
pub use discover::{DiscoveryOutcome, run_discovery};
pub use index::{ArticleIndex, MergeOutcome};
pub use publish::{PublishOutcome, run_publish};

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::Config;
use crate::services::PageFetcher;
use crate::storage::PublishStorage;

/// Run discovery, then publish what it found.
///
/// A discovery failure, including an empty result, stops the run before any
/// article is written.
pub async fn run_all(
    config: &Config,
    fetcher: &dyn PageFetcher,
    storage: &dyn PublishStorage,
    generated_at: NaiveDateTime,
) -> Result<(DiscoveryOutcome, PublishOutcome)> {
    let discovery = run_discovery(config, fetcher, storage).await?;
    let publish = run_publish(config, storage, generated_at).await?;
    Ok((discovery, publish))
}
