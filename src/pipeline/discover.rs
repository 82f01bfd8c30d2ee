// src/pipeline/discover.rs

//! Campaign discovery pipeline.

use futures::{StreamExt, stream};
use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::models::{CampaignCandidate, CampaignRecord, Config, SeedSource};
use crate::pipeline::dedup::dedup_campaigns;
use crate::services::{CampaignClassifier, LinkHarvester, PageFetcher};
use crate::storage::PublishStorage;
use crate::utils::log::{header, step, sub_item, summary};

/// Summary of a discovery run.
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    /// Persisted record set
    pub records: Vec<CampaignRecord>,
    pub source_total: usize,
    pub source_failures: usize,
    /// Anchors harvested across all sources
    pub candidate_total: usize,
    /// Candidates kept by the classifier, before dedup
    pub included_total: usize,
}

/// Fetch every seed, keep genuine campaigns and replace the record store.
///
/// Seeds are fetched concurrently but processed in seed-list order, so the
/// first-seen record for a URL does not depend on response timing. A failed
/// seed contributes nothing. When no campaign survives, nothing is written
/// and [`crate::error::AppError::NoCampaignsFound`] is returned.
pub async fn run_discovery(
    config: &Config,
    fetcher: &dyn PageFetcher,
    storage: &dyn PublishStorage,
) -> Result<DiscoveryOutcome> {
    header("Campaign discovery");

    let harvester = LinkHarvester::new()?;
    let classifier = CampaignClassifier::new(&config.classifier);
    let concurrency = config
        .fetcher
        .max_concurrent
        .clamp(1, config.sources.len().max(1));

    step(1, 3, &format!("Fetching {} seed pages", config.sources.len()));
    let pages: Vec<(&SeedSource, Result<String>)> = stream::iter(&config.sources)
        .map(|seed| async move { (seed, fetcher.fetch(&seed.url).await) })
        .buffered(concurrency)
        .collect()
        .await;

    step(2, 3, "Harvesting and classifying links");
    let mut outcome = DiscoveryOutcome {
        source_total: pages.len(),
        ..DiscoveryOutcome::default()
    };
    let mut included: Vec<CampaignCandidate> = Vec::new();

    for (seed, page) in pages {
        let html = match page {
            Ok(html) => html,
            Err(e) => {
                outcome.source_failures += 1;
                log::warn!("Error fetching {} ({}): {}", seed.name, seed.url, e);
                continue;
            }
        };

        let Some((harvested, kept)) = classify_page(&harvester, &classifier, seed, &html) else {
            outcome.source_failures += 1;
            continue;
        };
        sub_item(&format!(
            "{}: {} links, {} campaign candidates",
            seed.name,
            harvested,
            kept.len()
        ));
        outcome.candidate_total += harvested;
        outcome.included_total += kept.len();
        included.extend(kept);
    }

    step(3, 3, "Deduplicating and saving campaign records");
    let records = match dedup_campaigns(included) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("No valid campaigns found after filtering; record store left untouched");
            return Err(e);
        }
    };

    storage
        .write_records(&config.paths.records_file, &records)
        .await?;

    summary(
        "Discovery Results",
        &[
            ("Sources", outcome.source_total.to_string()),
            ("Failed sources", outcome.source_failures.to_string()),
            ("Links harvested", outcome.candidate_total.to_string()),
            ("Campaigns saved", records.len().to_string()),
            ("Record store", storage.location(&config.paths.records_file)),
        ],
    );

    outcome.records = records;
    Ok(outcome)
}

/// Harvest one page and keep the candidates the classifier accepts.
///
/// Returns the number of harvested links alongside the kept candidates, or
/// `None` when the seed URL cannot serve as a base.
fn classify_page(
    harvester: &LinkHarvester,
    classifier: &CampaignClassifier,
    seed: &SeedSource,
    html: &str,
) -> Option<(usize, Vec<CampaignCandidate>)> {
    let base_url = match Url::parse(&seed.url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Invalid seed url for {}: {}", seed.name, e);
            return None;
        }
    };

    let document = Html::parse_document(html);
    let mut harvested = 0;
    let mut kept = Vec::new();

    for candidate in harvester.harvest(&seed.name, &base_url, &document) {
        harvested += 1;
        let decision = classifier.evaluate(&candidate);
        log::debug!(
            "{} [{:?}] {} -> {}",
            if decision.included { "keep" } else { "drop" },
            decision.rule,
            candidate.label,
            candidate.absolute_url
        );
        if decision.included {
            kept.push(candidate);
        }
    }

    Some((harvested, kept))
}
