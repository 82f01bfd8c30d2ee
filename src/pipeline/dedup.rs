// src/pipeline/dedup.rs

//! Collapses included candidates into the persisted campaign record set.

use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::models::{CampaignCandidate, CampaignRecord};

/// Keep one record per distinct URL, in traversal order.
///
/// The first candidate seen for a URL supplies its source and title. URLs are
/// compared exactly. An empty result is [`AppError::NoCampaignsFound`].
pub fn dedup_campaigns<I>(candidates: I) -> Result<Vec<CampaignRecord>>
where
    I: IntoIterator<Item = CampaignCandidate>,
{
    let mut seen = HashSet::new();
    let records: Vec<CampaignRecord> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.absolute_url.clone()))
        .map(CampaignRecord::from)
        .collect();

    if records.is_empty() {
        return Err(AppError::NoCampaignsFound);
    }
    Ok(records)
}
