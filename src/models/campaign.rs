// src/models/campaign.rs

//! Campaign candidate and record data structures.

use serde::{Deserialize, Serialize};

/// A harvested link that has not been classified yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignCandidate {
    /// Seed source tag
    pub source: String,

    /// Best-effort link label
    pub label: String,

    /// Link target resolved against the seed page
    pub absolute_url: String,
}

impl CampaignCandidate {
    pub fn new(
        source: impl Into<String>,
        label: impl Into<String>,
        absolute_url: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            label: label.into(),
            absolute_url: absolute_url.into(),
        }
    }
}

/// A classified, deduplicated campaign entry as persisted in the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignRecord {
    /// Seed source tag
    pub source: String,

    /// Campaign title (the candidate label)
    pub title: String,

    /// Campaign URL, unique within a record set
    pub url: String,
}

impl From<CampaignCandidate> for CampaignRecord {
    fn from(candidate: CampaignCandidate) -> Self {
        Self {
            source: candidate.source,
            title: candidate.label,
            url: candidate.absolute_url,
        }
    }
}

impl CampaignRecord {
    /// Whether this record can be rendered as an article entry.
    pub fn is_publishable(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}
