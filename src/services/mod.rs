// src/services/mod.rs

//! Service layer for the campaign digest application.
//!
//! This module contains the business logic for:
//! - Seed page fetching (`PageFetcher`, `HttpFetcher`)
//! - Link harvesting (`LinkHarvester`)
//! - Campaign classification (`CampaignClassifier`)
//! - Affiliate link rewriting (`AffiliateRewriter`)

mod affiliate;
mod classifier;
mod fetcher;
mod harvester;

pub use affiliate::AffiliateRewriter;
pub use classifier::{CampaignClassifier, Decision, Rule};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use harvester::LinkHarvester;
