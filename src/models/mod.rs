// src/models/mod.rs

//! Domain models for the campaign digest application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod article;
mod campaign;
mod config;

// Re-export all public types
pub use article::{Article, ArticleDocument, ArticleEntry, ArticleRecord};
pub use campaign::{CampaignCandidate, CampaignRecord};
pub use config::{
    AffiliateConfig, ArticleConfig, ClassifierConfig, Config, FetcherConfig, PathsConfig,
    SeedSource,
};
