// src/pipeline/publish.rs

//! Article publishing pipeline.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::pipeline::article::ArticleAssembler;
use crate::pipeline::index::{ArticleIndex, MergeOutcome};
use crate::services::AffiliateRewriter;
use crate::storage::PublishStorage;
use crate::utils::log::{header, step, summary};

/// Summary of a publish run.
#[derive(Debug)]
pub struct PublishOutcome {
    pub article_filename: String,
    pub article_title: String,
    /// Campaign lines in the article
    pub entry_count: usize,
    pub index_change: MergeOutcome,
    /// Articles in the index after the merge
    pub index_len: usize,
}

/// Publish the persisted campaign records as a dated article.
///
/// Writes the article document, merges it into the article index, persists
/// the index and regenerates the listing document. Fails with
/// [`AppError::MissingRecordStore`] before writing anything when discovery
/// has not produced a record store yet.
pub async fn run_publish(
    config: &Config,
    storage: &dyn PublishStorage,
    generated_at: NaiveDateTime,
) -> Result<PublishOutcome> {
    header("Article publishing");

    let records_key = &config.paths.records_file;
    let Some(records) = storage.load_records(records_key).await? else {
        log::error!("No campaign records found. Run discovery first.");
        return Err(AppError::MissingRecordStore {
            path: PathBuf::from(storage.location(records_key)),
        });
    };
    log::info!("Loaded {} campaign records", records.len());

    step(1, 3, "Assembling article");
    let assembler = ArticleAssembler::new(
        &config.article,
        AffiliateRewriter::new(&config.affiliate),
    );
    let article = assembler.assemble(&records, generated_at);
    let article_key = config.paths.document_key(&article.filename);
    storage
        .write_document(&article_key, &article.document.render())
        .await?;
    log::info!("Generated article: {}", storage.location(&article_key));

    step(2, 3, "Updating article index");
    let mut index = ArticleIndex::from_records(storage.load_index(&config.paths.index_file).await?);
    let index_change = index.merge(article.record());
    storage
        .write_index(&config.paths.index_file, &index.to_records())
        .await?;

    step(3, 3, "Regenerating listing");
    let listing_key = config.paths.document_key(&config.paths.listing_file);
    storage
        .write_document(&listing_key, &index.render_listing())
        .await?;

    summary(
        "Publish Results",
        &[
            ("Article", article.filename.clone()),
            ("Entries", article.document.entries.len().to_string()),
            ("Index", format!("{} articles ({:?})", index.len(), index_change)),
            ("Listing", storage.location(&listing_key)),
        ],
    );

    Ok(PublishOutcome {
        entry_count: article.document.entries.len(),
        article_filename: article.filename,
        article_title: article.title,
        index_change,
        index_len: index.len(),
    })
}
