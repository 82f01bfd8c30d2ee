// src/services/fetcher.rs

//! Page fetcher service.
//!
//! The pipelines only see the [`PageFetcher`] trait; [`HttpFetcher`] is the
//! reqwest-backed implementation used by the CLI.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;
use crate::utils::http::create_async_client;

/// Fetches raw HTML for a seed page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Return the page body, or [`AppError::Fetch`] on any failure.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP implementation of [`PageFetcher`].
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and deadline.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(url, e))?;

        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        assert!(HttpFetcher::new(&FetcherConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn invalid_url_is_a_fetch_error() {
        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::Fetch { .. }));
    }
}
