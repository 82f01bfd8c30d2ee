// src/services/affiliate.rs

//! Affiliate link rewriting.
//!
//! Merchant links get the tracking parameter set to the configured affiliate
//! identifier. Everything else passes through untouched.

use indexmap::IndexMap;
use url::{Url, form_urlencoded};

use crate::models::AffiliateConfig;

/// Rewrites merchant URLs into affiliate-tagged URLs.
#[derive(Debug, Clone)]
pub struct AffiliateRewriter {
    affiliate_id: String,
    tracking_key: String,
    merchant_domains: Vec<String>,
}

impl AffiliateRewriter {
    /// Create a rewriter bound to the configured affiliate identifier.
    pub fn new(config: &AffiliateConfig) -> Self {
        Self {
            affiliate_id: config.affiliate_id.clone(),
            tracking_key: config.tracking_key.clone(),
            merchant_domains: config
                .merchant_domains
                .iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Whether the URL's host belongs to a recognized merchant.
    pub fn is_merchant(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();
        self.merchant_domains
            .iter()
            .any(|domain| host.contains(domain.as_str()))
    }

    /// Rewrite `raw` when it points at a merchant, otherwise return it as is.
    ///
    /// Existing query parameters are kept, grouped by key in order of first
    /// appearance. The tracking key is overwritten with a single value, so
    /// rewriting an already rewritten URL returns it unchanged. Only the query
    /// is replaced; scheme, host, path and fragment keep their original bytes.
    pub fn rewrite(&self, raw: &str) -> String {
        let Ok(url) = Url::parse(raw) else {
            return raw.to_string();
        };
        if !self.is_merchant(&url) {
            return raw.to_string();
        }

        let mut params: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in url.query_pairs() {
            params
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        params.insert(self.tracking_key.clone(), vec![self.affiliate_id.clone()]);

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                params
                    .iter()
                    .flat_map(|(key, values)| values.iter().map(move |v| (key.as_str(), v.as_str()))),
            )
            .finish();

        replace_query(raw, &query)
    }
}

/// Swap the query of `raw` for `query`, leaving every other byte in place.
fn replace_query(raw: &str, query: &str) -> String {
    let (before_fragment, fragment) = raw.split_at(raw.find('#').unwrap_or(raw.len()));
    let base = before_fragment
        .split_once('?')
        .map_or(before_fragment, |(base, _)| base);
    format!("{base}?{query}{fragment}")
}
