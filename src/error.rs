// src/error.rs

//! Unified error handling for the campaign digest application.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A seed page could not be fetched
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Discovery finished with an empty record set
    #[error("No valid campaigns found after filtering")]
    NoCampaignsFound,

    /// Publishing was requested before discovery produced a record store
    #[error("Campaign record store not found at {}. Run discovery first", path.display())]
    MissingRecordStore { path: PathBuf },

    /// A storage write did not complete
    #[error("Failed to write {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch error for a seed URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a storage write error carrying the target path.
    pub fn storage_write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::StorageWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_store_mentions_discovery() {
        let err = AppError::MissingRecordStore {
            path: PathBuf::from("storage/campaigns.csv"),
        };
        let message = err.to_string();
        assert!(message.contains("storage/campaigns.csv"));
        assert!(message.contains("Run discovery first"));
    }

    #[test]
    fn storage_write_reports_path() {
        let err = AppError::storage_write(
            "out/index.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("Failed to write out/index.md"));
    }
}
