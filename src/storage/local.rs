// src/storage/local.rs

//! Local filesystem storage implementation.
//!
//! ## Formats
//!
//! - Campaign records: CSV with a `source,title,url` header, UTF-8 with BOM
//!   so spreadsheet tools pick the right encoding
//! - Article index: pretty-printed JSON array of `{filename, title}`
//! - Documents: plain text (Markdown)
//!
//! All writes go to `<name>.tmp` first and are renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{ArticleRecord, CampaignRecord};
use crate::storage::PublishStorage;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const RECORD_HEADER: [&str; 3] = ["source", "title", "url"];

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Sibling temp path used for atomic replacement.
    fn tmp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        Self::replace_file(&path, bytes).await.map_err(|e| {
            log::error!("Write to {} failed: {}", path.display(), e);
            AppError::storage_write(&path, e)
        })
    }

    async fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = Self::tmp_path(path);
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn encode_records(records: &[CampaignRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(UTF8_BOM.to_vec());
        writer.write_record(RECORD_HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        writer.into_inner().map_err(|e| {
            AppError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }

    fn decode_records(bytes: &[u8]) -> Result<Vec<CampaignRecord>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::Reader::from_reader(bytes);
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<CampaignRecord>, _>>()
            .map_err(AppError::from)
    }
}

#[async_trait]
impl PublishStorage for LocalStorage {
    async fn write_records(&self, key: &str, records: &[CampaignRecord]) -> Result<()> {
        let bytes = Self::encode_records(records)?;
        self.write_bytes(key, &bytes).await?;
        log::debug!("Wrote {} records to {}", records.len(), self.location(key));
        Ok(())
    }

    async fn load_records(&self, key: &str) -> Result<Option<Vec<CampaignRecord>>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(Self::decode_records(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn load_index(&self, key: &str) -> Result<Vec<ArticleRecord>> {
        match self.read_json::<Vec<ArticleRecord>>(key).await? {
            Some(articles) => Ok(articles),
            None => {
                log::info!("No article index at {}, starting empty", self.location(key));
                Ok(Vec::new())
            }
        }
    }

    async fn write_index(&self, key: &str, articles: &[ArticleRecord]) -> Result<()> {
        self.write_json(key, articles).await
    }

    async fn write_document(&self, key: &str, content: &str) -> Result<()> {
        self.write_bytes(key, content.as_bytes()).await
    }

    fn location(&self, key: &str) -> String {
        self.path(key).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(source: &str, title: &str, url: &str) -> CampaignRecord {
        CampaignRecord {
            source: source.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("nested/test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("nested/test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!tmp.path().join("nested/test.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.read_bytes("nope.txt").await.unwrap().is_none());
        assert!(storage.load_records("nope.csv").await.unwrap().is_none());
        assert!(storage.load_index("nope.json").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_csv_layout() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let records = vec![
            record("pointclub", "ポイント、最大10倍キャンペーン", "https://point.rakuten.co.jp/campaign/a"),
            record("card", "Say \"hello\" campaign", "https://www.rakuten-card.co.jp/campaign/b"),
        ];

        storage.write_records("campaigns.csv", &records).await.unwrap();

        let raw = std::fs::read(tmp.path().join("campaigns.csv")).unwrap();
        assert!(raw.starts_with(UTF8_BOM));
        let text = String::from_utf8(raw[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.starts_with("source,title,url\n"));

        let loaded = storage.load_records("campaigns.csv").await.unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_records_replace_previous_set() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage
            .write_records("c.csv", &[record("a", "old campaign entry", "https://x/1")])
            .await
            .unwrap();
        storage
            .write_records("c.csv", &[record("b", "new campaign entry", "https://x/2")])
            .await
            .unwrap();

        let loaded = storage.load_records("c.csv").await.unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].url, "https://x/2");
    }

    #[tokio::test]
    async fn test_reads_records_without_bom() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("plain.csv"),
            "source,title,url\ncard,,https://x/1\n",
        )
        .unwrap();
        let storage = LocalStorage::new(tmp.path());

        let loaded = storage.load_records("plain.csv").await.unwrap().unwrap();
        assert_eq!(loaded, vec![record("card", "", "https://x/1")]);
    }

    #[tokio::test]
    async fn test_index_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let articles = vec![
            ArticleRecord::new("2026-10-17-rakuten-summary.md", "new"),
            ArticleRecord::new("2026-10-10-rakuten-summary.md", "old"),
        ];

        storage.write_index("articles.json", &articles).await.unwrap();
        assert_eq!(storage.load_index("articles.json").await.unwrap(), articles);
    }

    #[tokio::test]
    async fn test_write_failure_reports_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("blocker"), b"file").unwrap();
        let storage = LocalStorage::new(tmp.path());

        let err = storage
            .write_document("blocker/index.md", "content")
            .await
            .unwrap_err();
        match err {
            AppError::StorageWrite { path, .. } => assert!(path.ends_with("blocker/index.md")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
