//! File-based data source.
//!
//! Reads a snapshot from a JSON file on every poll. Useful when the server
//! side drops its output on disk instead of serving it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{RemoteConfig, SnapshotSource, ValidatorSnapshot};
use crate::error::FetchError;

/// A data source that reads snapshots (and optionally the remote config)
/// from local JSON files.
///
/// The file is re-read on every poll; there is no change detection, since
/// each cycle replaces the rendered list wholesale anyway.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    config_path: Option<PathBuf>,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given snapshot path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            config_path: None,
            description,
        }
    }

    /// Also read the remote config from `path`.
    pub fn with_config<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Returns the snapshot path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn fetch_snapshot(&self) -> Result<ValidatorSnapshot, FetchError> {
        let content = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn fetch_config(&self) -> Result<RemoteConfig, FetchError> {
        let Some(ref config_path) = self.config_path else {
            return Err(FetchError::Unavailable("no config file".to_string()));
        };
        let content = fs::read_to_string(config_path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "NodeID-A": {
                "location": "Mexico City, Mexico",
                "uptime": 98.1,
                "stake_from_self": 2000,
                "stake_from_delegations": 1500.5
            },
            "NodeID-B": "pending"
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/test.json");
        assert_eq!(source.path(), Path::new("/tmp/test.json"));
        assert_eq!(source.description(), "file: /tmp/test.json");
    }

    #[tokio::test]
    async fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let source = FileSource::new(file.path());
        let snapshot = source.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get("NodeID-B").is_some());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/data.json");
        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Read(_)));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let source = FileSource::new(file.path());
        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_config_unavailable_without_path() {
        let source = FileSource::new("/tmp/data.json");
        let err = source.fetch_config().await.unwrap_err();
        assert!(matches!(err, FetchError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_config_from_file() {
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, r#"{{"refresh_interval_ms": 45000}}"#).unwrap();

        let source = FileSource::new("/tmp/data.json").with_config(config.path());
        let remote = source.fetch_config().await.unwrap();
        assert_eq!(remote.refresh_interval(), Duration::from_secs(45));
    }
}
