//! Data source abstraction for validator snapshots.
//!
//! A source answers two questions: what is the current snapshot, and what
//! refresh interval did the server ask for. The poller calls the first on
//! every cycle and the second exactly once at startup.

mod file;
mod http;
mod snapshot;

pub use file::FileSource;
pub use http::{resolve_endpoint, HttpSource};
pub use snapshot::{
    validate_refresh_interval, RemoteConfig, ValidatorDetails, ValidatorEntry, ValidatorSnapshot,
};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::FetchError;

/// Trait for fetching validator data from various backends.
///
/// # Example
///
/// ```no_run
/// use validator_dashboard::{HttpSource, SnapshotSource};
///
/// # tokio_test::block_on(async {
/// let source = HttpSource::new("http://127.0.0.1:5000/", None).unwrap();
/// match source.fetch_snapshot().await {
///     Ok(snapshot) => println!("Got {} validators", snapshot.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// # });
/// ```
#[async_trait]
pub trait SnapshotSource: Send + Sync + Debug {
    /// Fetch the current snapshot.
    async fn fetch_snapshot(&self) -> Result<ValidatorSnapshot, FetchError>;

    /// Fetch the remote configuration.
    async fn fetch_config(&self) -> Result<RemoteConfig, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the status bar.
    fn description(&self) -> &str;
}

/// The two endpoints a dashboard server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Data,
    Config,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Data => "data",
            Endpoint::Config => "config",
        }
    }

    /// The path to request relative to a page at `page_path`.
    ///
    /// A page path ending in `/` gets the relative name (`data`), anything
    /// else gets the root-absolute path (`/data`).
    pub fn path_for(&self, page_path: &str) -> &'static str {
        match (self, page_path.ends_with('/')) {
            (Endpoint::Data, true) => "data",
            (Endpoint::Data, false) => "/data",
            (Endpoint::Config, true) => "config",
            (Endpoint::Config, false) => "/config",
        }
    }
}
