//! Local settings for the dashboard client.
//!
//! Settings are layered: built-in defaults, then an optional settings file,
//! then `VALIDATOR_DASHBOARD_*` environment variables, then command-line
//! overrides.
//!
//! ```toml
//! base_url = "https://validators.example.com/"
//! explorer_url = "https://avascan.info/staking/validator/"
//! stake_unit = "AVAX"
//! request_timeout_secs = 30
//! ```
//!
//! The refresh interval is not a local setting: the server publishes it on
//! `/config` (see [`crate::source::RemoteConfig`]).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::cards::{DEFAULT_EXPLORER_URL, DEFAULT_STAKE_UNIT};
use crate::data::RenderOptions;
use crate::error::FetchError;
use crate::source::{FileSource, HttpSource, SnapshotSource};

/// Refresh interval used when the server's `/config` is missing or invalid.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(600_000);

/// Server the dashboard talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Default per-request transport timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable prefix for settings.
pub const ENV_PREFIX: &str = "VALIDATOR_DASHBOARD";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Page URL of the dashboard server; `/data` and `/config` resolve
    /// against it.
    pub base_url: String,
    /// Read snapshots from this file instead of the server.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Remote config file, used together with `data_file`.
    #[serde(default)]
    pub config_file: Option<PathBuf>,
    /// Explorer page prefix for validator links.
    pub explorer_url: String,
    /// Unit label shown after stake amounts.
    pub stake_unit: String,
    /// Per-request timeout; 0 leaves the transport default.
    pub request_timeout_secs: u64,
}

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub data_file: Option<PathBuf>,
    pub explorer_url: Option<String>,
}

impl Settings {
    /// Load settings from defaults, an optional file, the environment, and
    /// `overrides`, in increasing precedence.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("explorer_url", DEFAULT_EXPLORER_URL)?
            .set_default("stake_unit", DEFAULT_STAKE_UNIT)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option(
                "data_file",
                overrides.data_file.as_ref().map(|p| p.display().to_string()),
            )?
            .set_override_option("explorer_url", overrides.explorer_url.clone())?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Presentation options derived from these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            explorer_url: self.explorer_url.clone(),
            stake_unit: self.stake_unit.clone(),
        }
    }

    /// The transport timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Build the snapshot source these settings describe.
    ///
    /// A `data_file` takes precedence over `base_url`.
    pub fn open_source(&self) -> Result<Arc<dyn SnapshotSource>, FetchError> {
        if let Some(ref path) = self.data_file {
            let mut source = FileSource::new(path);
            if let Some(ref config_path) = self.config_file {
                source = source.with_config(config_path);
            }
            return Ok(Arc::new(source));
        }

        Ok(Arc::new(HttpSource::new(&self.base_url, self.request_timeout())?))
    }
}
