//! HTTP data source.
//!
//! Fetches `/data` and `/config` from the dashboard server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Endpoint, RemoteConfig, SnapshotSource, ValidatorSnapshot};
use crate::error::FetchError;

/// Resolve an endpoint against the dashboard's base URL.
///
/// `http://host/dash/` resolves `data` to `http://host/dash/data`, while
/// `http://host/dash` resolves it to `http://host/data`.
pub fn resolve_endpoint(base: &Url, endpoint: Endpoint) -> Result<Url, FetchError> {
    base.join(endpoint.path_for(base.path()))
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", endpoint.name(), e)))
}

/// A data source backed by the dashboard server's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    data_url: Url,
    config_url: Url,
    description: String,
}

impl HttpSource {
    /// Create a source for the server at `base_url`.
    ///
    /// `timeout` bounds each request; `None` leaves the transport default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let base =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            data_url: resolve_endpoint(&base, Endpoint::Data)?,
            config_url: resolve_endpoint(&base, Endpoint::Config)?,
            description: format!("http: {}", base),
        })
    }

    /// The resolved `/data` URL.
    pub fn data_url(&self) -> &Url {
        &self.data_url
    }

    /// The resolved `/config` URL.
    pub fn config_url(&self) -> &Url {
        &self.config_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        debug!(%url, "requesting");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Http(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch_snapshot(&self) -> Result<ValidatorSnapshot, FetchError> {
        self.get_json(&self.data_url).await
    }

    async fn fetch_config(&self) -> Result<RemoteConfig, FetchError> {
        self.get_json(&self.config_url).await
    }

    fn description(&self) -> &str {
        &self.description
    }
}
