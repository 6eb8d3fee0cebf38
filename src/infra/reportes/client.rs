use anyhow::Result;
use async_trait::async_trait;

use fleet_reporter::fetch::{BasicClient, fetch_bytes};
use fleet_reporter::model::FleetDataset;
use fleet_reporter::parser::parse_dataset;

use crate::services::fleet_api::ReportSource;

/// Client for the fleet reports HTTP API.
///
/// The backend exposes the full dataset at `GET {base_url}/reportes`
/// with no authentication; normalization happens here so callers only
/// ever see typed records.
pub struct ReportsApiClient {
    base_url: String,
    http: BasicClient,
}

impl ReportsApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: BasicClient::new()?,
        })
    }
}

#[async_trait]
impl ReportSource for ReportsApiClient {
    async fn fetch_dataset(&self) -> Result<FleetDataset> {
        let url = format!("{}/reportes", self.base_url);

        let bytes = fetch_bytes(&self.http, &url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch reports payload: {}", e))?;

        Ok(parse_dataset(&bytes)?)
    }
}
