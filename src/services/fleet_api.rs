//! Trait for the fleet reports data source.

use anyhow::Result;

use fleet_reporter::model::FleetDataset;

/// Abstraction over whatever supplies the raw fleet dataset (the
/// reports HTTP API in production, a file or fixture elsewhere).
///
/// The dataset is fully resolved before the engine runs; the pipeline
/// itself never awaits.
#[async_trait::async_trait]
pub trait ReportSource {
    /// Fetches and normalizes one dataset snapshot.
    async fn fetch_dataset(&self) -> Result<FleetDataset>;
}
