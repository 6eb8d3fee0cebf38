//! Output formatting and persistence for report rows.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::reports::types::Report;
use csv::WriterBuilder;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// One flattened CSV line of the frequent-parking report.
///
/// A vehicle without clusters still gets a line, with every column
/// after the label left empty, so no vehicle silently disappears from
/// an export.
#[derive(Serialize)]
struct ParkingCsvRow<'a> {
    vehicle: &'a str,
    rank: Option<usize>,
    address: Option<&'a str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    duration: Option<&'a str>,
}

/// Writes a report as a CSV file at `path`, overwriting any previous
/// export. Rows appear in report order.
pub fn write_csv(path: &str, report: &Report) -> Result<()> {
    debug!(path, "Writing CSV export");
    let mut writer = WriterBuilder::new().from_path(path)?;

    match report {
        Report::FrequentParking { vehicles } => {
            for vehicle in vehicles {
                if vehicle.rows.is_empty() {
                    writer.serialize(ParkingCsvRow {
                        vehicle: &vehicle.vehicle,
                        rank: None,
                        address: None,
                        latitude: None,
                        longitude: None,
                        duration: None,
                    })?;
                    continue;
                }
                for row in &vehicle.rows {
                    writer.serialize(ParkingCsvRow {
                        vehicle: &vehicle.vehicle,
                        rank: Some(row.rank),
                        address: row.address.as_deref(),
                        latitude: row.latitude,
                        longitude: row.longitude,
                        duration: Some(&row.formatted_duration),
                    })?;
                }
            }
        }
        Report::VehicleUsage { rows, .. } => {
            for row in rows {
                writer.serialize(row)?;
            }
        }
        Report::IdleTime { rows, .. } => {
            for row in rows {
                writer.serialize(row)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
