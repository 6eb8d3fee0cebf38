//! Report orchestration.
//!
//! A run is a pure function of an immutable dataset snapshot and a
//! query: validate, select vehicles, then cluster or aggregate-and-rank
//! depending on the report kind. Row order is fully deterministic for
//! identical inputs.

use chrono::NaiveDate;

use crate::model::{FleetDataset, VehicleRecord};
use crate::parser::parse_dataset;
use crate::reports::aggregate::aggregate_vehicle;
use crate::reports::cluster::{TOP_CLUSTERS, cluster_stops, top_by_duration};
use crate::reports::error::{PipelineError, ValidationError};
use crate::reports::rank::{PAGE_SIZE, rank_vehicles, rank_vehicles_by};
use crate::reports::types::{
    ClusterRow, DateWindow, IdleRow, Query, RankedPage, RankedVehicle, Report, ReportKind,
    UsageRow, VehicleParkingReport,
};
use crate::reports::utility::format_hms;
use crate::reports::validate::validate_window;

/// Runs one report over the dataset.
///
/// Fails fast on an illegal query with no partial computation. `today`
/// and `min_start` are passed in so the engine itself never consults a
/// clock or ambient configuration.
pub fn run(
    dataset: &FleetDataset,
    kind: ReportKind,
    query: &Query,
    today: NaiveDate,
    min_start: NaiveDate,
) -> Result<Report, PipelineError> {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(ValidationError::MissingRequiredField {
            field: "vehicle category",
        })?;

    let window = validate_window(query.start, query.end, today, min_start)?;

    let selected: Vec<&VehicleRecord> = dataset
        .vehicles
        .iter()
        .filter(|v| {
            v.category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
        })
        .collect();

    let report = match kind {
        ReportKind::FrequentParking => Report::FrequentParking {
            vehicles: selected
                .iter()
                .map(|v| parking_report(v, &window))
                .collect(),
        },
        ReportKind::VehicleUsage => {
            let ranked = rank_vehicles(activity_entries(&selected, query, &window), PAGE_SIZE, query.page);
            usage_report(ranked, query.page)
        }
        ReportKind::IdleTime => {
            let ranked = rank_vehicles_by(
                activity_entries(&selected, query, &window),
                |s| s.idle_seconds(),
                PAGE_SIZE,
                query.page,
            );
            idle_report(ranked, query.page)
        }
    };

    Ok(report)
}

/// Parses a raw payload and runs one report over it.
///
/// Convenience entry for callers holding undecoded bytes; a payload
/// that fails normalization aborts the whole report with
/// [`PipelineError::Dataset`], never a partial result.
pub fn run_raw(
    bytes: &[u8],
    kind: ReportKind,
    query: &Query,
    today: NaiveDate,
    min_start: NaiveDate,
) -> Result<Report, PipelineError> {
    let dataset = parse_dataset(bytes)?;
    run(&dataset, kind, query, today, min_start)
}

/// Top clusters for one vehicle's stops inside the window.
///
/// A vehicle without parking data at all, or with no stop day in the
/// window, gets an empty table — the explicit "no records" placeholder
/// rather than being dropped from the report.
fn parking_report(vehicle: &VehicleRecord, window: &DateWindow) -> VehicleParkingReport {
    let stops: Vec<_> = vehicle
        .stops_by_day
        .iter()
        .flat_map(|by_day| by_day.range(window.start..=window.end))
        .flat_map(|(_, stops)| stops.iter().cloned())
        .collect();

    let clusters = top_by_duration(cluster_stops(&stops), TOP_CLUSTERS);

    VehicleParkingReport {
        vehicle: vehicle.label().to_string(),
        rows: clusters
            .into_iter()
            .enumerate()
            .map(|(i, c)| ClusterRow {
                rank: i + 1,
                address: c.address,
                latitude: c.latitude,
                longitude: c.longitude,
                formatted_duration: format_hms(c.duration_seconds),
            })
            .collect(),
    }
}

fn activity_entries(
    vehicles: &[&VehicleRecord],
    query: &Query,
    window: &DateWindow,
) -> Vec<RankedVehicle> {
    vehicles
        .iter()
        .map(|v| RankedVehicle {
            label: v.label().to_string(),
            stats: aggregate_vehicle(v, query.day_class, window),
        })
        .collect()
}

fn usage_report(ranked: RankedPage, page_index: usize) -> Report {
    let rows = ranked
        .page
        .into_iter()
        .enumerate()
        .map(|(i, entry)| UsageRow {
            rank: page_index * PAGE_SIZE + i + 1,
            vehicle: entry.label,
            formatted_duration: entry.stats.as_ref().map(|s| format_hms(s.total_seconds)),
            distance_km: entry.stats.as_ref().map(|s| s.total_km),
            activity_percent: entry.stats.as_ref().map(|s| s.avg_activity_percent),
        })
        .collect();

    Report::VehicleUsage {
        rows,
        page_count: ranked.page_count,
    }
}

fn idle_report(ranked: RankedPage, page_index: usize) -> Report {
    let rows = ranked
        .page
        .into_iter()
        .enumerate()
        .map(|(i, entry)| IdleRow {
            rank: page_index * PAGE_SIZE + i + 1,
            vehicle: entry.label,
            formatted_idle_time: entry.stats.as_ref().map(|s| format_hms(s.idle_seconds())),
            idle_percent: entry.stats.as_ref().map(|s| s.idle_percent()),
        })
        .collect();

    Report::IdleTime {
        rows,
        page_count: ranked.page_count,
    }
}
