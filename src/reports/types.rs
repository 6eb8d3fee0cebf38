//! Data types used by the report engine.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::DayClass;

/// A validated, inclusive calendar-date window.
///
/// Only [`crate::reports::validate::validate_window`] constructs one,
/// so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which of the three reports a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    FrequentParking,
    VehicleUsage,
    IdleTime,
}

/// An immutable report query, passed by value into the pipeline.
///
/// No engine component reads ambient state; everything a run depends on
/// is here or in the dataset snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Vehicle category selector; required before a pipeline run.
    pub category: Option<String>,
    /// Day-class tab for activity reports.
    pub day_class: DayClass,
    /// Zero-based page of the ranked list to return.
    pub page: usize,
}

/// A merged representative of one or more stops judged to be the same
/// place. Duration is the sum of all absorbed stops; coordinate and
/// address stay as first seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterGroup {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub duration_seconds: u64,
    pub address: Option<String>,
}

/// Aggregated activity for one vehicle over a window and day class.
///
/// Recomputed on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleActivityStats {
    pub vehicle_id: String,
    /// Day records that fell inside the window.
    pub days_in_window: usize,
    pub total_seconds: u64,
    pub total_km: f64,
    pub avg_activity_percent: f64,
}

impl VehicleActivityStats {
    /// Seconds of the counted days not spent active.
    pub fn idle_seconds(&self) -> u64 {
        (self.days_in_window as u64 * 86_400).saturating_sub(self.total_seconds)
    }

    pub fn idle_percent(&self) -> f64 {
        100.0 - self.avg_activity_percent
    }
}

/// One vehicle entry in the ranked list. `stats` is `None` when the
/// vehicle had no data in the window, which downstream must render as
/// "no records" rather than as zero activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVehicle {
    pub label: String,
    pub stats: Option<VehicleActivityStats>,
}

/// One page of the ranked vehicle list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage {
    pub page: Vec<RankedVehicle>,
    pub page_count: usize,
}

/// A single cluster row of the frequent-parking report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterRow {
    pub rank: usize,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub formatted_duration: String,
}

/// The frequent-parking table for one vehicle. An empty `rows` list is
/// the explicit "no records" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleParkingReport {
    pub vehicle: String,
    pub rows: Vec<ClusterRow>,
}

/// One row of the usage-ranking report. The three optional columns are
/// all `None` together when the vehicle had no data in the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub rank: usize,
    pub vehicle: String,
    pub formatted_duration: Option<String>,
    pub distance_km: Option<f64>,
    pub activity_percent: Option<f64>,
}

/// One row of the idle-time report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdleRow {
    pub rank: usize,
    pub vehicle: String,
    pub formatted_idle_time: Option<String>,
    pub idle_percent: Option<f64>,
}

/// Finished report rows, ready for a formatting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    FrequentParking {
        vehicles: Vec<VehicleParkingReport>,
    },
    VehicleUsage {
        rows: Vec<UsageRow>,
        page_count: usize,
    },
    IdleTime {
        rows: Vec<IdleRow>,
        page_count: usize,
    },
}
