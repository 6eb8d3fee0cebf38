//! Normalized fleet telemetry entities.
//!
//! The raw reports payload is loosely-shaped JSON; [`crate::parser`]
//! converts it into these types exactly once, at the dataset boundary,
//! so the report engine never touches duck-typed data.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which partition of a vehicle's daily records a query aggregates over.
///
/// The source keeps working days and non-working days as two disjoint
/// lists (`dias_laborables` / `dias_no_laborables`); they are never
/// interleaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Laboral,
    NoLaboral,
}

impl DayClass {
    pub fn label(&self) -> &'static str {
        match self {
            DayClass::Laboral => "laboral",
            DayClass::NoLaboral => "no_laboral",
        }
    }
}

/// One recorded parking interval.
///
/// Coordinates are `None` when the source omitted them or they were not
/// numeric; such a stop can never match a proximity test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopEvent {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub duration_seconds: u64,
    pub address: Option<String>,
}

/// One calendar day's activity summary for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub activity_hours: f64,
    pub total_distance_km: f64,
}

/// A single vehicle with everything the source reported about it.
///
/// `None` collections mean the source field was absent entirely, which
/// downstream renders as an empty-row placeholder; that is distinct
/// from a present-but-empty collection.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub id: String,
    pub plate: Option<String>,
    pub category: Option<String>,
    /// Stops keyed by the day they were recorded, in calendar order.
    pub stops_by_day: Option<BTreeMap<NaiveDate, Vec<StopEvent>>>,
    pub laboral_days: Option<Vec<DayActivity>>,
    pub no_laboral_days: Option<Vec<DayActivity>>,
}

impl VehicleRecord {
    /// The day-class list selected by a query tab, if the source carried one.
    pub fn days(&self, class: DayClass) -> Option<&[DayActivity]> {
        match class {
            DayClass::Laboral => self.laboral_days.as_deref(),
            DayClass::NoLaboral => self.no_laboral_days.as_deref(),
        }
    }

    /// Display label: plate when present, device id otherwise.
    pub fn label(&self) -> &str {
        self.plate.as_deref().unwrap_or(&self.id)
    }
}

/// The full normalized dataset, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetDataset {
    pub vehicles: Vec<VehicleRecord>,
}
