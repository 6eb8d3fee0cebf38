//! Per-vehicle activity aggregation over a date window.

use crate::model::{DayClass, VehicleRecord};
use crate::reports::types::{DateWindow, VehicleActivityStats};
use crate::reports::utility::mean;

/// Reduces one vehicle's day records for the selected day class into
/// window totals.
///
/// Returns `None` when the vehicle has no day-class list at all or no
/// record inside the window — absence, not zero; callers render that as
/// "no data in range".
///
/// Seconds are rounded per day and then summed, so a fraction that
/// rounds away on each day never reappears in the total. The average
/// percentage is the mean of per-day `hours/24·100` values; the divisor
/// is always 24 hours regardless of window length.
pub fn aggregate_vehicle(
    vehicle: &VehicleRecord,
    class: DayClass,
    window: &DateWindow,
) -> Option<VehicleActivityStats> {
    let days = vehicle.days(class)?;

    let selected: Vec<_> = days.iter().filter(|d| window.contains(d.date)).collect();
    if selected.is_empty() {
        return None;
    }

    let total_seconds = selected
        .iter()
        .map(|d| (d.activity_hours * 3600.0).round() as u64)
        .sum();
    let total_km = selected.iter().map(|d| d.total_distance_km).sum();
    let percentages: Vec<f64> = selected
        .iter()
        .map(|d| d.activity_hours / 24.0 * 100.0)
        .collect();

    Some(VehicleActivityStats {
        vehicle_id: vehicle.id.clone(),
        days_in_window: selected.len(),
        total_seconds,
        total_km,
        avg_activity_percent: mean(&percentages),
    })
}
