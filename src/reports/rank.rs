//! Ranking and pagination of aggregated vehicle stats.

use std::cmp::Ordering;

use crate::reports::types::{RankedPage, RankedVehicle, VehicleActivityStats};

/// Vehicles the usage report shows per page.
pub const PAGE_SIZE: usize = 5;

/// Sorts entries by the given key descending and returns one page.
///
/// Entries without stats sort after every entry with stats, keeping
/// their original relative order; ties also keep input order (the sort
/// is stable and uses no secondary key). An out-of-range page index
/// yields an empty page, not an error.
pub fn rank_vehicles_by<F>(
    mut entries: Vec<RankedVehicle>,
    key: F,
    page_size: usize,
    page_index: usize,
) -> RankedPage
where
    F: Fn(&VehicleActivityStats) -> u64,
{
    entries.sort_by(|a, b| match (&a.stats, &b.stats) {
        (Some(x), Some(y)) => key(y).cmp(&key(x)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    if page_size == 0 {
        return RankedPage {
            page: Vec::new(),
            page_count: 0,
        };
    }

    let page_count = entries.len().div_ceil(page_size);
    let page = entries
        .into_iter()
        .skip(page_index.saturating_mul(page_size))
        .take(page_size)
        .collect();

    RankedPage { page, page_count }
}

/// Ranks by total active seconds descending, the usage-report default.
pub fn rank_vehicles(
    entries: Vec<RankedVehicle>,
    page_size: usize,
    page_index: usize,
) -> RankedPage {
    rank_vehicles_by(entries, |s| s.total_seconds, page_size, page_index)
}
