//! Proximity clustering of parking stops.
//!
//! Stops within [`CLUSTER_RADIUS_METERS`] of an existing cluster's
//! representative coordinate merge into it; everything else opens a new
//! cluster. The representative coordinate and address stay as first
//! seen, which keeps the pass deterministic for identical input order.

use crate::model::StopEvent;
use crate::reports::types::ClusterGroup;

/// Two stops at most this far apart count as the same place.
pub const CLUSTER_RADIUS_METERS: f64 = 100.0;

/// How many clusters the frequent-parking report keeps per vehicle.
pub const TOP_CLUSTERS: usize = 5;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinate pairs, in meters.
///
/// Haversine on a 6371 km mean-radius sphere.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let lat1r = lat1.to_radians();
    let lat2r = lat2.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1r.cos() * lat2r.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c * 1000.0
}

/// Groups stops into clusters, preserving input order.
///
/// Each stop either merges into the nearest existing cluster within the
/// threshold (adding its duration) or seeds a new one. A stop without
/// coordinates never matches a distance test and always stands alone.
pub fn cluster_stops(stops: &[StopEvent]) -> Vec<ClusterGroup> {
    let mut clusters: Vec<ClusterGroup> = Vec::new();

    for stop in stops {
        let nearest = match (stop.latitude, stop.longitude) {
            (Some(lat), Some(lon)) => clusters
                .iter()
                .enumerate()
                .filter_map(|(i, c)| match (c.latitude, c.longitude) {
                    (Some(clat), Some(clon)) => {
                        Some((i, haversine_meters(lat, lon, clat, clon)))
                    }
                    _ => None,
                })
                .min_by(|a, b| a.1.total_cmp(&b.1)),
            _ => None,
        };

        match nearest {
            Some((i, distance)) if distance <= CLUSTER_RADIUS_METERS => {
                clusters[i].duration_seconds += stop.duration_seconds;
            }
            _ => clusters.push(ClusterGroup {
                latitude: stop.latitude,
                longitude: stop.longitude,
                duration_seconds: stop.duration_seconds,
                address: stop.address.clone(),
            }),
        }
    }

    clusters
}

/// Keeps the `n` longest-duration clusters, longest first.
///
/// The sort is stable, so equal durations keep first-seen order.
pub fn top_by_duration(mut clusters: Vec<ClusterGroup>, n: usize) -> Vec<ClusterGroup> {
    clusters.sort_by(|a, b| b.duration_seconds.cmp(&a.duration_seconds));
    clusters.truncate(n);
    clusters
}
