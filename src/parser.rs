//! Normalization boundary for the raw reports payload.
//!
//! The fleet API returns loosely-shaped JSON with the source's Spanish
//! field names. Everything is coerced into [`crate::model`] types here,
//! exactly once; the engine never sees a `serde_json::Value`.
//!
//! Shape violations at the record level abort with
//! [`MalformedDatasetError`]. Leaf-level telemetry gaps are not errors:
//! non-numeric hours, distances and durations coerce to 0 (a gap reads
//! as inactivity), while non-numeric coordinates become missing so a
//! junk stop can never cluster-match the real location at (0, 0).

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::model::{DayActivity, FleetDataset, StopEvent, VehicleRecord};
use crate::reports::error::MalformedDatasetError;

/// Decodes and normalizes a raw reports payload.
///
/// Accepts the API's `{"data": [...]}` envelope or a bare array of
/// vehicle records.
///
/// # Errors
///
/// Returns [`MalformedDatasetError`] if the payload is not valid JSON,
/// the root carries no vehicle array, or a record is not an object.
pub fn parse_dataset(bytes: &[u8]) -> Result<FleetDataset, MalformedDatasetError> {
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|e| MalformedDatasetError(format!("payload is not valid JSON: {e}")))?;

    let records = match &root {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                return Err(MalformedDatasetError(
                    "expected a `data` array of vehicle records".to_string(),
                ));
            }
        },
        _ => {
            return Err(MalformedDatasetError(
                "expected an array of vehicle records".to_string(),
            ));
        }
    };

    let mut vehicles = Vec::with_capacity(records.len());
    for (index, item) in records.iter().enumerate() {
        let record = item.as_object().ok_or_else(|| {
            MalformedDatasetError(format!("vehicle record {index} is not an object"))
        })?;
        vehicles.push(normalize_vehicle(record));
    }

    Ok(FleetDataset { vehicles })
}

fn normalize_vehicle(record: &Map<String, Value>) -> VehicleRecord {
    VehicleRecord {
        id: record.get("vhc_id").map(coerce_id).unwrap_or_default(),
        plate: record.get("vhc_placa").and_then(coerce_string),
        category: record.get("vhc_tipo").and_then(coerce_string),
        stops_by_day: record
            .get("estacionamientos")
            .and_then(Value::as_object)
            .map(normalize_stop_days),
        laboral_days: record
            .get("dias_laborables")
            .and_then(Value::as_array)
            .map(|list| normalize_days(list)),
        no_laboral_days: record
            .get("dias_no_laborables")
            .and_then(Value::as_array)
            .map(|list| normalize_days(list)),
    }
}

fn normalize_stop_days(map: &Map<String, Value>) -> BTreeMap<NaiveDate, Vec<StopEvent>> {
    let mut by_day = BTreeMap::new();

    for (key, value) in map {
        let Ok(date) = NaiveDate::parse_from_str(key, "%Y-%m-%d") else {
            debug!(key = %key, "skipping stop day with unparseable date");
            continue;
        };

        let stops = value
            .as_array()
            .map(|list| list.iter().map(normalize_stop).collect())
            .unwrap_or_default();
        by_day.insert(date, stops);
    }

    by_day
}

fn normalize_stop(value: &Value) -> StopEvent {
    StopEvent {
        latitude: value.get("latitud").and_then(coerce_coordinate),
        longitude: value.get("longitud").and_then(coerce_coordinate),
        duration_seconds: value
            .get("duracion")
            .map(lenient_f64)
            .unwrap_or(0.0)
            .max(0.0)
            .round() as u64,
        address: value.get("direccion").and_then(coerce_string),
    }
}

fn normalize_days(list: &[Value]) -> Vec<DayActivity> {
    list.iter()
        .filter_map(|value| {
            let raw_date = value.get("fecha").and_then(Value::as_str)?;
            let Ok(date) = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") else {
                debug!(raw_date, "skipping day record with unparseable date");
                return None;
            };

            Some(DayActivity {
                date,
                activity_hours: value
                    .get("horas_actividad")
                    .map(lenient_f64)
                    .unwrap_or(0.0)
                    .max(0.0),
                total_distance_km: value
                    .get("km_recorridos")
                    .map(lenient_f64)
                    .unwrap_or(0.0)
                    .max(0.0),
            })
        })
        .collect()
}

/// Telemetry leaf coercion: numbers pass through, numeric strings
/// parse, everything else is 0.
fn lenient_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coordinates keep missing-ness instead of collapsing to 0.
fn coerce_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Device ids sometimes arrive as bare numbers; keep them as strings.
fn coerce_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
