use chrono::NaiveDate;

use fleet_reporter::model::{DayClass, FleetDataset};
use fleet_reporter::parser::parse_dataset;
use fleet_reporter::reports::pipeline::run;
use fleet_reporter::reports::types::{Query, Report, ReportKind};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn fixture() -> FleetDataset {
    let bytes = include_bytes!("fixtures/fleet_sample.json");
    parse_dataset(bytes).expect("Failed to parse fixture dataset")
}

fn february_query(category: &str) -> Query {
    Query {
        start: d("2025-02-01"),
        end: d("2025-02-28"),
        category: Some(category.to_string()),
        day_class: DayClass::Laboral,
        page: 0,
    }
}

fn run_fixture(kind: ReportKind, query: &Query) -> Report {
    run(&fixture(), kind, query, d("2025-03-15"), d("2024-01-01")).expect("pipeline run failed")
}

#[test]
fn test_parking_report_full_pipeline() {
    let report = run_fixture(ReportKind::FrequentParking, &february_query("auto"));

    let Report::FrequentParking { vehicles } = report else {
        panic!("wrong report kind");
    };

    // both autos present, the camion filtered out
    assert_eq!(vehicles.len(), 2);

    let abc = &vehicles[0];
    assert_eq!(abc.vehicle, "ABC-123");
    // the two Calle 26 stops merge; the January stop is outside the window
    assert_eq!(abc.rows.len(), 2);
    assert_eq!(abc.rows[0].rank, 1);
    assert_eq!(abc.rows[0].address.as_deref(), Some("Terminal de Carga"));
    assert_eq!(abc.rows[0].formatted_duration, "02:00:00");
    assert_eq!(abc.rows[1].address.as_deref(), Some("Calle 26 #13-25"));
    assert_eq!(abc.rows[1].formatted_duration, "01:30:00");

    // vehicle without any parking data stays as an empty placeholder
    let def = &vehicles[1];
    assert_eq!(def.vehicle, "DEF-456");
    assert!(def.rows.is_empty());
}

#[test]
fn test_usage_report_full_pipeline() {
    let report = run_fixture(ReportKind::VehicleUsage, &february_query("auto"));

    let Report::VehicleUsage { rows, page_count } = report else {
        panic!("wrong report kind");
    };

    assert_eq!(page_count, 1);
    assert_eq!(rows.len(), 2);

    // 6.5 h + 8 h on the two February laboral days
    assert_eq!(rows[0].vehicle, "ABC-123");
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].formatted_duration.as_deref(), Some("14:30:00"));
    assert!((rows[0].distance_km.unwrap() - 183.4).abs() < 1e-9);
    assert!((rows[0].activity_percent.unwrap() - 30.208333).abs() < 1e-4);

    assert_eq!(rows[1].vehicle, "DEF-456");
    assert_eq!(rows[1].formatted_duration.as_deref(), Some("02:00:00"));
}

#[test]
fn test_day_class_tab_switches_partition() {
    let mut query = february_query("auto");
    query.day_class = DayClass::NoLaboral;

    let Report::VehicleUsage { rows, .. } = run_fixture(ReportKind::VehicleUsage, &query) else {
        panic!("wrong report kind");
    };

    // only ABC-123 has a no-laboral list; DEF-456 becomes a trailing placeholder
    assert_eq!(rows[0].vehicle, "ABC-123");
    assert_eq!(rows[0].formatted_duration.as_deref(), Some("01:15:00"));
    assert_eq!(rows[1].vehicle, "DEF-456");
    assert_eq!(rows[1].formatted_duration, None);
}

#[test]
fn test_idle_report_full_pipeline() {
    let report = run_fixture(ReportKind::IdleTime, &february_query("auto"));

    let Report::IdleTime { rows, .. } = report else {
        panic!("wrong report kind");
    };

    // ABC-123: 2 counted days, 14.5 h active -> 33.5 h idle
    assert_eq!(rows[0].vehicle, "ABC-123");
    assert_eq!(rows[0].formatted_idle_time.as_deref(), Some("33:30:00"));
    // DEF-456: 1 counted day, 2 h active -> 22 h idle
    assert_eq!(rows[1].vehicle, "DEF-456");
    assert_eq!(rows[1].formatted_idle_time.as_deref(), Some("22:00:00"));
}

#[test]
fn test_category_selects_the_other_fleet() {
    let Report::FrequentParking { vehicles } =
        run_fixture(ReportKind::FrequentParking, &february_query("camion"))
    else {
        panic!("wrong report kind");
    };

    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].vehicle, "GHI-789");
    assert_eq!(vehicles[0].rows[0].formatted_duration, "01:30:00");
}

#[test]
fn test_identical_runs_identical_reports() {
    let query = february_query("auto");
    for kind in [
        ReportKind::FrequentParking,
        ReportKind::VehicleUsage,
        ReportKind::IdleTime,
    ] {
        assert_eq!(run_fixture(kind, &query), run_fixture(kind, &query));
    }
}
