//! CLI entry point for the fleet report generator.
//!
//! Provides subcommands for the three reports (frequent parking,
//! vehicle usage ranking, idle time) over a dataset loaded from a local
//! JSON file or the fleet reports HTTP API.

mod infra;
mod services;

use crate::infra::reportes::client::ReportsApiClient;
use crate::services::fleet_api::ReportSource;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fleet_reporter::model::{DayClass, FleetDataset};
use fleet_reporter::output::{print_json, write_csv};
use fleet_reporter::parser::parse_dataset;
use fleet_reporter::reports::pipeline;
use fleet_reporter::reports::types::{Query, Report, ReportKind};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fleet_reporter")]
#[command(about = "A tool to generate fleet telemetry reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Frequent-parking clusters per vehicle
    Parking {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Vehicle usage ranking for a day-class tab
    Usage {
        #[command(flatten)]
        query: QueryArgs,

        /// Which day partition to aggregate
        #[arg(short = 'd', long, value_enum, default_value = "laboral")]
        day_class: DayClassArg,

        /// Zero-based page of the ranked list
        #[arg(short, long, default_value_t = 0)]
        page: usize,
    },
    /// Idle-time summary, most idle first
    Idle {
        #[command(flatten)]
        query: QueryArgs,

        /// Which day partition to aggregate
        #[arg(short = 'd', long, value_enum, default_value = "laboral")]
        day_class: DayClassArg,

        /// Zero-based page of the ranked list
        #[arg(short, long, default_value_t = 0)]
        page: usize,
    },
}

/// Arguments shared by every report subcommand.
#[derive(Args)]
struct QueryArgs {
    /// Path to a dataset JSON file, or base URL of the reports API.
    /// Falls back to the FLEET_API_URL environment variable.
    #[arg(value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Window start date (YYYY-MM-DD)
    #[arg(short, long)]
    start: NaiveDate,

    /// Window end date (YYYY-MM-DD)
    #[arg(short, long)]
    end: NaiveDate,

    /// Vehicle category to report on (e.g. auto, camion, moto)
    #[arg(short, long)]
    category: Option<String>,

    /// Earliest start date the backend keeps telemetry for
    #[arg(long, default_value = "2024-01-01")]
    min_date: NaiveDate,

    /// CSV file to write the report rows to
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DayClassArg {
    Laboral,
    NoLaboral,
}

impl From<DayClassArg> for DayClass {
    fn from(arg: DayClassArg) -> Self {
        match arg {
            DayClassArg::Laboral => DayClass::Laboral,
            DayClassArg::NoLaboral => DayClass::NoLaboral,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fleet_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fleet_reporter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let today = Utc::now().date_naive();

    match cli.command {
        Commands::Parking { query } => {
            run_report(
                ReportKind::FrequentParking,
                query,
                DayClass::Laboral,
                0,
                today,
            )
            .await?;
        }
        Commands::Usage {
            query,
            day_class,
            page,
        } => {
            run_report(ReportKind::VehicleUsage, query, day_class.into(), page, today).await?;
        }
        Commands::Idle {
            query,
            day_class,
            page,
        } => {
            run_report(ReportKind::IdleTime, query, day_class.into(), page, today).await?;
        }
    }

    Ok(())
}

async fn run_report(
    kind: ReportKind,
    args: QueryArgs,
    day_class: DayClass,
    page: usize,
    today: NaiveDate,
) -> Result<()> {
    let dataset = load_dataset(args.source.as_deref()).await?;

    let query = Query {
        start: args.start,
        end: args.end,
        category: args.category,
        day_class,
        page,
    };

    info!(
        vehicles = dataset.vehicles.len(),
        day_class = query.day_class.label(),
        "Dataset loaded, generating report"
    );

    let report = pipeline::run(&dataset, kind, &query, today, args.min_date)?;

    match &report {
        Report::FrequentParking { vehicles } => {
            info!(vehicles = vehicles.len(), "Parking report ready");
        }
        Report::VehicleUsage { rows, page_count } => {
            info!(rows = rows.len(), page_count, "Usage report ready");
        }
        Report::IdleTime { rows, page_count } => {
            info!(rows = rows.len(), page_count, "Idle report ready");
        }
    }

    print_json(&report)?;

    if let Some(path) = &args.output {
        write_csv(path, &report)?;
        info!(path = %path, "Report exported");
    }

    Ok(())
}

/// Loads the dataset from a local file path or fetches it from the
/// reports API. With no explicit source, the FLEET_API_URL environment
/// variable names the API base URL.
#[tracing::instrument]
async fn load_dataset(source: Option<&str>) -> Result<FleetDataset> {
    let source = match source {
        Some(s) => s.to_string(),
        None => std::env::var("FLEET_API_URL").map_err(|_| {
            anyhow::anyhow!("no data source: pass FILE_OR_URL or set FLEET_API_URL")
        })?,
    };

    if source.starts_with("http") {
        let client = ReportsApiClient::new(source)?;
        client.fetch_dataset().await
    } else {
        let bytes = std::fs::read(&source)?;
        Ok(parse_dataset(&bytes)?)
    }
}
