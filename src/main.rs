//! Hydrograph Service - command-line entry point
//!
//! Fetches USGS instantaneous streamflow for the configured sites, fills
//! gaps with "NA" placeholder records, and either prints the chart-ready
//! JSON once or serves it over HTTP.
//!
//! Usage:
//!   cargo run --release                                   # print JSON for hydrograph.toml
//!   cargo run --release -- --sites 07010000,05587450 \
//!       --start 2021-01-01 --end 2021-01-07               # override request
//!   cargo run --release -- --serve --port 8080            # HTTP endpoint
//!
//! Environment:
//!   HYDROGRAPH_BASE_URL, HYDROGRAPH_SITES, HYDROGRAPH_START_DATE,
//!   HYDROGRAPH_END_DATE, HYDROGRAPH_TIME_OFFSET - override hydrograph.toml
//!   RUST_LOG - log filter (default: hydrograph_service=info)

use hydrograph_service::analysis::hydrograph::normalize;
use hydrograph_service::config::{self, split_sites, DEFAULT_CONFIG_PATH};
use hydrograph_service::endpoint;
use hydrograph_service::ingest::usgs::{fetch, http_client};
use hydrograph_service::logging;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;

/// Command-line flags; anything left `None` falls back to configuration.
#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    sites: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    offset: Option<String>,
    serve: bool,
    port: Option<u16>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} [--config PATH] [--sites A,B] [--start DATE] [--end DATE] \
         [--offset UTC|+HH:MM] [--serve [--port PORT]]",
        program
    )
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();

        if flag == "--serve" {
            parsed.serve = true;
            i += 1;
            continue;
        }

        let value = args
            .get(i + 1)
            .cloned()
            .ok_or_else(|| format!("{} requires a value", flag))?;

        match flag {
            "--config" => parsed.config_path = Some(PathBuf::from(value)),
            "--sites" => parsed.sites = Some(value),
            "--start" => parsed.start_date = Some(value),
            "--end" => parsed.end_date = Some(value),
            "--offset" => parsed.offset = Some(value),
            "--port" => {
                let port = value
                    .parse()
                    .map_err(|_| format!("--port requires a port number, got '{}'", value))?;
                parsed.port = Some(port);
            }
            _ => return Err(format!("Unknown argument: {}", flag)),
        }
        i += 2;
    }

    if parsed.port.is_some() && !parsed.serve {
        return Err("--port is only valid together with --serve".to_string());
    }

    Ok(parsed)
}

fn main() {
    logging::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("hydrograph_service");

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", usage(program));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Hydrograph service failed");
        std::process::exit(1);
    }
}

fn run(cli: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli
        .config_path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut app_config = config::load_config(&config_path)?;

    if let Some(sites) = cli.sites {
        app_config.request.sites = split_sites(&sites);
    }
    if let Some(start) = cli.start_date {
        app_config.request.start_date = start;
    }
    if let Some(end) = cli.end_date {
        app_config.request.end_date = end;
    }
    if let Some(offset) = cli.offset {
        app_config.time.offset = offset;
    }
    let policy = app_config.time_policy()?;

    if cli.serve {
        let port = cli.port.or(app_config.endpoint.port).unwrap_or(DEFAULT_PORT);
        endpoint::start_endpoint_server(port, app_config)?;
        return Ok(());
    }

    let request = app_config.fetch_request();
    tracing::info!(
        sites = %request.site_ids.join(","),
        start = %request.start_date,
        end = %request.end_date,
        time_policy = %policy,
        "Fetching hydrograph"
    );

    let client = http_client(app_config.timeout())?;
    let series = fetch(&client, &request);
    let records = normalize(series.as_deref(), &policy);
    tracing::info!(
        records = records.len(),
        placeholders = records.iter().filter(|r| r.is_synthetic()).count(),
        "Normalized hydrograph"
    );

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
