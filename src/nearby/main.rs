//! Nearby postal-code search CLI.
//!
//! Loads a country snapshot and reports every postal code within a radius
//! of a reference postal code or city, either through the exact geodesic
//! scan (default) or the rectangular bounding-box prefilter.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use nearpost::dataset;
use nearpost::models::Country;
use nearpost::proximity::{self, NearbyMatch, Reference, SearchError};

mod config;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "nearby")]
#[command(about = "Find postal codes near a reference place")]
struct Args {
    /// Country snapshot to search
    #[arg(short, long, default_value = "germany")]
    country: String,

    /// Reference postal code
    #[arg(long, group = "reference")]
    postal_code: Option<String>,

    /// Reference city name
    #[arg(long, group = "reference")]
    city: Option<String>,

    /// Search radius in kilometres
    #[arg(short, long)]
    radius_km: Option<f64>,

    /// Use the rectangular bounding-box prefilter instead of the geodesic scan
    #[arg(long)]
    bounding: bool,

    /// Directory holding country snapshots
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to nearpost.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit matches as JSON instead of a code list
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::resolve(args.config.as_deref())?;
    let country: Country = args.country.parse()?;
    let data_dir = args.data_dir.unwrap_or(config.global.data_dir);
    let radius_km = args.radius_km.unwrap_or(config.search.default_radius_km);

    let path = dataset::snapshot_path(&data_dir, country);
    let records = dataset::read_snapshot(&path)
        .with_context(|| format!("No usable snapshot for {country}"))?;

    info!(
        "Searching {} within {} km ({})",
        country,
        radius_km,
        if args.bounding { "bounding box" } else { "geodesic" }
    );

    if args.bounding {
        let codes = proximity::find_nearby_by_bounding(
            &records,
            args.postal_code.as_deref(),
            radius_km,
        )
        .map_err(search_failure)?;
        report_codes(&codes, args.json)
    } else {
        let reference = match (args.postal_code, args.city) {
            (Some(code), _) => Some(Reference::PostalCode(code)),
            (None, Some(city)) => Some(Reference::City(city)),
            (None, None) => None,
        };
        let matches =
            proximity::find_nearby_by_distance(&records, reference.as_ref(), radius_km)
                .map_err(search_failure)?;
        report_matches(&matches, args.json)
    }
}

fn search_failure(e: SearchError) -> anyhow::Error {
    anyhow::Error::new(e).context("Search failed")
}

fn report_codes(codes: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(codes)?);
    } else if codes.is_empty() {
        println!("No nearby postal codes found.");
    } else {
        println!("Nearby postal codes: {}", codes.join(", "));
    }
    Ok(())
}

fn report_matches(matches: &[NearbyMatch], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(matches)?);
        return Ok(());
    }
    if matches.is_empty() {
        println!("No nearby postal codes found.");
        return Ok(());
    }
    let codes: Vec<&str> = matches.iter().map(|m| m.postal_code.as_str()).collect();
    println!("Nearby postal codes: {}", codes.join(", "));
    Ok(())
}
