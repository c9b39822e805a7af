//! Snapshot normalization pipeline.
//!
//! Scraped city files carry one row per city with every postal code in a
//! single range-list cell. This binary expands each cell into one row per
//! code, drops duplicate codes, and writes the result ready for geocoding.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hashbrown::HashSet;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use nearpost::codes::expand_code_list;
use nearpost::dataset;
use nearpost::models::{Country, PostalCodeRecord};

#[derive(Parser, Debug)]
#[command(name = "normalize")]
#[command(about = "Expand city postal-code range lists into one row per code")]
struct Args {
    /// Country whose city file to normalize
    #[arg(short, long, default_value = "germany")]
    country: String,

    /// Directory holding country snapshots
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Input file (defaults to {data_dir}/{country}_cities_postalcodes.csv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output file (defaults to {data_dir}/{country}_cities_split_postalcodes.csv)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Raw city row; extra columns (Region, Link, ...) are ignored.
#[derive(Debug, Deserialize)]
struct CityCodesRow {
    #[serde(rename = "City")]
    city: String,

    #[serde(rename = "PostalCode")]
    postal_code: String,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let country: Country = args.country.parse()?;
    let input = args
        .input
        .unwrap_or_else(|| dataset::city_codes_path(&args.data_dir, country));
    let output = args
        .output
        .unwrap_or_else(|| dataset::split_codes_path(&args.data_dir, country));

    info!("Normalizing {} from '{}'", country, input.display());

    let file = File::open(&input)
        .with_context(|| format!("Failed to open city file '{}'", input.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let rows: Vec<CityCodesRow> = reader
        .deserialize()
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Malformed city file '{}'", input.display()))?;

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let mut seen: HashSet<String> = HashSet::new();
    let mut records: Vec<PostalCodeRecord> = Vec::new();
    let mut total_codes = 0usize;
    for row in &rows {
        let codes = expand_code_list(&row.postal_code)
            .with_context(|| format!("Bad postal-code list for city '{}'", row.city))?;
        for code in codes {
            total_codes += 1;
            // First city keeps a contested code
            if seen.insert(code.clone()) {
                records.push(PostalCodeRecord {
                    postal_code: code,
                    city: row.city.clone(),
                    latitude: None,
                    longitude: None,
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    dataset::write_snapshot(&output, &records)?;
    info!(
        "Expanded {} city rows into {} postal codes ({} duplicates dropped)",
        rows.len(),
        records.len(),
        total_codes - records.len()
    );

    Ok(())
}
