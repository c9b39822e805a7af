//! Reading and writing country snapshots.
//!
//! A snapshot is a per-country CSV keyed by the country slug, holding one
//! row per postal code with optional coordinates. This module only
//! materializes rows into memory; it owns no caching or freshness logic.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::{Country, PostalCodeRecord};

/// Path of the geocoded snapshot for a country.
pub fn snapshot_path(data_dir: &Path, country: Country) -> PathBuf {
    data_dir.join(format!("{country}_postal_codes_and_coordinates.csv"))
}

/// Path of the raw city/code-list file the normalize pipeline consumes.
pub fn city_codes_path(data_dir: &Path, country: Country) -> PathBuf {
    data_dir.join(format!("{country}_cities_postalcodes.csv"))
}

/// Path of the one-row-per-code file the normalize pipeline produces.
pub fn split_codes_path(data_dir: &Path, country: Country) -> PathBuf {
    data_dir.join(format!("{country}_cities_split_postalcodes.csv"))
}

/// Read a snapshot into memory.
///
/// Empty coordinate cells become `None`; extra columns (Region, Link, ...)
/// are ignored. Rows whose coordinates fall outside valid lat/lon ranges
/// are dropped with a warning, since a search over them would be garbage.
pub fn read_snapshot(path: &Path) -> Result<Vec<PostalCodeRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot '{}'", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let record: PostalCodeRecord = result
            .with_context(|| format!("Malformed snapshot row {} in '{}'", row + 2, path.display()))?;

        if let Some(point) = record.geo_point() {
            if !point.in_bounds() {
                warn!(
                    "Dropping {} ({}): coordinates ({}, {}) out of range",
                    record.postal_code, record.city, point.lat, point.lon
                );
                continue;
            }
        }
        records.push(record);
    }

    info!("Loaded {} rows from '{}'", records.len(), path.display());
    Ok(records)
}

/// Write records as a snapshot CSV.
pub fn write_snapshot(path: &Path, records: &[PostalCodeRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().context("Failed to flush snapshot")?;

    info!("Wrote {} rows to '{}'", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = "\
Region,City,Link,PostalCode,Longitude,Latitude
Berlin,Berlin,/wiki/Berlin,10115,13.4050,52.5200
Hamburg,Hamburg,/wiki/Hamburg,20095,9.9937,53.5511
Bayern,Munich,/wiki/Munich,80331,,
Nowhere,Broken,/wiki/Broken,99999,200.0,95.0
";

    fn write_temp(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_snapshot_ignores_extra_columns() {
        let (_dir, path) = write_temp(SNAPSHOT);
        let records = read_snapshot(&path).unwrap();
        // Out-of-range row dropped, ungeocoded row kept
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].postal_code, "10115");
        assert_eq!(records[0].city, "Berlin");
        assert_eq!(records[0].latitude, Some(52.52));
        assert!(records[2].geo_point().is_none());
    }

    #[test]
    fn test_read_snapshot_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_snapshot(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![
            PostalCodeRecord {
                postal_code: "01824".to_string(),
                city: "Königstein".to_string(),
                latitude: Some(50.9194),
                longitude: Some(14.0764),
            },
            PostalCodeRecord {
                postal_code: "06420".to_string(),
                city: "Könnern".to_string(),
                latitude: None,
                longitude: None,
            },
        ];

        write_snapshot(&path, &records).unwrap();
        let loaded = read_snapshot(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].postal_code, "01824");
        assert_eq!(loaded[0].longitude, Some(14.0764));
        assert_eq!(loaded[1].latitude, None);
    }

    #[test]
    fn test_snapshot_paths() {
        let dir = Path::new("data");
        assert_eq!(
            snapshot_path(dir, Country::Germany),
            Path::new("data/germany_postal_codes_and_coordinates.csv")
        );
        assert_eq!(
            city_codes_path(dir, Country::Austria),
            Path::new("data/austria_cities_postalcodes.csv")
        );
        assert_eq!(
            split_codes_path(dir, Country::Germany),
            Path::new("data/germany_cities_split_postalcodes.csv")
        );
    }
}
