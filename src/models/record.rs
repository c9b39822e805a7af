//! Postal-code record structure for country snapshots.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether the point lies on the globe: lat in [-90, 90], lon in [-180, 180].
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// One row of a country snapshot.
///
/// Postal codes are opaque text, never numbers: leading zeros are
/// significant and formats vary by country. A code can appear more than
/// once after upstream city-splitting; lookups take the first match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalCodeRecord {
    #[serde(rename = "PostalCode")]
    pub postal_code: String,

    #[serde(rename = "City")]
    pub city: String,

    /// Absent until the code has been geocoded
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

impl PostalCodeRecord {
    /// The record's coordinates, if both are present.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => None,
        }
    }
}
