//! Nearby postal-code search over geocoded records.
//!
//! Two entry points share resolution and validation: `find_nearby_by_bounding`
//! selects codes inside a rectangular lat/lon window (fast, approximate),
//! `find_nearby_by_distance` selects codes whose ellipsoidal geodesic
//! distance to the reference is inside the radius (exact, the default).
//! Both operate on an in-memory slice and never touch I/O.

use geo::{Distance, Geodesic};
use geo_types::Point;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{GeoPoint, PostalCodeRecord};

mod index;
pub use index::{BoundingBox, RecordIndex};

/// Radius applied when the caller does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("no reference place was provided")]
    MissingReference,

    #[error("reference place '{0}' not found")]
    ReferenceNotFound(String),

    #[error("no geocoded rows in the dataset")]
    NoGeocodedData,

    #[error("radius must be positive, got {0} km")]
    InvalidRadius(f64),
}

/// Selector for the record at the centre of a search.
///
/// Matching is exact string equality, case-sensitive, against the chosen
/// column. When the dataset carries duplicate codes the first matching row
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    PostalCode(String),
    City(String),
}

impl Reference {
    fn matches(&self, record: &PostalCodeRecord) -> bool {
        match self {
            Reference::PostalCode(code) => record.postal_code == *code,
            Reference::City(city) => record.city == *city,
        }
    }

    fn selector(&self) -> &str {
        match self {
            Reference::PostalCode(s) | Reference::City(s) => s,
        }
    }
}

/// A postal code within range, with its distance from the reference.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyMatch {
    pub postal_code: String,
    pub city: String,
    pub distance_km: f64,
}

/// Geodesic distance between two points in kilometres.
///
/// Uses the `geo` crate's ellipsoidal metric (Karney's algorithm) rather
/// than spherical haversine.
pub fn geodesic_km(a: GeoPoint, b: GeoPoint) -> f64 {
    Geodesic.distance(Point::new(a.lon, a.lat), Point::new(b.lon, b.lat)) / 1000.0
}

struct Geocoded<'a> {
    record: &'a PostalCodeRecord,
    point: GeoPoint,
}

struct Resolved<'a> {
    geocoded: Vec<Geocoded<'a>>,
    /// Index of the reference row within `geocoded`
    reference: usize,
}

impl Resolved<'_> {
    fn center(&self) -> GeoPoint {
        self.geocoded[self.reference].point
    }
}

/// Validation and reference lookup shared by both variants.
fn resolve<'a>(
    records: &'a [PostalCodeRecord],
    reference: Option<&Reference>,
    radius_km: f64,
) -> Result<Resolved<'a>, SearchError> {
    // The negation also rejects NaN
    if !(radius_km > 0.0) {
        return Err(SearchError::InvalidRadius(radius_km));
    }
    let reference = reference.ok_or(SearchError::MissingReference)?;
    if records.is_empty() {
        return Err(SearchError::ReferenceNotFound(reference.selector().to_string()));
    }

    let geocoded: Vec<Geocoded<'a>> = records
        .iter()
        .filter_map(|record| record.geo_point().map(|point| Geocoded { record, point }))
        .collect();
    if geocoded.is_empty() {
        return Err(SearchError::NoGeocodedData);
    }

    let reference_idx = geocoded
        .iter()
        .position(|g| reference.matches(g.record))
        .ok_or_else(|| SearchError::ReferenceNotFound(reference.selector().to_string()))?;

    Ok(Resolved {
        geocoded,
        reference: reference_idx,
    })
}

/// Codes inside the rectangular window around the reference postal code.
///
/// The window is the per-degree approximation built by
/// [`BoundingBox::around`]; see there for where it degrades. The reference
/// row is excluded by index identity, so a duplicate sharing its exact
/// coordinates is still reported.
pub fn find_nearby_by_bounding(
    records: &[PostalCodeRecord],
    reference_postal_code: Option<&str>,
    radius_km: f64,
) -> Result<Vec<String>, SearchError> {
    let reference = reference_postal_code.map(|code| Reference::PostalCode(code.to_string()));
    let resolved = resolve(records, reference.as_ref(), radius_km)?;

    let bbox = BoundingBox::around(resolved.center(), radius_km);
    let index = RecordIndex::build(resolved.geocoded.iter().map(|g| g.point));

    let codes: Vec<String> = index
        .within(&bbox)
        .into_iter()
        .filter(|&i| i != resolved.reference)
        .map(|i| resolved.geocoded[i].record.postal_code.clone())
        .collect();

    debug!(
        "Bounding search: {} of {} geocoded rows inside the window",
        codes.len(),
        resolved.geocoded.len()
    );
    Ok(codes)
}

/// Codes whose geodesic distance to the reference lies in (0, radius_km).
///
/// The strict lower bound drops the reference row itself, and with it any
/// other code geocoded to exactly the same point.
pub fn find_nearby_by_distance(
    records: &[PostalCodeRecord],
    reference: Option<&Reference>,
    radius_km: f64,
) -> Result<Vec<NearbyMatch>, SearchError> {
    let resolved = resolve(records, reference, radius_km)?;
    let center = resolved.center();

    let matches: Vec<NearbyMatch> = resolved
        .geocoded
        .par_iter()
        .filter_map(|g| {
            let distance_km = geodesic_km(center, g.point);
            (distance_km > 0.0 && distance_km < radius_km).then(|| NearbyMatch {
                postal_code: g.record.postal_code.clone(),
                city: g.record.city.clone(),
                distance_km,
            })
        })
        .collect();

    debug!(
        "Distance search: {} of {} geocoded rows within {} km",
        matches.len(),
        resolved.geocoded.len(),
        radius_km
    );
    Ok(matches)
}
