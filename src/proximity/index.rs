//! Spatial index for the bounding-box search variant.

use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

use crate::models::GeoPoint;

/// Kilometres per degree of latitude.
const KM_PER_DEGREE_LAT: f64 = 110.574;
/// Kilometres per degree of longitude at the equator.
const KM_PER_DEGREE_LON: f64 = 111.320;

/// Axis-aligned lat/lon window approximating a circular search radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Window spanning `radius_km` around `center`.
    ///
    /// The longitude span is stretched by 1/cos(lat), so the window admits
    /// points past the circular radius near its corners, and it diverges as
    /// the centre approaches a pole (cos -> 0). That makes it a prefilter,
    /// not an exact answer; the geodesic scan is the exact variant.
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE_LAT;
        let lon_delta = radius_km / (KM_PER_DEGREE_LON * center.lat.to_radians().cos());
        Self {
            min_lat: center.lat - lat_delta,
            max_lat: center.lat + lat_delta,
            min_lon: center.lon - lon_delta,
            max_lon: center.lon + lon_delta,
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.min_lat <= point.lat
            && point.lat <= self.max_lat
            && self.min_lon <= point.lon
            && point.lon <= self.max_lon
    }
}

/// Wrapper for R-tree indexing of geocoded records
struct IndexedPoint {
    idx: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree over record coordinates, keyed by position in the source slice.
pub struct RecordIndex {
    tree: RTree<IndexedPoint>,
}

impl RecordIndex {
    /// Build the index from points in slice order.
    pub fn build<I>(points: I) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let indexed: Vec<IndexedPoint> = points
            .into_iter()
            .enumerate()
            .map(|(idx, point)| IndexedPoint {
                idx,
                envelope: AABB::from_point([point.lon, point.lat]),
            })
            .collect();

        let tree = RTree::bulk_load(indexed);
        debug!("Spatial index built with {} entries", tree.size());

        Self { tree }
    }

    /// Indices of every point inside the window, edges included.
    pub fn within(&self, bbox: &BoundingBox) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [bbox.min_lon, bbox.min_lat],
            [bbox.max_lon, bbox.max_lat],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|ip| ip.idx)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
