//! Nearpost - postal-code proximity search over geocoded country snapshots.
//!
//! This library provides shared types and modules for the normalize and
//! nearby binaries.

pub mod codes;
pub mod dataset;
pub mod models;
pub mod proximity;

pub use models::{Country, GeoPoint, PostalCodeRecord};
pub use proximity::{NearbyMatch, Reference, SearchError};
