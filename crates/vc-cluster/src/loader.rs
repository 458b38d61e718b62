//! CSV demand-unit loader.
//!
//! # CSV format
//!
//! One row per source geographic unit (census-block scale).  Coordinates are
//! planar (lon/lat degrees or projected metres); `weight` is the demand the
//! unit contributes, e.g. its registered-voter count.
//!
//! ```csv
//! id,x,y,weight
//! 60375990002013,-118.2437,34.0522,412
//! 60375990002014,-118.2441,34.0519,387
//! ```
//!
//! Rows with a negative or non-finite weight are rejected outright: a NaN
//! that slips through here would poison every downstream total.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use vc_core::{GeoPoint, UnitId};

use crate::{ClusterError, ClusterResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct UnitRecord {
    id:     u64,
    x:      f64,
    y:      f64,
    weight: f64,
}

// ── Source unit ───────────────────────────────────────────────────────────────

/// One population-bearing geographic unit, the aggregator's input granule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DemandUnit {
    pub id:     UnitId,
    pub pos:    GeoPoint,
    pub weight: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load demand units from a CSV file.
pub fn load_units_csv(path: &Path) -> ClusterResult<Vec<DemandUnit>> {
    let file = std::fs::File::open(path).map_err(ClusterError::Io)?;
    load_units_reader(file)
}

/// Like [`load_units_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_units_reader<R: Read>(reader: R) -> ClusterResult<Vec<DemandUnit>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut units = Vec::new();

    for result in csv_reader.deserialize::<UnitRecord>() {
        let row = result.map_err(|e| ClusterError::Parse(e.to_string()))?;
        if !(row.weight.is_finite() && row.weight >= 0.0) {
            return Err(ClusterError::Parse(format!(
                "unit {}: weight must be a non-negative number, got {}",
                row.id, row.weight
            )));
        }
        units.push(DemandUnit {
            id:     UnitId(row.id),
            pos:    GeoPoint::new(row.x, row.y),
            weight: row.weight,
        });
    }

    Ok(units)
}
