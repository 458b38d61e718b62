//! Demand aggregation: units in, demand points out.
//!
//! Thousands of census-scale units collapse into at most a few hundred
//! demand points.  The cluster count scales with total demand so that dense
//! counties get proportionally more points, with a floor that guarantees
//! spatial variation even where one city holds nearly all the demand.

use tracing::info;

use vc_core::{ClusterId, GeoPoint, RegionConfig};

use crate::kmeans::kmeans;
use crate::loader::DemandUnit;

/// Lloyd-iteration cap; assignments reach a fixpoint well before this on
/// county-sized inputs.
const KMEANS_MAX_ITERS: usize = 50;

/// One clustered demand point: the unit of demand every later stage sees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DemandPoint {
    pub id:       ClusterId,
    pub centroid: GeoPoint,
    pub weight:   f64,
}

/// Number of clusters to form for a county with the given total demand.
///
/// `max(min_clusters, floor(2 × total / population_threshold))` — the factor
/// of two targets clusters at roughly half the population threshold each,
/// and the floor keeps sparse counties from collapsing to a handful of
/// points.  A derived count below the floor is raised to it regardless.
pub fn cluster_count(total_weight: f64, cfg: &RegionConfig) -> u32 {
    let derived = ((total_weight / cfg.population_threshold) * 2.0).floor() as u32;
    derived.max(cfg.min_clusters)
}

/// Cluster `units` spatially and sum their weights per cluster.
///
/// The target cluster count follows [`cluster_count`], clamped to the number
/// of units (k-means cannot produce more clusters than points).  Each output
/// point carries the arithmetic-mean centroid of its member units and their
/// summed weight.  Labels that end up with no members produce no demand
/// point, so ids may be sparse; output is ordered by ascending `ClusterId`.
pub fn aggregate(units: &[DemandUnit], cfg: &RegionConfig) -> Vec<DemandPoint> {
    if units.is_empty() {
        return Vec::new();
    }

    let total: f64 = units.iter().map(|u| u.weight).sum();
    let k = (cluster_count(total, cfg) as usize).min(units.len());

    let points: Vec<GeoPoint> = units.iter().map(|u| u.pos).collect();
    let labels = kmeans(&points, k, KMEANS_MAX_ITERS);

    let mut sums_x = vec![0.0f64; k];
    let mut sums_y = vec![0.0f64; k];
    let mut weights = vec![0.0f64; k];
    let mut counts = vec![0usize; k];
    for (unit, &label) in units.iter().zip(&labels) {
        sums_x[label] += unit.pos.x;
        sums_y[label] += unit.pos.y;
        weights[label] += unit.weight;
        counts[label] += 1;
    }

    // Ascending label order, so downstream iteration is deterministic.
    let demand: Vec<DemandPoint> = (0..k)
        .filter(|&j| counts[j] > 0)
        .map(|j| {
            let n = counts[j] as f64;
            DemandPoint {
                id:       ClusterId(j as u32),
                centroid: GeoPoint::new(sums_x[j] / n, sums_y[j] / n),
                weight:   weights[j],
            }
        })
        .collect();

    info!(
        "aggregated {} units (total weight {:.0}) into {} demand points (target k = {})",
        units.len(),
        total,
        demand.len(),
        k
    );

    demand
}
