//! Travel-time remediation of the short-tier solution.
//!
//! A solved assignment can still leave some clusters far from their site,
//! typically at county edges where the candidate pool thins out.  This pass
//! flags those clusters and proposes nearby replacement sites that would
//! materially improve their travel time.  Proposals only; nothing is
//! re-solved.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use vc_core::{ClusterId, GeoPoint, RegionConfig, SiteId};
use vc_locate::Assignment;
use vc_network::CostMatrix;

use crate::catalog::SiteCatalog;

/// Replacement sites for clusters whose short-tier travel exceeds
/// `cfg.travel_threshold_min`.
///
/// Flagged clusters are processed worst-first by mean over-threshold
/// minutes.  Each probes the `cfg.candidate_query_k` nearest catalog sites
/// (any tier) by straight-line distance and takes the first whose matrix
/// cost is at most `cfg.improvement_factor x` its current mean; a cluster
/// with no such candidate contributes nothing.  Duplicates across clusters
/// are removed, first-seen order kept.
pub fn remediation_sites(
    assignments: &[Assignment],
    matrix: &CostMatrix,
    catalog: &SiteCatalog,
    demand_pos: &[(ClusterId, GeoPoint)],
    cfg: &RegionConfig,
) -> Vec<SiteId> {
    // Mean over-threshold minutes per cluster.
    let mut sums: FxHashMap<ClusterId, (f64, u32)> = FxHashMap::default();
    for a in assignments {
        if let Some(minutes) = matrix.cost(a.cluster, a.site) {
            if minutes > cfg.travel_threshold_min {
                let entry = sums.entry(a.cluster).or_insert((0.0, 0));
                entry.0 += minutes;
                entry.1 += 1;
            }
        }
    }
    if sums.is_empty() {
        info!(
            "all short-tier assignments within {:.1} min",
            cfg.travel_threshold_min
        );
        return Vec::new();
    }

    // Worst-first; cluster id breaks exact ties so order is deterministic.
    let mut flagged: Vec<(ClusterId, f64)> = sums
        .into_iter()
        .map(|(cluster, (sum, n))| (cluster, sum / n as f64))
        .collect();
    flagged.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let flagged_count = flagged.len();

    let positions: FxHashMap<ClusterId, GeoPoint> = demand_pos.iter().copied().collect();
    let tree = catalog.rtree();

    let mut seen: FxHashSet<SiteId> = FxHashSet::default();
    let mut out = Vec::new();
    for (cluster, mean) in flagged {
        let Some(pos) = positions.get(&cluster) else {
            continue;
        };
        let budget = cfg.improvement_factor * mean;
        let pick = tree
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .take(cfg.candidate_query_k)
            .map(|e| e.id)
            .find(|&id| matrix.cost(cluster, id).is_some_and(|m| m <= budget));
        if let Some(site) = pick {
            if seen.insert(site) {
                out.push(site);
            }
        }
    }

    info!(
        "remediation: {} clusters over {:.1} min, {} replacement sites proposed",
        flagged_count,
        cfg.travel_threshold_min,
        out.len()
    );
    out
}
