//! CSV export of county outputs.
//!
//! One file per reporting list, plus the assignment edges, cluster
//! centroids, and the full cluster-to-site cost dump.  Explicit headers,
//! deterministic row order, flush before returning.

use std::path::Path;

use csv::Writer;

use vc_core::{ClusterId, SiteId};

use crate::error::PipelineResult;
use crate::orchestrator::CountyOutputs;

pub const SHORT_SITES_FILE: &str = "sites_short.csv";
pub const LONG_SITES_FILE: &str = "sites_long.csv";
pub const DROPBOX_SITES_FILE: &str = "sites_dropbox.csv";
pub const SUPPLEMENTAL_SITES_FILE: &str = "sites_supplemental.csv";
pub const REMEDIATION_SITES_FILE: &str = "sites_remediation.csv";
pub const ASSIGNMENTS_FILE: &str = "assignments.csv";
pub const CLUSTERS_FILE: &str = "clusters.csv";
pub const COSTS_FILE: &str = "costs.csv";

fn write_site_list(path: &Path, ids: &[SiteId]) -> PipelineResult<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record(["site_id"])?;
    for &id in ids {
        w.write_record([id.index().to_string()])?;
    }
    w.flush()?;
    Ok(())
}

/// Write every county output list under `dir`.
pub fn write_outputs(dir: &Path, out: &CountyOutputs) -> PipelineResult<()> {
    write_site_list(&dir.join(SHORT_SITES_FILE), &out.short.facilities)?;
    write_site_list(&dir.join(LONG_SITES_FILE), &out.long_substituted)?;
    write_site_list(&dir.join(DROPBOX_SITES_FILE), &out.dropbox.facilities)?;
    write_site_list(&dir.join(SUPPLEMENTAL_SITES_FILE), &out.supplemental)?;
    write_site_list(&dir.join(REMEDIATION_SITES_FILE), &out.remediation)?;

    // Assignment edges with their travel minutes.
    let mut w = Writer::from_path(dir.join(ASSIGNMENTS_FILE))?;
    w.write_record(["cluster", "site", "flow", "minutes"])?;
    for a in &out.short.assignments {
        let minutes = out.matrix.cost(a.cluster, a.site).unwrap_or(f64::NAN);
        w.write_record([
            a.cluster.index().to_string(),
            a.site.index().to_string(),
            format!("{:.1}", a.flow),
            format!("{minutes:.3}"),
        ])?;
    }
    w.flush()?;

    // Cluster centroids with their weights.
    let mut w = Writer::from_path(dir.join(CLUSTERS_FILE))?;
    w.write_record(["cluster", "x", "y", "weight"])?;
    for p in &out.demand_points {
        w.write_record([
            p.id.index().to_string(),
            format!("{:.6}", p.centroid.x),
            format!("{:.6}", p.centroid.y),
            format!("{:.1}", p.weight),
        ])?;
    }
    w.flush()?;

    // Full cost dump, sorted by (cluster, site).
    let mut rows: Vec<(ClusterId, SiteId, f64)> = out.matrix.iter().collect();
    rows.sort_by_key(|&(c, s, _)| (c, s));
    let mut w = Writer::from_path(dir.join(COSTS_FILE))?;
    w.write_record(["cluster", "site", "minutes"])?;
    for (c, s, m) in rows {
        w.write_record([c.index().to_string(), s.index().to_string(), format!("{m:.3}")])?;
    }
    w.flush()?;

    Ok(())
}
