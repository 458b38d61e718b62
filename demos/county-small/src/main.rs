//! county-small — one synthetic county through the whole siting pipeline.
//!
//! Two towns, a rural crossroads, and a far-flung hamlet: 243 demand units
//! over a 12-node road network with 10 candidate sites.  Small enough to
//! read the solver's choices directly off the printed tables.  Re-running
//! reuses the persisted cost store and backs up the pruned catalog.

mod county;

use std::path::Path;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use vc_core::RegionConfig;
use vc_pipeline::{SiteCatalog, run_county, write_outputs};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64  = 42;
const OUTPUT_DIR: &str = "output/county-small";

fn ids(list: &[vc_core::SiteId]) -> String {
    if list.is_empty() {
        return "(none)".into();
    }
    list.iter()
        .map(|s| s.index().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== county-small — facility siting pipeline ===");
    println!();

    // 1. Synthetic county: road network and demand units.
    let graph = county::build_graph();
    let units = county::demand_units(SEED);
    let total: f64 = units.iter().map(|u| u.weight).sum();
    println!(
        "Road network: {} nodes, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );
    println!("Demand units: {} (total weight {total:.0})", units.len());

    // 2. Candidate catalog, written to disk so the run can prune it and
    //    back up the original.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let catalog_path = Path::new(OUTPUT_DIR).join("sites.csv");
    std::fs::write(&catalog_path, county::CATALOG_CSV)?;
    let catalog = SiteCatalog::load(&catalog_path)?;
    println!("Candidate sites: {}", catalog.len());
    println!();

    // 3. Region parameters: defaults except the short-tier capacity.
    let cfg = RegionConfig::for_region(20_000.0);

    // 4. The county run.  The cost store persists across runs, so a re-run
    //    resumes travel-time computation instead of redoing it.
    let store_path = Path::new(OUTPUT_DIR).join("costs_store.csv");
    let out = run_county(
        &units,
        &graph,
        catalog,
        &cfg,
        Some(&catalog_path),
        Some(&store_path),
    )?;
    println!();

    // 5. Short-tier table: load and roles per open site.
    let pruned = SiteCatalog::load(&catalog_path)?;
    println!(
        "{:<6} {:<22} {:>10} {:>9} {:>7}",
        "Site", "Roles", "Load", "Clusters", "Score"
    );
    println!("{}", "-".repeat(58));
    for &id in &out.short.facilities {
        let load: f64 = out
            .short
            .assignments
            .iter()
            .filter(|a| a.site == id)
            .map(|a| a.flow)
            .sum();
        let clusters = out
            .short
            .assignments
            .iter()
            .filter(|a| a.site == id && a.flow > 0.0)
            .count();
        let mut roles = vec!["short"];
        if out.long_substituted.contains(&id) {
            roles.push("long");
        }
        let score = pruned.get(id).map(|s| s.center_score).unwrap_or(f64::NAN);
        println!(
            "{:<6} {:<22} {:>10.0} {:>9} {:>7.1}",
            id.index(),
            roles.join("+"),
            load,
            clusters,
            score
        );
    }
    println!();

    // 6. The remaining lists.
    println!("Demand points:      {} ({:.0} total demand)", out.demand_points.len(), out.total_demand);
    println!("Long (raw):         {}", ids(&out.long_raw.facilities));
    println!("Long (substituted): {}", ids(&out.long_substituted));
    println!("Dropbox:            {}", ids(&out.dropbox.facilities));
    println!("Supplemental:       {}", ids(&out.supplemental));
    println!("Remediation:        {}", ids(&out.remediation));
    println!();

    // 7. CSV outputs.
    write_outputs(Path::new(OUTPUT_DIR), &out)?;
    println!("Outputs under {OUTPUT_DIR}/:");
    println!("  sites_short.csv, sites_long.csv, sites_dropbox.csv,");
    println!("  sites_supplemental.csv, sites_remediation.csv,");
    println!("  assignments.csv, clusters.csv, costs.csv");
    println!("  sites.csv (pruned catalog; original in sites_bak.csv)");

    Ok(())
}
