//! County run orchestration.
//!
//! Fixed stage order: demand aggregation and snapping, catalog snapping and
//! pruning, the travel-cost matrix, then the tiers — short, long, off-model
//! substitution, dropbox, supplemental expansion, travel-time remediation.
//! The long tier solves independently of the short tier; substitution, the
//! expansion, and remediation all read the short-tier result.  A tier solve
//! failure aborts the county run; there is no partial tier output.

use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::info;

use vc_cluster::{DemandPoint, DemandUnit, aggregate};
use vc_core::{ClusterId, GeoPoint, RegionConfig, SiteId};
use vc_locate::{FacilitySelection, FlpProblem, solve};
use vc_network::{CostMatrix, CostStore, RoadGraph, build_cost_matrix, snap_points};

use crate::catalog::SiteCatalog;
use crate::error::{PipelineError, PipelineResult};
use crate::remediate::remediation_sites;
use crate::substitute::substitute_into_short;
use crate::tiers::{Tier, TierPlan, required_count};

/// Everything one county run produces.
#[derive(Debug, Clone)]
pub struct CountyOutputs {
    /// Demand points that survived near-node dedup, ascending cluster id.
    pub demand_points: Vec<DemandPoint>,
    /// Total demand over the retained points.
    pub total_demand: f64,
    /// Short-tier selection; the base for substitution, expansion, and
    /// remediation.
    pub short: FacilitySelection,
    /// Raw long-tier selection, before substitution.
    pub long_raw: FacilitySelection,
    /// Long-tier sites folded onto short-tier locations.
    pub long_substituted: Vec<SiteId>,
    /// Dropbox selection; empty when the region runs no dropboxes.
    pub dropbox: FacilitySelection,
    /// Supplemental sites beyond the short tier, ascending site id.
    pub supplemental: Vec<SiteId>,
    /// Replacement proposals for clusters with excessive travel,
    /// worst-cluster-first.
    pub remediation: Vec<SiteId>,
    /// The demand-to-site travel costs every solve used.
    pub matrix: CostMatrix,
}

/// Run the whole pipeline for one county.
///
/// `catalog_path`, when set, receives the pruned catalog (existing file
/// backed up first) as soon as near-node dedup finishes, before anything
/// downstream runs.  `store_path`, when set, is loaded before the cost pass
/// and flushed during it, so an interrupted run resumes instead of
/// recomputing.
pub fn run_county(
    units: &[DemandUnit],
    graph: &RoadGraph,
    mut catalog: SiteCatalog,
    cfg: &RegionConfig,
    catalog_path: Option<&Path>,
    store_path: Option<&Path>,
) -> PipelineResult<CountyOutputs> {
    cfg.validate()?;
    if units.is_empty() {
        return Err(PipelineError::EmptyInput("no demand units".into()));
    }
    if catalog.is_empty() {
        return Err(PipelineError::EmptyInput("no candidate sites".into()));
    }

    // ── Demand: aggregate, snap, dedup ────────────────────────────────────
    let mut demand_points = aggregate(units, cfg);
    let coords: Vec<(ClusterId, GeoPoint)> =
        demand_points.iter().map(|p| (p.id, p.centroid)).collect();
    let demand_map = snap_points(graph, &coords);
    if !demand_map.dropped.is_empty() {
        let kept: FxHashSet<ClusterId> =
            demand_map.retained.iter().map(|&(id, _)| id).collect();
        demand_points.retain(|p| kept.contains(&p.id));
    }
    if demand_points.is_empty() {
        return Err(PipelineError::EmptyInput(
            "no demand points after near-node dedup".into(),
        ));
    }

    // ── Sites: snap, dedup, persist the pruned catalog ────────────────────
    let site_map = snap_points(graph, &catalog.positions());
    if !site_map.dropped.is_empty() {
        let retained: Vec<SiteId> = site_map.retained.iter().map(|&(id, _)| id).collect();
        catalog.retain(&retained);
    }
    if catalog.is_empty() {
        return Err(PipelineError::EmptyInput(
            "no candidate sites after near-node dedup".into(),
        ));
    }
    if let Some(path) = catalog_path {
        catalog.backup_and_save(path)?;
    }

    let total_demand: f64 = demand_points.iter().map(|p| p.weight).sum();
    info!(
        "county inputs: {} demand points ({:.0} total demand), {} candidate sites",
        demand_points.len(),
        total_demand,
        catalog.len()
    );

    // ── Travel-cost matrix (resumable) ────────────────────────────────────
    let mut store = match store_path {
        Some(path) => CostStore::load(path)?,
        None => CostStore::new(),
    };
    let matrix = build_cost_matrix(
        graph,
        &demand_map.retained,
        &site_map.retained,
        &mut store,
        store_path,
    )?;

    // Solver demand rows, ascending cluster id by construction.
    let demand: Vec<(ClusterId, f64)> =
        demand_points.iter().map(|p| (p.id, p.weight)).collect();

    // ── Tier 1: short ─────────────────────────────────────────────────────
    let short_plan = TierPlan::build(Tier::Short, cfg, total_demand, &catalog)?;
    let short = solve_tier(&short_plan, &demand, &catalog, &matrix)?;

    // ── Tier 2: long, independent of the short tier ───────────────────────
    let long_plan = TierPlan::build(Tier::Long, cfg, total_demand, &catalog)?;
    let long_raw = solve_tier(&long_plan, &demand, &catalog, &matrix)?;

    // ── Tier 3: fold the long tier onto short-tier locations ──────────────
    let long_substituted = substitute_into_short(
        &long_raw.facilities,
        &short.facilities,
        &catalog,
        cfg.candidate_query_k,
    );

    // ── Tier 4: dropbox, only when the region runs any ────────────────────
    let dropbox_count = required_count(Tier::Dropbox, total_demand, cfg);
    let dropbox = if dropbox_count > 0 {
        let plan = TierPlan::build(Tier::Dropbox, cfg, total_demand, &catalog)?;
        solve_tier(&plan, &demand, &catalog, &matrix)?
    } else {
        info!("dropbox tier skipped (count override 0)");
        FacilitySelection {
            facilities: Vec::new(),
            assignments: Vec::new(),
            objective: 0.0,
        }
    };

    // ── Tier 5: supplemental expansion around the short tier ──────────────
    let supp_count = (cfg.expansion_factor * f64::from(short_plan.open_count)).ceil() as u32;
    let supp_plan = TierPlan {
        tier: Tier::Short,
        open_count: supp_count,
        capacity: short_plan.capacity,
        opening_costs: short_plan.opening_costs.clone(),
        forced_open: short.facilities.clone(),
    };
    let supp_sel = solve_tier(&supp_plan, &demand, &catalog, &matrix)?;
    let short_set: FxHashSet<SiteId> = short.facilities.iter().copied().collect();
    let mut supplemental: Vec<SiteId> = supp_sel
        .facilities
        .iter()
        .copied()
        .filter(|id| !short_set.contains(id))
        .collect();
    supplemental.sort();

    // ── Tier 6: travel-time remediation ───────────────────────────────────
    let demand_pos: Vec<(ClusterId, GeoPoint)> =
        demand_points.iter().map(|p| (p.id, p.centroid)).collect();
    let remediation = remediation_sites(&short.assignments, &matrix, &catalog, &demand_pos, cfg);

    Ok(CountyOutputs {
        demand_points,
        total_demand,
        short,
        long_raw,
        long_substituted,
        dropbox,
        supplemental,
        remediation,
        matrix,
    })
}

/// One tier solve against the shared demand rows and matrix.
fn solve_tier(
    plan: &TierPlan,
    demand: &[(ClusterId, f64)],
    catalog: &SiteCatalog,
    matrix: &CostMatrix,
) -> PipelineResult<FacilitySelection> {
    let facilities = catalog.ids();
    let capacities = vec![plan.capacity; facilities.len()];
    let problem = FlpProblem {
        demand,
        facilities: &facilities,
        capacities: &capacities,
        opening_costs: &plan.opening_costs,
        costs: matrix,
        open_count: plan.open_count as usize,
        forced_open: &plan.forced_open,
    };
    let sel = solve(&problem)?;
    info!(
        "{} tier: {} of {} candidates open, objective {:.1}",
        plan.tier,
        sel.facilities.len(),
        facilities.len(),
        sel.objective
    );
    Ok(sel)
}
