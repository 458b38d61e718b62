//! Demand-to-site cost matrix.
//!
//! For every (demand near-node, site near-node) pair the matrix holds the
//! directed shortest-path travel time in minutes.  Pairs already present in
//! the [`CostStore`] are skipped, which is what makes an interrupted pass
//! resumable.  A pair with no connecting path gets a large finite sentinel
//! ([`SENTINEL_MINUTES`]) instead of infinity so the downstream optimization
//! stays numerically well-posed.
//!
//! One Dijkstra per demand near-node covers all of its site pairs, so the
//! pass count scales with demand points.  With the `parallel` feature those
//! per-origin passes fan out across Rayon workers; insertion and progress
//! reporting stay sequential, so results are identical either way.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use vc_core::{ClusterId, NodeId, SiteId};

use crate::NetworkResult;
use crate::graph::RoadGraph;
use crate::route::costs_from;
use crate::store::CostStore;

/// Travel cost assigned to a pair with no connecting path, in minutes.
/// Large enough that the optimizer never prefers it, finite so the model
/// stays solvable.
pub const SENTINEL_MINUTES: f64 = 99_999.0;

/// Progress is logged, and the store flushed, every this many pairs.
const PROGRESS_EVERY_PAIRS: usize = 10_000;

// ── CostMatrix ────────────────────────────────────────────────────────────────

/// Travel costs keyed by `(ClusterId, SiteId)`, in minutes.
///
/// Built once per county and reused across every solver invocation.
#[derive(Debug, Clone, Default)]
pub struct CostMatrix {
    costs: FxHashMap<(ClusterId, SiteId), f64>,
}

impl CostMatrix {
    pub fn cost(&self, cluster: ClusterId, site: SiteId) -> Option<f64> {
        self.costs.get(&(cluster, site)).copied()
    }

    /// Insert or overwrite one pair cost, in minutes.
    pub fn insert(&mut self, cluster: ClusterId, site: SiteId, minutes: f64) {
        self.costs.insert((cluster, site), minutes);
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, SiteId, f64)> + '_ {
        self.costs.iter().map(|(&(c, s), &m)| (c, s, m))
    }
}

// ── Pairwise pass ─────────────────────────────────────────────────────────────

/// Convert a one-to-many Dijkstra result for one pair into minutes.
fn pair_minutes(from: NodeId, to: NodeId, ms: u32) -> f64 {
    if ms == u32::MAX {
        return SENTINEL_MINUTES;
    }
    if ms == 0 && from != to {
        // A connecting path that costs nothing means degenerate edge
        // weights somewhere along it.  Worth examining the edge data.
        warn!("zero travel cost between distinct nodes {from} and {to}");
    }
    ms as f64 / 60_000.0
}

/// Compute shortest-path minutes for every `(demand, site)` near-node pair
/// not already in `store`.
///
/// When `persist_path` is set the store is flushed there at the progress
/// cadence and once at the end, so a killed run resumes where it left off.
pub fn build_cost_store(
    graph: &RoadGraph,
    demand_nodes: &[NodeId],
    site_nodes: &[NodeId],
    store: &mut CostStore,
    persist_path: Option<&Path>,
) -> NetworkResult<()> {
    let total_pairs = demand_nodes.len() * site_nodes.len();
    let resumed = store.len();
    if resumed > 0 {
        info!("cost store already holds {resumed} pairs; computing only the rest");
    }

    let mut processed = 0usize;
    let mut next_report = PROGRESS_EVERY_PAIRS;

    #[cfg(not(feature = "parallel"))]
    {
        for &origin in demand_nodes {
            let missing: Vec<NodeId> = site_nodes
                .iter()
                .copied()
                .filter(|&site| !store.contains(origin, site))
                .collect();
            if !missing.is_empty() {
                let dist = costs_from(graph, origin);
                for &site in &missing {
                    store.insert(origin, site, pair_minutes(origin, site, dist[site.index()]));
                }
            }

            processed += site_nodes.len();
            let mut crossed = false;
            while processed >= next_report {
                info!("processed {next_report} of {total_pairs} pairs");
                next_report += PROGRESS_EVERY_PAIRS;
                crossed = true;
            }
            if crossed {
                if let Some(path) = persist_path {
                    store.save(path)?;
                }
            }
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        // Decide the missing pairs up front (sequential store reads), fan
        // the Dijkstra passes out, then merge sequentially in input order.
        let work: Vec<(NodeId, Vec<NodeId>)> = demand_nodes
            .iter()
            .map(|&origin| {
                let missing = site_nodes
                    .iter()
                    .copied()
                    .filter(|&site| !store.contains(origin, site))
                    .collect();
                (origin, missing)
            })
            .collect();

        let mut by_origin: FxHashMap<NodeId, Vec<(NodeId, f64)>> = work
            .par_iter()
            .filter(|(_, missing)| !missing.is_empty())
            .map(|(origin, missing)| {
                let dist = costs_from(graph, *origin);
                let entries = missing
                    .iter()
                    .map(|&site| (site, pair_minutes(*origin, site, dist[site.index()])))
                    .collect();
                (*origin, entries)
            })
            .collect();

        for &origin in demand_nodes {
            if let Some(entries) = by_origin.remove(&origin) {
                for (site, minutes) in entries {
                    store.insert(origin, site, minutes);
                }
            }

            processed += site_nodes.len();
            let mut crossed = false;
            while processed >= next_report {
                info!("processed {next_report} of {total_pairs} pairs");
                next_report += PROGRESS_EVERY_PAIRS;
                crossed = true;
            }
            if crossed {
                if let Some(path) = persist_path {
                    store.save(path)?;
                }
            }
        }
    }

    if let Some(path) = persist_path {
        store.save(path)?;
    }
    info!(
        "cost pass complete: {} pairs requested, store holds {}",
        total_pairs,
        store.len()
    );
    Ok(())
}

// ── Node-to-id translation ────────────────────────────────────────────────────

/// Re-key node-indexed costs by `(ClusterId, SiteId)` via the near-node maps.
///
/// Pairs absent from the store stay absent from the matrix; after a complete
/// [`build_cost_store`] pass over the same node sets there are none.
pub fn translate(
    store: &CostStore,
    demand: &[(ClusterId, NodeId)],
    sites: &[(SiteId, NodeId)],
) -> CostMatrix {
    let mut costs =
        FxHashMap::with_capacity_and_hasher(demand.len() * sites.len(), Default::default());
    for &(cluster, demand_node) in demand {
        for &(site, site_node) in sites {
            if let Some(minutes) = store.get(demand_node, site_node) {
                costs.insert((cluster, site), minutes);
            }
        }
    }
    CostMatrix { costs }
}

/// Full pairwise pass plus translation: the one-call entry point used per
/// county run.
pub fn build_cost_matrix(
    graph: &RoadGraph,
    demand: &[(ClusterId, NodeId)],
    sites: &[(SiteId, NodeId)],
    store: &mut CostStore,
    persist_path: Option<&Path>,
) -> NetworkResult<CostMatrix> {
    let demand_nodes: Vec<NodeId> = demand.iter().map(|&(_, n)| n).collect();
    let site_nodes: Vec<NodeId> = sites.iter().map(|&(_, n)| n).collect();
    build_cost_store(graph, &demand_nodes, &site_nodes, store, persist_path)?;
    Ok(translate(store, demand, sites))
}
