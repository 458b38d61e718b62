//! Point-to-node snapping with duplicate resolution.
//!
//! Every demand point and candidate site is identified downstream by its
//! nearest road node, so two points sharing a near-node would silently merge
//! in the cost matrix.  When that happens (points close together relative to
//! network density), only the point Euclidean-nearest to the shared node is
//! retained; the rest are dropped from further processing.  Collisions are
//! logged, never fatal.

use rustc_hash::FxHashMap;
use tracing::warn;

use vc_core::{GeoPoint, NodeId};

use crate::graph::RoadGraph;

/// Outcome of snapping one point set to the graph.
///
/// `retained` preserves the input order of the surviving points; `dropped`
/// lists the losers of near-node collisions (plus any point that could not
/// snap at all, which only happens on an empty graph).
#[derive(Debug, Clone)]
pub struct NearNodeMap<I> {
    pub retained: Vec<(I, NodeId)>,
    pub dropped:  Vec<I>,
}

impl<I> NearNodeMap<I> {
    /// Near-nodes of the retained points, in the same order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.retained.iter().map(|(_, n)| *n).collect()
    }
}

/// Snap `points` to their nearest graph nodes and resolve collisions.
///
/// For every node claimed by more than one point, the point with the
/// smallest squared Euclidean distance to the node wins; an exact tie keeps
/// the earliest input point.  Running the result through `snap_points` again
/// removes nothing (each retained point maps to a distinct node).
pub fn snap_points<I>(graph: &RoadGraph, points: &[(I, GeoPoint)]) -> NearNodeMap<I>
where
    I: Copy + std::fmt::Display,
{
    // ── Snap everything ───────────────────────────────────────────────────
    let snapped: Vec<Option<NodeId>> = points
        .iter()
        .map(|&(_, pos)| graph.snap_to_node(pos))
        .collect();

    // ── Group competing points by node ────────────────────────────────────
    let mut by_node: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();
    for (i, node) in snapped.iter().enumerate() {
        if let Some(n) = node {
            by_node.entry(*n).or_default().push(i);
        }
    }

    // ── Resolve: nearest point to the shared node survives ────────────────
    let mut keep = vec![false; points.len()];
    for (&node, competitors) in &by_node {
        if competitors.len() == 1 {
            keep[competitors[0]] = true;
            continue;
        }

        let node_pos = graph.node_pos[node.index()];
        let mut best = competitors[0];
        let mut best_d = points[best].1.dist2(node_pos);
        for &i in &competitors[1..] {
            let d = points[i].1.dist2(node_pos);
            if d < best_d {
                best = i;
                best_d = d;
            }
        }
        keep[best] = true;

        let dropped: Vec<String> = competitors
            .iter()
            .filter(|&&i| i != best)
            .map(|&i| points[i].0.to_string())
            .collect();
        warn!(
            "{} points share near-node {}; keeping {}, dropping {}",
            competitors.len(),
            node,
            points[best].0,
            dropped.join(", ")
        );
    }

    let mut retained = Vec::with_capacity(points.len());
    let mut dropped = Vec::new();
    for (i, &(id, _)) in points.iter().enumerate() {
        match snapped[i] {
            Some(node) if keep[i] => retained.push((id, node)),
            _ => dropped.push(id),
        }
    }

    NearNodeMap { retained, dropped }
}
