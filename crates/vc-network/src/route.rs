//! Shortest-path cost queries over the CSR road graph.
//!
//! # Cost units
//!
//! All costs are in **milliseconds** (u32) internally; conversion to minutes
//! happens at the cost-matrix boundary.  `u32::MAX` marks an unreachable
//! node in the one-to-many result.
//!
//! The matrix builder runs one [`costs_from`] pass per demand near-node and
//! reads off every site near-node from the distance array, so the pass count
//! scales with demand points rather than demand × site pairs.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use vc_core::NodeId;

use crate::graph::RoadGraph;

/// Cost in milliseconds of the cheapest directed path from `from` to `to`,
/// or `None` if no path exists.  `from == to` is zero cost.
pub fn shortest_cost_ms(graph: &RoadGraph, from: NodeId, to: NodeId) -> Option<u32> {
    if from == to {
        return Some(0);
    }

    let n = graph.node_count();
    let mut dist = vec![u32::MAX; n];
    dist[from.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as
    // min-heap.  Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Some(cost);
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost.saturating_add(graph.edge_travel_ms[edge.index()]);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    None
}

/// Cheapest cost in milliseconds from `origin` to **every** node.
///
/// Returns a `Vec` indexed by `NodeId`; unreachable nodes hold `u32::MAX`.
pub fn costs_from(graph: &RoadGraph, origin: NodeId) -> Vec<u32> {
    let n = graph.node_count();
    let mut dist = vec![u32::MAX; n];
    dist[origin.index()] = 0;

    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, origin)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost.saturating_add(graph.edge_travel_ms[edge.index()]);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    dist
}
