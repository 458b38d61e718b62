//! CSV road-graph loader.
//!
//! # CSV formats
//!
//! Nodes, one row per road-segment endpoint:
//!
//! ```csv
//! id,x,y
//! 122953034,-118.2801,34.0211
//! 122953071,-118.2795,34.0204
//! ```
//!
//! Edges, one row per **directed** edge (a two-way segment appears as two
//! rows):
//!
//! ```csv
//! from_node,to_node,length_m,road_class
//! 122953034,122953071,84.2,secondary
//! 122953071,122953034,84.2,secondary
//! ```
//!
//! External node ids are arbitrary 64-bit integers (map exports use large
//! sparse ids); they remap to dense [`NodeId`]s in node-file order, which is
//! what every later stage and the persisted cost store are keyed on.  The
//! remap is deterministic, so re-running against the same node file assigns
//! the same ids.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use vc_core::{GeoPoint, NodeId};

use crate::graph::{RoadGraph, RoadGraphBuilder};
use crate::speed::travel_ms;
use crate::{NetworkError, NetworkResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id: i64,
    x:  f64,
    y:  f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from_node:  i64,
    to_node:    i64,
    length_m:   f64,
    road_class: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a road graph from node and edge CSV files.
pub fn load_graph_csv(nodes_path: &Path, edges_path: &Path) -> NetworkResult<RoadGraph> {
    let nodes = std::fs::File::open(nodes_path).map_err(NetworkError::Io)?;
    let edges = std::fs::File::open(edges_path).map_err(NetworkError::Io)?;
    load_graph_readers(nodes, edges)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
pub fn load_graph_readers<N: Read, E: Read>(nodes: N, edges: E) -> NetworkResult<RoadGraph> {
    // ── Phase 1: nodes, remapping external ids to dense NodeIds ──────────
    let mut node_reader = csv::Reader::from_reader(nodes);
    let mut builder = RoadGraphBuilder::new();
    let mut ext_to_node: HashMap<i64, NodeId> = HashMap::new();

    for result in node_reader.deserialize::<NodeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let id = builder.add_node(GeoPoint::new(row.x, row.y));
        if ext_to_node.insert(row.id, id).is_some() {
            return Err(NetworkError::Parse(format!(
                "node id {} defined more than once",
                row.id
            )));
        }
    }

    // ── Phase 2: directed edges, costed by the speed table ────────────────
    let mut edge_reader = csv::Reader::from_reader(edges);

    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        if !(row.length_m.is_finite() && row.length_m >= 0.0) {
            return Err(NetworkError::Parse(format!(
                "edge {} -> {}: length_m must be a non-negative number, got {}",
                row.from_node, row.to_node, row.length_m
            )));
        }
        let from = *ext_to_node.get(&row.from_node).ok_or_else(|| {
            NetworkError::Parse(format!("edge references unknown node id {}", row.from_node))
        })?;
        let to = *ext_to_node.get(&row.to_node).ok_or_else(|| {
            NetworkError::Parse(format!("edge references unknown node id {}", row.to_node))
        })?;
        builder.add_directed_edge(from, to, row.length_m, travel_ms(row.length_m, &row.road_class));
    }

    Ok(builder.build())
}
