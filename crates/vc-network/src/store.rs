//! Persisted travel-cost store.
//!
//! The pairwise cost pass over a large county can run for tens of minutes,
//! so it must survive interruption.  Costs accumulate in an in-memory map
//! keyed by `(from, to)` near-node pair with an explicit load/merge/save
//! lifecycle; a restarted run loads the persisted file and skips every pair
//! already present.
//!
//! Pairs are keyed by the dense node ids assigned at graph load time, so a
//! store file is only meaningful alongside the node file that produced those
//! ids.
//!
//! # CSV format
//!
//! ```csv
//! from_node,to_node,minutes
//! 17,103,12.734
//! 17,104,99999.0
//! ```

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use vc_core::NodeId;

use crate::{NetworkError, NetworkResult};

#[derive(Deserialize)]
struct CostRecord {
    from_node: u32,
    to_node:   u32,
    minutes:   f64,
}

/// In-memory cost map with CSV persistence.
#[derive(Debug, Clone, Default)]
pub struct CostStore {
    costs: FxHashMap<(NodeId, NodeId), f64>,
}

impl CostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from `path`.  A missing file is not an error; it yields
    /// an empty store (the first run of a county has nothing to resume).
    pub fn load(path: &Path) -> NetworkResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let file = std::fs::File::open(path).map_err(NetworkError::Io)?;
        Self::load_reader(file)
    }

    /// Like [`load`](Self::load) but from any `Read` source.
    pub fn load_reader<R: Read>(reader: R) -> NetworkResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut costs = FxHashMap::default();
        for result in csv_reader.deserialize::<CostRecord>() {
            let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
            costs.insert((NodeId(row.from_node), NodeId(row.to_node)), row.minutes);
        }
        Ok(Self { costs })
    }

    pub fn contains(&self, from: NodeId, to: NodeId) -> bool {
        self.costs.contains_key(&(from, to))
    }

    pub fn get(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.costs.get(&(from, to)).copied()
    }

    pub fn insert(&mut self, from: NodeId, to: NodeId, minutes: f64) {
        self.costs.insert((from, to), minutes);
    }

    /// Fold `other` into `self`.  Pairs already present keep their existing
    /// value, matching the skip-if-present rule of the matrix pass.
    pub fn merge(&mut self, other: CostStore) {
        for (pair, minutes) in other.costs {
            self.costs.entry(pair).or_insert(minutes);
        }
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.costs.iter().map(|(&(f, t), &m)| (f, t, m))
    }

    /// Write the store to `path` as CSV, sorted by pair for a reproducible
    /// file.  Overwrites any existing file.
    pub fn save(&self, path: &Path) -> NetworkResult<()> {
        let mut pairs: Vec<(&(NodeId, NodeId), &f64)> = self.costs.iter().collect();
        pairs.sort_by_key(|(pair, _)| **pair);

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["from_node", "to_node", "minutes"])?;
        for (&(from, to), &minutes) in pairs {
            writer.write_record(&[from.0.to_string(), to.0.to_string(), minutes.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}
