//! Candidate-site catalog: loading, score-based opening costs, pruning,
//! and persistence.
//!
//! The catalog CSV is the one pipeline input that is also an output: after
//! near-node dedup prunes colliding sites, the surviving catalog is written
//! back (previous file kept as `<stem>_bak.csv`) so later stages and later
//! runs read the deduplicated set.

use std::io::Read;
use std::path::Path;

use csv::Writer;
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::warn;

use vc_core::{GeoPoint, SiteId};

use crate::error::{PipelineError, PipelineResult};

// ── CSV schema ────────────────────────────────────────────────────────────────

/// One row of the candidate-site file.  The flag columns are optional and
/// default to 0; scores may be blank (the row is then dropped, not fatal).
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRecord {
    pub id: u32,
    pub x:  f64,
    pub y:  f64,
    pub center_score:  Option<f64>,
    pub dropbox_score: Option<f64>,
    #[serde(default)]
    pub has_transit: u8,
    #[serde(default)]
    pub fixed_short: u8,
    #[serde(default)]
    pub fixed_long:  u8,
}

/// A candidate site as the pipeline sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateSite {
    pub id:  SiteId,
    pub pos: GeoPoint,
    /// Suitability for staffed centers (short and long tiers).  Higher is
    /// better; the score only matters relative to the county's quintiles.
    pub center_score: f64,
    /// Suitability for unstaffed dropboxes.
    pub dropbox_score: f64,
    pub has_transit: bool,
    /// Must appear in any short-tier solution.
    pub fixed_short: bool,
    /// Must appear in any long-tier solution.
    pub fixed_long: bool,
}

// ── SiteCatalog ───────────────────────────────────────────────────────────────

/// All candidate sites of one county, in catalog (file) order.
#[derive(Debug, Clone, Default)]
pub struct SiteCatalog {
    sites: Vec<CandidateSite>,
}

impl SiteCatalog {
    /// Load the catalog from a CSV file.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::load_reader(file)
    }

    /// Load the catalog from any reader.
    pub fn load_reader<R: Read>(reader: R) -> PipelineResult<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut sites = Vec::new();
        let mut seen: FxHashSet<u32> = FxHashSet::default();
        let mut dropped = 0usize;

        for result in rdr.deserialize() {
            let rec: SiteRecord = result?;
            let (center, dropbox) = match (rec.center_score, rec.dropbox_score) {
                (Some(c), Some(d)) if c.is_finite() && d.is_finite() => (c, d),
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            if !seen.insert(rec.id) {
                return Err(PipelineError::Catalog(format!("duplicate site id {}", rec.id)));
            }
            sites.push(CandidateSite {
                id:            SiteId(rec.id),
                pos:           GeoPoint::new(rec.x, rec.y),
                center_score:  center,
                dropbox_score: dropbox,
                has_transit:   rec.has_transit != 0,
                fixed_short:   rec.fixed_short != 0,
                fixed_long:    rec.fixed_long != 0,
            });
        }

        if dropped > 0 {
            warn!("dropped {dropped} catalog sites with missing or NaN scores");
        }
        Ok(Self { sites })
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateSite> {
        self.sites.iter()
    }

    pub fn get(&self, id: SiteId) -> Option<&CandidateSite> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// Site ids in catalog order.
    pub fn ids(&self) -> Vec<SiteId> {
        self.sites.iter().map(|s| s.id).collect()
    }

    /// `(id, position)` pairs in catalog order, the snapping input.
    pub fn positions(&self) -> Vec<(SiteId, GeoPoint)> {
        self.sites.iter().map(|s| (s.id, s.pos)).collect()
    }

    /// Sites the region requires in every short-tier solution.
    pub fn fixed_short_sites(&self) -> Vec<SiteId> {
        self.sites.iter().filter(|s| s.fixed_short).map(|s| s.id).collect()
    }

    /// Sites the region requires in every long-tier solution.
    pub fn fixed_long_sites(&self) -> Vec<SiteId> {
        self.sites.iter().filter(|s| s.fixed_long).map(|s| s.id).collect()
    }

    /// Keep only `ids`, preserving catalog order.
    pub fn retain(&mut self, ids: &[SiteId]) {
        let keep: FxHashSet<SiteId> = ids.iter().copied().collect();
        self.sites.retain(|s| keep.contains(&s.id));
    }

    /// Persist the catalog to `path`, backing up any existing file to
    /// `<stem>_bak.csv` first.
    pub fn backup_and_save(&self, path: &Path) -> PipelineResult<()> {
        if path.exists() {
            let backup = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => path.with_file_name(format!("{stem}_bak.csv")),
                None => path.with_extension("bak.csv"),
            };
            std::fs::copy(path, &backup)?;
        }

        let mut w = Writer::from_path(path)?;
        w.write_record([
            "id",
            "x",
            "y",
            "center_score",
            "dropbox_score",
            "has_transit",
            "fixed_short",
            "fixed_long",
        ])?;
        for s in &self.sites {
            w.write_record([
                s.id.index().to_string(),
                format!("{:.6}", s.pos.x),
                format!("{:.6}", s.pos.y),
                s.center_score.to_string(),
                s.dropbox_score.to_string(),
                (s.has_transit as u8).to_string(),
                (s.fixed_short as u8).to_string(),
                (s.fixed_long as u8).to_string(),
            ])?;
        }
        w.flush()?;
        Ok(())
    }

    /// Opening cost per site, catalog order, for the staffed-center tiers.
    pub fn center_opening_costs(&self, base_cost: f64) -> Vec<f64> {
        let scores: Vec<f64> = self.sites.iter().map(|s| s.center_score).collect();
        opening_costs(&scores, base_cost)
    }

    /// Opening cost per site, catalog order, for the dropbox tier.
    pub fn dropbox_opening_costs(&self, base_cost: f64) -> Vec<f64> {
        let scores: Vec<f64> = self.sites.iter().map(|s| s.dropbox_score).collect();
        opening_costs(&scores, base_cost)
    }

    /// Spatial index over the sites in `ids`.
    pub(crate) fn rtree_of(&self, ids: &[SiteId]) -> RTree<SiteEntry> {
        let keep: FxHashSet<SiteId> = ids.iter().copied().collect();
        let entries: Vec<SiteEntry> = self
            .sites
            .iter()
            .filter(|s| keep.contains(&s.id))
            .map(|s| SiteEntry { point: [s.pos.x, s.pos.y], id: s.id })
            .collect();
        RTree::bulk_load(entries)
    }

    /// Spatial index over the whole catalog.
    pub(crate) fn rtree(&self) -> RTree<SiteEntry> {
        let entries: Vec<SiteEntry> = self
            .sites
            .iter()
            .map(|s| SiteEntry { point: [s.pos.x, s.pos.y], id: s.id })
            .collect();
        RTree::bulk_load(entries)
    }
}

// ── R-tree site entry ─────────────────────────────────────────────────────────

/// Entry stored in catalog R-trees: a 2-D `[x, y]` point with its `SiteId`.
#[derive(Clone)]
pub(crate) struct SiteEntry {
    point: [f64; 2],
    pub(crate) id: SiteId,
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Quintile opening costs ────────────────────────────────────────────────────

/// Cost multiplier per score quintile, lowest first: the least suitable
/// fifth of sites pays double the base cost, the most suitable fifth half.
const QUINTILE_SCALE: [f64; 5] = [2.0, 1.25, 1.0, 0.75, 0.5];

/// Quintile breakpoints of `scores` at cumulative fractions
/// [0.2, 0.4, 0.6, 0.8], linearly interpolated over the sorted values.
fn quintile_breakpoints(scores: &[f64]) -> [f64; 4] {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();

    let mut breaks = [0.0; 4];
    for (slot, q) in [0.2, 0.4, 0.6, 0.8].into_iter().enumerate() {
        let h = (n - 1) as f64 * q;
        let lo = h.floor() as usize;
        let hi = h.ceil() as usize;
        breaks[slot] = sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo]);
    }
    breaks
}

/// Per-site opening costs: `base_cost` scaled by the site's score quintile.
///
/// Bucket membership is `(lo, hi]` over the breakpoints, so a score exactly
/// on a breakpoint falls in the lower bucket.  Output is parallel to
/// `scores`.
pub fn opening_costs(scores: &[f64], base_cost: f64) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let breaks = quintile_breakpoints(scores);
    scores
        .iter()
        .map(|&s| {
            let bucket = breaks.iter().filter(|&&b| s > b).count();
            QUINTILE_SCALE[bucket] * base_cost
        })
        .collect()
}
