//! Per-region run configuration.
//!
//! One validated, immutable record per county run.  Every tunable the
//! pipeline reads is named here and checked up front by [`RegionConfig::validate`],
//! so a bad capacity or threshold fails before any stage touches data instead
//! of surfacing as a confusing solver outcome twenty minutes in.

use crate::{CoreError, CoreResult};

/// Explicit per-tier facility-count overrides supplied by the region
/// operator.  `None` keeps the demand-derived count; `Some(n)` replaces it
/// outright.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TierOverrides {
    pub long:    Option<u32>,
    pub short:   Option<u32>,
    pub dropbox: Option<u32>,
}

/// Immutable configuration for one county run.
///
/// Defaults follow the calibrated state-wide values; regions override the
/// fields that vary (short-tier capacity most commonly, the population
/// threshold for very large counties to bound the cost-matrix size).
#[derive(Clone, Debug)]
pub struct RegionConfig {
    // ── Demand aggregation ────────────────────────────────────────────────
    /// Demand mass that one derived cluster should represent.  Cluster count
    /// scales at 2× total_demand / threshold.
    pub population_threshold: f64,
    /// Floor on the derived cluster count, so sparse counties still get
    /// spatial variation.
    pub min_clusters: u32,

    // ── Facility capacities (demand units per open facility) ──────────────
    /// Short-tier capacity.  The usual per-region calibration knob: lower it
    /// to spread sites out, raise it to concentrate them.
    pub short_capacity: f64,
    /// Long-tier capacity.  Larger: these sites stay open far longer.
    pub long_capacity: f64,
    /// Dropbox capacity.
    pub dropbox_capacity: f64,

    // ── Facility-count derivation (demand units per required facility) ────
    pub short_unit:   f64,
    pub long_unit:    f64,
    pub dropbox_unit: f64,

    // ── Opening-cost bases (scaled per site by score quintile) ────────────
    pub center_cost_base:  f64,
    pub dropbox_cost_base: f64,

    /// Operator-supplied per-tier facility counts; validated here, applied by
    /// the orchestrator in place of the derived counts.
    pub site_overrides: TierOverrides,

    // ── Remediation / expansion tuning ────────────────────────────────────
    /// Travel time (minutes) above which a demand cluster is considered
    /// under-served.
    pub travel_threshold_min: f64,
    /// A relocation candidate must cost no more than this fraction of the
    /// cluster's current travel time to be worth taking.
    pub improvement_factor: f64,
    /// How many nearest candidates to probe in substitution and remediation.
    pub candidate_query_k: usize,
    /// Supplemental-expansion multiplier on the short-tier count.
    pub expansion_factor: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            population_threshold: 10_000.0,
            min_clusters:         30,
            short_capacity:       20_000.0,
            long_capacity:        75_000.0,
            dropbox_capacity:     40_000.0,
            short_unit:           10_000.0,
            long_unit:            50_000.0,
            dropbox_unit:         15_000.0,
            center_cost_base:     12_000.0,
            dropbox_cost_base:    7_500.0,
            site_overrides:       TierOverrides::default(),
            travel_threshold_min: 15.0,
            improvement_factor:   0.75,
            candidate_query_k:    5,
            expansion_factor:     1.10,
        }
    }
}

impl RegionConfig {
    /// Defaults with the region's short-tier capacity, the field that varies
    /// for nearly every county.
    pub fn for_region(short_capacity: f64) -> Self {
        Self { short_capacity, ..Self::default() }
    }

    /// Check every numeric range once, before any stage runs.
    pub fn validate(&self) -> CoreResult<()> {
        fn positive(name: &str, v: f64) -> CoreResult<()> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be positive, got {v}")))
            }
        }

        positive("population_threshold", self.population_threshold)?;
        if self.min_clusters == 0 {
            return Err(CoreError::Config("min_clusters must be at least 1".into()));
        }
        positive("short_capacity", self.short_capacity)?;
        positive("long_capacity", self.long_capacity)?;
        positive("dropbox_capacity", self.dropbox_capacity)?;
        positive("short_unit", self.short_unit)?;
        positive("long_unit", self.long_unit)?;
        positive("dropbox_unit", self.dropbox_unit)?;
        if self.center_cost_base < 0.0 || self.dropbox_cost_base < 0.0 {
            return Err(CoreError::Config("opening-cost bases must be non-negative".into()));
        }
        positive("travel_threshold_min", self.travel_threshold_min)?;
        if !(self.improvement_factor > 0.0 && self.improvement_factor <= 1.0) {
            return Err(CoreError::Config(format!(
                "improvement_factor must be in (0, 1], got {}",
                self.improvement_factor
            )));
        }
        if self.candidate_query_k == 0 {
            return Err(CoreError::Config("candidate_query_k must be at least 1".into()));
        }
        if self.expansion_factor < 1.0 {
            return Err(CoreError::Config(format!(
                "expansion_factor must be at least 1.0, got {}",
                self.expansion_factor
            )));
        }
        // A zero dropbox override is legitimate (region runs no dropboxes);
        // zero short/long counts can never serve the county.
        if self.site_overrides.short == Some(0) || self.site_overrides.long == Some(0) {
            return Err(CoreError::Config(
                "short/long site-count overrides must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
