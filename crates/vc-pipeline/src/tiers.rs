//! Facility tiers, demand-derived counts, and the pre-flight supply check.

use std::fmt;

use vc_core::{RegionConfig, SiteId};

use crate::catalog::SiteCatalog;
use crate::error::{PipelineError, PipelineResult};

/// Facility tiers, in the order they are solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Staffed centers open for the short window around the peak.
    Short,
    /// Staffed centers open for the whole period.
    Long,
    /// Unstaffed dropboxes.
    Dropbox,
}

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::Short => "short-term",
            Tier::Long => "long-term",
            Tier::Dropbox => "dropbox",
        }
    }

    /// Demand units one facility of this tier accounts for when deriving
    /// the required count.
    fn unit(self, cfg: &RegionConfig) -> f64 {
        match self {
            Tier::Short => cfg.short_unit,
            Tier::Long => cfg.long_unit,
            Tier::Dropbox => cfg.dropbox_unit,
        }
    }

    /// Serving capacity of one facility of this tier.
    pub fn capacity(self, cfg: &RegionConfig) -> f64 {
        match self {
            Tier::Short => cfg.short_capacity,
            Tier::Long => cfg.long_capacity,
            Tier::Dropbox => cfg.dropbox_capacity,
        }
    }

    fn override_count(self, cfg: &RegionConfig) -> Option<u32> {
        match self {
            Tier::Short => cfg.site_overrides.short,
            Tier::Long => cfg.site_overrides.long,
            Tier::Dropbox => cfg.site_overrides.dropbox,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Facilities required for a tier: the operator override when configured,
/// otherwise `ceil(total_demand / tier unit)`.
pub fn required_count(tier: Tier, total_demand: f64, cfg: &RegionConfig) -> u32 {
    if let Some(n) = tier.override_count(cfg) {
        return n;
    }
    (total_demand / tier.unit(cfg)).ceil() as u32
}

/// Abort before any solver call when a tier's total supply cannot absorb
/// the county demand.
///
/// The error carries the two minimal fixes: the count that would suffice at
/// the configured capacity, and the capacity that would suffice at the
/// configured count.
pub fn preflight(tier: Tier, count: u32, capacity: f64, total_demand: f64) -> PipelineResult<()> {
    if count as f64 * capacity >= total_demand {
        return Ok(());
    }
    Err(PipelineError::InsufficientSupply {
        tier,
        count,
        capacity,
        total_demand,
        needed_count: (total_demand / capacity).ceil() as u32,
        needed_capacity: if count == 0 {
            total_demand.ceil()
        } else {
            (total_demand / count as f64).ceil()
        },
    })
}

/// Everything one tier solve needs beyond the shared demand rows and cost
/// matrix.
#[derive(Debug, Clone)]
pub struct TierPlan {
    pub tier: Tier,
    /// Exact number of facilities to open.
    pub open_count: u32,
    /// Per-facility serving capacity.
    pub capacity: f64,
    /// Per-site opening costs, catalog order.
    pub opening_costs: Vec<f64>,
    /// Sites the solution must include.
    pub forced_open: Vec<SiteId>,
}

impl TierPlan {
    /// Derive the plan for `tier` and run the pre-flight supply check.
    pub fn build(
        tier: Tier,
        cfg: &RegionConfig,
        total_demand: f64,
        catalog: &SiteCatalog,
    ) -> PipelineResult<TierPlan> {
        let open_count = required_count(tier, total_demand, cfg);
        let capacity = tier.capacity(cfg);
        preflight(tier, open_count, capacity, total_demand)?;

        let opening_costs = match tier {
            Tier::Short | Tier::Long => catalog.center_opening_costs(cfg.center_cost_base),
            Tier::Dropbox => catalog.dropbox_opening_costs(cfg.dropbox_cost_base),
        };
        let forced_open = match tier {
            Tier::Short => catalog.fixed_short_sites(),
            Tier::Long => catalog.fixed_long_sites(),
            Tier::Dropbox => Vec::new(),
        };

        Ok(TierPlan { tier, open_count, capacity, opening_costs, forced_open })
    }
}
