//! Problem statement for the capacitated siting model.

use vc_core::{ClusterId, SiteId};
use vc_network::CostMatrix;

use crate::error::{SolveError, SolveResult};

/// A capacitated facility-location instance.
///
/// Borrows everything; the solver copies nothing until it builds columns.
/// `facilities`, `capacities`, and `opening_costs` are parallel arrays in
/// candidate order, and `demand` is in ascending [`ClusterId`] order.
///
/// The cost matrix must hold an entry for every demand/candidate pair; a
/// missing entry is a modelling error, not an unreachable pair (those carry
/// a finite sentinel cost instead).
#[derive(Debug, Clone, Copy)]
pub struct FlpProblem<'a> {
    /// Demand clusters with their weights.
    pub demand: &'a [(ClusterId, f64)],
    /// Candidate facility ids.
    pub facilities: &'a [SiteId],
    /// Capacity of each candidate.
    pub capacities: &'a [f64],
    /// One-time opening cost of each candidate.
    pub opening_costs: &'a [f64],
    /// Travel minutes for every demand/candidate pair.
    pub costs: &'a CostMatrix,
    /// Number of facilities the solution must open, exactly.
    pub open_count: usize,
    /// Candidates that must be open in any solution.
    pub forced_open: &'a [SiteId],
}

impl FlpProblem<'_> {
    /// Check that the parallel arrays and counts line up before solving.
    pub fn validate(&self) -> SolveResult<()> {
        if self.capacities.len() != self.facilities.len() {
            return Err(SolveError::Model(format!(
                "{} capacities for {} candidates",
                self.capacities.len(),
                self.facilities.len()
            )));
        }
        if self.opening_costs.len() != self.facilities.len() {
            return Err(SolveError::Model(format!(
                "{} opening costs for {} candidates",
                self.opening_costs.len(),
                self.facilities.len()
            )));
        }
        if self.open_count > self.facilities.len() {
            return Err(SolveError::Model(format!(
                "cannot open {} of {} candidates",
                self.open_count,
                self.facilities.len()
            )));
        }
        if self.forced_open.len() > self.open_count {
            return Err(SolveError::Model(format!(
                "{} forced-open sites exceed the open count {}",
                self.forced_open.len(),
                self.open_count
            )));
        }
        for &site in self.forced_open {
            if !self.facilities.contains(&site) {
                return Err(SolveError::Model(format!(
                    "forced-open {site} is not a candidate"
                )));
            }
        }
        for &(cluster, weight) in self.demand {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(SolveError::Model(format!(
                    "demand weight for {cluster} is {weight}"
                )));
            }
        }
        Ok(())
    }

    /// Travel minutes for one pair, or the missing-entry error.
    pub(crate) fn cost(&self, cluster: ClusterId, site: SiteId) -> SolveResult<f64> {
        self.costs
            .cost(cluster, site)
            .ok_or(SolveError::MissingCost { cluster, site })
    }
}
