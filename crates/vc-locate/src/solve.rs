//! MIP formulation and HiGHS solve.
//!
//! Binary open variables, continuous flow variables, per-candidate capacity
//! rows, pairwise linking rows, and an exact-cardinality row.  Only a
//! provably optimal (or trivially empty) model yields a selection; every
//! other solver status is an error.

use highs::{Col, HighsModelStatus, RowProblem, Sense};
use tracing::{debug, info};

use vc_core::{ClusterId, SiteId};

use crate::error::{SolveError, SolveResult};
use crate::model::FlpProblem;

/// Solver values at or below this magnitude count as zero.
const EPS: f64 = 1e-6;

/// Flow from one demand cluster to one opened site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub cluster: ClusterId,
    pub site: SiteId,
    /// Demand served along this edge.  A cluster may split across sites.
    pub flow: f64,
}

/// An optimal facility selection with its demand assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilitySelection {
    /// Opened sites, in candidate order.
    pub facilities: Vec<SiteId>,
    /// Positive flows, grouped by cluster in demand order.
    pub assignments: Vec<Assignment>,
    /// Total opening cost plus travel-weighted flow.
    pub objective: f64,
}

/// Solve the instance to optimality.
///
/// Returns [`SolveError::Infeasible`] when total capacity under the
/// cardinality row cannot absorb total demand; no partial or degenerate
/// selection is ever produced.
pub fn solve(problem: &FlpProblem<'_>) -> SolveResult<FacilitySelection> {
    problem.validate()?;

    let n_clusters = problem.demand.len();
    let n_candidates = problem.facilities.len();

    let mut pb = RowProblem::new();

    // y[j] = 1 if candidate j opens.  Objective picks up the opening cost.
    let y: Vec<Col> = problem
        .opening_costs
        .iter()
        .map(|&f| pb.add_integer_column(f, 0.0..=1.0))
        .collect();

    // x[i][j] = flow from cluster i to candidate j, bounded by the cluster
    // weight.  Objective picks up minutes per unit of flow.
    let mut x: Vec<Vec<Col>> = Vec::with_capacity(n_clusters);
    for &(cluster, weight) in problem.demand {
        let mut row = Vec::with_capacity(n_candidates);
        for &site in problem.facilities {
            let minutes = problem.cost(cluster, site)?;
            row.push(pb.add_column(minutes, 0.0..=weight));
        }
        x.push(row);
    }

    // Every cluster is served exactly.
    for (i, &(_, weight)) in problem.demand.iter().enumerate() {
        let terms: Vec<(Col, f64)> = x[i].iter().map(|&c| (c, 1.0)).collect();
        pb.add_row(weight..=weight, terms);
    }

    // Inflow at a candidate fits its capacity, and only if it opens:
    // sum_i x[i][j] - M[j]*y[j] <= 0.
    for j in 0..n_candidates {
        let mut terms: Vec<(Col, f64)> = (0..n_clusters).map(|i| (x[i][j], 1.0)).collect();
        terms.push((y[j], -problem.capacities[j]));
        pb.add_row(..=0.0, terms);
    }

    // Pairwise linking: x[i][j] <= d[i]*y[j].  Implied by the capacity rows
    // in any integral solution, but tightens the LP relaxation.
    for (i, &(_, weight)) in problem.demand.iter().enumerate() {
        for j in 0..n_candidates {
            pb.add_row(..=0.0, vec![(x[i][j], 1.0), (y[j], -weight)]);
        }
    }

    // Exactly `open_count` facilities.
    let k = problem.open_count as f64;
    let terms: Vec<(Col, f64)> = y.iter().map(|&c| (c, 1.0)).collect();
    pb.add_row(k..=k, terms);

    // Pin the forced-open candidates.  validate() guarantees membership.
    for &site in problem.forced_open {
        if let Some(j) = problem.facilities.iter().position(|&s| s == site) {
            pb.add_row(1.0..=1.0, vec![(y[j], 1.0)]);
        }
    }

    debug!(
        "siting model: {} clusters x {} candidates, open count {}",
        n_clusters, n_candidates, problem.open_count
    );

    let solved = pb.optimise(Sense::Minimise).solve();
    let status = solved.status();
    match status {
        HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => {}
        HighsModelStatus::Infeasible => {
            return Err(SolveError::Infeasible {
                status: format!("{status:?}"),
            });
        }
        _ => {
            return Err(SolveError::Unexpected {
                status: format!("{status:?}"),
            });
        }
    }

    let sol = solved.get_solution();

    let facilities: Vec<SiteId> = problem
        .facilities
        .iter()
        .zip(&y)
        .filter(|&(_, &c)| sol[c] > EPS)
        .map(|(&site, _)| site)
        .collect();

    let mut assignments = Vec::new();
    for (i, &(cluster, _)) in problem.demand.iter().enumerate() {
        for (j, &site) in problem.facilities.iter().enumerate() {
            let flow = sol[x[i][j]];
            if flow > EPS {
                assignments.push(Assignment { cluster, site, flow });
            }
        }
    }

    let objective = solved.objective_value();
    info!(
        "solved: {} of {} candidates open, objective {:.3}",
        facilities.len(),
        n_candidates,
        objective
    );

    Ok(FacilitySelection {
        facilities,
        assignments,
        objective,
    })
}
