//! `vc-locate` — capacitated facility location on the travel-cost matrix.
//!
//! Given demand clusters, candidate sites with capacities and opening costs,
//! and a complete pairwise travel-cost matrix, pick exactly `k` sites and an
//! assignment of demand to them that minimizes opening cost plus total
//! travel.  One solve per facility tier; the orchestrating crate decides the
//! tiers and the candidate pools.
//!
//! # Crate layout
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`model`] | [`FlpProblem`] — borrowed problem statement           |
//! | [`solve`] | MIP build + HiGHS solve, [`FacilitySelection`]        |
//! | [`error`] | [`SolveError`], [`SolveResult<T>`](SolveResult)       |

pub mod error;
pub mod model;
pub mod solve;

#[cfg(test)]
mod tests;

pub use error::{SolveError, SolveResult};
pub use model::FlpProblem;
pub use solve::{Assignment, FacilitySelection, solve};
