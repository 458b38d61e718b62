//! Error types for the county pipeline.

use thiserror::Error;

use vc_cluster::ClusterError;
use vc_core::CoreError;
use vc_locate::SolveError;
use vc_network::NetworkError;

use crate::tiers::Tier;

/// Errors produced while orchestrating a county run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("demand loading error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("solver error: {0}")]
    Solve(#[from] SolveError),

    #[error("config error: {0}")]
    Config(#[from] CoreError),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tier's configured supply cannot absorb the county demand.  Raised
    /// before the solver runs, with the two minimal fixes spelled out.
    #[error(
        "{tier} tier cannot cover demand: {count} x {capacity:.0} < {total_demand:.0} \
         (need {needed_count} facilities, or per-facility capacity {needed_capacity:.0})"
    )]
    InsufficientSupply {
        tier: Tier,
        count: u32,
        capacity: f64,
        total_demand: f64,
        needed_count: u32,
        needed_capacity: f64,
    },

    /// Nothing left to run on after loading or near-node dedup.
    #[error("empty input: {0}")]
    EmptyInput(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
