//! Error types for model construction and solving.

use thiserror::Error;

use vc_core::{ClusterId, SiteId};

/// Errors produced while building or solving a siting model.
#[derive(Debug, Error)]
pub enum SolveError {
    /// No assignment satisfies the capacity and cardinality rows.
    #[error("siting model is infeasible (solver status: {status})")]
    Infeasible { status: String },

    /// The solver stopped with a status this crate does not handle.
    #[error("unexpected solver status: {status}")]
    Unexpected { status: String },

    /// A demand/site pair has no entry in the cost matrix.
    #[error("no travel cost for {cluster} -> {site}")]
    MissingCost { cluster: ClusterId, site: SiteId },

    /// The problem statement is internally inconsistent.
    #[error("invalid siting model: {0}")]
    Model(String),
}

pub type SolveResult<T> = Result<T, SolveError>;
