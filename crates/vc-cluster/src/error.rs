//! Demand-aggregation error type.

use thiserror::Error;

/// Errors produced by `vc-cluster`.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Parse(String),
}

pub type ClusterResult<T> = Result<T, ClusterError>;
