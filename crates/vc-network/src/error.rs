//! Network-subsystem error type.

use thiserror::Error;

/// Errors produced by `vc-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV parse error: {0}")]
    Parse(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
