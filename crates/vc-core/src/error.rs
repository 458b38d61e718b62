//! Core error type.
//!
//! Sub-crates define their own error enums and either wrap `CoreError` as a
//! variant or convert via `From`; both patterns appear downstream, whichever
//! keeps the error sites clean.

use thiserror::Error;

/// Errors raised by core configuration and shared plumbing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `vc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
