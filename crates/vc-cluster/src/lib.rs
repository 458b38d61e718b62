//! `vc-cluster` — demand aggregation for the county siting pipeline.
//!
//! Reduces thousands of population-bearing geographic units into a bounded
//! set of demand points by deterministic spatial clustering, each point
//! carrying the summed demand weight of its member units.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`loader`]    | `DemandUnit`, `load_units_csv`, `load_units_reader`   |
//! | [`kmeans`]    | deterministic Lloyd iteration over planar points      |
//! | [`aggregate`] | `cluster_count` rule, `aggregate`, `DemandPoint`      |
//! | [`error`]     | `ClusterError`, `ClusterResult<T>`                    |

pub mod aggregate;
pub mod error;
pub mod kmeans;
pub mod loader;


pub use aggregate::{DemandPoint, aggregate, cluster_count};
pub use error::{ClusterError, ClusterResult};
pub use kmeans::kmeans;
pub use loader::{DemandUnit, load_units_csv, load_units_reader};
