//! `vc-core` — foundational types for the county siting pipeline.
//!
//! This crate is a dependency of every other `vc-*` crate.  It intentionally
//! has no `vc-*` dependencies and only `thiserror` externally.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `UnitId`, `ClusterId`, `SiteId`, `NodeId`, `EdgeId`       |
//! | [`geo`]    | `GeoPoint`, squared-distance and centroid helpers         |
//! | [`config`] | `RegionConfig`, `TierOverrides`                           |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RegionConfig, TierOverrides};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{ClusterId, EdgeId, NodeId, SiteId, UnitId};
