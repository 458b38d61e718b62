//! `vc-network` — road graph, snapping, and the travel-cost matrix.
//!
//! Everything between "here are demand points and candidate sites" and
//! "here is the travel time between every pair of them" lives in this crate.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `RoadGraph` (CSR + R-tree), `RoadGraphBuilder`               |
//! | [`speed`]  | road-class speed table, `travel_minutes`, `travel_ms`        |
//! | [`loader`] | `load_graph_csv`, `load_graph_readers`                       |
//! | [`route`]  | Dijkstra: `shortest_cost_ms`, one-to-many `costs_from`       |
//! | [`snap`]   | `snap_points` near-node mapping with duplicate resolution    |
//! | [`store`]  | `CostStore` — persisted, resumable pair costs                |
//! | [`matrix`] | `build_cost_matrix`, `CostMatrix`, `SENTINEL_MINUTES`        |
//! | [`error`]  | `NetworkError`, `NetworkResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Rayon fan-out of the per-origin Dijkstra passes.            |

pub mod error;
pub mod graph;
pub mod loader;
pub mod matrix;
pub mod route;
pub mod snap;
pub mod speed;
pub mod store;


pub use error::{NetworkError, NetworkResult};
pub use graph::{RoadGraph, RoadGraphBuilder};
pub use loader::{load_graph_csv, load_graph_readers};
pub use matrix::{CostMatrix, SENTINEL_MINUTES, build_cost_matrix, build_cost_store, translate};
pub use route::{costs_from, shortest_cost_ms};
pub use snap::{NearNodeMap, snap_points};
pub use speed::{speed_kmh, travel_minutes, travel_ms};
pub use store::CostStore;
