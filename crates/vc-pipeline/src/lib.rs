//! `vc-pipeline` — county-by-county orchestration of the siting pipeline.
//!
//! Takes a county's demand units, road graph, and candidate-site catalog,
//! and produces the per-tier facility selections plus the follow-up lists
//! (off-model substitution, supplemental expansion, travel-time
//! remediation), exported as CSV.
//!
//! # Crate layout
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`catalog`]      | `SiteCatalog` load/prune/persist, quintile costs     |
//! | [`tiers`]        | `Tier`, derived counts, pre-flight check, `TierPlan` |
//! | [`orchestrator`] | `run_county` — the fixed-order stage sequence        |
//! | [`substitute`]   | long-tier fold onto short-tier locations             |
//! | [`remediate`]    | replacement proposals for far-away clusters          |
//! | [`export`]       | CSV output files                                     |
//! | [`error`]        | `PipelineError`, `PipelineResult<T>`                 |

pub mod catalog;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod remediate;
pub mod substitute;
pub mod tiers;


pub use catalog::{CandidateSite, SiteCatalog, SiteRecord, opening_costs};
pub use error::{PipelineError, PipelineResult};
pub use export::write_outputs;
pub use orchestrator::{CountyOutputs, run_county};
pub use remediate::remediation_sites;
pub use substitute::substitute_into_short;
pub use tiers::{Tier, TierPlan, preflight, required_count};
