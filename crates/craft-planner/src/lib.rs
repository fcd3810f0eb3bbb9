//! Ranked crafting plans.
//!
//! [`Planner`] runs the whole pipeline for one request: build the recipe tree, prune it against
//! the world snapshot, pull a bounded number of plans from every enumeration strategy, rank
//! them, then post-process the survivors with the enabled optimizers.

#![forbid(unsafe_code)]

mod config;
mod optimize;
mod orchestrator;
mod planner;
mod worker;

pub use config::{OptimizerConfig, PlannerConfig};
pub use craft_paths::Strategy;
pub use optimize::{dedupe_persistent_items, hoist_mining};
pub use orchestrator::{distance_score, generate_top_n, generate_top_n_parallel, rank};
pub use planner::{PlanOptions, Planner};
pub use worker::{StrategyJob, StrategyOutcome, StrategyReply};
